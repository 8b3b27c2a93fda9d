use crate::context::Context;
use crate::error::Result;
use async_trait::async_trait;
use axum::Router;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

mod host;

pub use host::{ModuleHost, ModuleState};

/// Trait for application modules
///
/// A module is a self-contained unit of functionality: it provisions its services,
/// binds its routes, and may release resources on shutdown. Modules do not drive
/// their own lifecycle; wrap them in a [`ModuleHost`], which runs the hooks in order:
///
/// ```text
/// on_before_init → setup_services → setup_routes → on_after_init
/// ```
///
/// # Example
/// ```
/// use ignitor::prelude::*;
///
/// struct HealthModule;
///
/// #[async_trait]
/// impl Module for HealthModule {
///     fn name(&self) -> &str {
///         "health"
///     }
///
///     fn version(&self) -> &str {
///         "1.0.0"
///     }
///
///     async fn setup_services(&mut self, _ctx: &Arc<Context>) -> ignitor::Result<()> {
///         Ok(())
///     }
///
///     async fn setup_routes(&mut self, _ctx: &Arc<Context>) -> ignitor::Result<Router> {
///         Ok(Router::new().route("/ping", axum::routing::get(|| async { "pong" })))
///     }
/// }
/// ```
#[async_trait]
pub trait Module: Send + Sync + 'static {
    fn name(&self) -> &str;

    fn version(&self) -> &str;

    /// Names of modules this one expects to be initialized first.
    fn dependencies(&self) -> &[&'static str] {
        &[]
    }

    /// Hook called before services are set up
    async fn on_before_init(&mut self, _ctx: &Arc<Context>) -> Result<()> {
        Ok(())
    }

    /// Provision the module's internal services
    async fn setup_services(&mut self, ctx: &Arc<Context>) -> Result<()>;

    /// Build the module's route table
    ///
    /// Runs after [`Module::setup_services`], so handlers can capture the services.
    async fn setup_routes(&mut self, ctx: &Arc<Context>) -> Result<Router>;

    /// Hook called once routes are bound
    async fn on_after_init(&mut self, _ctx: &Arc<Context>) -> Result<()> {
        Ok(())
    }

    /// Release resources when shutting down
    async fn cleanup(&mut self) -> Result<()> {
        Ok(())
    }

    async fn health_check(&self) -> HealthStatus {
        HealthStatus::healthy()
    }
}

/// Snapshot of a module's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleMetadata {
    pub name: String,
    pub version: String,
    pub dependencies: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Health {
    Healthy,
    Unhealthy,
}

/// Result of a module health check.
///
/// Serializes as `{"status":"healthy"}` or `{"status":"unhealthy","details":...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthStatus {
    pub status: Health,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self {
            status: Health::Healthy,
            details: None,
        }
    }

    pub fn unhealthy(details: Option<Value>) -> Self {
        Self {
            status: Health::Unhealthy,
            details,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == Health::Healthy
    }
}
