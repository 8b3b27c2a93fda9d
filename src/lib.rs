//! # Ignitor
//!
//! Scaffolding for modular CRUD backends on axum.
//!
//! Ignitor does not store data or serve HTTP by itself. It defines the contracts
//! the pieces of a backend agree on:
//!
//! - **Modules**: self-contained units with ordered lifecycle hooks
//!   (`on_before_init → setup_services → setup_routes → on_after_init`), a router
//!   and a health check
//! - **Context**: the explicitly passed configuration snapshot and database handle
//! - **Data services**: `find_one`/`create` over a typed persistence model, with
//!   errors normalized to `NotFound` / `Database`
//! - **Controllers**: a uniform success envelope
//!   (`{ success, message, meta: { requestId, timestamp }, data }`)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ignitor::prelude::*;
//! use ignitor::persistence::MemoryDatabase;
//!
//! struct PingModule;
//!
//! #[async_trait]
//! impl Module for PingModule {
//!     fn name(&self) -> &str {
//!         "ping"
//!     }
//!
//!     fn version(&self) -> &str {
//!         "1.0.0"
//!     }
//!
//!     async fn setup_services(&mut self, _ctx: &Arc<Context>) -> ignitor::Result<()> {
//!         Ok(())
//!     }
//!
//!     async fn setup_routes(&mut self, _ctx: &Arc<Context>) -> ignitor::Result<Router> {
//!         Ok(Router::new().route("/ping", axum::routing::get(|| async { "pong" })))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> ignitor::Result<()> {
//!     let config = AppConfig::from_env()?;
//!     let context = Arc::new(Context::new(config, Arc::new(MemoryDatabase::new())));
//!
//!     let mut app = Application::builder()
//!         .context(context)
//!         .module(PingModule)
//!         .build()
//!         .await?;
//!
//!     let router = app.router().layer(RequestIdLayer);
//!     // Serve router...
//!
//!     app.shutdown().await
//! }
//! ```

pub mod common;
pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod middleware;
pub mod module;
pub mod persistence;
pub mod service;

// Re-export core types
pub use common::{ApiResponse, StatusCode};
pub use config::AppConfig;
pub use context::Context;
pub use error::{IgnitorError, Result};
pub use module::{Module, ModuleHost};

// Re-export commonly used types from dependencies
pub use async_trait::async_trait;
pub use axum;

/// Prelude module for convenient imports
///
/// ```
/// use ignitor::prelude::*;
/// ```
pub mod prelude {
    pub use crate::common::{ApiResponse, StatusCode};
    pub use crate::config::AppConfig;
    pub use crate::context::Context;
    pub use crate::controller::{Controller, ResponseChannel};
    pub use crate::error::{IgnitorError, Result};
    pub use crate::lifecycle::{Application, ApplicationBuilder, LifecycleError, shutdown_signal};
    pub use crate::middleware::{RequestId, RequestIdLayer};
    pub use crate::module::{HealthStatus, Module, ModuleHost, ModuleMetadata, ModuleState};
    pub use crate::persistence::{Auditable, DatabaseConnection, Model, PersistenceError};
    pub use crate::service::{DataService, ServiceOptions};
    pub use async_trait::async_trait;
    pub use axum::{
        Json, Router,
        extract::{Path, Query, State},
        response::{IntoResponse, Response},
    };
    pub use std::sync::Arc;
}
