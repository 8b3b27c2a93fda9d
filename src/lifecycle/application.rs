//! Application Bootstrap
//!
//! Brings up a [`Context`] and a set of modules in dependency order, and takes
//! them down again in reverse.

use super::{LifecycleError, graph};
use crate::context::Context;
use crate::error::{IgnitorError, Result};
use crate::module::{Health, HealthStatus, Module, ModuleHost, ModuleMetadata};
use axum::Router;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// A running set of initialized modules sharing one [`Context`].
///
/// # Example
///
/// ```rust,ignore
/// use ignitor::lifecycle::Application;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let mut app = Application::builder()
///         .context(context)
///         .module(UsersModule::default())
///         .module(OrdersModule::default())
///         .init_timeout(Duration::from_secs(30))
///         .build()
///         .await?;
///
///     let router = app.router();
///     // Serve router...
///
///     app.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct Application {
    context: Arc<Context>,
    modules: Vec<ModuleHost>,
}

/// Aggregated health of every module.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationHealth {
    pub status: Health,
    pub modules: BTreeMap<String, HealthStatus>,
}

impl Application {
    /// Create a new application builder
    pub fn builder() -> ApplicationBuilder {
        ApplicationBuilder::new()
    }

    pub fn context(&self) -> &Arc<Context> {
        &self.context
    }

    /// Hosted modules, in initialization order.
    pub fn modules(&self) -> &[ModuleHost] {
        &self.modules
    }

    pub fn metadata(&self) -> Vec<ModuleMetadata> {
        self.modules.iter().map(ModuleHost::metadata).collect()
    }

    /// Every module router merged into one.
    ///
    /// Modules own their paths; overlapping routes panic, as with [`Router::merge`].
    pub fn router(&self) -> Router {
        self.modules
            .iter()
            .fold(Router::new(), |router, module| router.merge(module.router()))
    }

    pub async fn health(&self) -> ApplicationHealth {
        let mut modules = BTreeMap::new();
        for module in &self.modules {
            modules.insert(module.name().to_string(), module.health_check().await);
        }

        let status = if modules.values().all(HealthStatus::is_healthy) {
            Health::Healthy
        } else {
            Health::Unhealthy
        };

        ApplicationHealth { status, modules }
    }

    /// Perform graceful shutdown
    ///
    /// Modules shut down in reverse initialization order, then the context closes
    /// its connection. Failures are logged and do not stop the remaining steps; the
    /// first one is returned.
    pub async fn shutdown(&mut self) -> Result<()> {
        tracing::info!("Shutting down application...");

        let mut first_error = shutdown_modules(&mut self.modules).await;
        if let Err(e) = self.context.shutdown().await {
            tracing::error!("Error during context shutdown: {}", e);
            first_error.get_or_insert(e);
        }

        tracing::info!("Application shutdown complete");
        first_error.map_or(Ok(()), Err)
    }
}

/// Builder for Application
pub struct ApplicationBuilder {
    context: Option<Arc<Context>>,
    modules: Vec<ModuleHost>,
    init_timeout: Option<Duration>,
}

impl Default for ApplicationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationBuilder {
    pub fn new() -> Self {
        Self {
            context: None,
            modules: Vec::new(),
            init_timeout: None,
        }
    }

    pub fn context(mut self, context: Arc<Context>) -> Self {
        self.context = Some(context);
        self
    }

    /// Register a module. Registration order only matters between modules that
    /// do not depend on each other.
    pub fn module<M: Module>(mut self, module: M) -> Self {
        self.modules.push(ModuleHost::new(module));
        self
    }

    pub fn boxed_module(mut self, module: Box<dyn Module>) -> Self {
        self.modules.push(ModuleHost::from_boxed(module));
        self
    }

    /// Bound the time each module may spend initializing
    pub fn init_timeout(mut self, timeout: Duration) -> Self {
        self.init_timeout = Some(timeout);
        self
    }

    /// Build and initialize the application
    ///
    /// This will:
    /// 1. Resolve the module order from declared dependencies
    /// 2. Open the context's database connection
    /// 3. Initialize every module in order
    ///
    /// # Errors
    ///
    /// Dependency problems are reported before anything is initialized. If a module
    /// fails, the modules already up are shut down in reverse, the context is closed,
    /// and the module's error is returned.
    pub async fn build(self) -> Result<Application> {
        let context = self
            .context
            .ok_or_else(|| LifecycleError::init_failed("Context not provided"))?;

        let metadata: Vec<ModuleMetadata> = self.modules.iter().map(ModuleHost::metadata).collect();
        let order = graph::resolve_order(&metadata)?;

        let mut slots: Vec<Option<ModuleHost>> = self.modules.into_iter().map(Some).collect();
        let ordered: Vec<ModuleHost> = order.iter().filter_map(|&i| slots[i].take()).collect();

        tracing::info!(
            "Starting application initialization ({} modules)...",
            ordered.len()
        );

        context.initialize().await?;

        let mut initialized = Vec::with_capacity(ordered.len());
        for mut module in ordered {
            let name = module.name().to_string();
            let result = match self.init_timeout {
                Some(timeout) => {
                    tokio::time::timeout(timeout, module.initialize(Arc::clone(&context)))
                        .await
                        .unwrap_or_else(|_| {
                            Err(LifecycleError::timeout(
                                format!("initialization of {}", name),
                                format!("Timeout after {:?}", timeout),
                            )
                            .into())
                        })
                }
                None => module.initialize(Arc::clone(&context)).await,
            };

            if let Err(e) = result {
                tracing::error!("Module {} failed to initialize: {}", name, e);
                shutdown_modules(&mut initialized).await;
                if let Err(close_err) = context.shutdown().await {
                    tracing::error!("Error during context shutdown: {}", close_err);
                }
                return Err(e);
            }

            initialized.push(module);
        }

        tracing::info!("Application initialization complete");

        Ok(Application {
            context,
            modules: initialized,
        })
    }
}

/// Shut modules down in reverse order, logging failures and continuing.
async fn shutdown_modules(modules: &mut [ModuleHost]) -> Option<IgnitorError> {
    let mut first_error = None;

    for module in modules.iter_mut().rev() {
        if let Err(e) = module.shutdown().await {
            tracing::error!("Shutdown failed for module {}: {}", module.name(), e);
            first_error.get_or_insert(e);
        }
    }

    first_error
}
