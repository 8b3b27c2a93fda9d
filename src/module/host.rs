//! Per-module lifecycle state machine.

use super::{HealthStatus, Module, ModuleMetadata};
use crate::context::Context;
use crate::error::Result;
use crate::lifecycle::LifecycleError;
use axum::Router;
use std::sync::Arc;
use strum_macros::Display;

/// Lifecycle states of a hosted module.
///
/// ```text
/// Uninitialized → Initializing → Initialized → ShuttingDown → ShutDown
///                      ↓                             ↓
///                    Failed                        Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ModuleState {
    Uninitialized,
    Initializing,
    Initialized,
    ShuttingDown,
    ShutDown,
    Failed,
}

/// Drives one [`Module`] through its lifecycle.
///
/// Each transition is checked: initializing twice, or shutting down a module that
/// never finished initializing, fails with [`LifecycleError::InvalidState`] instead
/// of rerunning hooks.
pub struct ModuleHost {
    module: Box<dyn Module>,
    state: ModuleState,
    router: Router,
    context: Option<Arc<Context>>,
}

impl ModuleHost {
    pub fn new<M: Module>(module: M) -> Self {
        Self::from_boxed(Box::new(module))
    }

    pub fn from_boxed(module: Box<dyn Module>) -> Self {
        Self {
            module,
            state: ModuleState::Uninitialized,
            router: Router::new(),
            context: None,
        }
    }

    pub fn name(&self) -> &str {
        self.module.name()
    }

    pub fn state(&self) -> ModuleState {
        self.state
    }

    /// Context stored by [`ModuleHost::initialize`].
    pub fn context(&self) -> Option<&Arc<Context>> {
        self.context.as_ref()
    }

    /// Initialize the module
    ///
    /// Runs `on_before_init`, `setup_services`, `setup_routes` and `on_after_init`
    /// strictly in that order. The first failing hook's error is returned unchanged;
    /// later hooks never run, nothing is rolled back and the module ends up `Failed`.
    pub async fn initialize(&mut self, context: Arc<Context>) -> Result<()> {
        if self.state != ModuleState::Uninitialized {
            return Err(
                LifecycleError::invalid_state(self.name(), "initialize", self.state).into(),
            );
        }

        self.state = ModuleState::Initializing;
        self.context = Some(Arc::clone(&context));

        tracing::info!(
            "Initializing module: {} v{}",
            self.module.name(),
            self.module.version()
        );

        match self.run_init_hooks(&context).await {
            Ok(()) => {
                self.state = ModuleState::Initialized;
                tracing::info!("Module {} initialized successfully", self.module.name());
                Ok(())
            }
            Err(e) => {
                self.state = ModuleState::Failed;
                Err(e)
            }
        }
    }

    async fn run_init_hooks(&mut self, ctx: &Arc<Context>) -> Result<()> {
        tracing::debug!("{}: on_before_init", self.module.name());
        self.module.on_before_init(ctx).await?;

        tracing::debug!("{}: setup_services", self.module.name());
        self.module.setup_services(ctx).await?;

        tracing::debug!("{}: setup_routes", self.module.name());
        self.router = self.module.setup_routes(ctx).await?;

        tracing::debug!("{}: on_after_init", self.module.name());
        self.module.on_after_init(ctx).await
    }

    /// Shut the module down, calling its `cleanup` hook exactly once.
    pub async fn shutdown(&mut self) -> Result<()> {
        if self.state != ModuleState::Initialized {
            return Err(
                LifecycleError::invalid_state(self.name(), "shut down", self.state).into(),
            );
        }

        self.state = ModuleState::ShuttingDown;
        tracing::info!("Shutting down module: {}", self.module.name());

        match self.module.cleanup().await {
            Ok(()) => {
                self.state = ModuleState::ShutDown;
                Ok(())
            }
            Err(e) => {
                self.state = ModuleState::Failed;
                Err(e)
            }
        }
    }

    /// The module's route table, for mounting by the caller.
    ///
    /// Empty until `setup_routes` has run.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn metadata(&self) -> ModuleMetadata {
        ModuleMetadata {
            name: self.module.name().to_string(),
            version: self.module.version().to_string(),
            dependencies: self
                .module
                .dependencies()
                .iter()
                .map(|dep| dep.to_string())
                .collect(),
        }
    }

    pub async fn health_check(&self) -> HealthStatus {
        self.module.health_check().await
    }
}

impl std::fmt::Debug for ModuleHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleHost")
            .field("name", &self.module.name())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
