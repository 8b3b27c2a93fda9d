//! Application context
//!
//! One [`Context`] is built per process and handed to every module as
//! `Arc<Context>`. It carries the frozen [`AppConfig`] and owns the open/close
//! lifecycle of the shared database connection.

use crate::config::AppConfig;
use crate::error::{IgnitorError, Result};
use crate::lifecycle::LifecycleError;
use crate::persistence::DatabaseConnection;
use std::any::Any;
use std::sync::Arc;
use strum_macros::Display;
use tokio::sync::Mutex;

/// Connection lifecycle of a [`Context`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ContextState {
    /// Built, connection not opened yet
    Created,
    Connected,
    Closed,
}

pub struct Context {
    config: Arc<AppConfig>,
    database: Arc<dyn DatabaseConnection>,
    handle: Arc<dyn Any + Send + Sync>,
    state: Mutex<ContextState>,
}

impl Context {
    pub fn new<D>(config: AppConfig, database: Arc<D>) -> Self
    where
        D: DatabaseConnection,
    {
        Self {
            config: Arc::new(config),
            database: database.clone(),
            handle: database,
            state: Mutex::new(ContextState::Created),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Shared handle to the configuration snapshot.
    pub fn config_handle(&self) -> Arc<AppConfig> {
        Arc::clone(&self.config)
    }

    /// Borrow the database handle as its concrete type.
    ///
    /// # Errors
    /// Returns [`IgnitorError::Internal`] if the context was built with another type.
    pub fn database<D>(&self) -> Result<Arc<D>>
    where
        D: DatabaseConnection,
    {
        Arc::clone(&self.handle).downcast::<D>().map_err(|_| {
            IgnitorError::Internal(format!(
                "Context database is not a {}",
                std::any::type_name::<D>()
            ))
        })
    }

    pub async fn state(&self) -> ContextState {
        *self.state.lock().await
    }

    /// Open the database connection.
    ///
    /// Fails fast with [`LifecycleError::InvalidState`] unless the context is freshly
    /// created. A connection failure is logged and returned; the state stays
    /// `Created`.
    pub async fn initialize(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        if *state != ContextState::Created {
            return Err(LifecycleError::invalid_state("context", "initialize", *state).into());
        }

        self.database.connect().await.map_err(|source| {
            tracing::error!(code = ?source.code, "Database connection failed: {}", source);
            LifecycleError::Connection {
                operation: "connect",
                source,
            }
        })?;

        *state = ContextState::Connected;
        tracing::info!("Database connected successfully");
        Ok(())
    }

    /// Close the database connection.
    ///
    /// Only valid after a successful [`Context::initialize`]. A disconnect failure is
    /// logged and returned; the state stays `Connected`.
    pub async fn shutdown(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        if *state != ContextState::Connected {
            return Err(LifecycleError::invalid_state("context", "shut down", *state).into());
        }

        self.database.disconnect().await.map_err(|source| {
            tracing::error!(code = ?source.code, "Database disconnection failed: {}", source);
            LifecycleError::Connection {
                operation: "disconnect",
                source,
            }
        })?;

        *state = ContextState::Closed;
        tracing::info!("Database disconnected successfully");
        Ok(())
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
