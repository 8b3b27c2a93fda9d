//! Lifecycle-specific error types

use crate::persistence::PersistenceError;
use thiserror::Error;

/// Errors that can occur during lifecycle operations
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Module or context initialization failed
    #[error("Initialization failed: {0}")]
    InitializationFailed(String),

    /// Operation timed out
    #[error("Timeout during {phase}: {message}")]
    Timeout {
        /// The lifecycle phase where timeout occurred
        phase: String,
        /// Additional error message
        message: String,
    },

    /// A lifecycle method was called out of order or twice
    #[error("Cannot {operation} {component}: currently {state}")]
    InvalidState {
        /// Module name, or `context`
        component: String,
        /// The rejected operation
        operation: &'static str,
        /// State at the time of the call
        state: String,
    },

    /// Opening or closing the database connection failed
    #[error("Database {operation} failed: {source}")]
    Connection {
        operation: &'static str,
        #[source]
        source: PersistenceError,
    },

    #[error("Module '{module}' depends on '{dependency}', which is not registered")]
    MissingDependency { module: String, dependency: String },

    #[error("Circular module dependency detected: {cycle}")]
    CircularDependency { cycle: String },

    #[error("Module '{0}' is registered more than once")]
    DuplicateModule(String),
}

impl LifecycleError {
    /// Create an initialization failure error
    pub fn init_failed(msg: impl Into<String>) -> Self {
        Self::InitializationFailed(msg.into())
    }

    /// Create a timeout error
    pub fn timeout(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Timeout {
            phase: phase.into(),
            message: message.into(),
        }
    }

    /// Create an out-of-order call error
    pub fn invalid_state(
        component: impl Into<String>,
        operation: &'static str,
        state: impl ToString,
    ) -> Self {
        Self::InvalidState {
            component: component.into(),
            operation,
            state: state.to_string(),
        }
    }
}

/// A specialized Result type for lifecycle operations
pub type Result<T> = std::result::Result<T, LifecycleError>;
