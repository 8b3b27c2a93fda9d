use crate::common::StatusCode;
use crate::config::ConfigError;
use crate::lifecycle::LifecycleError;
use axum::{
    Json,
    http::StatusCode as HttpStatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IgnitorError>;

#[derive(Debug, Error)]
pub enum IgnitorError {
    /// The requested record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Any other persistence failure, reclassified at the service boundary.
    #[error("{message}")]
    Database {
        message: String,
        details: DatabaseErrorDetails,
    },

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Diagnostics kept from the underlying persistence failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseErrorDetails {
    pub original_error: String,
    pub code: Option<String>,
}

impl IgnitorError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn database(
        message: impl Into<String>,
        original_error: impl Into<String>,
        code: Option<String>,
    ) -> Self {
        Self::Database {
            message: message.into(),
            details: DatabaseErrorDetails {
                original_error: original_error.into(),
                code,
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            IgnitorError::NotFound(_) => StatusCode::NotFound,
            IgnitorError::Lifecycle(LifecycleError::Timeout { .. }) => {
                StatusCode::ServiceUnavailable
            }
            _ => StatusCode::InternalServerError,
        }
    }
}

impl IntoResponse for IgnitorError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Database details stay in the logs, never on the wire.
        let message = match &self {
            IgnitorError::NotFound(msg) => msg.clone(),
            IgnitorError::Database { message, .. } => message.clone(),
            _ => "Internal Server Error".to_string(),
        };
        let http_status: HttpStatusCode = status.into();

        (
            http_status,
            Json(json!({
                "success": false,
                "error": {
                    "code": status.to_string(),
                    "message": message,
                },
                "meta": {
                    "timestamp": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
                },
            })),
        )
            .into_response()
    }
}
