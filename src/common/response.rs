use axum::{
    Json,
    http::StatusCode as HttpStatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::common::StatusCode;

const RESERVED_META_KEYS: [&str; 2] = ["requestId", "timestamp"];

/// Standard API response envelope
///
/// Every success response leaves the server in this shape:
///
/// ```text
/// { "success": true, "message": "...", "meta": { "requestId": "...", "timestamp": "..." }, "data": ... }
/// ```
///
/// `message`, `meta.requestId` and `data` are omitted when absent. Fields are private:
/// once built, the envelope only changes through [`ApiResponse::with_meta`], which
/// consumes it.
///
/// # Example
/// ```
/// use ignitor::common::ApiResponse;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User {
///     id: String,
/// }
///
/// let response = ApiResponse::success(User { id: "1".to_string() });
/// assert!(response.is_success());
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,

    meta: ResponseMeta,

    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,

    #[serde(skip)]
    http_status: HttpStatusCode,
}

/// Envelope metadata: correlation id, creation instant and any extra entries.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    request_id: Option<String>,

    timestamp: String,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl ResponseMeta {
    pub fn new(request_id: Option<String>, at: DateTime<Utc>) -> Self {
        Self {
            request_id,
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            extra: Map::new(),
        }
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// ISO-8601 UTC instant, millisecond precision, `Z` suffix.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// Build a success envelope stamped with the current instant.
    pub fn new(
        status: StatusCode,
        message: Option<String>,
        data: Option<T>,
        request_id: Option<String>,
    ) -> Self {
        Self {
            success: true,
            message,
            meta: ResponseMeta::new(request_id, Utc::now()),
            data,
            http_status: status.into(),
        }
    }

    /// Create a successful response with data
    ///
    /// Defaults to HTTP 200 OK, no message and no request id.
    pub fn success(data: T) -> Self {
        Self::new(StatusCode::Ok, None, Some(data), None)
    }

    /// Attach an extra `meta` entry.
    ///
    /// `requestId` and `timestamp` are owned by the envelope and are left untouched.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if RESERVED_META_KEYS.contains(&key.as_str()) {
            tracing::debug!("Ignoring reserved meta key: {}", key);
            return self;
        }
        self.meta.extra.insert(key, value.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn meta(&self) -> &ResponseMeta {
        &self.meta
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn http_status(&self) -> HttpStatusCode {
        self.http_status
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.http_status, Json(self)).into_response()
    }
}
