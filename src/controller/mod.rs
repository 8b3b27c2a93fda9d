//! Controller response helpers
//!
//! Handlers take a [`ResponseChannel`] extractor and hand it to one of the
//! [`Controller`] send methods. The channel is consumed by the send, so each
//! request produces exactly one envelope.
//!
//! ```rust,ignore
//! struct ProductController {
//!     service: Arc<ProductService>,
//! }
//!
//! impl Controller for ProductController {}
//!
//! async fn create(
//!     State(controller): State<Arc<ProductController>>,
//!     channel: ResponseChannel,
//!     Json(input): Json<NewProduct>,
//! ) -> ignitor::Result<ApiResponse<Product>> {
//!     let product = controller.service.create(input).await?;
//!     Ok(controller.send_created_response(channel, product, None))
//! }
//! ```

use crate::common::{ApiResponse, StatusCode};
use crate::middleware::RequestId;
use axum::{extract::FromRequestParts, http::request::Parts};
use serde::Serialize;
use std::convert::Infallible;

pub const DEFAULT_CREATED_MESSAGE: &str = "Resource created successfully";

/// The response side of one request.
///
/// Carries the correlation id attached upstream by
/// [`crate::middleware::RequestIdLayer`]; without that layer it carries none.
#[derive(Debug, Clone, Default)]
pub struct ResponseChannel {
    request_id: Option<RequestId>,
}

impl ResponseChannel {
    pub fn new(request_id: Option<RequestId>) -> Self {
        Self { request_id }
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Build the success envelope for this request.
    pub fn send<T: Serialize>(
        self,
        message: Option<String>,
        status: StatusCode,
        data: Option<T>,
    ) -> ApiResponse<T> {
        ApiResponse::new(
            status,
            message,
            data,
            self.request_id.map(RequestId::into_inner),
        )
    }
}

impl<S> FromRequestParts<S> for ResponseChannel
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::new(parts.extensions.get::<RequestId>().cloned()))
    }
}

/// Success-response helpers shared by every controller.
pub trait Controller: Send + Sync {
    /// Send a successful response
    fn send_response<T: Serialize>(
        &self,
        channel: ResponseChannel,
        message: Option<String>,
        status: StatusCode,
        data: Option<T>,
    ) -> ApiResponse<T> {
        channel.send(message, status, data)
    }

    /// Send a `201 Created` response
    ///
    /// `None` uses [`DEFAULT_CREATED_MESSAGE`].
    fn send_created_response<T: Serialize>(
        &self,
        channel: ResponseChannel,
        data: T,
        message: Option<String>,
    ) -> ApiResponse<T> {
        let message = message.unwrap_or_else(|| DEFAULT_CREATED_MESSAGE.to_string());
        self.send_response(channel, Some(message), StatusCode::Created, Some(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode as HttpStatusCode;
    use chrono::{DateTime, Utc};

    struct TestController;

    impl Controller for TestController {}

    #[test]
    fn send_response_fills_the_envelope() {
        let before = Utc::now();
        let channel = ResponseChannel::new(Some(RequestId::new("req-42")));
        let response = TestController.send_response(
            channel,
            Some("Fetched".to_string()),
            StatusCode::Ok,
            Some(vec![1, 2, 3]),
        );

        assert!(response.is_success());
        assert_eq!(response.message(), Some("Fetched"));
        assert_eq!(response.data(), Some(&vec![1, 2, 3]));
        assert_eq!(response.meta().request_id(), Some("req-42"));
        assert_eq!(response.http_status(), HttpStatusCode::OK);

        let stamped = DateTime::parse_from_rfc3339(response.meta().timestamp())
            .unwrap()
            .with_timezone(&Utc);
        let delta = stamped - before;
        assert!(delta.num_milliseconds() >= -1 && delta.num_seconds() < 1);
    }

    #[test]
    fn omitted_message_and_data_stay_absent() {
        let response: ApiResponse<String> =
            TestController.send_response(ResponseChannel::default(), None, StatusCode::Accepted, None);

        assert_eq!(response.message(), None);
        assert_eq!(response.data(), None);
        assert_eq!(response.meta().request_id(), None);
        assert_eq!(response.http_status(), HttpStatusCode::ACCEPTED);
    }

    #[test]
    fn created_response_defaults_its_message() {
        let response = TestController.send_created_response(ResponseChannel::default(), "new", None);
        assert_eq!(response.message(), Some(DEFAULT_CREATED_MESSAGE));
        assert_eq!(response.http_status(), HttpStatusCode::CREATED);

        let response = TestController.send_created_response(
            ResponseChannel::default(),
            "new",
            Some("Product added".to_string()),
        );
        assert_eq!(response.message(), Some("Product added"));
    }
}
