//! Errors raised by the HTTP adapter itself, outside launch validation.

use crate::response::{LtiBody, error_response};

/// Transport-level and handler errors.
///
/// Launch rejections are not errors here: they are
/// [`ValidationFailure`](ltigate_core::ValidationFailure) values.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// The request body could not be read.
    #[error("Failed to read request body: {0}")]
    BodyRead(String),

    /// The request body exceeded the configured cap, in bytes.
    #[error("Request body exceeds {0} bytes")]
    PayloadTooLarge(usize),

    /// No consumer key/secret pair is configured.
    #[error("LTI consumer credentials are not configured")]
    NotConfigured,

    /// `oauth_timestamp` is outside the accepted window.
    #[error("Launch request has expired")]
    StaleRequest,

    /// The launch handler failed.
    #[error("Launch handler failed: {0}")]
    Handler(String),
}

impl HttpError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status_code(&self) -> http::StatusCode {
        match self {
            Self::BodyRead(_) => http::StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => http::StatusCode::PAYLOAD_TOO_LARGE,
            Self::NotConfigured => http::StatusCode::SERVICE_UNAVAILABLE,
            Self::StaleRequest => http::StatusCode::UNAUTHORIZED,
            Self::Handler(_) => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::BodyRead(_) => "bad_request",
            Self::PayloadTooLarge(_) => "payload_too_large",
            Self::NotConfigured => "not_configured",
            Self::StaleRequest => "stale_request",
            Self::Handler(_) => "internal_error",
        }
    }

    /// Convert into an HTTP response.
    ///
    /// Handler failures are logged; the client only sees a generic message.
    #[must_use]
    pub fn into_response(self) -> http::Response<LtiBody> {
        let message = match &self {
            Self::Handler(detail) => {
                tracing::error!(detail = %detail, "launch handler failed");
                String::from("Internal server error")
            }
            _ => self.to_string(),
        };
        error_response(self.status_code(), self.code(), &message)
    }
}
