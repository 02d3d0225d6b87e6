//! JSON response construction and failure mapping.

use bytes::Bytes;
use http_body_util::Full;
use ltigate_core::ValidationFailure;
use serde::Serialize;

/// Response body type for every ltigate response.
pub type LtiBody = Full<Bytes>;

/// Content type of every response body.
pub const CONTENT_TYPE: &str = "application/json";

/// Build a JSON response with the given status.
///
/// Falls back to an empty `500` if `value` cannot be serialized.
#[must_use]
pub fn json_response<T: Serialize>(
    status: http::StatusCode,
    value: &T,
) -> http::Response<LtiBody> {
    match serde_json::to_vec(value) {
        Ok(json) => build(status, Bytes::from(json)),
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize response body");
            build(http::StatusCode::INTERNAL_SERVER_ERROR, Bytes::new())
        }
    }
}

/// Build an error response.
///
/// ```json
/// { "error": "invalid_credentials", "message": "Invalid LTI request" }
/// ```
#[must_use]
pub fn error_response(
    status: http::StatusCode,
    code: &str,
    message: &str,
) -> http::Response<LtiBody> {
    json_response(
        status,
        &serde_json::json!({
            "error": code,
            "message": message,
        }),
    )
}

/// Convert a launch [`ValidationFailure`] into its HTTP response.
#[must_use]
pub fn failure_to_response(failure: ValidationFailure) -> http::Response<LtiBody> {
    error_response(
        failure.status_code(),
        failure.failure_code(),
        &failure.to_string(),
    )
}

fn build(status: http::StatusCode, body: Bytes) -> http::Response<LtiBody> {
    let mut response = http::Response::new(Full::new(body));
    *response.status_mut() = status;
    response.headers_mut().insert(
        http::header::CONTENT_TYPE,
        http::HeaderValue::from_static(CONTENT_TYPE),
    );
    response
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;

    async fn body_json(response: http::Response<LtiBody>) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_should_format_failure_response() {
        let response = failure_to_response(ValidationFailure::InvalidSignature);
        assert_eq!(response.status(), http::StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            CONTENT_TYPE
        );

        let json = body_json(response).await;
        assert_eq!(json["error"], "invalid_credentials");
        assert_eq!(json["message"], "Invalid LTI request");
    }

    #[tokio::test]
    async fn test_should_map_malformed_request_to_bad_request() {
        let response = failure_to_response(ValidationFailure::MalformedRequest);
        assert_eq!(response.status(), http::StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "bad_request");
    }

    #[tokio::test]
    async fn test_should_build_json_success_response() {
        let response = json_response(http::StatusCode::OK, &serde_json::json!({"ok": true}));
        assert_eq!(response.status(), http::StatusCode::OK);
        assert_eq!(body_json(response).await["ok"], true);
    }
}
