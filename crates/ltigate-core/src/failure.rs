//! Launch validation failures.

/// Why a launch was rejected.
///
/// A closed set: every rejected launch maps to exactly one variant, and no
/// variant carries request data, so nothing about the request leaks through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ValidationFailure {
    /// The request method was not `POST`.
    #[error("Unsupported method")]
    UnsupportedMethod,

    /// `oauth_consumer_key` did not match the configured consumer key.
    #[error("Invalid request")]
    ConsumerKeyMismatch,

    /// The OAuth signature (or its required parameters) failed verification.
    #[error("Invalid LTI request")]
    InvalidSignature,

    /// A required LTI launch parameter was missing.
    #[error("Malformed LTI launch request")]
    MalformedRequest,
}

impl ValidationFailure {
    /// HTTP status the caller should answer with.
    ///
    /// # Examples
    ///
    /// ```
    /// use ltigate_core::ValidationFailure;
    ///
    /// assert_eq!(ValidationFailure::InvalidSignature.status_code().as_u16(), 401);
    /// assert_eq!(ValidationFailure::MalformedRequest.status_code().as_u16(), 400);
    /// ```
    #[must_use]
    pub fn status_code(self) -> http::StatusCode {
        match self {
            Self::UnsupportedMethod | Self::ConsumerKeyMismatch | Self::MalformedRequest => {
                http::StatusCode::BAD_REQUEST
            }
            Self::InvalidSignature => http::StatusCode::UNAUTHORIZED,
        }
    }

    /// Auth-framework failure code for the rejection.
    #[must_use]
    pub fn failure_code(self) -> &'static str {
        match self {
            Self::UnsupportedMethod | Self::ConsumerKeyMismatch | Self::MalformedRequest => {
                "bad_request"
            }
            Self::InvalidSignature => "invalid_credentials",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_map_failures_to_status_codes() {
        assert_eq!(
            ValidationFailure::UnsupportedMethod.status_code(),
            http::StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ValidationFailure::ConsumerKeyMismatch.status_code(),
            http::StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ValidationFailure::MalformedRequest.status_code(),
            http::StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ValidationFailure::InvalidSignature.status_code(),
            http::StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_should_map_failures_to_failure_codes() {
        assert_eq!(
            ValidationFailure::InvalidSignature.failure_code(),
            "invalid_credentials"
        );
        assert_eq!(
            ValidationFailure::ConsumerKeyMismatch.failure_code(),
            "bad_request"
        );
    }

    #[test]
    fn test_should_not_reveal_key_details_in_message() {
        assert_eq!(
            ValidationFailure::ConsumerKeyMismatch.to_string(),
            "Invalid request"
        );
    }
}
