//! Error types for OAuth 1.0a signature verification.
//!
//! Every reason a signature check can fail has its own [`SignatureError`]
//! variant. Callers that only need a yes/no answer use
//! [`verify`](crate::signature::verify), which collapses all of them to `false`.

/// Errors that can occur while verifying an OAuth 1.0a signed request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    /// A required `oauth_*` parameter is absent or empty.
    #[error("Missing required OAuth parameter: {0}")]
    MissingParam(&'static str),

    /// The signature method is not supported (only `HMAC-SHA1` is supported).
    #[error("Unsupported signature method: {0}")]
    UnsupportedSignatureMethod(String),

    /// `oauth_version` was supplied with a value other than `1.0`.
    #[error("Unsupported OAuth version: {0}")]
    UnsupportedVersion(String),

    /// The request URL has no scheme or host, or cannot be parsed.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    /// The computed signature does not match the provided signature.
    #[error("Signature does not match")]
    SignatureDoesNotMatch,

    /// `oauth_timestamp` is not an integer number of seconds.
    #[error("Invalid oauth_timestamp: {0}")]
    InvalidTimestamp(String),

    /// `oauth_timestamp` lies outside the accepted clock skew window.
    #[error("Request timestamp is outside the accepted window")]
    StaleTimestamp,
}
