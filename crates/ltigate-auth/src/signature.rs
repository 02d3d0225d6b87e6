//! OAuth 1.0a HMAC-SHA1 signing and verification.
//!
//! ```text
//! key       = enc(consumer_secret) + "&" + enc(token_secret)
//! signature = Base64(HMAC-SHA1(key, base_string))
//! ```
//!
//! LTI launches never carry a token, so the token secret is always empty and
//! the key is `enc(consumer_secret) + "&"`.
//!
//! The main entry points are [`verify`] (a plain yes/no answer) and
//! [`verify_signature`] (the same check with a diagnostic error).

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, KeyInit, Mac};
use sha1::Sha1;
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::canonical::{SIGNATURE_PARAM, percent_encode, signature_base_string};
use crate::credentials::Credentials;
use crate::error::SignatureError;
use crate::request::IncomingRequest;

/// The only signature method supported by this implementation.
pub const SUPPORTED_SIGNATURE_METHOD: &str = "HMAC-SHA1";

/// The only `oauth_version` accepted when the parameter is present.
const SUPPORTED_VERSION: &str = "1.0";

/// OAuth parameters every signed launch must carry, in check order.
const REQUIRED_OAUTH_PARAMS: &[&str] = &[
    "oauth_consumer_key",
    "oauth_signature_method",
    "oauth_timestamp",
    "oauth_nonce",
    SIGNATURE_PARAM,
];

type HmacSha1 = Hmac<Sha1>;

/// Verify the OAuth 1.0a signature of a request.
///
/// Returns `false` for any failure, including missing OAuth parameters, an
/// unsupported signature method, or an unparsable URL.
#[must_use]
pub fn verify(request: &IncomingRequest, credentials: &Credentials) -> bool {
    verify_signature(request, credentials).is_ok()
}

/// Verify the OAuth 1.0a signature of a request, reporting why it failed.
///
/// This function:
/// 1. Checks the structural OAuth preconditions
/// 2. Rebuilds the signature base string
/// 3. Computes the expected signature with the consumer secret
/// 4. Compares signatures using constant-time comparison
///
/// # Errors
///
/// Returns a [`SignatureError`] describing the first failed check.
pub fn verify_signature(
    request: &IncomingRequest,
    credentials: &Credentials,
) -> Result<(), SignatureError> {
    check_oauth_params(request)?;

    let provided_signature = request
        .param(SIGNATURE_PARAM)
        .ok_or(SignatureError::MissingParam(SIGNATURE_PARAM))?;

    let base_string = signature_base_string(request)?;

    debug!(base_string = %base_string, "Built OAuth signature base string");

    let expected_signature = compute_signature(&base_string, credentials);

    if provided_signature
        .as_bytes()
        .ct_eq(expected_signature.as_bytes())
        .into()
    {
        debug!(
            consumer_key = %credentials.consumer_key(),
            "OAuth signature verification succeeded"
        );
        Ok(())
    } else {
        debug!(
            expected = %expected_signature,
            provided = %provided_signature,
            "OAuth signature mismatch"
        );
        Err(SignatureError::SignatureDoesNotMatch)
    }
}

/// Sign a request, returning a copy carrying `oauth_signature`.
///
/// Any existing `oauth_signature` is replaced. The request must already carry
/// the other OAuth parameters; they are part of what gets signed.
///
/// # Errors
///
/// Returns [`SignatureError::InvalidUrl`] if the request URL cannot be used to
/// build a base string.
pub fn sign(
    request: &IncomingRequest,
    credentials: &Credentials,
) -> Result<IncomingRequest, SignatureError> {
    let base_string = signature_base_string(request)?;
    let signature = compute_signature(&base_string, credentials);
    Ok(request.with_param(SIGNATURE_PARAM, signature))
}

/// Compute `Base64(HMAC-SHA1(enc(secret) + "&", base_string))`.
///
/// # Examples
///
/// ```
/// use ltigate_auth::Credentials;
/// use ltigate_auth::signature::compute_signature;
///
/// let sig = compute_signature("data", &Credentials::new("key", "secret"));
/// assert_eq!(sig.len(), 28);
/// ```
#[must_use]
pub fn compute_signature(base_string: &str, credentials: &Credentials) -> String {
    let signing_key = format!("{}&", percent_encode(credentials.consumer_secret()));
    let mut mac =
        HmacSha1::new_from_slice(signing_key.as_bytes()).expect("HMAC can accept any key length");
    mac.update(base_string.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

/// Check the OAuth parameters a launch cannot be valid without.
fn check_oauth_params(request: &IncomingRequest) -> Result<(), SignatureError> {
    for &name in REQUIRED_OAUTH_PARAMS {
        if request.param(name).is_none_or(str::is_empty) {
            return Err(SignatureError::MissingParam(name));
        }
    }

    let method = request.param("oauth_signature_method").unwrap_or_default();
    if method != SUPPORTED_SIGNATURE_METHOD {
        return Err(SignatureError::UnsupportedSignatureMethod(method.to_owned()));
    }

    if let Some(version) = request.param("oauth_version") {
        if version != SUPPORTED_VERSION {
            return Err(SignatureError::UnsupportedVersion(version.to_owned()));
        }
    }

    Ok(())
}
