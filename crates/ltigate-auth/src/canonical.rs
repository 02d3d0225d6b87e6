//! Signature base string construction for OAuth 1.0a.
//!
//! The base string is three percent-encoded components joined by `&`:
//!
//! ```text
//! HTTP-METHOD & enc(base-string-uri) & enc(normalized-parameters)
//! ```
//!
//! Each component is normalized per RFC 5849 §3.4.1 so that the platform and
//! the tool derive byte-identical strings from the same request.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::error::SignatureError;
use crate::request::IncomingRequest;

/// The parameter carrying the signature itself, excluded from the base string.
pub const SIGNATURE_PARAM: &str = "oauth_signature";

/// Characters that must be percent-encoded.
///
/// RFC 5849 §3.6: everything except the unreserved set
/// (A-Z, a-z, 0-9, `-`, `.`, `_`, `~`).
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a string with the OAuth 1.0a rules.
///
/// # Examples
///
/// ```
/// use ltigate_auth::canonical::percent_encode;
///
/// assert_eq!(percent_encode("a b+c~"), "a%20b%2Bc~");
/// ```
#[must_use]
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, OAUTH_ENCODE_SET).to_string()
}

/// Build the base string URI: scheme and host lowercased, default port
/// dropped, query and fragment removed.
///
/// # Examples
///
/// ```
/// use ltigate_auth::canonical::base_string_uri;
///
/// assert_eq!(
///     base_string_uri("HTTPS://Tool.Example.com:443/launch?x=1").unwrap(),
///     "https://tool.example.com/launch"
/// );
/// ```
pub fn base_string_uri(url: &str) -> Result<String, SignatureError> {
    let uri: http::Uri = url
        .parse()
        .map_err(|_| SignatureError::InvalidUrl(url.to_owned()))?;

    let scheme = uri
        .scheme_str()
        .ok_or_else(|| SignatureError::InvalidUrl(url.to_owned()))?
        .to_ascii_lowercase();
    let host = uri
        .host()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| SignatureError::InvalidUrl(url.to_owned()))?
        .to_ascii_lowercase();

    let port = match (scheme.as_str(), uri.port_u16()) {
        ("http", Some(80)) | ("https", Some(443)) | (_, None) => String::new(),
        (_, Some(port)) => format!(":{port}"),
    };

    let path = match uri.path() {
        "" => "/",
        path => path,
    };

    Ok(format!("{scheme}://{host}{port}{path}"))
}

/// Normalize request parameters.
///
/// `oauth_signature` is dropped; every remaining name and value is encoded,
/// pairs are sorted by name then value, and joined as `name=value` with `&`.
/// Repeated names are kept.
///
/// # Examples
///
/// ```
/// use ltigate_auth::canonical::normalize_parameters;
///
/// let params = vec![
///     ("b".to_owned(), "2".to_owned()),
///     ("a".to_owned(), "x y".to_owned()),
///     ("oauth_signature".to_owned(), "ignored".to_owned()),
/// ];
/// assert_eq!(normalize_parameters(&params), "a=x%20y&b=2");
/// ```
#[must_use]
pub fn normalize_parameters(params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .filter(|(k, _)| k != SIGNATURE_PARAM)
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();

    encoded.sort_unstable();

    encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the complete signature base string for a request.
///
/// The query string of the request URL is not read here: the request's
/// parameter list is expected to already contain those pairs.
pub fn signature_base_string(request: &IncomingRequest) -> Result<String, SignatureError> {
    let method = request.method().to_ascii_uppercase();
    let uri = base_string_uri(request.url())?;
    let params = normalize_parameters(request.params());

    Ok(format!(
        "{method}&{}&{}",
        percent_encode(&uri),
        percent_encode(&params)
    ))
}
