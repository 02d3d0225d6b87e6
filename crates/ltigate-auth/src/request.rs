//! Incoming request abstraction.
//!
//! [`IncomingRequest`] carries exactly what OAuth 1.0a needs to verify a
//! signature: the HTTP method, the full request URL, and the flattened list
//! of request parameters. Parameters are an ordered list rather than a map so
//! that repeated names survive normalization.
//!
//! Parameters are collected per OAuth 1.0a §3.4.1.3.1: query string pairs are
//! always included, form body pairs only when the request declares
//! `application/x-www-form-urlencoded`.

use tracing::debug;

/// A request as seen by the signature validator. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingRequest {
    method: String,
    url: String,
    params: Vec<(String, String)>,
}

impl IncomingRequest {
    /// Create a request from already-collected parameters.
    pub fn new(
        method: impl Into<String>,
        url: impl Into<String>,
        params: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            params: params.into_iter().collect(),
        }
    }

    /// Build a request from HTTP request parts and the collected body.
    ///
    /// `origin` (e.g. `https://tool.example.com`) overrides the scheme and
    /// authority of the reconstructed URL. Deployments behind a TLS-terminating
    /// proxy need it, since the platform signed the public `https` URL.
    /// Without it the URL comes from an absolute request target, or from the
    /// `Host` header with an `http` scheme.
    #[must_use]
    pub fn from_http(parts: &http::request::Parts, origin: Option<&str>, body: &[u8]) -> Self {
        let url = effective_url(parts, origin);

        let mut params: Vec<(String, String)> = parts
            .uri
            .query()
            .map(|q| decode_pairs(q.as_bytes()))
            .unwrap_or_default();

        if is_form_urlencoded(&parts.headers) {
            params.extend(decode_pairs(body));
        } else if !body.is_empty() {
            debug!("ignoring request body without form-urlencoded content type");
        }

        Self {
            method: parts.method.as_str().to_owned(),
            url,
            params,
        }
    }

    /// The HTTP method as received.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The full request URL, including any query string.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// All request parameters in arrival order.
    #[must_use]
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Value of the first parameter named `name`.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Return a copy with every `name` parameter replaced by a single `value`.
    #[must_use]
    pub fn with_param(&self, name: &str, value: impl Into<String>) -> Self {
        let mut params: Vec<(String, String)> = self
            .params
            .iter()
            .filter(|(k, _)| k != name)
            .cloned()
            .collect();
        params.push((name.to_owned(), value.into()));

        Self {
            method: self.method.clone(),
            url: self.url.clone(),
            params,
        }
    }

    /// Return a copy with a different HTTP method.
    #[must_use]
    pub fn with_method(&self, method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            ..self.clone()
        }
    }

    /// Return a copy with a different URL.
    #[must_use]
    pub fn with_url(&self, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..self.clone()
        }
    }

    /// Consume the request, returning its parameter list.
    #[must_use]
    pub fn into_params(self) -> Vec<(String, String)> {
        self.params
    }
}

/// Reconstruct the URL the platform signed.
fn effective_url(parts: &http::request::Parts, origin: Option<&str>) -> String {
    let path_and_query = parts
        .uri
        .path_and_query()
        .map_or("/", http::uri::PathAndQuery::as_str);

    if let Some(origin) = origin {
        return format!("{}{path_and_query}", origin.trim_end_matches('/'));
    }

    if parts.uri.scheme().is_some() && parts.uri.authority().is_some() {
        return parts.uri.to_string();
    }

    match parts
        .headers
        .get(http::header::HOST)
        .and_then(|v| v.to_str().ok())
    {
        Some(host) => format!("http://{host}{path_and_query}"),
        None => path_and_query.to_owned(),
    }
}

/// Check whether the `Content-Type` header is `application/x-www-form-urlencoded`.
fn is_form_urlencoded(headers: &http::HeaderMap) -> bool {
    headers
        .get(http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<mime::Mime>().ok())
        .is_some_and(|m| m.essence_str() == mime::APPLICATION_WWW_FORM_URLENCODED.essence_str())
}

/// Decode `application/x-www-form-urlencoded` pairs (`+` is a space).
fn decode_pairs(input: &[u8]) -> Vec<(String, String)> {
    form_urlencoded::parse(input)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
