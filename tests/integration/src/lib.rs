//! Integration tests for the ltigate server.
//!
//! These tests require a running ltigate server at `localhost:4580`, started
//! with `LTI_CONSUMER_KEY` / `LTI_CONSUMER_SECRET` matching the values below.
//! They are marked `#[ignore]` so they don't run during normal `cargo test`.
//!
//! Run them with:
//! ```text
//! LTI_CONSUMER_KEY=key LTI_CONSUMER_SECRET=secret cargo run -p ltigate-server &
//! cargo test -p ltigate-integration -- --ignored
//! ```

use std::sync::Once;

use ltigate_auth::{Credentials, IncomingRequest};

static INIT: Once = Once::new();

/// Launch path the server is expected to listen on.
pub const LAUNCH_PATH: &str = "/lti/launch";

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Endpoint URL for the server.
#[must_use]
pub fn endpoint_url() -> String {
    std::env::var("LTIGATE_ENDPOINT_URL").unwrap_or_else(|_| "http://localhost:4580".to_owned())
}

/// Full URL of the launch endpoint.
#[must_use]
pub fn launch_url() -> String {
    format!("{}{LAUNCH_PATH}", endpoint_url())
}

/// Consumer credentials the running server was configured with.
#[must_use]
pub fn credentials() -> Credentials {
    let key = std::env::var("LTI_CONSUMER_KEY").unwrap_or_else(|_| "key".to_owned());
    let secret = std::env::var("LTI_CONSUMER_SECRET").unwrap_or_else(|_| "secret".to_owned());
    Credentials::new(key, secret)
}

/// Create an HTTP client for talking to the local server.
#[must_use]
pub fn http_client() -> reqwest::Client {
    init_tracing();
    reqwest::Client::new()
}

/// Build the parameter set of a basic launch for `user_id`, unsigned.
#[must_use]
pub fn launch_params(credentials: &Credentials, user_id: &str) -> Vec<(String, String)> {
    let nonce = uuid::Uuid::new_v4().simple().to_string();
    let timestamp = chrono::Utc::now().timestamp().to_string();
    [
        ("oauth_consumer_key", credentials.consumer_key()),
        ("oauth_signature_method", "HMAC-SHA1"),
        ("oauth_timestamp", timestamp.as_str()),
        ("oauth_nonce", nonce.as_str()),
        ("oauth_version", "1.0"),
        ("lti_message_type", "basic-lti-launch-request"),
        ("lti_version", "LTI-1p0"),
        ("resource_link_id", "integration-link"),
        ("user_id", user_id),
        ("lis_person_name_given", "Ada"),
        ("lis_person_name_family", "Lovelace"),
        ("lis_person_contact_email_primary", "ada@example.com"),
        ("roles", "Instructor"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_owned(), v.to_owned()))
    .collect()
}

/// Sign `params` as a POST to the launch endpoint.
pub fn sign_launch(
    params: Vec<(String, String)>,
    credentials: &Credentials,
) -> anyhow::Result<Vec<(String, String)>> {
    let request = IncomingRequest::new("POST", launch_url(), params);
    let signed = ltigate_auth::sign(&request, credentials)?;
    Ok(signed.into_params())
}

/// Encode `params` as an `application/x-www-form-urlencoded` body.
#[must_use]
pub fn form_body(params: &[(String, String)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish()
}

/// POST a form-encoded launch to the server.
pub async fn post_launch(
    client: &reqwest::Client,
    params: &[(String, String)],
) -> anyhow::Result<reqwest::Response> {
    let response = client
        .post(launch_url())
        .header("content-type", "application/x-www-form-urlencoded")
        .body(form_body(params))
        .send()
        .await?;
    Ok(response)
}

mod test_health;
mod test_launch;
