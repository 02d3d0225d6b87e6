//! ltigate configuration.
//!
//! Provides [`LtiConfig`] for the HTTP adapter and server binary. Values are
//! loaded from environment variables. The launch processor never reads this
//! directly: callers resolve [`Credentials`] from it before each launch.

use ltigate_auth::Credentials;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Default cap on a launch request body: 64 KiB.
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

/// Server and credential configuration.
///
/// # Examples
///
/// ```
/// use ltigate_core::config::LtiConfig;
///
/// let config = LtiConfig::default();
/// assert_eq!(config.launch_path, "/lti/launch");
/// assert!(config.credentials().is_none());
/// ```
#[derive(Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct LtiConfig {
    /// Bind address for the server (e.g. `"0.0.0.0:4580"`).
    #[builder(default = String::from("0.0.0.0:4580"))]
    pub gateway_listen: String,

    /// Request path that accepts LTI launches.
    #[builder(default = String::from("/lti/launch"))]
    pub launch_path: String,

    /// Public origin the platform signs against (e.g. `"https://tool.example.com"`).
    ///
    /// Needed when TLS terminates in front of the server.
    #[builder(default)]
    pub public_origin: Option<String>,

    /// Expected `oauth_consumer_key`.
    #[builder(default)]
    pub consumer_key: Option<String>,

    /// Shared consumer secret. Never serialized.
    #[builder(default)]
    #[serde(skip_serializing)]
    pub consumer_secret: Option<String>,

    /// Maximum accepted `oauth_timestamp` skew in seconds; `0` disables the check.
    #[builder(default = 0)]
    pub max_timestamp_skew: u64,

    /// Largest launch request body accepted, in bytes.
    #[builder(default = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,

    /// Emit logs as JSON lines instead of human-readable text.
    #[builder(default)]
    pub log_json: bool,
}

impl Default for LtiConfig {
    fn default() -> Self {
        Self {
            gateway_listen: String::from("0.0.0.0:4580"),
            launch_path: String::from("/lti/launch"),
            public_origin: None,
            consumer_key: None,
            consumer_secret: None,
            max_timestamp_skew: 0,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            log_level: String::from("info"),
            log_json: false,
        }
    }
}

impl std::fmt::Debug for LtiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LtiConfig")
            .field("gateway_listen", &self.gateway_listen)
            .field("launch_path", &self.launch_path)
            .field("public_origin", &self.public_origin)
            .field("consumer_key", &self.consumer_key)
            .field(
                "consumer_secret",
                &self.consumer_secret.as_ref().map(|_| "<REDACTED>"),
            )
            .field("max_timestamp_skew", &self.max_timestamp_skew)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("log_level", &self.log_level)
            .field("log_json", &self.log_json)
            .finish()
    }
}

impl LtiConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables (falling back to defaults):
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `GATEWAY_LISTEN` | `0.0.0.0:4580` |
    /// | `LTI_LAUNCH_PATH` | `/lti/launch` |
    /// | `LTI_PUBLIC_ORIGIN` | *(unset)* |
    /// | `LTI_CONSUMER_KEY` | *(unset)* |
    /// | `LTI_CONSUMER_SECRET` | *(unset)* |
    /// | `LTI_MAX_TIMESTAMP_SKEW` | `0` |
    /// | `LTI_MAX_BODY_BYTES` | `65536` |
    /// | `LOG_LEVEL` | `info` |
    /// | `LOG_FORMAT` | `text` (`json` for JSON lines) |
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("GATEWAY_LISTEN") {
            config.gateway_listen = v;
        }
        if let Ok(v) = std::env::var("LTI_LAUNCH_PATH") {
            config.launch_path = v;
        }
        if let Ok(v) = std::env::var("LTI_PUBLIC_ORIGIN") {
            config.public_origin = non_empty(v);
        }
        if let Ok(v) = std::env::var("LTI_CONSUMER_KEY") {
            config.consumer_key = non_empty(v);
        }
        if let Ok(v) = std::env::var("LTI_CONSUMER_SECRET") {
            config.consumer_secret = non_empty(v);
        }
        if let Ok(v) = std::env::var("LTI_MAX_TIMESTAMP_SKEW") {
            if let Ok(n) = v.parse::<u64>() {
                config.max_timestamp_skew = n;
            }
        }
        if let Ok(v) = std::env::var("LTI_MAX_BODY_BYTES") {
            if let Ok(n) = v.parse::<usize>() {
                config.max_body_bytes = n;
            }
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Ok(v) = std::env::var("LOG_FORMAT") {
            config.log_json = v.eq_ignore_ascii_case("json");
        }

        config
    }

    /// The configured credential pair, if both key and secret are set.
    #[must_use]
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.consumer_key, &self.consumer_secret) {
            (Some(key), Some(secret)) => Some(Credentials::new(key, secret)),
            _ => None,
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
