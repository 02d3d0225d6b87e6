//! Consumer credentials for a single LTI platform.
//!
//! The caller resolves [`Credentials`] from its own configuration before each
//! verification; nothing in this crate reads configuration on its own.

/// The shared consumer key/secret pair identifying and authenticating a platform.
///
/// The secret is redacted from the `Debug` output.
///
/// # Examples
///
/// ```
/// use ltigate_auth::Credentials;
///
/// let credentials = Credentials::new("key", "s3cr3t-value");
/// assert_eq!(credentials.consumer_key(), "key");
/// assert!(!format!("{credentials:?}").contains("s3cr3t-value"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    consumer_key: String,
    consumer_secret: String,
}

impl Credentials {
    /// Create a new credential pair.
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }

    /// The consumer key the platform must present in `oauth_consumer_key`.
    #[must_use]
    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    /// The shared secret used to derive the HMAC signing key.
    #[must_use]
    pub fn consumer_secret(&self) -> &str {
        &self.consumer_secret
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<REDACTED>")
            .finish()
    }
}
