//! LTI launch processing.
//!
//! [`LaunchProcessor::process`] runs the launch checks in a fixed order and
//! stops at the first failure:
//!
//! 1. The request method must be `POST`.
//! 2. `oauth_consumer_key` must equal the configured consumer key.
//! 3. The OAuth signature must verify.
//! 4. The required LTI launch parameters must be present.
//!
//! The consumer key is compared before the signature so that misconfigured
//! platforms get a distinguishable failure reason without any HMAC work.
//! Only when all four checks pass is an [`Identity`] built, from the same
//! parameters the signature covered.

use ltigate_auth::{Credentials, IncomingRequest, verify_signature};
use tracing::{debug, info};

use crate::failure::ValidationFailure;
use crate::identity::Identity;

/// The only method an LTI launch may use.
const LAUNCH_METHOD: &str = "POST";

/// LTI parameters every basic launch must carry.
pub const REQUIRED_LAUNCH_PARAMS: &[&str] = &[
    "lti_message_type",
    "lti_version",
    "resource_link_id",
    "user_id",
];

/// Validates LTI launches and extracts the launching user's identity.
///
/// Holds no state: a single value can serve any number of concurrent launches.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaunchProcessor;

impl LaunchProcessor {
    /// Create a new processor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Validate a launch and, on success, return the launching user's identity.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationFailure`] of the first check that failed.
    pub fn process(
        &self,
        request: &IncomingRequest,
        credentials: &Credentials,
    ) -> Result<Identity, ValidationFailure> {
        if request.method() != LAUNCH_METHOD {
            info!(method = %request.method(), "LTI: request method unsupported");
            return Err(ValidationFailure::UnsupportedMethod);
        }

        let consumer_key = request.param("oauth_consumer_key");
        if consumer_key != Some(credentials.consumer_key()) {
            info!(
                expected = %credentials.consumer_key(),
                provided = consumer_key.unwrap_or_default(),
                "LTI: invalid consumer key"
            );
            return Err(ValidationFailure::ConsumerKeyMismatch);
        }

        if let Err(err) = verify_signature(request, credentials) {
            debug!(error = %err, "LTI: signature verification detail");
            info!(consumer_key = %credentials.consumer_key(), "LTI: invalid signature");
            return Err(ValidationFailure::InvalidSignature);
        }

        if let Some(missing) = REQUIRED_LAUNCH_PARAMS
            .iter()
            .find(|name| request.param(name).is_none_or(str::is_empty))
        {
            info!(param = %missing, "LTI: missing required launch parameter");
            return Err(ValidationFailure::MalformedRequest);
        }

        let identity = Identity::from_params(request.params().to_vec());

        info!(
            user_id = %identity.user_id(),
            resource_link_id = request.param("resource_link_id").unwrap_or_default(),
            "LTI: launch validated"
        );

        Ok(identity)
    }
}

/// Validate a launch with a default [`LaunchProcessor`].
///
/// # Errors
///
/// Returns the [`ValidationFailure`] of the first check that failed.
pub fn process_launch(
    request: &IncomingRequest,
    credentials: &Credentials,
) -> Result<Identity, ValidationFailure> {
    LaunchProcessor::new().process(request, credentials)
}
