//! `oauth_timestamp` window check.
//!
//! Signature verification is deterministic and never looks at the clock.
//! Deployments that want to bound replay of captured launches call
//! [`check_freshness`] separately, passing the current time.

use chrono::{DateTime, Duration, Utc};

use crate::error::SignatureError;
use crate::request::IncomingRequest;

/// Check that `oauth_timestamp` lies within `max_skew` of `now`, in either direction.
///
/// # Errors
///
/// Returns [`SignatureError::MissingParam`] if the timestamp is absent,
/// [`SignatureError::InvalidTimestamp`] if it is not integer seconds, or
/// [`SignatureError::StaleTimestamp`] if it falls outside the window.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use ltigate_auth::{IncomingRequest, check_freshness};
///
/// let request = IncomingRequest::new(
///     "POST",
///     "https://tool.example.com/launch",
///     vec![("oauth_timestamp".to_owned(), "1700000000".to_owned())],
/// );
/// let now = Utc.timestamp_opt(1_700_000_030, 0).unwrap();
/// assert!(check_freshness(&request, now, Duration::seconds(60)).is_ok());
/// ```
pub fn check_freshness(
    request: &IncomingRequest,
    now: DateTime<Utc>,
    max_skew: Duration,
) -> Result<(), SignatureError> {
    let raw = request
        .param("oauth_timestamp")
        .ok_or(SignatureError::MissingParam("oauth_timestamp"))?;

    let seconds: i64 = raw
        .trim()
        .parse()
        .map_err(|_| SignatureError::InvalidTimestamp(raw.to_owned()))?;

    let signed_at = DateTime::<Utc>::from_timestamp(seconds, 0)
        .ok_or_else(|| SignatureError::InvalidTimestamp(raw.to_owned()))?;

    if (now - signed_at).abs() > max_skew {
        return Err(SignatureError::StaleTimestamp);
    }

    Ok(())
}
