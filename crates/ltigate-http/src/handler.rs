//! Launch handler trait.

use std::future::Future;
use std::pin::Pin;

use ltigate_core::Identity;
use serde::Serialize;

use crate::error::HttpError;
use crate::response::{LtiBody, json_response};

/// Boxed future returned by [`LaunchHandler::handle_launch`].
pub type LaunchFuture =
    Pin<Box<dyn Future<Output = Result<http::Response<LtiBody>, HttpError>> + Send>>;

/// What to do with an identity once its launch has been validated.
///
/// This is the boundary between launch validation and the application's
/// session layer: an implementation typically stores the identity in a
/// session and redirects into the tool. Handlers only ever see identities
/// from launches that passed every check.
pub trait LaunchHandler: Send + Sync + 'static {
    /// Produce the response for a validated launch.
    fn handle_launch(&self, identity: Identity) -> LaunchFuture;
}

/// Default handler that answers `200` with the identity as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLaunchHandler;

#[derive(Serialize)]
struct LaunchResponse<'a> {
    #[serde(flatten)]
    identity: &'a Identity,
    display_name: String,
    roles: Vec<&'a str>,
}

impl LaunchHandler for JsonLaunchHandler {
    fn handle_launch(&self, identity: Identity) -> LaunchFuture {
        Box::pin(async move {
            let body = LaunchResponse {
                display_name: identity.display_name(),
                roles: identity.roles(),
                identity: &identity,
            };
            Ok(json_response(http::StatusCode::OK, &body))
        })
    }
}
