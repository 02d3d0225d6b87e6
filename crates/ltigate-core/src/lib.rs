//! LTI launch validation and identity extraction.
//!
//! An LTI 1.x launch is an OAuth 1.0a signed form POST from a learning
//! platform. [`LaunchProcessor`] checks the method, the consumer key, the
//! signature, and the required launch parameters, and turns a launch that
//! passes all four into an [`Identity`]. Every rejection is one of the
//! [`ValidationFailure`] variants; the caller decides how to answer it.
//!
//! Session storage, credential lookup, and authorization are left to the
//! caller. [`config::LtiConfig`] is provided for callers that want the
//! conventional environment-driven setup.

pub mod config;
mod failure;
mod identity;
mod launch;

pub use config::LtiConfig;
pub use failure::ValidationFailure;
pub use identity::{Identity, params};
pub use launch::{LaunchProcessor, REQUIRED_LAUNCH_PARAMS, process_launch};
pub use ltigate_auth::{Credentials, IncomingRequest};
