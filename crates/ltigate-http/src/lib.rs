//! HTTP adapter for ltigate.
//!
//! This crate is the caller the launch processor expects:
//!
//! - **Parameter collection**: query string plus form-urlencoded body
//! - **Credentials**: resolved from [`LtiConfig`](ltigate_core::LtiConfig) per launch
//! - **Failure mapping**: `400` for malformed launches, `401` for bad signatures
//! - **Handler trait**: hands validated identities to the application's session layer
//! - **Service**: Hyper `Service` implementation with a health endpoint

pub mod error;
pub mod handler;
pub mod response;
pub mod service;

pub use error::HttpError;
pub use handler::{JsonLaunchHandler, LaunchFuture, LaunchHandler};
pub use response::LtiBody;
pub use service::{HEALTH_PATH, LtiHttpService};
