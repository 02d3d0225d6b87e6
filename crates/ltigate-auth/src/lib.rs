//! OAuth 1.0a request signature verification for LTI launches.
//!
//! An LTI 1.x launch is an HTML form POST signed by the platform with
//! OAuth 1.0a HMAC-SHA1. This crate implements the verification side: given
//! the incoming request and the shared consumer key/secret, it rebuilds the
//! signature base string and checks the supplied `oauth_signature`.
//!
//! # Overview
//!
//! ```text
//! base_string = METHOD & enc(base_uri) & enc(sorted, encoded params)
//! signature   = Base64(HMAC-SHA1(enc(consumer_secret) & "&", base_string))
//! ```
//!
//! Everything here is pure computation: no I/O, no shared state, and the same
//! inputs always produce the same answer.
//!
//! # Usage
//!
//! ```rust
//! use ltigate_auth::{Credentials, IncomingRequest, sign, verify};
//!
//! let credentials = Credentials::new("key", "secret");
//! let request = IncomingRequest::new(
//!     "POST",
//!     "https://tool.example.com/launch",
//!     vec![
//!         ("oauth_consumer_key".to_owned(), "key".to_owned()),
//!         ("oauth_signature_method".to_owned(), "HMAC-SHA1".to_owned()),
//!         ("oauth_timestamp".to_owned(), "1234567890".to_owned()),
//!         ("oauth_nonce".to_owned(), "n".to_owned()),
//!         ("user_id".to_owned(), "u1".to_owned()),
//!     ],
//! );
//!
//! let signed = sign(&request, &credentials).unwrap();
//! assert!(verify(&signed, &credentials));
//! ```
//!
//! # Modules
//!
//! - [`canonical`] - Percent encoding and signature base string construction
//! - [`credentials`] - Consumer key/secret pair
//! - [`error`] - Signature verification error types
//! - [`freshness`] - Opt-in `oauth_timestamp` window check
//! - [`request`] - Incoming request abstraction and parameter collection
//! - [`signature`] - HMAC-SHA1 signing and verification

pub mod canonical;
pub mod credentials;
pub mod error;
pub mod freshness;
pub mod request;
pub mod signature;

pub use credentials::Credentials;
pub use error::SignatureError;
pub use freshness::check_freshness;
pub use request::IncomingRequest;
pub use signature::{sign, verify, verify_signature};
