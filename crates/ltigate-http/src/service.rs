//! LTI HTTP service implementing the hyper `Service` trait.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use chrono::{Duration, Utc};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::Incoming;
use ltigate_auth::{IncomingRequest, check_freshness};
use ltigate_core::{LaunchProcessor, LtiConfig};
use tracing::{debug, info};

use crate::error::HttpError;
use crate::handler::LaunchHandler;
use crate::response::{LtiBody, error_response, failure_to_response, json_response};

/// Path of the health endpoint.
pub const HEALTH_PATH: &str = "/_ltigate/health";

/// Version reported by the health endpoint.
const VERSION: &str = env!("CARGO_PKG_VERSION");

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Hyper `Service` that validates LTI launches.
///
/// Routes the configured launch path through [`LaunchProcessor`] and hands
/// validated identities to a [`LaunchHandler`].
#[derive(Debug)]
pub struct LtiHttpService<H: LaunchHandler> {
    handler: Arc<H>,
    config: Arc<LtiConfig>,
    processor: LaunchProcessor,
}

impl<H: LaunchHandler> LtiHttpService<H> {
    /// Create a new `LtiHttpService`.
    pub fn new(handler: Arc<H>, config: LtiConfig) -> Self {
        Self {
            handler,
            config: Arc::new(config),
            processor: LaunchProcessor::new(),
        }
    }
}

impl<H: LaunchHandler> Clone for LtiHttpService<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            config: Arc::clone(&self.config),
            processor: self.processor,
        }
    }
}

impl<H: LaunchHandler> hyper::service::Service<http::Request<Incoming>> for LtiHttpService<H> {
    type Response = http::Response<LtiBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let service = self.clone();

        Box::pin(async move { Ok(service.respond(req).await) })
    }
}

impl<H: LaunchHandler> LtiHttpService<H> {
    /// Route a request and attach the common response headers.
    pub async fn respond<B>(&self, req: http::Request<B>) -> http::Response<LtiBody>
    where
        B: http_body::Body<Data = Bytes>,
        B::Error: Into<BoxError>,
    {
        let request_id = uuid::Uuid::new_v4().to_string();
        let response = self.route(req).await;
        add_common_headers(response, &request_id)
    }

    async fn route<B>(&self, req: http::Request<B>) -> http::Response<LtiBody>
    where
        B: http_body::Body<Data = Bytes>,
        B::Error: Into<BoxError>,
    {
        let path = req.uri().path().to_owned();

        if path == HEALTH_PATH && req.method() == http::Method::GET {
            return json_response(
                http::StatusCode::OK,
                &serde_json::json!({ "status": "running", "version": VERSION }),
            );
        }

        if path == self.config.launch_path {
            return match self.process_launch(req).await {
                Ok(response) => response,
                Err(err) => err.into_response(),
            };
        }

        error_response(
            http::StatusCode::NOT_FOUND,
            "not_found",
            &format!("No route for {path}"),
        )
    }

    /// Run a request through the full launch pipeline.
    async fn process_launch<B>(
        &self,
        req: http::Request<B>,
    ) -> Result<http::Response<LtiBody>, HttpError>
    where
        B: http_body::Body<Data = Bytes>,
        B::Error: Into<BoxError>,
    {
        let (parts, body) = req.into_parts();

        // 1. Resolve credentials before touching the body.
        let credentials = self.config.credentials().ok_or(HttpError::NotConfigured)?;

        // 2. Collect body (capped) and parameters.
        let body = collect_body(body, self.config.max_body_bytes).await?;
        let request =
            IncomingRequest::from_http(&parts, self.config.public_origin.as_deref(), &body);

        debug!(
            method = %request.method(),
            url = %request.url(),
            params = request.params().len(),
            "processing LTI launch"
        );

        // 3. Validate.
        let identity = match self.processor.process(&request, &credentials) {
            Ok(identity) => identity,
            Err(failure) => return Ok(failure_to_response(failure)),
        };

        // 4. Optional timestamp window, only for otherwise valid launches.
        if self.config.max_timestamp_skew > 0 {
            let secs = i64::try_from(self.config.max_timestamp_skew)
                .unwrap_or(i64::MAX)
                .min(i64::from(u32::MAX));
            let skew = Duration::seconds(secs);
            if let Err(err) = check_freshness(&request, Utc::now(), skew) {
                info!(error = %err, user_id = %identity.user_id(), "LTI: stale launch rejected");
                return Err(HttpError::StaleRequest);
            }
        }

        // 5. Hand off to the application.
        self.handler.handle_launch(identity).await
    }
}

/// Collect the request body into a single `Bytes` buffer of at most `limit` bytes.
async fn collect_body<B>(body: B, limit: usize) -> Result<Bytes, HttpError>
where
    B: http_body::Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    if body.size_hint().lower() > u64::try_from(limit).unwrap_or(u64::MAX) {
        return Err(HttpError::PayloadTooLarge(limit));
    }

    Limited::new(body, limit)
        .collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .map_err(|e| {
            if e.downcast_ref::<LengthLimitError>().is_some() {
                HttpError::PayloadTooLarge(limit)
            } else {
                HttpError::BodyRead(e.to_string())
            }
        })
}

/// Add common response headers to every response.
fn add_common_headers(
    mut response: http::Response<LtiBody>,
    request_id: &str,
) -> http::Response<LtiBody> {
    let headers = response.headers_mut();

    if let Ok(hv) = http::HeaderValue::from_str(request_id) {
        headers.entry("x-request-id").or_insert(hv);
    }

    headers.insert("server", http::HeaderValue::from_static("ltigate"));

    response
}
