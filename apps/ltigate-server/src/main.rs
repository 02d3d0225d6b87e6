//! ltigate server - validates LTI 1.x launches.
//!
//! This binary serves `ltigate-http` over TCP. It answers launches on the
//! configured path with the validated identity as JSON, and exposes a health
//! endpoint for orchestration systems.
//!
//! # Usage
//!
//! ```text
//! LTI_CONSUMER_KEY=key LTI_CONSUMER_SECRET=secret ltigate-server
//! ltigate-server --health-check
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GATEWAY_LISTEN` | `0.0.0.0:4580` | Bind address |
//! | `LTI_LAUNCH_PATH` | `/lti/launch` | Launch endpoint path |
//! | `LTI_PUBLIC_ORIGIN` | *(unset)* | Origin the platform signs against |
//! | `LTI_CONSUMER_KEY` | *(unset)* | Expected consumer key |
//! | `LTI_CONSUMER_SECRET` | *(unset)* | Shared consumer secret |
//! | `LTI_MAX_TIMESTAMP_SKEW` | `0` | Accepted `oauth_timestamp` skew in seconds (`0` disables) |
//! | `LTI_MAX_BODY_BYTES` | `65536` | Largest accepted launch body |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `LOG_FORMAT` | `text` | `json` for JSON-lines output |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use std::future::Future;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use hyper_util::server::graceful::GracefulShutdown;
use ltigate_core::LtiConfig;
use ltigate_http::{HEALTH_PATH, JsonLaunchHandler, LaunchHandler, LtiHttpService};
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the global subscriber: `RUST_LOG` wins over `LOG_LEVEL`, and
/// `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing(config: &LtiConfig) -> Result<()> {
    let filter = match std::env::var("RUST_LOG") {
        Ok(_) => EnvFilter::from_default_env(),
        Err(_) => EnvFilter::try_new(&config.log_level)
            .with_context(|| format!("invalid LOG_LEVEL: {}", config.log_level))?,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    Ok(())
}

/// Resolves on Ctrl-C, or on SIGTERM where the platform has it.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl-C"),
        () = terminate => info!("received SIGTERM"),
    }
}

/// Accept launches until `shutdown` resolves, then drain open connections.
async fn serve<H, F>(listener: TcpListener, service: LtiHttpService<H>, shutdown: F) -> Result<()>
where
    H: LaunchHandler,
    F: Future<Output = ()>,
{
    let graceful = GracefulShutdown::new();
    let http = HttpConnBuilder::new(TokioExecutor::new());
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "accept failed");
                        continue;
                    }
                };
                debug!(%peer, "connection opened");

                let conn = http.serve_connection(TokioIo::new(stream), service.clone());
                let conn = graceful.watch(conn.into_owned());
                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        error!(%peer, error = %e, "connection failed");
                    }
                });
            }

            () = &mut shutdown => break,
        }
    }

    info!("draining open connections");
    graceful.shutdown().await;
    info!("ltigate stopped");

    Ok(())
}

/// Loopback address to probe for a server bound to `listen`.
fn probe_addr(listen: &str) -> Result<SocketAddr> {
    let mut addr: SocketAddr = listen
        .parse()
        .with_context(|| format!("invalid GATEWAY_LISTEN: {listen}"))?;

    if addr.ip().is_unspecified() {
        if addr.is_ipv4() {
            addr.set_ip(Ipv4Addr::LOCALHOST.into());
        } else {
            addr.set_ip(Ipv6Addr::LOCALHOST.into());
        }
    }

    Ok(addr)
}

/// Whether a raw HTTP/1.1 response is a `200` reporting `"status":"running"`.
fn is_healthy(response: &str) -> bool {
    let Some((head, body)) = response.split_once("\r\n\r\n") else {
        return false;
    };

    let status_ok = head
        .lines()
        .next()
        .is_some_and(|line| line.split_whitespace().nth(1) == Some("200"));

    status_ok && body.contains("\"status\":\"running\"")
}

/// Query the health endpoint of a local server over a plain TCP connection.
async fn run_health_check(addr: SocketAddr) -> Result<()> {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .with_context(|| format!("cannot connect to {addr}"))?;

    let request =
        format!("GET {HEALTH_PATH} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await?;

    let mut response = String::new();
    stream.read_to_string(&mut response).await?;

    anyhow::ensure!(is_healthy(&response), "unhealthy response from {addr}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = LtiConfig::from_env();

    if std::env::args().any(|a| a == "--health-check") {
        let healthy = match probe_addr(&config.gateway_listen) {
            Ok(addr) => run_health_check(addr).await.is_ok(),
            Err(_) => false,
        };
        std::process::exit(i32::from(!healthy));
    }

    init_tracing(&config)?;

    let addr: SocketAddr = config
        .gateway_listen
        .parse()
        .with_context(|| format!("invalid GATEWAY_LISTEN: {}", config.gateway_listen))?;

    info!(
        version = VERSION,
        launch_path = %config.launch_path,
        public_origin = config.public_origin.as_deref().unwrap_or("<from Host header>"),
        consumer_key = config.consumer_key.as_deref().unwrap_or("<unset>"),
        max_timestamp_skew = config.max_timestamp_skew,
        max_body_bytes = config.max_body_bytes,
        "ltigate starting",
    );

    if config.credentials().is_none() {
        warn!("LTI_CONSUMER_KEY / LTI_CONSUMER_SECRET not set, every launch will be refused");
    }

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    info!(%addr, "accepting launches");

    let service = LtiHttpService::new(Arc::new(JsonLaunchHandler), config);
    serve(listener, service, shutdown_signal()).await
}
