//! Dedicated observability HTTP server: `/metrics` (Prometheus text) and
//! `/health` (liveness). Runs independent of the packet pipeline so a
//! scrape never contends with a worker thread beyond reading the counter
//! array.

use super::handler::{handle_health, handle_metrics};
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::Request;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use prometheus::Registry;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

pub async fn start_observability_server(
    port: u16,
    registry: Registry,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let registry = Arc::new(registry);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;

    info!(?addr, "observability server started (metrics + health)");

    let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
        .map_err(|e| std::io::Error::other(format!("failed to set up SIGTERM handler: {e}")))?;
    let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt())
        .map_err(|e| std::io::Error::other(format!("failed to set up SIGINT handler: {e}")))?;

    loop {
        tokio::select! {
            _ = sigterm.recv() => {
                info!("observability server: received SIGTERM, shutting down");
                break;
            }
            _ = sigint.recv() => {
                info!("observability server: received SIGINT, shutting down");
                break;
            }
            result = listener.accept() => {
                let (stream, peer) = match result {
                    Ok(pair) => pair,
                    Err(e) => {
                        warn!(error = %e, "observability server: accept error");
                        continue;
                    }
                };

                let registry = registry.clone();
                tokio::spawn(async move {
                    let svc = hyper::service::service_fn(move |req: Request<Incoming>| {
                        let registry = registry.clone();
                        async move {
                            let response = match req.uri().path() {
                                "/metrics" => handle_metrics(&registry),
                                "/health" => handle_health(),
                                _ => {
                                    let body = Full::new(Bytes::from("not found"))
                                        .map_err(|never| match never {})
                                        .boxed();
                                    let mut resp = hyper::Response::new(body);
                                    *resp.status_mut() = hyper::StatusCode::NOT_FOUND;
                                    return Ok::<_, hyper::Error>(resp);
                                }
                            };
                            match response {
                                Ok(resp) => Ok(resp),
                                Err(_) => {
                                    let body = Full::new(Bytes::from("internal error"))
                                        .map_err(|never| match never {})
                                        .boxed();
                                    let mut resp = hyper::Response::new(body);
                                    *resp.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
                                    Ok(resp)
                                }
                            }
                        }
                    });

                    let builder = ConnBuilder::new(TokioExecutor::new());
                    if let Err(e) = builder.serve_connection(TokioIo::new(stream), svc).await {
                        warn!(?peer, error = %e, "observability server: serve_connection error");
                    }
                });
            }
        }
    }

    info!("observability server stopped");
    Ok(())
}
