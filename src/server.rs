//! HTTP server and graceful shutdown.
//!
//! On SIGTERM or Ctrl-C the server:
//! 1. Stops calling `listener.accept()`, so no new connections are made.
//! 2. Lets every in-flight connection task run to completion.
//! 3. Returns from [`Server::serve`], which lets `main` exit cleanly.

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http::StatusCode;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::error::Error;
use crate::middleware;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;

/// The HTTP server.
pub struct Server {
    addr: SocketAddr,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    pub fn bind(addr: SocketAddr) -> Self {
        Self { addr }
    }

    /// Binds, then serves `router` until SIGTERM or Ctrl-C.
    ///
    /// Returns only after a full graceful shutdown.
    pub async fn serve<S>(self, router: Router<S>) -> Result<(), Error>
    where
        S: Clone + Send + Sync + 'static,
    {
        let listener = TcpListener::bind(self.addr).await?;
        serve_with_shutdown(listener, router, shutdown_signal()).await
    }
}

/// Serves `router` on an already bound listener until `shutdown` resolves,
/// then drains in-flight connections.
pub async fn serve_with_shutdown<S, F>(
    listener: TcpListener,
    router: Router<S>,
    shutdown: F,
) -> Result<(), Error>
where
    S: Clone + Send + Sync + 'static,
    F: Future<Output = ()>,
{
    let router = Arc::new(router);
    info!(addr = %listener.local_addr()?, "stuffd listening");

    let mut tasks = tokio::task::JoinSet::new();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            // Shutdown first, so a pending signal wins over queued connections.
            biased;

            () = &mut shutdown => {
                info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                break;
            }

            res = listener.accept() => {
                let (stream, remote_addr) = match res {
                    Ok(v) => v,
                    Err(e) => {
                        error!("accept error: {e}");
                        continue;
                    }
                };

                let router = Arc::clone(&router);
                let io = TokioIo::new(stream);

                tasks.spawn(async move {
                    let svc = service_fn(move |req| {
                        let router = Arc::clone(&router);
                        async move { dispatch(router, req).await }
                    });

                    if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                        .serve_connection(io, svc)
                        .await
                    {
                        error!(peer = %remote_addr, "connection error: {e}");
                    }
                });
            }

            Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
        }
    }

    while tasks.join_next().await.is_some() {}

    info!("stuffd stopped");
    Ok(())
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Buffers the request body, then hands the request to the router.
///
/// Every failure becomes a response, so hyper never sees an error.
async fn dispatch<S>(
    router: Arc<Router<S>>,
    req: hyper::Request<Incoming>,
) -> Result<http::Response<Full<Bytes>>, Infallible>
where
    S: Clone + Send + Sync + 'static,
{
    let (parts, body) = req.into_parts();

    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            warn!(error = %e, "failed to read request body");
            let res = middleware::json_content_type(Response::status(StatusCode::BAD_REQUEST));
            return Ok(res.into_inner());
        }
    };

    let response = router.handle(Request::from_parts(parts, body)).await;
    Ok(response.into_inner())
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first SIGTERM or SIGINT the process receives.
///
/// If a handler cannot be installed that arm never resolves and the error is
/// logged; the other signal still works.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}
