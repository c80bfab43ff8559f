//! HTTP server and graceful shutdown.
//!
//! On **SIGTERM** or **Ctrl-C** the server:
//! 1. Immediately stops `listener.accept()`, so no new connections are made.
//! 2. Tells every open connection to finish its in-flight request and close.
//!    Idle keep-alive connections close at once.
//! 3. Waits up to [`DRAIN_TIMEOUT`] for them, aborts whatever is left, and
//!    returns from [`Server::serve`], which lets `main` exit cleanly.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use hyper_util::server::graceful::GracefulShutdown;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::error::Error;
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::router::{Router, error_body};
use crate::status::Status;

/// How long shutdown waits for open connections before aborting them.
pub const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

/// The HTTP server.
pub struct Server {
    listener: TcpListener,
}

impl Server {
    /// Binds the listening socket. Port `0` picks a free port; read it back
    /// with [`local_addr`](Server::local_addr).
    pub async fn bind(addr: SocketAddr) -> Result<Self, Error> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, Error> {
        Ok(self.listener.local_addr()?)
    }

    /// Starts accepting connections and dispatching them through `router`.
    ///
    /// Returns after SIGTERM or Ctrl-C, once open connections have drained.
    pub async fn serve(self, router: Router) -> Result<(), Error> {
        self.serve_with_shutdown(router, shutdown_signal()).await
    }

    /// Like [`serve`](Server::serve), but shuts down when `signal` resolves
    /// instead of waiting for an OS signal.
    pub async fn serve_with_shutdown(
        self,
        router: Router,
        signal: impl Future<Output = ()>,
    ) -> Result<(), Error> {
        let listener = self.listener;
        let router = Arc::new(router);
        let builder = ConnBuilder::new(TokioExecutor::new());
        let graceful = GracefulShutdown::new();

        info!(addr = %listener.local_addr()?, "foo-api listening");

        let mut tasks = tokio::task::JoinSet::new();

        tokio::pin!(signal);

        loop {
            tokio::select! {
                // Check shutdown first so a signal stops accepting at once,
                // even if more connections are queued.
                biased;

                () = &mut signal => {
                    info!(open = tasks.len(), "shutdown signal received, draining connections");
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
                    // Called once per request on the connection, not once
                    // per connection.
                    let svc = service_fn(move |req| {
                        let router = Arc::clone(&router);
                        async move { dispatch(router, req).await }
                    });
                    let conn = builder.serve_connection(TokioIo::new(stream), svc).into_owned();
                    let conn = graceful.watch(conn);

                    tasks.spawn(async move {
                        if let Err(e) = conn.await {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished connection tasks so the JoinSet does not grow
                // without bound.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        drop(listener);
        if tokio::time::timeout(DRAIN_TIMEOUT, graceful.shutdown()).await.is_err() {
            warn!(open = tasks.len(), "drain timed out, aborting connections");
        }
        tasks.shutdown().await;

        info!("foo-api stopped");
        Ok(())
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Reads one hyper request into a [`Request`], routes it, and logs the outcome.
///
/// Every failure becomes a response, so hyper never sees an error.
async fn dispatch(
    router: Arc<Router>,
    req: hyper::Request<hyper::body::Incoming>,
) -> Result<http::Response<Full<Bytes>>, std::convert::Infallible> {
    let started = Instant::now();
    let wire_method = req.method().clone();
    let path = req.uri().path().to_owned();

    let response = match Method::try_from(&wire_method) {
        Ok(method) => match req.into_body().collect().await {
            Ok(body) => {
                router.respond(Request::new(method, path.clone(), body.to_bytes().to_vec())).await
            }
            Err(e) => {
                error!(%path, "failed to read request body: {e}");
                Response::builder()
                    .status(Status::BadRequest)
                    .json(error_body("unreadable request body"))
            }
        },
        Err(()) => router.respond_unsupported(&path),
    };

    info!(
        method = %wire_method,
        %path,
        status = response.status_code(),
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "request",
    );

    Ok(response.into_inner())
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first shutdown signal the process receives.
///
/// On Unix this listens for both **SIGTERM** and **SIGINT** (Ctrl-C).
/// On Windows only Ctrl-C is available.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let sigterm = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}
