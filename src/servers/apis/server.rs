//! Logic to run the HTTP API server.
//!
//! It contains two main structs: [`ApiServer`] and [`Launcher`].
//!
//! The `ApiServer` is a state machine that starts and stops the server:
//!
//! 1. [`ApiServer::start`] spawns a new asynchronous task and waits until the
//!    server is bound, so the caller knows the actual address (the configured
//!    port can be `0`).
//! 2. [`Launcher::start`] binds the socket and serves the API on that task
//!    until the halt message or the global shutdown signal arrives.
//!
//! [`ApiServer::stop`] sends the halt message and waits for the graceful
//! shutdown to finish.
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use derive_more::Constructor;
use futures::future::BoxFuture;
use futures::FutureExt as _;
use thiserror::Error;
use tokio::sync::oneshot::{Receiver, Sender};
use tracing::{debug, error, info};

use super::routes::router;
use super::API_LOG_TARGET;
use crate::core::Manager;
use crate::servers::signals::{graceful_shutdown, Halted};

/// Errors that can occur when starting or stopping the API server.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Unable to bind the API server to {addr}: {reason}")]
    Bind { addr: SocketAddr, reason: String },

    #[error("The API server task ended before it started listening")]
    NotStarted,

    #[error("The API server task failed: {reason}")]
    Task { reason: String },
}

pub type StoppedApiServer = ApiServer<Stopped>;
pub type RunningApiServer = ApiServer<Running>;

/// A HTTP API server that can be started and stopped.
#[allow(clippy::module_name_repetitions)]
pub struct ApiServer<S> {
    /// The state of the server: `running` or `stopped`.
    pub state: S,
}

/// A stopped server. It keeps the launcher to start the server again.
pub struct Stopped {
    launcher: Launcher,
}

/// A running server.
pub struct Running {
    /// The address the server is bound to.
    pub binding: SocketAddr,
    pub halt_task: Sender<Halted>,
    pub task: tokio::task::JoinHandle<Result<Launcher, Error>>,
}

impl ApiServer<Stopped> {
    #[must_use]
    pub fn new(launcher: Launcher) -> Self {
        Self {
            state: Stopped { launcher },
        }
    }

    /// It starts the server and returns a `ApiServer` controller in `running`
    /// state.
    ///
    /// # Errors
    ///
    /// It would return an error if the server could not be bound.
    pub async fn start(self, manager: Arc<Manager>) -> Result<ApiServer<Running>, Error> {
        let (tx_start, rx_start) = tokio::sync::oneshot::channel::<Result<SocketAddr, Error>>();
        let (tx_halt, rx_halt) = tokio::sync::oneshot::channel::<Halted>();

        let launcher = self.state.launcher;

        let task = tokio::spawn(async move {
            let server = launcher.start(manager, tx_start, rx_halt);

            server.await?;

            Ok(launcher)
        });

        let binding = rx_start.await.map_err(|_| Error::NotStarted)??;

        Ok(ApiServer {
            state: Running {
                binding,
                halt_task: tx_halt,
                task,
            },
        })
    }
}

impl ApiServer<Running> {
    /// It stops the server and returns a `ApiServer` controller in `stopped`
    /// state.
    ///
    /// # Errors
    ///
    /// It would return an error if the server task failed.
    pub async fn stop(self) -> Result<ApiServer<Stopped>, Error> {
        // The server may be already shutting down on the global signal.
        if self.state.halt_task.send(Halted::Normal).is_err() {
            debug!(target: API_LOG_TARGET, "ApiServer::stop (already halted)");
        }

        let launcher = self
            .state
            .task
            .await
            .map_err(|e| Error::Task { reason: e.to_string() })??;

        Ok(ApiServer {
            state: Stopped { launcher },
        })
    }
}

/// It knows how to serve the API with graceful shutdown.
#[derive(Constructor, Copy, Clone, Debug)]
pub struct Launcher {
    /// The address to bind to. Port `0` binds to a free port.
    pub bind_to: SocketAddr,
    /// How long open connections get to finish after the halt message.
    pub grace: Duration,
}

impl Launcher {
    /// It binds the socket, sends the bound address through `tx_start` and
    /// returns the future that serves the API until it is halted.
    ///
    /// A failure to bind is sent through `tx_start` too.
    pub fn start(
        &self,
        manager: Arc<Manager>,
        tx_start: Sender<Result<SocketAddr, Error>>,
        rx_halt: Receiver<Halted>,
    ) -> BoxFuture<'static, Result<(), Error>> {
        let bind_to = self.bind_to;

        let listener = match bind(bind_to) {
            Ok(listener) => listener,
            Err(err) => {
                error!(target: API_LOG_TARGET, %err, "Launcher::start");
                let reason = err.to_string();
                let _ = tx_start.send(Err(err));
                return futures::future::ready(Err(Error::Bind { addr: bind_to, reason })).boxed();
            }
        };

        let address = match listener.local_addr() {
            Ok(address) => address,
            Err(err) => {
                let reason = err.to_string();
                let _ = tx_start.send(Err(Error::Bind {
                    addr: bind_to,
                    reason: reason.clone(),
                }));
                return futures::future::ready(Err(Error::Bind { addr: bind_to, reason })).boxed();
            }
        };

        let handle = axum_server::Handle::new();

        tokio::task::spawn(graceful_shutdown(
            handle.clone(),
            rx_halt,
            format!("Shutting down the API server on http://{address}"),
            self.grace,
        ));

        let app = router(manager);

        let running = axum_server::from_tcp(listener)
            .handle(handle)
            .serve(app.into_make_service())
            .map(move |result| {
                result.map_err(|e| Error::Task {
                    reason: format!("unable to serve on http://{address}: {e}"),
                })
            });

        info!(target: API_LOG_TARGET, "Starting on: http://{}", address);

        if tx_start.send(Ok(address)).is_err() {
            error!(target: API_LOG_TARGET, "Launcher::start (nobody waits for the API server)");
        }

        running.boxed()
    }
}

fn bind(addr: SocketAddr) -> Result<std::net::TcpListener, Error> {
    let to_error = |e: std::io::Error| Error::Bind {
        addr,
        reason: e.to_string(),
    };

    let listener = std::net::TcpListener::bind(addr).map_err(to_error)?;
    listener.set_nonblocking(true).map_err(to_error)?;

    Ok(listener)
}
