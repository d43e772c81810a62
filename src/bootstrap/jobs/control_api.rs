//! Job that runs the HTTP API with the push channel.
//!
//! The API server binds to the configured address. Port `0` binds to a free
//! port; the actual address is in the returned running server.
//!
//! Refer to the [API documentation](crate::servers::apis) for the endpoints.
use std::sync::Arc;
use std::time::Duration;

use torrust_transfer_manager_configuration::HttpApi;

use crate::core::Manager;
use crate::servers::apis::server::{ApiServer, Launcher, RunningApiServer};

/// Open connections get this long to finish after the halt message.
pub const GRACEFUL_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

/// It starts the API server.
///
/// # Panics
///
/// Will panic if the API server can not be bound to the configured address.
pub async fn start_job(config: &HttpApi, manager: Arc<Manager>) -> RunningApiServer {
    let launcher = Launcher::new(config.bind_address, GRACEFUL_SHUTDOWN_TIMEOUT);

    match ApiServer::new(launcher).start(manager).await {
        Ok(server) => server,
        Err(err) => panic!("Unable to start the API server: {err}"),
    }
}
