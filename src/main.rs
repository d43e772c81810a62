use torrust_transfer_manager::servers::signals::global_shutdown_signal;
use torrust_transfer_manager::{app, bootstrap};
use tracing::info;

#[tokio::main]
async fn main() {
    let (config, manager) = bootstrap::app::setup();

    let jobs = app::start(&config, manager).await;

    global_shutdown_signal().await;

    info!("Torrust transfer manager shutting down..");

    jobs.stop().await;

    info!("Torrust transfer manager successfully shutdown.");
}
