//! Job that runs the supervisor on a fixed cadence.
//!
//! Every `poll_interval` it runs one [`tick`](crate::core::supervisor::Supervisor::tick)
//! on a blocking thread, since a tick reads the engine and writes the store.
//!
//! When the store is unavailable the job logs the error and waits
//! `backoff_interval` before the next tick.
//!
//! Refer to the [`supervisor`](crate::core::supervisor) for the tick
//! semantics.
use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use torrust_transfer_manager_configuration::Supervisor as Config;

use super::JobHandle;
use crate::core::supervisor::{Supervisor, SUPERVISOR_LOG_TARGET};
use crate::core::Manager;
use crate::servers::signals::{shutdown_signal, Halted};

/// It starts the supervisor job.
///
/// The job only holds a weak reference to the manager, so it also ends when
/// the manager is dropped.
#[must_use]
pub fn start_job(config: &Config, manager: &Arc<Manager>) -> JobHandle {
    let weak_manager = Arc::downgrade(manager);
    let poll_interval = config.poll_interval;
    let backoff_interval = config.backoff_interval;

    let (tx_halt, rx_halt) = tokio::sync::oneshot::channel::<Halted>();

    let task = tokio::spawn(async move {
        let halted = shutdown_signal(rx_halt);
        tokio::pin!(halted);

        let mut interval = tokio::time::interval(poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(target: SUPERVISOR_LOG_TARGET, ?poll_interval, "Starting supervisor job");

        loop {
            tokio::select! {
                () = &mut halted => {
                    tracing::info!(target: SUPERVISOR_LOG_TARGET, "Stopping supervisor job..");
                    break;
                }
                _ = interval.tick() => {
                    let Some(manager) = weak_manager.upgrade() else {
                        break;
                    };

                    let supervisor = Supervisor::new(&manager);
                    drop(manager);

                    if let Some(backoff) = run_tick(supervisor, backoff_interval).await {
                        tokio::select! {
                            () = &mut halted => {
                                tracing::info!(target: SUPERVISOR_LOG_TARGET, "Stopping supervisor job..");
                                break;
                            }
                            () = tokio::time::sleep(backoff) => {
                                interval.reset();
                            }
                        }
                    }
                }
            }
        }
    });

    JobHandle::new(tx_halt, task)
}

/// It runs one tick and returns how long to wait before the next one, if the
/// regular cadence must be suspended.
async fn run_tick(supervisor: Supervisor, backoff_interval: Duration) -> Option<Duration> {
    match tokio::task::spawn_blocking(move || supervisor.tick()).await {
        Ok(Ok(_report)) => None,
        Ok(Err(err)) => {
            tracing::error!(target: SUPERVISOR_LOG_TARGET, %err, ?backoff_interval, "Supervisor job (store unavailable, backing off)");
            Some(backoff_interval)
        }
        Err(err) => {
            tracing::error!(target: SUPERVISOR_LOG_TARGET, %err, "Supervisor job (tick failed)");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use torrust_transfer_manager_primitives::TransferStatus;
    use torrust_transfer_manager_test_helpers::configuration;

    use super::start_job;
    use crate::core::engine::adapter::CreateOptions;
    use crate::core::engine::fixture::status::seeding;
    use crate::core::engine::fixture::FixtureEngine;
    use crate::core::engine::metainfo::fixture::MetainfoBuilder;
    use crate::core::services::manager_factory;

    #[tokio::test]
    async fn it_should_reconcile_the_engine_state_until_it_is_stopped() {
        let mut config = configuration::ephemeral();
        config.core.supervisor.poll_interval = Duration::from_millis(20);
        let config = Arc::new(config);

        let engine = Arc::new(FixtureEngine::new());
        let manager = Arc::new(manager_factory(&config, engine.clone()));

        let record = manager
            .create(
                "ubuntu.torrent",
                MetainfoBuilder::single_file("ubuntu", 10).to_bytes(),
                CreateOptions::default(),
            )
            .await
            .unwrap();
        engine.set_status(engine.handle_of("ubuntu").unwrap(), seeding());

        let job = start_job(&config.core.supervisor, &manager);

        let mut status = TransferStatus::Queued;
        for _ in 0..100 {
            tokio::time::sleep(Duration::from_millis(20)).await;
            status = manager.get_transfer(&record.id).unwrap().status;
            if status == TransferStatus::Completed {
                break;
            }
        }

        assert_eq!(status, TransferStatus::Completed);

        job.stop().await.unwrap();
    }

    #[tokio::test]
    async fn it_should_end_when_the_manager_is_dropped() {
        let mut config = configuration::ephemeral();
        config.core.supervisor.poll_interval = Duration::from_millis(10);
        let config = Arc::new(config);

        let manager = Arc::new(manager_factory(&config, Arc::new(FixtureEngine::new())));

        let job = start_job(&config.core.supervisor, &manager);
        drop(manager);

        tokio::time::timeout(Duration::from_secs(5), job.task)
            .await
            .expect("the job should end")
            .unwrap();
    }
}
