//! A bounded pool of blocking workers for slow engine calls.
//!
//! Attaching or detaching a transfer may touch the disk or the network. These
//! calls run on Tokio's blocking threads, at most `workers` at a time, so they
//! never stall the async workers that serve the API and the supervisor.
use std::sync::Arc;

use tokio::sync::Semaphore;
use torrust_transfer_manager_located_error::{DynError, LocatedError};

#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
    #[error("the worker pool is closed")]
    Closed,

    #[error("the worker task failed: {source}")]
    Task {
        source: LocatedError<'static, dyn std::error::Error + Send + Sync>,
    },
}

impl From<tokio::task::JoinError> for Error {
    #[track_caller]
    fn from(err: tokio::task::JoinError) -> Self {
        Error::Task {
            source: (Arc::new(err) as DynError).into(),
        }
    }
}

#[derive(Debug)]
pub struct WorkerPool {
    permits: Arc<Semaphore>,
    workers: usize,
}

impl WorkerPool {
    /// # Panics
    ///
    /// Will panic if `workers` is zero.
    #[must_use]
    pub fn new(workers: usize) -> Self {
        assert!(workers > 0, "the worker pool needs at least one worker");

        Self {
            permits: Arc::new(Semaphore::new(workers)),
            workers,
        }
    }

    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Workers not running a task right now.
    #[must_use]
    pub fn idle_workers(&self) -> usize {
        self.permits.available_permits()
    }

    /// It runs `task` on a blocking thread once a worker is free.
    ///
    /// The worker stays taken until `task` returns, even if the caller stops
    /// waiting for the result.
    ///
    /// # Errors
    ///
    /// Will return an error if the pool is closed or the task panicked.
    pub async fn run<F, T>(&self, task: F) -> Result<T, Error>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let permit = self.permits.clone().acquire_owned().await.map_err(|_| Error::Closed)?;

        let output = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            task()
        })
        .await?;

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use super::{Error, WorkerPool};

    #[tokio::test]
    async fn it_should_return_the_output_of_the_task() {
        let pool = WorkerPool::new(2);

        assert_eq!(pool.run(|| 40 + 2).await.unwrap(), 42);
        assert_eq!(pool.idle_workers(), 2);
    }

    #[tokio::test]
    async fn it_should_never_run_more_tasks_than_workers_at_the_same_time() {
        let pool = Arc::new(WorkerPool::new(2));
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let pool = pool.clone();
                let running = running.clone();
                let peak = peak.clone();
                tokio::spawn(async move {
                    pool.run(move || {
                        let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                        peak.fetch_max(now, Ordering::SeqCst);
                        std::thread::sleep(Duration::from_millis(20));
                        running.fetch_sub(1, Ordering::SeqCst);
                    })
                    .await
                })
            })
            .collect();

        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert!(peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn a_panicking_task_should_be_reported_and_release_its_worker() {
        let pool = WorkerPool::new(1);

        let result: Result<(), Error> = pool.run(|| panic!("engine failure")).await;

        assert!(matches!(result, Err(Error::Task { .. })));
        assert_eq!(pool.run(|| "still working").await.unwrap(), "still working");
    }
}
