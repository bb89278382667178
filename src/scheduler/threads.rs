use std::sync::Arc;
use std::thread;

use tracing::error;

use crate::args::PositiveUsize;
use crate::error::{AppError, AppResult, SchedulerError};
use crate::http::RequestDriver;

use super::pool::{WaveQueue, drain_queue};
use super::types::TokenOutcome;

/// Pool of named OS threads. Each thread owns a current-thread runtime for
/// the duration of the wave.
#[derive(Debug, Clone, Copy)]
pub struct ThreadPool {
    workers: PositiveUsize,
}

impl ThreadPool {
    #[must_use]
    pub const fn new(workers: PositiveUsize) -> Self {
        Self { workers }
    }

    #[must_use]
    pub const fn workers(&self) -> usize {
        self.workers.get()
    }

    pub(crate) async fn run_wave(
        &self,
        wave: usize,
        driver: &Arc<RequestDriver>,
        queue: Arc<WaveQueue>,
    ) -> AppResult<Vec<TokenOutcome>> {
        let worker_count = self.workers().min(queue.len());
        let driver = Arc::clone(driver);
        tokio::task::spawn_blocking(move || run_threads(wave, worker_count, &driver, &queue))
            .await?
    }
}

fn run_threads(
    wave: usize,
    worker_count: usize,
    driver: &Arc<RequestDriver>,
    queue: &Arc<WaveQueue>,
) -> AppResult<Vec<TokenOutcome>> {
    let mut first_error: Option<AppError> = None;
    let mut handles = Vec::with_capacity(worker_count);

    for worker in 0..worker_count {
        let driver = Arc::clone(driver);
        let queue = Arc::clone(queue);
        let spawned = thread::Builder::new()
            .name(format!("wavebench-worker-{}", worker))
            .spawn(move || -> std::io::Result<Vec<TokenOutcome>> {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()?;
                Ok(runtime.block_on(drain_queue(&driver, &queue)))
            });
        match spawned {
            Ok(handle) => handles.push((worker, handle)),
            Err(err) => {
                error!("Failed to spawn worker thread {}: {}", worker, err);
                first_error = Some(AppError::scheduler(SchedulerError::SpawnWorker {
                    worker,
                    source: err,
                }));
                break;
            }
        }
    }

    let mut outcomes = Vec::with_capacity(queue.len());
    for (worker, handle) in handles {
        match handle.join() {
            Ok(Ok(batch)) => outcomes.extend(batch),
            Ok(Err(err)) => {
                error!("Worker thread {} could not build its runtime: {}", worker, err);
                first_error.get_or_insert(AppError::scheduler(SchedulerError::WorkerRuntime {
                    worker,
                    source: err,
                }));
            }
            Err(_panic) => {
                error!("Worker thread {} panicked during wave {}", worker, wave);
                first_error.get_or_insert(AppError::scheduler(SchedulerError::WorkerPanicked {
                    worker,
                    wave,
                }));
            }
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(outcomes),
    }
}
