use std::sync::Arc;

use tracing::error;

use crate::args::PositiveUsize;
use crate::error::{AppError, AppResult, SchedulerError};
use crate::http::RequestDriver;

use super::pool::{WaveQueue, drain_queue};
use super::types::TokenOutcome;

/// Pool of tokio tasks on the ambient multi-thread runtime.
#[derive(Debug, Clone, Copy)]
pub struct TaskPool {
    workers: PositiveUsize,
}

impl TaskPool {
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
        let mut handles = Vec::with_capacity(worker_count);
        for _ in 0..worker_count {
            let driver = Arc::clone(driver);
            let queue = Arc::clone(&queue);
            handles.push(tokio::spawn(
                async move { drain_queue(&driver, &queue).await },
            ));
        }

        let mut outcomes = Vec::with_capacity(queue.len());
        let mut first_error: Option<AppError> = None;
        for (worker, handle) in handles.into_iter().enumerate() {
            match handle.await {
                Ok(batch) => outcomes.extend(batch),
                Err(err) => {
                    error!("Worker task {} failed during wave {}: {}", worker, wave, err);
                    if first_error.is_none() {
                        first_error = Some(if err.is_panic() {
                            AppError::scheduler(SchedulerError::WorkerPanicked { worker, wave })
                        } else {
                            AppError::from(err)
                        });
                    }
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(outcomes),
        }
    }
}
