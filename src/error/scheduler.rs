use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("Failed to build runtime for worker thread {worker}: {source}")]
    WorkerRuntime {
        worker: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to spawn worker thread {worker}: {source}")]
    SpawnWorker {
        worker: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("Worker {worker} panicked during wave {wave}.")]
    WorkerPanicked { worker: usize, wave: usize },
    #[error("Wave {wave} returned {returned} outcomes for {dispatched} dispatched tokens.")]
    OutcomeMismatch {
        wave: usize,
        dispatched: usize,
        returned: usize,
    },
}
