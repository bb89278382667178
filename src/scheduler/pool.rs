use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::args::{PositiveUsize, Strategy};
use crate::error::AppResult;
use crate::http::RequestDriver;

use super::tasks::TaskPool;
use super::threads::ThreadPool;
use super::types::{RequestToken, TokenOutcome};

/// Tokens of one wave, claimed by workers through a shared cursor.
#[derive(Debug)]
pub(crate) struct WaveQueue {
    tokens: Arc<[RequestToken]>,
    cursor: AtomicUsize,
}

impl WaveQueue {
    pub(crate) fn new(tokens: Vec<RequestToken>) -> Self {
        Self {
            tokens: tokens.into(),
            cursor: AtomicUsize::new(0),
        }
    }

    pub(crate) fn next(&self) -> Option<RequestToken> {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.tokens.get(index).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.tokens.len()
    }
}

/// Drives tokens until the queue is exhausted. Shared by both pool strategies.
pub(crate) async fn drain_queue(driver: &RequestDriver, queue: &WaveQueue) -> Vec<TokenOutcome> {
    let mut outcomes = Vec::new();
    while let Some(token) = queue.next() {
        let outcome = driver.drive(token).await;
        outcomes.push(TokenOutcome { token, outcome });
    }
    outcomes
}

/// Bounded set of workers executing one wave at a time.
#[derive(Debug, Clone)]
pub enum WorkerPool {
    Tasks(TaskPool),
    Threads(ThreadPool),
}

impl WorkerPool {
    #[must_use]
    pub const fn for_strategy(strategy: Strategy, workers: PositiveUsize) -> Self {
        match strategy {
            Strategy::Tasks => WorkerPool::Tasks(TaskPool::new(workers)),
            Strategy::Threads => WorkerPool::Threads(ThreadPool::new(workers)),
        }
    }

    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        match self {
            WorkerPool::Tasks(_) => Strategy::Tasks,
            WorkerPool::Threads(_) => Strategy::Threads,
        }
    }

    #[must_use]
    pub const fn workers(&self) -> usize {
        match self {
            WorkerPool::Tasks(pool) => pool.workers(),
            WorkerPool::Threads(pool) => pool.workers(),
        }
    }

    /// Runs every token of a wave and waits for all workers to finish.
    ///
    /// Outcomes are returned in completion order, one per token.
    ///
    /// # Errors
    ///
    /// Returns an error when a worker panics or its runtime cannot be set up.
    pub async fn run_wave(
        &self,
        wave: usize,
        driver: &Arc<RequestDriver>,
        tokens: Vec<RequestToken>,
    ) -> AppResult<Vec<TokenOutcome>> {
        let queue = Arc::new(WaveQueue::new(tokens));
        match self {
            WorkerPool::Tasks(pool) => pool.run_wave(wave, driver, queue).await,
            WorkerPool::Threads(pool) => pool.run_wave(wave, driver, queue).await,
        }
    }
}
