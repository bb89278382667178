//! Wave scheduling: dispatches pending request tokens across a bounded worker
//! pool and re-drives the failed subset until nothing is pending or the wave
//! budget runs out.
mod pool;
mod tasks;
mod threads;
mod types;


use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::args::PositiveUsize;
use crate::error::{AppError, AppResult, SchedulerError};
use crate::http::RequestDriver;

pub use pool::WorkerPool;
pub use tasks::TaskPool;
pub use threads::ThreadPool;
pub use types::{
    CounterSnapshot, Outcome, RequestToken, RunCounters, TokenOutcome, request_tokens,
};

#[derive(Debug, Clone, Copy)]
pub struct SchedulerConfig {
    pub requests: usize,
    pub max_waves: PositiveUsize,
}

/// Bookkeeping for one completed wave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveReport {
    /// 1-based wave number.
    pub wave: usize,
    pub dispatched: usize,
    pub succeeded: u64,
    pub failed: u64,
    pub elapsed: Duration,
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub total: usize,
    pub successful: usize,
    /// Tokens still pending when the wave budget ran out.
    pub unresolved: Vec<RequestToken>,
    pub waves: Vec<WaveReport>,
}

impl RunOutcome {
    #[must_use]
    pub const fn failed(&self) -> usize {
        self.total.saturating_sub(self.successful)
    }

    #[must_use]
    pub fn waves_executed(&self) -> usize {
        self.waves.len()
    }
}

pub struct WaveScheduler {
    config: SchedulerConfig,
    pool: WorkerPool,
    driver: Arc<RequestDriver>,
}

impl WaveScheduler {
    #[must_use]
    pub const fn new(config: SchedulerConfig, pool: WorkerPool, driver: Arc<RequestDriver>) -> Self {
        Self {
            config,
            pool,
            driver,
        }
    }

    /// Runs waves until every token succeeded or `max_waves` waves ran.
    ///
    /// # Errors
    ///
    /// Returns an error when the worker pool fails to execute a wave.
    pub async fn run(&self) -> AppResult<RunOutcome> {
        let max_waves = self.config.max_waves.get();
        let counters = Arc::clone(self.driver.counters());
        let mut pending = request_tokens(self.config.requests);
        let mut waves: Vec<WaveReport> = Vec::new();
        let mut successful: usize = 0;

        while !pending.is_empty() && waves.len() < max_waves {
            let wave = waves.len().saturating_add(1);
            let dispatched = pending.len();
            info!(
                "Wave {}/{} ({}, {} workers): {} requests pending",
                wave,
                max_waves,
                self.pool.strategy(),
                self.pool.workers(),
                dispatched
            );

            let before = counters.snapshot();
            let started = Instant::now();
            let outcomes = self.pool.run_wave(wave, &self.driver, pending).await?;
            if outcomes.len() != dispatched {
                return Err(AppError::scheduler(SchedulerError::OutcomeMismatch {
                    wave,
                    dispatched,
                    returned: outcomes.len(),
                }));
            }

            let next = failed_tokens(outcomes);
            successful = successful.saturating_add(dispatched.saturating_sub(next.len()));
            let delta = counters.snapshot().delta_since(before);
            info!(
                "Wave {} finished: {} new successes, {} new failures",
                wave, delta.successful, delta.failed
            );

            waves.push(WaveReport {
                wave,
                dispatched,
                succeeded: delta.successful,
                failed: delta.failed,
                elapsed: started.elapsed(),
            });
            pending = next;
        }

        if !pending.is_empty() {
            warn!(
                "{} requests still failing after {} waves; counting them as failed",
                pending.len(),
                waves.len()
            );
        }

        Ok(RunOutcome {
            total: self.config.requests,
            successful,
            unresolved: pending,
            waves,
        })
    }
}

/// Failed tokens of a wave in dispatch order.
fn failed_tokens(outcomes: Vec<TokenOutcome>) -> Vec<RequestToken> {
    let mut failed: Vec<RequestToken> = outcomes
        .into_iter()
        .filter(|entry| !entry.outcome.is_success())
        .map(|entry| entry.token)
        .collect();
    failed.sort_unstable();
    failed
}
