use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::args::Strategy;
use crate::entry::RunPlan;
use crate::error::AppResult;
use crate::http::{Fetcher, HttpFetcher, RequestDriver, build_client};
use crate::metrics::{AggregateResult, measure};
use crate::scheduler::{RunCounters, RunOutcome, WaveScheduler, WorkerPool};
use crate::sinks::persist_result;

use super::summary::print_summary;

#[derive(Debug)]
pub struct RunReport {
    pub strategy: Strategy,
    pub outcome: RunOutcome,
    pub result: AggregateResult,
    /// `None` when the result file could not be written.
    pub saved_to: Option<PathBuf>,
}

/// Runs one strategy against the plan's target over HTTP.
///
/// # Errors
///
/// Returns an error when the client, worker pool, or resource sampling
/// cannot be set up. Failed requests are reported, not returned as errors.
pub async fn run_strategy(plan: &RunPlan, strategy: Strategy) -> AppResult<RunReport> {
    let client = build_client(&plan.client_settings(strategy))?;
    let fetcher: Arc<dyn Fetcher> = Arc::new(HttpFetcher::new(client, plan.url.clone()));
    run_with_fetcher(plan, strategy, fetcher).await
}

/// Runs one strategy with a caller-supplied fetcher.
///
/// # Errors
///
/// Returns an error when the worker pool or resource sampling fails.
pub async fn run_with_fetcher(
    plan: &RunPlan,
    strategy: Strategy,
    fetcher: Arc<dyn Fetcher>,
) -> AppResult<RunReport> {
    info!(
        "Starting {} benchmark against {}: {} requests, {} workers, up to {} waves",
        strategy,
        plan.url,
        plan.requests.get(),
        plan.workers.get(),
        plan.max_waves.get()
    );

    let counters = Arc::new(RunCounters::new());
    let driver = Arc::new(RequestDriver::new(fetcher, plan.driver, counters));
    let scheduler = WaveScheduler::new(
        plan.scheduler_config(),
        WorkerPool::for_strategy(strategy, plan.workers),
        driver,
    );

    let (outcome, usage) = measure(scheduler.run()).await?;
    let result = AggregateResult::new(outcome.total, outcome.successful, &usage);
    info!("{} benchmark finished", strategy);

    print_summary(strategy, &outcome, &result);
    let saved_to = persist_result(&plan.sink, strategy, &result).await;

    Ok(RunReport {
        strategy,
        outcome,
        result,
        saved_to,
    })
}
