use std::path::PathBuf;

use tracing::warn;

use crate::args::BenchArgs;
use crate::error::AppResult;
use crate::http::{BackoffPolicy, DriverConfig, parse_target_url};
use crate::sinks::SinkConfig;

use super::types::RunPlan;

pub(crate) fn build_plan(args: &BenchArgs) -> AppResult<RunPlan> {
    let url = parse_target_url(&args.url)?;

    if args.backoff_max < args.backoff_base {
        warn!(
            "--backoff-max ({:?}) is below --backoff-base ({:?}); every retry waits {:?} plus jitter.",
            args.backoff_max, args.backoff_base, args.backoff_max
        );
    }

    Ok(RunPlan {
        url,
        requests: args.requests,
        workers: args.workers,
        max_waves: args.max_waves,
        driver: DriverConfig {
            attempts: args.attempts,
            backoff: BackoffPolicy::new(args.backoff_base, args.backoff_max, args.backoff_jitter),
        },
        request_timeout: args.request_timeout,
        connect_timeout: args.connect_timeout,
        strategies: args.strategy.strategies(),
        sink: SinkConfig {
            output_dir: PathBuf::from(&args.output_dir),
            format: args.format,
        },
    })
}
