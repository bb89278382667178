use clap::Parser;
use std::time::Duration;

use super::defaults::{
    DEFAULT_ATTEMPTS, DEFAULT_BACKOFF_BASE, DEFAULT_BACKOFF_JITTER, DEFAULT_BACKOFF_MAX,
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_OUTPUT_DIR, DEFAULT_REQUESTS, DEFAULT_TIMEOUT, DEFAULT_URL,
    DEFAULT_WAVES, DEFAULT_WORKERS,
};
use super::parsers::{parse_duration_arg, parse_positive_usize};
use super::types::{PositiveUsize, ReportFormat, StrategySelection};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Wave-based HTTP micro-benchmark - bounded worker pools, local retries with backoff, and CPU/memory accounting per run."
)]
pub struct BenchArgs {
    /// Target URL for every GET request
    #[arg(long = "url", short = 'u', default_value = DEFAULT_URL)]
    pub url: String,

    /// Number of logical requests per run
    #[arg(long = "requests", short = 'n', default_value = DEFAULT_REQUESTS, value_parser = parse_positive_usize)]
    pub requests: PositiveUsize,

    /// Size of the worker pool
    #[arg(long = "workers", short = 'w', default_value = DEFAULT_WORKERS, value_parser = parse_positive_usize)]
    pub workers: PositiveUsize,

    /// Attempts per request within a single wave
    #[arg(long = "attempts", default_value = DEFAULT_ATTEMPTS, value_parser = parse_positive_usize)]
    pub attempts: PositiveUsize,

    /// Maximum number of waves before pending requests are given up
    #[arg(long = "waves", default_value = DEFAULT_WAVES, value_parser = parse_positive_usize)]
    pub max_waves: PositiveUsize,

    /// Per-request timeout (supports ms/s/m/h)
    #[arg(long = "timeout", default_value = DEFAULT_TIMEOUT, value_parser = parse_duration_arg)]
    pub request_timeout: Duration,

    /// Connect timeout (supports ms/s/m/h)
    #[arg(long = "connect-timeout", default_value = DEFAULT_CONNECT_TIMEOUT, value_parser = parse_duration_arg)]
    pub connect_timeout: Duration,

    /// Backoff after the first failed attempt; doubles on each further failure
    #[arg(long = "backoff-base", default_value = DEFAULT_BACKOFF_BASE, value_parser = parse_duration_arg)]
    pub backoff_base: Duration,

    /// Upper bound for the exponential part of the backoff
    #[arg(long = "backoff-max", default_value = DEFAULT_BACKOFF_MAX, value_parser = parse_duration_arg)]
    pub backoff_max: Duration,

    /// Maximum random jitter added to each backoff
    #[arg(long = "backoff-jitter", default_value = DEFAULT_BACKOFF_JITTER, value_parser = parse_duration_arg)]
    pub backoff_jitter: Duration,

    /// Worker pool strategy to benchmark
    #[arg(long = "strategy", short = 's', value_enum, default_value_t = StrategySelection::All)]
    pub strategy: StrategySelection,

    /// Directory for result files (one per strategy, overwritten each run)
    #[arg(long = "output-dir", short = 'o', default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: String,

    /// Encoding of the result files
    #[arg(long = "format", value_enum, default_value_t = ReportFormat::Json)]
    pub format: ReportFormat,

    /// Path to a TOML or JSON config file
    #[arg(long = "config", short = 'c')]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long = "verbose", short = 'v')]
    pub verbose: bool,
}
