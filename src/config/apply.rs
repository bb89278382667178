use std::time::Duration;

use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{BenchArgs, PositiveUsize};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::{ConfigFile, DurationValue};

/// Applies configuration values to CLI arguments.
///
/// Values given explicitly on the command line win over the config file.
///
/// # Errors
///
/// Returns an error when a config value is out of range or unparsable.
pub fn apply_config(
    args: &mut BenchArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "url")
        && let Some(url) = config.url.as_ref()
    {
        args.url.clone_from(url);
    }

    if !is_cli(matches, "requests")
        && let Some(requests) = config.requests
    {
        args.requests = ensure_positive(requests, "requests")?;
    }

    if !is_cli(matches, "workers")
        && let Some(workers) = config.workers
    {
        args.workers = ensure_positive(workers, "workers")?;
    }

    if !is_cli(matches, "attempts")
        && let Some(attempts) = config.attempts
    {
        args.attempts = ensure_positive(attempts, "attempts")?;
    }

    if !is_cli(matches, "max_waves")
        && let Some(waves) = config.waves
    {
        args.max_waves = ensure_positive(waves, "waves")?;
    }

    if !is_cli(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.request_timeout = to_duration(timeout, "timeout")?;
    }

    if !is_cli(matches, "connect_timeout")
        && let Some(timeout) = config.connect_timeout.as_ref()
    {
        args.connect_timeout = to_duration(timeout, "connect_timeout")?;
    }

    if let Some(backoff) = config.backoff.as_ref() {
        if !is_cli(matches, "backoff_base")
            && let Some(base) = backoff.base.as_ref()
        {
            args.backoff_base = to_duration(base, "backoff.base")?;
        }
        if !is_cli(matches, "backoff_max")
            && let Some(max) = backoff.max.as_ref()
        {
            args.backoff_max = to_duration(max, "backoff.max")?;
        }
        if !is_cli(matches, "backoff_jitter")
            && let Some(jitter) = backoff.jitter.as_ref()
        {
            args.backoff_jitter = to_duration(jitter, "backoff.jitter")?;
        }
    }

    if !is_cli(matches, "strategy")
        && let Some(strategy) = config.strategy
    {
        args.strategy = strategy;
    }

    if !is_cli(matches, "output_dir")
        && let Some(output_dir) = config.output_dir.as_ref()
    {
        args.output_dir.clone_from(output_dir);
    }

    if !is_cli(matches, "format")
        && let Some(format) = config.format
    {
        args.format = format;
    }

    if !is_cli(matches, "verbose")
        && let Some(verbose) = config.verbose
    {
        args.verbose = verbose;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, id: &str) -> bool {
    matches!(matches.value_source(id), Some(ValueSource::CommandLine))
}

fn ensure_positive(value: usize, field: &'static str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value)
        .map_err(|err| AppError::config(ConfigError::FieldMustBePositive { field, source: err }))
}

fn to_duration(value: &DurationValue, field: &'static str) -> AppResult<Duration> {
    value
        .to_duration()
        .map_err(|err| AppError::config(ConfigError::InvalidDuration { field, source: err }))
}
