use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Bytes per mebibyte.
const BYTES_PER_MB: f64 = 1_048_576.0;
/// Ratio to percent.
const PERCENT: f64 = 100.0;

/// Point-in-time view of this process's resource consumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceSample {
    /// User plus system CPU time consumed so far.
    pub cpu_time: Duration,
    pub rss_bytes: u64,
}

/// Resource usage between two samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceUsage {
    pub elapsed: Duration,
    /// CPU time over wall time. Exceeds 100 when several cores were busy.
    pub cpu_usage_percent: f64,
    /// Signed resident memory change; negative when memory was released.
    pub memory_delta_mb: f64,
}

impl ResourceUsage {
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "Percent and MB figures are reported as floating point."
    )]
    pub fn between(before: ResourceSample, after: ResourceSample, elapsed: Duration) -> Self {
        let cpu_delta = after.cpu_time.saturating_sub(before.cpu_time);
        let cpu_usage_percent = if elapsed.is_zero() {
            0.0
        } else {
            cpu_delta.as_secs_f64() / elapsed.as_secs_f64() * PERCENT
        };
        let rss_delta = i128::from(after.rss_bytes).saturating_sub(i128::from(before.rss_bytes));
        let memory_delta_mb = rss_delta as f64 / BYTES_PER_MB;

        Self {
            elapsed,
            cpu_usage_percent,
            memory_delta_mb,
        }
    }
}

/// Final record of one run, written to the result file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    /// Seconds.
    pub average_time_per_request: f64,
    pub cpu_usage_percent: f64,
    pub memory_usage_mb: f64,
    /// Seconds.
    pub total_elapsed_time: f64,
}

impl AggregateResult {
    #[must_use]
    pub fn new(total: usize, successful: usize, usage: &ResourceUsage) -> Self {
        let total_requests = u64::try_from(total).unwrap_or(u64::MAX);
        let successful_requests = u64::try_from(successful)
            .unwrap_or(u64::MAX)
            .min(total_requests);
        let average = u32::try_from(total)
            .ok()
            .and_then(|count| usage.elapsed.checked_div(count))
            .unwrap_or(Duration::ZERO);

        Self {
            total_requests,
            successful_requests,
            failed_requests: total_requests.saturating_sub(successful_requests),
            average_time_per_request: average.as_secs_f64(),
            cpu_usage_percent: usage.cpu_usage_percent,
            memory_usage_mb: usage.memory_delta_mb,
            total_elapsed_time: usage.elapsed.as_secs_f64(),
        }
    }
}
