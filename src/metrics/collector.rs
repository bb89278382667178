use std::future::Future;
use std::time::Instant;

use tracing::debug;

use crate::error::AppResult;

use super::types::ResourceUsage;
use super::usage::sample_resources;

/// Runs `work` between two resource samples.
///
/// # Errors
///
/// Returns an error if sampling fails or `work` itself fails.
pub async fn measure<F, T>(work: F) -> AppResult<(T, ResourceUsage)>
where
    F: Future<Output = AppResult<T>>,
{
    let before = sample_resources()?;
    let started = Instant::now();
    let value = work.await?;
    let elapsed = started.elapsed();
    let after = sample_resources()?;

    debug!(
        "cpu_time {:?} -> {:?}, rss {} -> {} bytes",
        before.cpu_time, after.cpu_time, before.rss_bytes, after.rss_bytes
    );
    Ok((value, ResourceUsage::between(before, after, elapsed)))
}
