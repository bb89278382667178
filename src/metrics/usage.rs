use std::time::Duration;

use crate::error::{AppError, AppResult, MetricsError};

use super::types::ResourceSample;

#[cfg(target_os = "linux")]
const STATM_PATH: &str = "/proc/self/statm";

/// Samples CPU time and resident memory of the current process.
///
/// # Errors
///
/// Returns an error when either figure cannot be read; callers treat this as
/// fatal.
pub fn sample_resources() -> AppResult<ResourceSample> {
    let cpu_time = read_cpu_time().map_err(AppError::metrics)?;
    let rss_bytes = read_rss_bytes().map_err(AppError::metrics)?;
    Ok(ResourceSample {
        cpu_time,
        rss_bytes,
    })
}

#[cfg(unix)]
fn read_cpu_time() -> Result<Duration, MetricsError> {
    let mut usage = std::mem::MaybeUninit::<libc::rusage>::zeroed();
    // Safety: RUSAGE_SELF is always a valid target and the pointer refers to
    // writable memory sized for a `rusage`.
    let rc = unsafe { libc::getrusage(libc::RUSAGE_SELF, usage.as_mut_ptr()) };
    if rc != 0 {
        return Err(MetricsError::CpuTime {
            source: std::io::Error::last_os_error(),
        });
    }
    // Safety: getrusage returned 0, so the struct has been filled in; it was
    // zero-initialized before the call in any case.
    let usage = unsafe { usage.assume_init() };
    Ok(timeval_to_duration(usage.ru_utime).saturating_add(timeval_to_duration(usage.ru_stime)))
}

#[cfg(not(unix))]
fn read_cpu_time() -> Result<Duration, MetricsError> {
    Err(MetricsError::CpuTime {
        source: std::io::Error::from(std::io::ErrorKind::Unsupported),
    })
}

#[cfg(unix)]
fn timeval_to_duration(value: libc::timeval) -> Duration {
    let secs = u64::try_from(value.tv_sec).unwrap_or(0);
    let micros = u64::try_from(value.tv_usec).unwrap_or(0);
    Duration::from_secs(secs).saturating_add(Duration::from_micros(micros))
}

#[cfg(target_os = "linux")]
fn read_rss_bytes() -> Result<u64, MetricsError> {
    let statm = std::fs::read_to_string(STATM_PATH).map_err(|err| MetricsError::ReadRss {
        path: STATM_PATH,
        source: err,
    })?;
    let resident = parse_statm_resident(&statm).ok_or_else(|| MetricsError::MalformedRss {
        content: statm.trim().to_owned(),
    })?;
    // Safety: sysconf is safe to call; we only read the page size.
    let page_size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    let page_size = u64::try_from(page_size)
        .ok()
        .filter(|size| *size > 0)
        .ok_or(MetricsError::PageSizeUnavailable)?;
    Ok(resident.saturating_mul(page_size))
}

#[cfg(not(target_os = "linux"))]
fn read_rss_bytes() -> Result<u64, MetricsError> {
    Err(MetricsError::RssUnsupported)
}

/// Resident page count: the second field of `/proc/self/statm`.
#[cfg(any(target_os = "linux", test))]
pub(super) fn parse_statm_resident(statm: &str) -> Option<u64> {
    let mut parts = statm.split_whitespace();
    let _size = parts.next()?;
    parts.next()?.parse::<u64>().ok()
}
