//! HTTP fetch capability and the per-request retry driver.
mod backoff;
mod client;
mod driver;
mod fetch;

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(test)]
mod tests;

pub use backoff::BackoffPolicy;
pub use client::{ClientSettings, build_client, parse_target_url};
pub use driver::{DriverConfig, RequestDriver};
pub use fetch::{FetchOutcome, Fetcher, HttpFetcher};
