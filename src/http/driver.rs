use std::sync::Arc;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::args::PositiveUsize;
use crate::scheduler::{Outcome, RequestToken, RunCounters};

use super::backoff::BackoffPolicy;
use super::fetch::Fetcher;

#[derive(Debug, Clone, Copy)]
pub struct DriverConfig {
    /// Attempts per token within one wave.
    pub attempts: PositiveUsize,
    pub backoff: BackoffPolicy,
}

/// Issues a token's request, retrying locally before reporting failure.
pub struct RequestDriver {
    fetcher: Arc<dyn Fetcher>,
    config: DriverConfig,
    counters: Arc<RunCounters>,
}

impl RequestDriver {
    #[must_use]
    pub fn new(fetcher: Arc<dyn Fetcher>, config: DriverConfig, counters: Arc<RunCounters>) -> Self {
        Self {
            fetcher,
            config,
            counters,
        }
    }

    #[must_use]
    pub const fn counters(&self) -> &Arc<RunCounters> {
        &self.counters
    }

    pub async fn drive(&self, token: RequestToken) -> Outcome {
        let attempts = self.config.attempts.get();
        for attempt in 1..=attempts {
            let result = self.fetcher.fetch(token).await;
            if result.is_success() {
                self.counters.record_success();
                info!("Request {} succeeded on attempt {}", token, attempt);
                return Outcome::Success;
            }

            warn!(
                "Request {} failed (attempt {}/{}): {}",
                token, attempt, attempts, result
            );
            if attempt < attempts {
                let delay = self.config.backoff.delay(attempt, &mut rand::thread_rng());
                if !delay.is_zero() {
                    debug!(
                        "Retrying request {} in {}.{:03}s",
                        token,
                        delay.as_secs(),
                        delay.subsec_millis()
                    );
                    sleep(delay).await;
                }
            }
        }

        self.counters.record_failure();
        warn!(
            "Request {} failed after {} local attempts",
            token, attempts
        );
        Outcome::Failure
    }
}
