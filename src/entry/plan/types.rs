use std::time::Duration;

use reqwest::Url;

use crate::args::{PositiveUsize, Strategy};
use crate::http::{ClientSettings, DriverConfig};
use crate::scheduler::SchedulerConfig;
use crate::sinks::SinkConfig;

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub url: Url,
    pub requests: PositiveUsize,
    pub workers: PositiveUsize,
    pub max_waves: PositiveUsize,
    pub driver: DriverConfig,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub strategies: Vec<Strategy>,
    pub sink: SinkConfig,
}

impl RunPlan {
    #[must_use]
    pub const fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            requests: self.requests.get(),
            max_waves: self.max_waves,
        }
    }

    /// Thread workers each run their own runtime, so pooled connections
    /// cannot outlive the thread that opened them.
    #[must_use]
    pub const fn client_settings(&self, strategy: Strategy) -> ClientSettings {
        ClientSettings {
            request_timeout: self.request_timeout,
            connect_timeout: self.connect_timeout,
            keep_alive: matches!(strategy, Strategy::Tasks),
        }
    }
}
