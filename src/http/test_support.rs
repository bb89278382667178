use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::scheduler::RequestToken;

use super::fetch::{FetchOutcome, Fetcher};

/// Fetcher that fails selected tokens a fixed number of times.
#[derive(Debug, Default)]
pub(crate) struct ScriptedFetcher {
    failures: HashMap<u64, usize>,
    calls: Mutex<HashMap<u64, usize>>,
}

impl ScriptedFetcher {
    pub(crate) fn always_ok() -> Self {
        Self::default()
    }

    /// `token` fails its first `count` fetches, then succeeds.
    pub(crate) fn failing(mut self, token: u64, count: usize) -> Self {
        self.failures.insert(token, count);
        self
    }

    pub(crate) fn always_failing(self, token: u64) -> Self {
        self.failing(token, usize::MAX)
    }

    pub(crate) fn calls(&self, token: u64) -> usize {
        self.calls
            .lock()
            .map_or(0, |calls| calls.get(&token).copied().unwrap_or(0))
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.calls
            .lock()
            .map_or(0, |calls| calls.values().sum())
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, token: RequestToken) -> FetchOutcome {
        let call = match self.calls.lock() {
            Ok(mut calls) => {
                let entry = calls.entry(token.get()).or_insert(0);
                *entry = entry.saturating_add(1);
                *entry
            }
            Err(_) => {
                return FetchOutcome::Transport {
                    message: "scripted fetcher lock poisoned".to_owned(),
                };
            }
        };
        let failing = self.failures.get(&token.get()).copied().unwrap_or(0);
        if call <= failing {
            FetchOutcome::Status { status: 503 }
        } else {
            FetchOutcome::Ok { status: 200 }
        }
    }
}
