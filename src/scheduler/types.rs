use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one logical request of a run, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Tokens `1..=count` in dispatch order.
#[must_use]
pub fn request_tokens(count: usize) -> Vec<RequestToken> {
    let count = u64::try_from(count).unwrap_or(u64::MAX);
    (1..=count).map(RequestToken::new).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Outcome::Success)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenOutcome {
    pub token: RequestToken,
    pub outcome: Outcome,
}

/// Success/failure tallies shared by every worker of a run.
///
/// `failed` counts wave-level failures, so a token that fails in two waves is
/// counted twice. Final failure counts are derived from the scheduler's
/// pending set instead.
#[derive(Debug, Default)]
pub struct RunCounters {
    successful: AtomicU64,
    failed: AtomicU64,
}

impl RunCounters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&self) {
        self.successful.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            successful: self.successful.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterSnapshot {
    pub successful: u64,
    pub failed: u64,
}

impl CounterSnapshot {
    #[must_use]
    pub const fn delta_since(self, earlier: CounterSnapshot) -> CounterSnapshot {
        CounterSnapshot {
            successful: self.successful.saturating_sub(earlier.successful),
            failed: self.failed.saturating_sub(earlier.failed),
        }
    }
}
