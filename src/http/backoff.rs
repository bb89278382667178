use std::time::Duration;

use rand::Rng;

/// Exponential backoff with uniform jitter.
///
/// The delay after the n-th failed attempt is `min(base * 2^(n-1), max)`
/// plus a random amount in `[0, jitter]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    pub base: Duration,
    pub max: Duration,
    pub jitter: Duration,
}

/// Doubling stops here; `base * 2^31` already exceeds any sane `max`.
const MAX_SHIFT: u32 = 31;

impl BackoffPolicy {
    #[must_use]
    pub const fn new(base: Duration, max: Duration, jitter: Duration) -> Self {
        Self { base, max, jitter }
    }

    /// No sleeping between attempts.
    #[must_use]
    pub const fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO, Duration::ZERO)
    }

    #[must_use]
    pub fn base_delay(&self, failed_attempt: usize) -> Duration {
        let shift = u32::try_from(failed_attempt.saturating_sub(1))
            .unwrap_or(MAX_SHIFT)
            .min(MAX_SHIFT);
        let factor = 1u32.checked_shl(shift).unwrap_or(u32::MAX);
        self.base
            .checked_mul(factor)
            .unwrap_or(self.max)
            .min(self.max)
    }

    pub fn delay<R>(&self, failed_attempt: usize, rng: &mut R) -> Duration
    where
        R: Rng + ?Sized,
    {
        let base = self.base_delay(failed_attempt);
        let jitter_us = u64::try_from(self.jitter.as_micros()).unwrap_or(u64::MAX);
        if jitter_us == 0 {
            return base;
        }
        base.saturating_add(Duration::from_micros(rng.gen_range(0..=jitter_us)))
    }
}
