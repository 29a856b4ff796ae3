//! Simulated backend round-trip delay.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delay range applied before every service call resolves.
///
/// The delay is drawn uniformly from `[min_ms, max_ms]`; an inverted range
/// waits `min_ms`. A zero range
/// resolves immediately without touching the timer, so services work
/// outside a tokio runtime when latency is disabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Latency {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            min_ms: 200,
            max_ms: 400,
        }
    }
}

impl Latency {
    /// No delay.
    pub const fn none() -> Self {
        Self { min_ms: 0, max_ms: 0 }
    }

    pub const fn fixed(ms: u64) -> Self {
        Self { min_ms: ms, max_ms: ms }
    }

    pub fn between(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms: min_ms.max(max_ms),
        }
    }

    pub fn is_none(&self) -> bool {
        self.min_ms == 0 && self.max_ms == 0
    }

    /// Pick one delay from the range.
    pub fn sample(&self) -> Duration {
        if self.max_ms <= self.min_ms {
            return Duration::from_millis(self.min_ms);
        }
        let ms = rand::rng().random_range(self.min_ms..=self.max_ms);
        Duration::from_millis(ms)
    }

    /// Sleep for one sampled delay.
    pub async fn wait(&self) {
        if self.is_none() {
            return;
        }
        let delay = self.sample();
        tokio::time::sleep(delay).await;
    }
}
