//! Leading-edge throttle for pointer-move samples.
//!
//! The first sample is always admitted. After that a sample is admitted only
//! when more than the interval has elapsed since the last *admitted* sample;
//! everything in between is dropped, not queued. This bounds the hit-test
//! rate under high-frequency pointer input.

#[cfg(test)]
#[path = "throttle_test.rs"]
mod throttle_test;

use crate::consts::DEFAULT_MOVE_THROTTLE_MS;

#[derive(Debug, Clone)]
pub struct MoveThrottle {
    interval_ms: u64,
    last_admitted_ms: Option<u64>,
}

impl MoveThrottle {
    #[must_use]
    pub fn new(interval_ms: u64) -> Self {
        Self { interval_ms, last_admitted_ms: None }
    }

    #[must_use]
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Decide whether the sample stamped `now_ms` passes, recording it if so.
    ///
    /// A clock that runs backwards counts as zero elapsed time.
    pub fn admit(&mut self, now_ms: u64) -> bool {
        if let Some(last) = self.last_admitted_ms {
            if now_ms.saturating_sub(last) <= self.interval_ms {
                return false;
            }
        }
        self.last_admitted_ms = Some(now_ms);
        true
    }
}

impl Default for MoveThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_MOVE_THROTTLE_MS)
    }
}
