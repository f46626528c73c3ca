use std::net::IpAddr;
use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Per-IP sliding-window limiter for the public submit endpoint.
pub struct IngestRateLimiter {
    /// ip -> (hits in the current window, when the window opened)
    windows: DashMap<IpAddr, (u32, Instant)>,
}

impl IngestRateLimiter {
    pub fn new() -> Self {
        Self {
            windows: DashMap::new(),
        }
    }

    /// Check if a submission from `ip` is allowed. Returns Ok(()) or Err with
    /// the number of seconds until the window resets.
    pub fn check(&self, ip: IpAddr, limit: u32, window_secs: u64) -> Result<(), u64> {
        let mut slot = self.windows.entry(ip).or_insert((0, Instant::now()));
        let (hits, opened) = slot.value_mut();

        let age = opened.elapsed();
        if age > Duration::from_secs(window_secs) {
            // Lapsed window; this request opens a fresh one.
            *hits = 1;
            *opened = Instant::now();
            Ok(())
        } else if *hits < limit {
            *hits += 1;
            Ok(())
        } else {
            Err(window_secs.saturating_sub(age.as_secs()))
        }
    }

    /// Drop windows that opened more than `max_age` ago.
    pub fn cleanup(&self, max_age: Duration) {
        self.windows
            .retain(|_, (_, opened)| opened.elapsed() < max_age);
    }
}

impl Default for IngestRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
