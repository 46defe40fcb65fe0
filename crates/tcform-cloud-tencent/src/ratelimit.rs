//! Per-action request pacing

use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep_until};

/// Requests per second allowed for a single API action
pub const DEFAULT_LIMIT_PER_SECOND: u32 = 20;

/// Keeps a minimum interval between two calls of the same action
#[derive(Debug)]
pub struct RateLimiter {
    interval: Duration,
    next_slot: Mutex<HashMap<String, Instant>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT_PER_SECOND)
    }
}

impl RateLimiter {
    pub fn new(per_second: u32) -> Self {
        Self {
            interval: Duration::from_secs(1) / per_second.max(1),
            next_slot: Mutex::new(HashMap::new()),
        }
    }

    /// Wait until `action` may be called again
    pub async fn check(&self, action: &str) {
        let slot = {
            let mut slots = self.next_slot.lock().await;
            let now = Instant::now();
            let slot = slots.get(action).copied().filter(|s| *s > now).unwrap_or(now);
            slots.insert(action.to_string(), slot + self.interval);
            slot
        };

        if slot > Instant::now() {
            tracing::debug!("Rate limit reached for {}, waiting", action);
            sleep_until(slot).await;
        }
    }
}
