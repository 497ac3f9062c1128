//! Fixed-interval pacing of remote calls

use std::time::Duration;

/// Sleeps a fixed delay after remote calls.
///
/// Entity creations wait the full delay; variant and channel listing calls wait
/// half of it. A zero delay never sleeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacer {
    delay: Duration,
}

impl Pacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Delay used after variant-level calls
    pub fn short_delay(&self) -> Duration {
        self.delay / 2
    }

    /// Pause after an entity creation call
    pub fn wait(&self) {
        Self::sleep(self.delay);
    }

    /// Pause after a variant or channel listing call
    pub fn wait_short(&self) {
        Self::sleep(self.short_delay());
    }

    fn sleep(duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}
