use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::error::Result;

/// Bounded wait: polls a probe at a fixed interval until it yields a value
/// or the timeout runs out.
///
/// A probe returns `Ok(None)` while the thing it looks for is not there yet;
/// that is the only retryable outcome. `Err` ends the wait immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollWait {
    timeout: Duration,
    interval: Duration,
}

impl PollWait {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Poll until `probe` returns a value. `Ok(None)` means the timeout
    /// elapsed without one.
    pub fn poll<T, F>(&self, mut probe: F) -> Result<Option<T>>
    where
        F: FnMut() -> Result<Option<T>>,
    {
        let start = Instant::now();
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            if let Some(value) = probe()? {
                debug!("Probe succeeded after {} attempt(s)", attempts);
                return Ok(Some(value));
            }

            let elapsed = start.elapsed();
            if elapsed >= self.timeout {
                debug!("Probe gave up after {} attempt(s) ({:?})", attempts, elapsed);
                return Ok(None);
            }

            thread::sleep(self.interval.min(self.timeout - elapsed));
        }
    }
}

impl Default for PollWait {
    fn default() -> Self {
        Self::new(Duration::from_secs(10), Duration::from_secs(1))
    }
}
