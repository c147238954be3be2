//! Clock Port (Driven Port)
//!
//! Wall-clock reads and sleeps behind an interface so every timed loop
//! in the lifecycle is deterministic under test.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::shared::Timestamp;

/// Port for time: reading the clock and suspending the task.
#[async_trait]
pub trait ClockPort: Send + Sync {
    /// Current UTC time.
    fn now(&self) -> Timestamp;

    /// Suspend the current task for the given duration.
    async fn sleep(&self, duration: Duration);
}

/// Production clock over the system time and the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait]
impl ClockPort for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
