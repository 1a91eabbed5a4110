//! Bot clock with admin test-time override
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use chrono::NaiveDateTime;
use std::sync::Arc;
use tokio::sync::RwLock;

/// The bot's notion of "now".
///
/// Every schedule and check-in decision reads time through this one clock.
/// `/set_time` installs a frozen override so a weekly rollover can be
/// exercised without waiting for Monday; `/clear_time` returns to the local
/// wall clock. Clones share the override.
#[derive(Clone, Default)]
pub struct Clock {
    override_time: Arc<RwLock<Option<NaiveDateTime>>>,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time: the override when set, else local wall-clock time.
    pub async fn now(&self) -> NaiveDateTime {
        match *self.override_time.read().await {
            Some(t) => t,
            None => chrono::Local::now().naive_local(),
        }
    }

    /// Freeze the clock at `time` until cleared.
    pub async fn set_override(&self, time: NaiveDateTime) {
        *self.override_time.write().await = Some(time);
    }

    /// Return to the system clock.
    pub async fn clear_override(&self) {
        *self.override_time.write().await = None;
    }
}
