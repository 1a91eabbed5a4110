//! Shared context for command handlers
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use crate::features::attendance::{AttendanceConfig, AttendanceStore};
use crate::features::schedule::{Clock, WeekTracker};

/// Shared context for all command handlers
///
/// Contains the core services needed by the command handlers:
/// - AttendanceStore for the ledger and totals files
/// - Clock for the admin test-time override
/// - WeekTracker for the active weekly message state
/// - AttendanceConfig for the channel and emoji table
/// - Bot start time for uptime tracking
#[derive(Clone)]
pub struct CommandContext {
    pub store: AttendanceStore,
    pub clock: Clock,
    pub tracker: WeekTracker,
    pub attendance: AttendanceConfig,
    pub start_time: std::time::Instant,
}

impl CommandContext {
    /// Create a new CommandContext with the given services
    pub fn new(
        store: AttendanceStore,
        clock: Clock,
        tracker: WeekTracker,
        attendance: AttendanceConfig,
    ) -> Self {
        Self {
            store,
            clock,
            tracker,
            attendance,
            start_time: std::time::Instant::now(),
        }
    }
}
