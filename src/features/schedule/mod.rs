//! # Schedule Feature
//!
//! The bot clock and the Monday rollover loop.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod clock;
pub mod weekly;

pub use clock::Clock;
pub use weekly::{WeekTracker, WeeklyScheduler};
