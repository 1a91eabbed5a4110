// Core layer - configuration and shared utilities
pub mod core;

// Features layer - attendance, schedule, roster
pub mod features;

// Application layer
pub mod command_handler;
pub mod commands;

// Re-export core config
pub use core::Config;

// Re-export feature items
pub use features::{
    // Attendance
    AttendanceConfig, AttendanceStore, CheckInOutcome, CheckInProcessor, WeekLedger,
    // Roster
    RosterReply,
    // Schedule
    Clock, WeekTracker, WeeklyScheduler,
};
