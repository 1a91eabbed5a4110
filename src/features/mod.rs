//! # Features Module
//!
//! Feature modules and the version registry behind `/version`.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.2.0: Add roster feature
//! - 1.1.0: Attendance totals file
//! - 1.0.0: Initial creation with attendance and schedule features

pub mod attendance;
pub mod roster;
pub mod schedule;

// Re-export feature items used across the crate
pub use attendance::{
    build_report, day_label, AttendanceConfig, AttendanceStore, CheckInOutcome, CheckInProcessor,
    ReportMember, Totals, WeekClose, WeekLedger, WEEKDAYS,
};
pub use roster::{build_roster_reply, RosterMember, RosterReply};
pub use schedule::{Clock, WeekTracker, WeeklyScheduler};

/// One feature's entry in the `/version` listing.
pub struct FeatureInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Feature versions as declared in each module header.
pub fn get_features() -> Vec<FeatureInfo> {
    vec![
        FeatureInfo {
            name: "Attendance",
            version: "1.1.0",
        },
        FeatureInfo {
            name: "Schedule",
            version: "1.0.0",
        },
        FeatureInfo {
            name: "Roster",
            version: "1.0.0",
        },
        FeatureInfo {
            name: "Commands",
            version: "1.0.0",
        },
    ]
}

/// Bot version from the crate manifest.
pub fn get_bot_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
