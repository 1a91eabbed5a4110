//! # Attendance Feature
//!
//! Weekly emoji check-ins persisted to flat JSON files.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Cumulative totals file folded in at week close-out
//! - 1.0.0: Initial creation with ledger, store, check-ins, and report

pub mod checkin;
pub mod config;
pub mod ledger;
pub mod report;
pub mod store;

pub use checkin::{CheckInOutcome, CheckInProcessor};
pub use config::AttendanceConfig;
pub use ledger::{day_label, WeekLedger, WEEKDAYS};
pub use report::{build_report, ReportMember};
pub use store::{AttendanceStore, Totals, WeekClose};
