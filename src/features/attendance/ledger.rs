//! Weekly attendance ledger type
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial creation with fixed Mon..Sun wire format

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One week of check-ins, keyed by weekday.
///
/// Serializes to the ledger file format:
///
/// ```json
/// {
///     "Mon": [111, 222],
///     "Tue": [],
///     ...
///     "Sun": []
/// }
/// ```
///
/// A struct (rather than a map) keeps the seven keys present and in
/// Mon..Sun order in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekLedger {
    #[serde(rename = "Mon")]
    pub mon: Vec<u64>,
    #[serde(rename = "Tue")]
    pub tue: Vec<u64>,
    #[serde(rename = "Wed")]
    pub wed: Vec<u64>,
    #[serde(rename = "Thu")]
    pub thu: Vec<u64>,
    #[serde(rename = "Fri")]
    pub fri: Vec<u64>,
    #[serde(rename = "Sat")]
    pub sat: Vec<u64>,
    #[serde(rename = "Sun")]
    pub sun: Vec<u64>,
}

impl WeekLedger {
    /// Check-ins recorded for one weekday, in first-check-in order.
    pub fn day(&self, day: Weekday) -> &Vec<u64> {
        match day {
            Weekday::Mon => &self.mon,
            Weekday::Tue => &self.tue,
            Weekday::Wed => &self.wed,
            Weekday::Thu => &self.thu,
            Weekday::Fri => &self.fri,
            Weekday::Sat => &self.sat,
            Weekday::Sun => &self.sun,
        }
    }

    /// Mutable access for recording a check-in.
    pub fn day_mut(&mut self, day: Weekday) -> &mut Vec<u64> {
        match day {
            Weekday::Mon => &mut self.mon,
            Weekday::Tue => &mut self.tue,
            Weekday::Wed => &mut self.wed,
            Weekday::Thu => &mut self.thu,
            Weekday::Fri => &mut self.fri,
            Weekday::Sat => &mut self.sat,
            Weekday::Sun => &mut self.sun,
        }
    }

    /// Per-user attended-day counts for this week.
    ///
    /// Counts array membership as written to the file. A user id duplicated
    /// within one day (only possible by hand-editing) counts twice.
    pub fn tally(&self) -> BTreeMap<u64, u64> {
        let mut counts = BTreeMap::new();
        for day in WEEKDAYS {
            for user_id in self.day(day) {
                *counts.entry(*user_id).or_insert(0) += 1;
            }
        }
        counts
    }

    /// True when no check-in has been recorded this week.
    pub fn is_empty(&self) -> bool {
        WEEKDAYS.iter().all(|day| self.day(*day).is_empty())
    }
}

/// Weekdays in ledger/file order.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Short English label used as the ledger key and the custom emoji name.
pub fn day_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}
