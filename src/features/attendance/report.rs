//! Weekly attendance report text
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use super::ledger::WeekLedger;

/// A guild member as the report sees it: display name and user id.
#[derive(Debug, Clone)]
pub struct ReportMember {
    pub display_name: String,
    pub user_id: u64,
}

/// Build the weekly report posted at close-out.
///
/// Covers every member passed in, in the order given; members with no
/// check-in this week report 0 days.
pub fn build_report(ledger: &WeekLedger, members: &[ReportMember]) -> String {
    let counts = ledger.tally();
    let mut lines = vec!["**출석 통계:**".to_string()];
    for member in members {
        let count = counts.get(&member.user_id).copied().unwrap_or(0);
        lines.push(format!("{}: {}일 출석", member.display_name, count));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn member(name: &str, id: u64) -> ReportMember {
        ReportMember {
            display_name: name.to_string(),
            user_id: id,
        }
    }

    #[test]
    fn test_report_defaults_absent_members_to_zero() {
        let mut ledger = WeekLedger::default();
        ledger.day_mut(Weekday::Mon).push(111);
        ledger.day_mut(Weekday::Wed).push(111);

        let report = build_report(&ledger, &[member("철수", 111), member("영희", 222)]);
        assert_eq!(report, "**출석 통계:**\n철수: 2일 출석\n영희: 0일 출석");
    }

    #[test]
    fn test_report_preserves_member_order() {
        let ledger = WeekLedger::default();
        let report = build_report(&ledger, &[member("b", 2), member("a", 1)]);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[1], "b: 0일 출석");
        assert_eq!(lines[2], "a: 0일 출석");
    }

    #[test]
    fn test_report_with_no_members_is_just_header() {
        let report = build_report(&WeekLedger::default(), &[]);
        assert_eq!(report, "**출석 통계:**");
    }

    #[test]
    fn test_report_ignores_check_ins_from_departed_users() {
        // A user who left the guild stays in the ledger but not the roster
        let mut ledger = WeekLedger::default();
        ledger.day_mut(Weekday::Fri).push(999);

        let report = build_report(&ledger, &[member("철수", 111)]);
        assert_eq!(report, "**출석 통계:**\n철수: 0일 출석");
    }
}
