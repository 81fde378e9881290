//! Leave records and the today/upcoming board
//!
//! Records are plain values built fresh for every run. The board splits them
//! into people off on a given day and future leaves bucketed by start date.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::date::{format_date, is_date_in_range, parse_calendar_date};

/// Name used when the source has no name for a record
pub const UNNAMED: &str = "Unnamed";

/// Approval state of a leave request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum LeaveStatus {
    Approved,
    Pending,
    Rejected,
    /// Any other label, kept verbatim
    Other(String),
}

impl LeaveStatus {
    /// Parse a status label; matching is case-sensitive
    pub fn from_label(label: &str) -> Self {
        match label {
            "Approved" => LeaveStatus::Approved,
            "Pending" => LeaveStatus::Pending,
            "Rejected" => LeaveStatus::Rejected,
            other => LeaveStatus::Other(other.to_string()),
        }
    }

    /// Label as shown to users
    pub fn label(&self) -> &str {
        match self {
            LeaveStatus::Approved => "Approved",
            LeaveStatus::Pending => "Pending",
            LeaveStatus::Rejected => "Rejected",
            LeaveStatus::Other(label) => label,
        }
    }

    /// Single-character marker for list rows
    pub fn marker(&self) -> char {
        match self {
            LeaveStatus::Approved => '✔',
            LeaveStatus::Pending => '◷',
            LeaveStatus::Rejected => '✖',
            LeaveStatus::Other(_) => '•',
        }
    }
}

impl Default for LeaveStatus {
    fn default() -> Self {
        LeaveStatus::Other("Unknown".to_string())
    }
}

impl From<&str> for LeaveStatus {
    fn from(label: &str) -> Self {
        LeaveStatus::from_label(label)
    }
}

impl From<LeaveStatus> for String {
    fn from(status: LeaveStatus) -> Self {
        status.label().to_string()
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One employee's leave entry
///
/// Dates stay as the ISO strings the source delivered; they are only parsed
/// when compared or formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaveRecord {
    pub id: String,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub status: LeaveStatus,
    pub reason: String,
    pub notion_url: String,
}

impl Default for LeaveRecord {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: UNNAMED.to_string(),
            start_date: String::new(),
            end_date: String::new(),
            status: LeaveStatus::default(),
            reason: String::new(),
            notion_url: String::new(),
        }
    }
}

impl LeaveRecord {
    /// Whether the leave covers `day`
    pub fn covers(&self, day: NaiveDate) -> bool {
        is_date_in_range(day, &self.start_date, &self.end_date)
    }

    /// Parsed start date, `None` if the stored value is not a date
    pub fn start(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.start_date)
    }

    /// "Jan 5, 2024 - Jan 9, 2024"
    pub fn period_label(&self) -> String {
        format!("{} - {}", format_date(&self.start_date), format_date(&self.end_date))
    }
}

/// Records sharing one formatted start date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateGroup {
    pub label: String,
    pub records: Vec<LeaveRecord>,
}

/// Bucket records by their formatted start date
///
/// Groups appear in order of first appearance and keep the input order inside
/// each group. Nothing is sorted here; sort by start date first for a
/// chronological listing.
pub fn group_by_date<I>(records: I) -> Vec<DateGroup>
where
    I: IntoIterator<Item = LeaveRecord>,
{
    let mut groups: Vec<DateGroup> = Vec::new();

    for record in records {
        let label = format_date(&record.start_date);
        match groups.iter_mut().find(|group| group.label == label) {
            Some(group) => group.records.push(record),
            None => groups.push(DateGroup {
                label,
                records: vec![record],
            }),
        }
    }

    groups
}

/// Records split into "on leave today" and upcoming buckets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaveBoard {
    pub date: NaiveDate,
    pub total: usize,
    pub on_leave_today: Vec<LeaveRecord>,
    pub upcoming: Vec<DateGroup>,
}

impl LeaveBoard {
    /// A board with no records for `date`
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total: 0,
            on_leave_today: Vec::new(),
            upcoming: Vec::new(),
        }
    }

    /// Partition records relative to `today`
    ///
    /// The buckets never overlap: today needs `start <= today`, upcoming needs
    /// `start > today`. Records with an unparsable start date show up in neither.
    pub fn build(records: Vec<LeaveRecord>, today: NaiveDate) -> Self {
        let total = records.len();

        let on_leave_today = records
            .iter()
            .filter(|record| record.covers(today))
            .cloned()
            .collect();

        let mut upcoming: Vec<(NaiveDate, LeaveRecord)> = records
            .into_iter()
            .filter_map(|record| record.start().map(|start| (start, record)))
            .filter(|(start, _)| *start > today)
            .collect();
        upcoming.sort_by_key(|(start, _)| *start);

        Self {
            date: today,
            total,
            on_leave_today,
            upcoming: group_by_date(upcoming.into_iter().map(|(_, record)| record)),
        }
    }

    /// True when the source returned no records at all
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Find a record in either bucket by id
    pub fn find(&self, id: &str) -> Option<&LeaveRecord> {
        self.on_leave_today
            .iter()
            .chain(self.upcoming.iter().flat_map(|group| group.records.iter()))
            .find(|record| record.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(id: &str, start: &str, end: &str) -> LeaveRecord {
        LeaveRecord {
            id: id.to_string(),
            name: format!("Employee {}", id),
            start_date: start.to_string(),
            end_date: end.to_string(),
            status: LeaveStatus::Approved,
            ..Default::default()
        }
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(LeaveStatus::from_label("Approved"), LeaveStatus::Approved);
        assert_eq!(LeaveStatus::from_label("Pending"), LeaveStatus::Pending);
        assert_eq!(LeaveStatus::from_label("Rejected"), LeaveStatus::Rejected);
        assert_eq!(
            LeaveStatus::from_label("approved"),
            LeaveStatus::Other("approved".to_string())
        );
        assert_eq!(LeaveStatus::default().to_string(), "Unknown");
    }

    #[test]
    fn test_status_markers() {
        assert_eq!(LeaveStatus::Approved.marker(), '✔');
        assert_eq!(LeaveStatus::Pending.marker(), '◷');
        assert_eq!(LeaveStatus::Rejected.marker(), '✖');
        assert_eq!(LeaveStatus::from("Sick").marker(), '•');
    }

    #[test]
    fn test_status_serializes_as_label() {
        let json = serde_json::to_string(&LeaveStatus::Pending).unwrap();
        assert_eq!(json, "\"Pending\"");
        let json = serde_json::to_string(&LeaveStatus::from("On hold")).unwrap();
        assert_eq!(json, "\"On hold\"");
    }

    #[test]
    fn test_group_empty() {
        assert!(group_by_date(Vec::new()).is_empty());
    }

    #[test]
    fn test_group_keeps_first_seen_order() {
        let records = vec![
            record("a", "2024-01-02", "2024-01-03"),
            record("b", "2024-01-01", "2024-01-01"),
            record("c", "2024-01-02", "2024-01-02"),
        ];

        let groups = group_by_date(records);

        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Jan 2, 2024", "Jan 1, 2024"]);

        let ids: Vec<&str> = groups[0].records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_group_ignores_time_in_key() {
        let records = vec![
            record("a", "2024-01-02T08:00:00", "2024-01-02"),
            record("b", "2024-01-02", "2024-01-02"),
        ];
        let groups = group_by_date(records);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].records.len(), 2);
    }

    #[test]
    fn test_group_invalid_start_shares_label() {
        let records = vec![record("a", "", ""), record("b", "nope", "")];
        let groups = group_by_date(records);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].label, crate::date::INVALID_DATE_LABEL);
    }

    #[test]
    fn test_board_partition() {
        let today = ymd(2024, 1, 5);
        let records = vec![
            record("today", "2024-01-04", "2024-01-08"),
            record("past", "2023-12-01", "2023-12-03"),
            record("later", "2024-02-01", "2024-02-02"),
            record("soon", "2024-01-06", "2024-01-06"),
            record("soon2", "2024-01-06", "2024-01-07"),
            record("broken", "", "2024-01-09"),
        ];

        let board = LeaveBoard::build(records, today);

        assert_eq!(board.total, 6);
        assert_eq!(board.on_leave_today.len(), 1);
        assert_eq!(board.on_leave_today[0].id, "today");

        let labels: Vec<&str> = board.upcoming.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Jan 6, 2024", "Feb 1, 2024"]);
        let ids: Vec<&str> = board.upcoming[0].records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["soon", "soon2"]);
    }

    #[test]
    fn test_board_start_today_is_not_upcoming() {
        let today = ymd(2024, 1, 5);
        let board = LeaveBoard::build(vec![record("x", "2024-01-05", "2024-01-05")], today);
        assert_eq!(board.on_leave_today.len(), 1);
        assert!(board.upcoming.is_empty());
    }

    #[test]
    fn test_board_same_day_starts_keep_input_order() {
        let today = ymd(2024, 1, 5);
        let records = vec![
            record("morning", "2024-01-12T09:00:00", "2024-01-12"),
            record("allday", "2024-01-12", "2024-01-12"),
            record("earlier", "2024-01-08", "2024-01-08"),
        ];

        let board = LeaveBoard::build(records, today);

        assert_eq!(board.upcoming[0].label, "Jan 8, 2024");
        let ids: Vec<&str> = board.upcoming[1].records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["morning", "allday"]);
    }

    #[test]
    fn test_board_find() {
        let today = ymd(2024, 1, 5);
        let board = LeaveBoard::build(
            vec![
                record("now", "2024-01-05", "2024-01-05"),
                record("next", "2024-01-10", "2024-01-11"),
            ],
            today,
        );
        assert_eq!(board.find("next").map(|r| r.name.as_str()), Some("Employee next"));
        assert!(board.find("missing").is_none());
        assert!(!board.is_empty());
        assert!(LeaveBoard::empty(today).is_empty());
    }

    #[test]
    fn test_period_label() {
        let r = record("x", "2024-01-05", "2024-01-09");
        assert_eq!(r.period_label(), "Jan 5, 2024 - Jan 9, 2024");
    }
}
