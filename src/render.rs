//! Text rendering of the leave board and record details

use crate::leave::{LeaveBoard, LeaveRecord};

pub const TODAY_TITLE: &str = "📅 Employees On Leave Today";
pub const NO_RECORDS_TITLE: &str = "No leave records found";
pub const NO_RECORDS_HINT: &str =
    "No leave data available. Check your Notion database connection and preferences.";
pub const INTEGRATIONS_URL: &str = "https://www.notion.so/my-integrations";
pub const NOBODY_TODAY_TITLE: &str = "No employees on leave today";
pub const NOBODY_TODAY_HINT: &str = "Everyone is at work today! 🎉";

/// One list row: marker, name, period, status and reason
pub fn render_row(record: &LeaveRecord) -> String {
    let mut row = format!(
        "  {} {}  {}  [{}]",
        record.status.marker(),
        record.name,
        record.period_label(),
        record.status
    );
    if !record.reason.is_empty() {
        row.push_str("  ");
        row.push_str(&record.reason);
    }
    row
}

/// The whole board as printable text
pub fn render_board(board: &LeaveBoard) -> String {
    if board.is_empty() {
        return format!(
            "{}\n{}\nSet up a Notion integration: {}\n",
            NO_RECORDS_TITLE, NO_RECORDS_HINT, INTEGRATIONS_URL
        );
    }

    let mut out = String::new();

    if board.on_leave_today.is_empty() {
        out.push_str(&format!("{}\n{}\n", NOBODY_TODAY_TITLE, NOBODY_TODAY_HINT));
    } else {
        out.push_str(TODAY_TITLE);
        out.push('\n');
        for record in &board.on_leave_today {
            out.push_str(&render_row(record));
            out.push('\n');
        }
    }

    for group in &board.upcoming {
        out.push_str(&format!("\n📆 Upcoming: {}\n", group.label));
        for record in &group.records {
            out.push_str(&render_row(record));
            out.push('\n');
        }
    }

    out
}

/// Markdown detail view of one record
pub fn detail_markdown(record: &LeaveRecord) -> String {
    let mut out = format!(
        "# {}\n\n**Status:** {}\n**Leave Period:** {}\n**Reason:** {}\n",
        record.name,
        record.status,
        record.period_label(),
        record.reason
    );
    if !record.notion_url.is_empty() {
        out.push_str(&format!("\n[Open in Notion]({})\n", record.notion_url));
    }
    out
}
