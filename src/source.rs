//! Where leave records come from

use chrono::NaiveDate;
use tracing::error;

use crate::error::Result;
use crate::leave::{LeaveBoard, LeaveRecord};

/// Anything that can hand over the current list of leave records
pub trait LeaveSource {
    fn fetch_leaves(&self) -> Result<Vec<LeaveRecord>>;
}

impl LeaveSource for Vec<LeaveRecord> {
    fn fetch_leaves(&self) -> Result<Vec<LeaveRecord>> {
        Ok(self.clone())
    }
}

/// Fetch and partition records for `today`
///
/// A failed fetch is logged and shows up as an empty board.
pub fn load_board(source: &dyn LeaveSource, today: NaiveDate) -> LeaveBoard {
    match source.fetch_leaves() {
        Ok(records) => LeaveBoard::build(records, today),
        Err(e) => {
            error!(error = %e, "failed to fetch leave records");
            LeaveBoard::empty(today)
        }
    }
}
