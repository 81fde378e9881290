//! Notion Leaves Library
//!
//! Reads employee leave requests from a Notion database and answers two
//! questions: who is off today, and who is off next. This library provides
//! functionality to:
//! - Parse and format leave dates at calendar-day granularity
//! - Test whether a day falls inside a leave period
//! - Group upcoming leaves by start date
//! - Query a Notion database and map its pages onto leave records
//!
//! # Example
//!
//! ```
//! use notion_leaves::date::{format_date, is_date_in_range};
//!
//! assert_eq!(format_date("2024-01-05"), "Jan 5, 2024");
//! assert!(is_date_in_range("2024-01-05T23:59:59", "2024-01-05", "2024-01-05"));
//! ```

pub mod config;
pub mod date;
pub mod error;
pub mod leave;
pub mod notion;
pub mod render;
pub mod source;

// Re-export commonly used items
pub use config::NotionConfig;
pub use error::{Error, Result};
pub use leave::{group_by_date, DateGroup, LeaveBoard, LeaveRecord, LeaveStatus};
pub use source::{load_board, LeaveSource};
