//! Notion page properties and their mapping onto leave records
//!
//! A database page carries a map of named properties whose JSON shape depends
//! on the property `type`. Only the four types a leave database uses are
//! decoded; everything else, including malformed values, becomes
//! [`PropertyValue::Unknown`] and maps to the field's default.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::leave::{LeaveRecord, LeaveStatus, UNNAMED};

/// Status label used when a page has no usable status
pub const UNKNOWN_STATUS: &str = "Unknown";

/// A rich-text fragment; only the plain rendering is kept
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: String,
}

/// Value of a `date` property
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DateValue {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

/// Selected option of a `status` property
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StatusOption {
    #[serde(default)]
    pub name: String,
}

/// Decoded property value, tagged by the Notion `type` field
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        #[serde(default)]
        title: Vec<RichText>,
    },
    Date {
        #[serde(default)]
        date: Option<DateValue>,
    },
    Status {
        #[serde(default)]
        status: Option<StatusOption>,
    },
    RichText {
        #[serde(default)]
        rich_text: Vec<RichText>,
    },
    #[serde(other)]
    Unknown,
}

/// Property type tag, used to check a property has the expected type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Title,
    Date,
    Status,
    RichText,
    Unknown,
}

impl PropertyValue {
    /// Decode one raw property, falling back to `Unknown` for shapes we do not read
    pub fn from_json(value: &Value) -> Self {
        PropertyValue::deserialize(value).unwrap_or(PropertyValue::Unknown)
    }

    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyValue::Title { .. } => PropertyKind::Title,
            PropertyValue::Date { .. } => PropertyKind::Date,
            PropertyValue::Status { .. } => PropertyKind::Status,
            PropertyValue::RichText { .. } => PropertyKind::RichText,
            PropertyValue::Unknown => PropertyKind::Unknown,
        }
    }

    /// The text a leave record takes from this property
    ///
    /// First fragment for text types, start of a date range, status name.
    /// Empty strings count as missing.
    pub fn text(&self) -> Option<&str> {
        let text = match self {
            PropertyValue::Title { title } => title.first().map(|t| t.plain_text.as_str()),
            PropertyValue::Date { date } => date.as_ref().and_then(|d| d.start.as_deref()),
            PropertyValue::Status { status } => status.as_ref().map(|s| s.name.as_str()),
            PropertyValue::RichText { rich_text } => {
                rich_text.first().map(|t| t.plain_text.as_str())
            }
            PropertyValue::Unknown => None,
        };
        text.filter(|t| !t.is_empty())
    }
}

/// One entry of a database query result
///
/// `properties` is absent for partial objects, which cannot become records.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

/// Names of the database columns a leave record is read from
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseSchema {
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub reason: String,
}

impl Default for DatabaseSchema {
    fn default() -> Self {
        Self {
            name: "Employee Name".to_string(),
            start_date: "Start Date".to_string(),
            end_date: "End Date".to_string(),
            status: "Status".to_string(),
            reason: "Reason".to_string(),
        }
    }
}

impl DatabaseSchema {
    /// Map a page onto a leave record, `None` for partial pages
    pub fn to_record(&self, page: &Page) -> Option<LeaveRecord> {
        let properties = page.properties.as_ref()?;

        let field = |column: &str, kind: PropertyKind| -> Option<String> {
            let value = PropertyValue::from_json(properties.get(column)?);
            if value.kind() != kind {
                return None;
            }
            value.text().map(str::to_string)
        };

        // End dates come from their own column's start, not from a range end.
        Some(LeaveRecord {
            id: page.id.clone(),
            name: field(&self.name, PropertyKind::Title).unwrap_or_else(|| UNNAMED.to_string()),
            start_date: field(&self.start_date, PropertyKind::Date).unwrap_or_default(),
            end_date: field(&self.end_date, PropertyKind::Date).unwrap_or_default(),
            status: LeaveStatus::from_label(
                &field(&self.status, PropertyKind::Status)
                    .unwrap_or_else(|| UNKNOWN_STATUS.to_string()),
            ),
            reason: field(&self.reason, PropertyKind::RichText).unwrap_or_default(),
            notion_url: page.url.clone().unwrap_or_default(),
        })
    }
}
