//! Notion as a leave-record source

pub mod client;
pub mod properties;

pub use client::{records_from_pages, NotionClient, QueryResponse};
pub use properties::{DatabaseSchema, Page, PropertyKind, PropertyValue};
