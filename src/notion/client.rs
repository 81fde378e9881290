//! Blocking client for the Notion database query endpoint

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::config::NotionConfig;
use crate::error::{Error, Result};
use crate::leave::{LeaveRecord, LeaveStatus};
use crate::notion::properties::{DatabaseSchema, Page};
use crate::source::LeaveSource;

/// API version sent with every request
pub const NOTION_VERSION: &str = "2022-06-28";

/// Largest page size the query endpoint accepts
const PAGE_SIZE: u32 = 100;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One page of query results
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<Page>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Error body returned with non-success statuses
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

/// Reads leave records from one Notion database
pub struct NotionClient {
    client: Client,
    config: NotionConfig,
    schema: DatabaseSchema,
}

impl NotionClient {
    pub fn new(config: NotionConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            config,
            schema: DatabaseSchema::default(),
        })
    }

    /// Read records from differently named columns
    pub fn with_schema(mut self, schema: DatabaseSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Fetch one result page starting at `cursor`
    fn query_page(&self, cursor: Option<&str>) -> Result<QueryResponse> {
        let body = query_body(&self.schema, cursor);

        let response = self
            .client
            .post(self.config.query_url())
            .bearer_auth(&self.config.api_key)
            .header("Notion-Version", NOTION_VERSION)
            .json(&body)
            .send()?;

        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: api_error_message(&text),
            });
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Fetch every page of the query, following cursors
    pub fn query_all(&self) -> Result<Vec<Page>> {
        let mut pages = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let response = self.query_page(cursor.as_deref())?;
            debug!(
                results = response.results.len(),
                has_more = response.has_more,
                "fetched query page"
            );
            pages.extend(response.results);

            match (response.has_more, response.next_cursor) {
                (true, Some(next)) => cursor = Some(next),
                _ => break,
            }
        }

        Ok(pages)
    }
}

impl LeaveSource for NotionClient {
    fn fetch_leaves(&self) -> Result<Vec<LeaveRecord>> {
        info!(database_id = %self.config.database_id, "querying Notion leave database");

        let pages = self.query_all()?;
        let records = records_from_pages(&self.schema, &pages);

        info!(pages = pages.len(), records = records.len(), "loaded leave records");
        Ok(records)
    }
}

/// Map pages to records, dropping partial pages and rejected leaves
///
/// The query already filters rejected leaves out; the second pass guards
/// against databases where the status column is not filterable.
pub fn records_from_pages(schema: &DatabaseSchema, pages: &[Page]) -> Vec<LeaveRecord> {
    pages
        .iter()
        .filter_map(|page| {
            let record = schema.to_record(page);
            if record.is_none() {
                warn!(page_id = %page.id, "skipping page without properties");
            }
            record
        })
        .filter(|record| record.status != LeaveStatus::Rejected)
        .collect()
}

/// Request body: everything not rejected, one page at a time
pub fn query_body(schema: &DatabaseSchema, cursor: Option<&str>) -> Value {
    let mut body = json!({
        "filter": {
            "and": [
                {
                    "property": schema.status,
                    "status": { "does_not_equal": "Rejected" }
                }
            ]
        },
        "page_size": PAGE_SIZE,
    });

    if let Some(cursor) = cursor {
        body["start_cursor"] = Value::String(cursor.to_string());
    }

    body
}

/// Pull the human message out of an error body, or return the body itself
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) if !parsed.message.is_empty() => parsed.message,
        _ => body.trim().to_string(),
    }
}
