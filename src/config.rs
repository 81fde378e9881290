//! Notion connection settings
//!
//! Built explicitly by the caller and handed to the client; nothing here reads
//! process-wide state.

use crate::error::{Error, Result};

/// Public Notion API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.notion.com";

/// Credentials and endpoint for one leave database
#[derive(Clone)]
pub struct NotionConfig {
    pub api_key: String,
    pub database_id: String,
    pub base_url: String,
}

impl NotionConfig {
    /// Validate and build a config against the public API
    pub fn new(api_key: impl Into<String>, database_id: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into().trim().to_string();
        let database_id = database_id.into().trim().to_string();

        if api_key.is_empty() {
            return Err(Error::MissingConfig("Notion API key".to_string()));
        }
        if database_id.is_empty() {
            return Err(Error::MissingConfig("Notion database id".to_string()));
        }

        Ok(Self {
            api_key,
            database_id,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point at a different API host (proxies, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Database query endpoint
    pub fn query_url(&self) -> String {
        format!("{}/v1/databases/{}/query", self.base_url, self.database_id)
    }
}

// Keep the key out of logs and panics.
impl std::fmt::Debug for NotionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionConfig")
            .field("api_key", &"***")
            .field("database_id", &self.database_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}
