use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use lobbybot_core::{ApiError, PlayerProfile, PlayerSearch};

use crate::decode_json;

pub const DEFAULT_EWGF_BASE: &str = "https://ewgf.gg";

const SEARCH: &str = "ewgf search";

/// ewgf.gg TEKKEN 8 player search.
#[derive(Debug, Clone)]
pub struct EwgfClient {
    client: Client,
    base_url: String,
}

impl EwgfClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_EWGF_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl Default for EwgfClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlayerSearch for EwgfClient {
    fn name(&self) -> &str {
        "ewgf"
    }

    async fn search(&self, query: &str) -> Result<Vec<PlayerProfile>, ApiError> {
        debug!(query, "Searching ewgf players");
        let sent = self
            .client
            .get(format!("{}/api/search", self.base_url.trim_end_matches('/')))
            .query(&[("query", query)])
            .send()
            .await;
        decode_json(SEARCH, sent).await
    }
}
