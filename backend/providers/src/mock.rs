//! Canned capability implementations for tests and offline runs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use lobbybot_core::{
    ApiError, PlayerProfile, PlayerSearch, ProfileRecord, SteamDirectory, VanityResolution,
};

/// A profile record for a player sitting in a lobby.
pub fn lobby_record(game_id: &str, lobby_id: &str, owner_id: &str) -> ProfileRecord {
    ProfileRecord {
        owner_id: Some(owner_id.to_string()),
        lobby_id: Some(lobby_id.to_string()),
        game_id: Some(game_id.to_string()),
        ..Default::default()
    }
}

/// In-memory [`SteamDirectory`] that counts calls per capability.
#[derive(Default)]
pub struct MockSteamDirectory {
    vanity_ids: HashMap<String, String>,
    players: HashMap<String, Vec<ProfileRecord>>,
    vanity_status: Option<u16>,
    summaries_status: Option<u16>,
    vanity_calls: AtomicUsize,
    summary_calls: AtomicUsize,
}

impl MockSteamDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vanity(mut self, name: impl Into<String>, steam_id: impl Into<String>) -> Self {
        self.vanity_ids.insert(name.into(), steam_id.into());
        self
    }

    pub fn with_players(mut self, steam_id: impl Into<String>, records: Vec<ProfileRecord>) -> Self {
        self.players.insert(steam_id.into(), records);
        self
    }

    /// Make every vanity lookup fail with this HTTP status.
    pub fn failing_vanity(mut self, status: u16) -> Self {
        self.vanity_status = Some(status);
        self
    }

    /// Make every profile lookup fail with this HTTP status.
    pub fn failing_summaries(mut self, status: u16) -> Self {
        self.summaries_status = Some(status);
        self
    }

    pub fn vanity_calls(&self) -> usize {
        self.vanity_calls.load(Ordering::SeqCst)
    }

    pub fn summary_calls(&self) -> usize {
        self.summary_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SteamDirectory for MockSteamDirectory {
    fn name(&self) -> &str {
        "mock-steam"
    }

    async fn resolve_vanity(&self, vanity_name: &str) -> Result<VanityResolution, ApiError> {
        self.vanity_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = self.vanity_status {
            return Err(ApiError::Status {
                endpoint: "ResolveVanityURL",
                status,
            });
        }
        Ok(match self.vanity_ids.get(vanity_name) {
            Some(id) => VanityResolution {
                steam_id: Some(id.clone()),
                message: None,
            },
            None => VanityResolution {
                steam_id: None,
                message: Some("No match".to_string()),
            },
        })
    }

    async fn player_summaries(&self, steam_id: &str) -> Result<Vec<ProfileRecord>, ApiError> {
        self.summary_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = self.summaries_status {
            return Err(ApiError::Status {
                endpoint: "GetPlayerSummaries",
                status,
            });
        }
        Ok(self.players.get(steam_id).cloned().unwrap_or_default())
    }
}

/// In-memory [`PlayerSearch`] returning the same players for any query.
#[derive(Default)]
pub struct MockPlayerSearch {
    players: Vec<PlayerProfile>,
    fail: bool,
    calls: AtomicUsize,
}

impl MockPlayerSearch {
    pub fn new(players: Vec<PlayerProfile>) -> Self {
        Self {
            players,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlayerSearch for MockPlayerSearch {
    fn name(&self) -> &str {
        "mock-search"
    }

    async fn search(&self, _query: &str) -> Result<Vec<PlayerProfile>, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ApiError::Status {
                endpoint: "ewgf search",
                status: 502,
            });
        }
        Ok(self.players.clone())
    }
}
