use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use lobbybot_core::{ApiError, ProfileRecord, SteamDirectory, VanityResolution};

use crate::decode_json;

pub const DEFAULT_STEAM_API_BASE: &str = "https://api.steampowered.com";

const RESOLVE_VANITY: &str = "ResolveVanityURL";
const PLAYER_SUMMARIES: &str = "GetPlayerSummaries";

/// Steam Web API client (`ISteamUser`).
pub struct SteamWebApi {
    client: Client,
    api_key: String,
    base_url: String,
}

impl SteamWebApi {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_STEAM_API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl fmt::Debug for SteamWebApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SteamWebApi")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct Envelope<T> {
    response: T,
}

#[derive(Deserialize)]
struct VanityResponse {
    steamid: Option<String>,
    message: Option<String>,
}

#[derive(Deserialize)]
struct PlayerSummariesResponse {
    #[serde(default)]
    players: Vec<PlayerSummary>,
}

#[derive(Deserialize)]
struct PlayerSummary {
    steamid: Option<String>,
    lobbysteamid: Option<String>,
    gameid: Option<String>,
    personaname: Option<String>,
    gameextrainfo: Option<String>,
}

impl From<VanityResponse> for VanityResolution {
    fn from(value: VanityResponse) -> Self {
        VanityResolution {
            steam_id: value.steamid,
            message: value.message,
        }
    }
}

impl From<PlayerSummary> for ProfileRecord {
    fn from(value: PlayerSummary) -> Self {
        ProfileRecord {
            owner_id: value.steamid,
            lobby_id: value.lobbysteamid,
            game_id: value.gameid,
            persona_name: value.personaname,
            game_name: value.gameextrainfo,
        }
    }
}

#[async_trait]
impl SteamDirectory for SteamWebApi {
    fn name(&self) -> &str {
        "steam-web-api"
    }

    async fn resolve_vanity(&self, vanity_name: &str) -> Result<VanityResolution, ApiError> {
        debug!(vanity = vanity_name, "Resolving Steam vanity name");
        let sent = self
            .client
            .get(self.url("ISteamUser/ResolveVanityURL/v0001/"))
            .query(&[("key", self.api_key.as_str()), ("vanityurl", vanity_name)])
            .send()
            .await;
        let body: Envelope<VanityResponse> = decode_json(RESOLVE_VANITY, sent).await?;
        Ok(body.response.into())
    }

    async fn player_summaries(&self, steam_id: &str) -> Result<Vec<ProfileRecord>, ApiError> {
        debug!(steam_id, "Fetching Steam player summaries");
        let sent = self
            .client
            .get(self.url("ISteamUser/GetPlayerSummaries/v2/"))
            .query(&[
                ("key", self.api_key.as_str()),
                ("format", "json"),
                ("steamids", steam_id),
            ])
            .send()
            .await;
        let body: Envelope<PlayerSummariesResponse> = decode_json(PLAYER_SUMMARIES, sent).await?;
        Ok(body.response.players.into_iter().map(Into::into).collect())
    }
}
