use async_trait::async_trait;

use crate::error::ApiError;
use crate::types::{PlayerProfile, ProfileRecord, VanityResolution};

/// Remote Steam profile capabilities needed by the invite resolver.
///
/// Profile lookup only accepts numeric ids, so vanity names go through
/// `resolve_vanity` first.
#[async_trait]
pub trait SteamDirectory: Send + Sync {
    /// Provider name for logging (e.g. "steam-web-api").
    fn name(&self) -> &str;

    /// Resolve a vanity name to a numeric steam id.
    async fn resolve_vanity(&self, vanity_name: &str) -> Result<VanityResolution, ApiError>;

    /// Fetch profile records for a numeric steam id.
    async fn player_summaries(&self, steam_id: &str) -> Result<Vec<ProfileRecord>, ApiError>;
}

/// Player search backing the `/playerlookup` command.
#[async_trait]
pub trait PlayerSearch: Send + Sync {
    fn name(&self) -> &str;

    /// Search players by in-game id or name.
    async fn search(&self, query: &str) -> Result<Vec<PlayerProfile>, ApiError>;
}
