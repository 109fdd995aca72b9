use async_trait::async_trait;

pub mod discord;
pub mod discord_embeds;
pub mod discord_expiry;
pub mod discord_slash;
pub mod reactions;

pub use discord::{DiscordAdapter, DiscordSettings};
pub use discord_embeds::{DiscordEmbeds, RenderedReply};
pub use discord_expiry::{InteractionExpiry, component_events, reply_events};
pub use discord_slash::DiscordSlash;
pub use reactions::{ReactionRules, parse_reaction};

/// All channel adapters implement this trait.
#[async_trait]
pub trait ChannelAdapter: Send + Sync {
    /// Human-readable adapter name for logging.
    fn name(&self) -> &str;

    /// Connect and serve until the connection ends.
    async fn start(&self) -> anyhow::Result<()>;
}
