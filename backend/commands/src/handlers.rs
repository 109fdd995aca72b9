/// Built-in command handlers.
///
/// Each handler is a concrete struct implementing `CommandHandler` and returns
/// a platform-neutral `CommandResponse`.
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

use lobbybot_core::{PlayerProfile, PlayerSearch, RawReference, ResolutionOutcome};
use lobbybot_invite::{ExpiryWindow, InvitePipeline, DEFAULT_EXPIRY};
use lobbybot_logging::{BotEvent, EventLogger};

use crate::dispatch::{CommandContext, CommandHandler, CommandResponse, InviteCard, PlayerCard};
use crate::registry::CommandRegistry;
use crate::types::CommandInvocation;

pub const DEFAULT_REDIRECT_BASE_URL: &str =
    "https://frostemanneogard.github.io/uri-redirector/?uri=";
pub const DEFAULT_ICON_BASE_URL: &str = "https://ewgf.gg/static/character-icons";
pub const DEFAULT_MAX_CANDIDATES: usize = 8;

fn usage(registry: &CommandRegistry, key: &str) -> CommandResponse {
    let usage = registry
        .find_by_key(key)
        .map(|def| def.usage())
        .unwrap_or_else(|| format!("/{key}"));
    CommandResponse::ephemeral(format!("❌ Usage: {usage}"))
}

// ---------------------------------------------------------------------------
// /help
// ---------------------------------------------------------------------------

pub struct HelpHandler {
    pub registry: CommandRegistry,
}

#[async_trait]
impl CommandHandler for HelpHandler {
    async fn handle(&self, _ctx: &CommandContext, _inv: &CommandInvocation) -> Result<CommandResponse> {
        let mut lines = vec!["*Available commands:*".to_string()];
        for cmd in self.registry.all() {
            lines.push(format!("• `{}` — {}", cmd.usage(), cmd.description));
        }
        Ok(CommandResponse::ephemeral(lines.join("\n")))
    }
}

// ---------------------------------------------------------------------------
// /steaminvite
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct InviteSettings {
    /// Prefix for the join button; the invite URI is appended verbatim.
    pub redirect_base_url: String,
    pub expiry: Duration,
}

impl Default for InviteSettings {
    fn default() -> Self {
        Self {
            redirect_base_url: DEFAULT_REDIRECT_BASE_URL.to_string(),
            expiry: DEFAULT_EXPIRY,
        }
    }
}

pub struct SteamInviteHandler {
    pipeline: Arc<InvitePipeline>,
    settings: InviteSettings,
    registry: CommandRegistry,
}

impl SteamInviteHandler {
    pub fn new(pipeline: Arc<InvitePipeline>, settings: InviteSettings) -> Self {
        Self {
            pipeline,
            settings,
            registry: CommandRegistry::new(),
        }
    }
}

#[async_trait]
impl CommandHandler for SteamInviteHandler {
    async fn handle(&self, ctx: &CommandContext, inv: &CommandInvocation) -> Result<CommandResponse> {
        let Some(raw) = inv.string("steamurl") else {
            return Ok(usage(&self.registry, "steaminvite"));
        };

        let outcome = self.pipeline.run(&RawReference::from(raw)).await;
        let never_expire = inv.boolean("neverexpire");
        info!(outcome = outcome.label(), sender = %ctx.sender_id, "Steam invite resolved");
        EventLogger::log_event(
            &ctx.interaction_id,
            BotEvent::InviteOutcome {
                user_id: ctx.sender_id.clone(),
                outcome: outcome.label().to_string(),
                never_expire: never_expire == Some(true),
            },
        );

        let invite_uri = match outcome {
            ResolutionOutcome::Direct(uri) | ResolutionOutcome::Resolved(uri) => uri,
            ResolutionOutcome::Failed(reason) => return Ok(CommandResponse::ok(reason.to_string())),
        };

        let expiry =
            ExpiryWindow::for_request(ctx.sender_id.clone(), never_expire, self.settings.expiry);

        Ok(CommandResponse::Invite(InviteCard {
            join_url: format!("{}{}", self.settings.redirect_base_url, invite_uri),
            invite_uri,
            expiry,
        }))
    }
}

// ---------------------------------------------------------------------------
// /playerlookup
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct LookupSettings {
    pub icon_base_url: String,
    pub max_candidates: usize,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            icon_base_url: DEFAULT_ICON_BASE_URL.to_string(),
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }
}

/// Display name for an ewgf region id.
pub fn region_name(region_id: u32) -> String {
    match region_id {
        1 => "NA".to_string(),
        4 => "Europe".to_string(),
        2..=9 => format!("Region{region_id}"),
        _ => "Unknown".to_string(),
    }
}

pub struct PlayerLookupHandler {
    search: Arc<dyn PlayerSearch>,
    settings: LookupSettings,
    registry: CommandRegistry,
}

impl PlayerLookupHandler {
    pub fn new(search: Arc<dyn PlayerSearch>, settings: LookupSettings) -> Self {
        Self {
            search,
            settings,
            registry: CommandRegistry::new(),
        }
    }

    fn card(&self, profile: PlayerProfile) -> PlayerCard {
        let icon_url = format!(
            "{}/{}T8.png",
            self.settings.icon_base_url.trim_end_matches('/'),
            profile.most_played_character.replace(' ', "_")
        );
        PlayerCard {
            region: region_name(profile.region_id),
            icon_url,
            profile,
        }
    }
}

#[async_trait]
impl CommandHandler for PlayerLookupHandler {
    async fn handle(&self, _ctx: &CommandContext, inv: &CommandInvocation) -> Result<CommandResponse> {
        let Some(query) = inv.string("playerid").filter(|q| !q.trim().is_empty()) else {
            return Ok(usage(&self.registry, "playerlookup"));
        };

        let players = match self.search.search(query).await {
            Ok(players) => players,
            Err(e) => {
                warn!(provider = self.search.name(), error = %e, "Player search failed");
                return Ok(CommandResponse::ok("Couldn't fetch data, please try again later."));
            }
        };

        let mut players = players.into_iter();
        Ok(match (players.next(), players.next()) {
            (None, _) => CommandResponse::ok("No players found."),
            (Some(only), None) => CommandResponse::Player(self.card(only)),
            (Some(first), Some(second)) => {
                // The cap applies to the candidate list only.
                let cards = [first, second]
                    .into_iter()
                    .chain(players)
                    .take(self.settings.max_candidates.max(1))
                    .map(|p| self.card(p))
                    .collect();
                CommandResponse::PlayerCandidates(cards)
            }
        })
    }
}
