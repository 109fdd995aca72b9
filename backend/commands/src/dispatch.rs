/// Command dispatch: route invocations to handler functions.
use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use lobbybot_core::PlayerProfile;
use lobbybot_invite::ExpiryWindow;

use crate::types::CommandInvocation;

// ---------------------------------------------------------------------------
// Handler trait
// ---------------------------------------------------------------------------

/// Who invoked a command, and where.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Platform id of the triggering interaction, used to correlate log events.
    pub interaction_id: String,
    pub sender_id: String,
    pub channel_id: String,
    pub guild_id: Option<String>,
}

/// A resolved invite ready to be rendered as a join button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteCard {
    /// `steam://joinlobby/...`
    pub invite_uri: String,
    /// http(s) URL the join button points at.
    pub join_url: String,
    /// `None` when the requester asked for an invite that never expires.
    pub expiry: Option<ExpiryWindow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCard {
    pub profile: PlayerProfile,
    pub region: String,
    pub icon_url: String,
}

/// Platform-neutral reply produced by a handler.
#[derive(Debug, Clone)]
pub enum CommandResponse {
    Text { content: String, ephemeral: bool },
    Invite(InviteCard),
    Player(PlayerCard),
    /// More than one search hit; the requester has to pick an id.
    PlayerCandidates(Vec<PlayerCard>),
}

impl CommandResponse {
    pub fn ok(text: impl Into<String>) -> Self {
        CommandResponse::Text {
            content: text.into(),
            ephemeral: false,
        }
    }

    pub fn ephemeral(text: impl Into<String>) -> Self {
        CommandResponse::Text {
            content: text.into(),
            ephemeral: true,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            CommandResponse::Text { content, .. } => Some(content),
            _ => None,
        }
    }
}

#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, ctx: &CommandContext, inv: &CommandInvocation) -> Result<CommandResponse>;
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

use std::collections::HashMap;
use std::sync::Arc;

pub struct CommandDispatcher {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn register(&mut self, key: impl Into<String>, handler: Arc<dyn CommandHandler>) {
        self.handlers.insert(key.into(), handler);
    }

    pub fn has_handler(&self, key: &str) -> bool {
        self.handlers.contains_key(key)
    }

    pub async fn dispatch(
        &self,
        ctx: &CommandContext,
        inv: &CommandInvocation,
    ) -> Result<CommandResponse> {
        if let Some(handler) = self.handlers.get(&inv.key) {
            info!(command = %inv.key, sender = %ctx.sender_id, "Dispatching command");
            handler.handle(ctx, inv).await
        } else {
            Ok(CommandResponse::ephemeral(format!(
                "❓ No handler registered for command /{}",
                inv.key
            )))
        }
    }
}

impl Default for CommandDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl CommandHandler for Echo {
        async fn handle(&self, ctx: &CommandContext, _inv: &CommandInvocation) -> Result<CommandResponse> {
            Ok(CommandResponse::ok(ctx.sender_id.clone()))
        }
    }

    fn ctx() -> CommandContext {
        CommandContext {
            interaction_id: "9009".into(),
            sender_id: "42".into(),
            channel_id: "7".into(),
            guild_id: None,
        }
    }

    #[tokio::test]
    async fn routes_by_key() {
        let mut dispatcher = CommandDispatcher::new();
        dispatcher.register("echo", Arc::new(Echo));
        let response = dispatcher
            .dispatch(&ctx(), &CommandInvocation::new("echo"))
            .await
            .unwrap();
        assert_eq!(response.text(), Some("42"));
    }

    #[tokio::test]
    async fn unknown_command_is_ephemeral() {
        let dispatcher = CommandDispatcher::new();
        let response = dispatcher
            .dispatch(&ctx(), &CommandInvocation::new("nope"))
            .await
            .unwrap();
        assert!(matches!(response, CommandResponse::Text { ephemeral: true, .. }));
    }
}
