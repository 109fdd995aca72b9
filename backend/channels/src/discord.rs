use crate::ChannelAdapter;
use crate::discord_embeds::DiscordEmbeds;
use crate::discord_expiry::{InteractionExpiry, reply_events};
use crate::discord_slash::DiscordSlash;
use crate::reactions::{ReactionRules, parse_reaction};
use async_trait::async_trait;
use lobbybot_commands::{CommandContext, CommandDispatcher, CommandRegistry, CommandResponse, InviteCard};
use lobbybot_config::BotConfig;
use lobbybot_invite::{ExpiryController, ExpiryState, ExpiryWindow};
use lobbybot_logging::{BotEvent, EventLogger};
use serenity::all::{
    CommandInteraction, ComponentInteraction, CreateInteractionResponse, GuildId, Interaction,
};
use serenity::model::channel::Message as DiscordMessage;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Shown when a handler fails outright instead of returning a reply.
const GENERIC_FAILURE: &str = "Something went wrong while running this command. Please try again later.";

struct Handler {
    dispatcher: Arc<CommandDispatcher>,
    registry: CommandRegistry,
    guild_id: Option<GuildId>,
    reactions: ReactionRules,
}

impl Handler {
    async fn handle_command(&self, ctx: &Context, command: CommandInteraction) {
        let invocation = DiscordSlash::invocation_from(&command);
        let cmd_ctx = CommandContext {
            interaction_id: command.id.to_string(),
            sender_id: command.user.id.to_string(),
            channel_id: command.channel_id.to_string(),
            guild_id: command.guild_id.map(|g| g.to_string()),
        };

        EventLogger::log_event(
            &cmd_ctx.interaction_id,
            BotEvent::CommandInvoked {
                command: invocation.key.clone(),
                user_id: cmd_ctx.sender_id.clone(),
                channel_id: cmd_ctx.channel_id.clone(),
                guild_id: cmd_ctx.guild_id.clone(),
            },
        );

        let response = match self.dispatcher.dispatch(&cmd_ctx, &invocation).await {
            Ok(response) => response,
            Err(e) => {
                error!(command = %invocation.key, error = %e, "Command handler failed");
                EventLogger::log_event(
                    &cmd_ctx.interaction_id,
                    BotEvent::Error { error_msg: format!("{e:#}") },
                );
                CommandResponse::ephemeral(GENERIC_FAILURE)
            }
        };

        let reply = DiscordEmbeds::render(&response).into_message();
        if let Err(e) = command
            .create_response(&ctx.http, CreateInteractionResponse::Message(reply))
            .await
        {
            error!(command = %invocation.key, "Error sending reply: {:?}", e);
            return;
        }

        if let CommandResponse::Invite(InviteCard { expiry: Some(window), .. }) = response {
            self.watch_expiry(ctx, command, window).await;
        }
    }

    /// Arms the expiry window on the reply and drives it in the background.
    async fn watch_expiry(&self, ctx: &Context, command: CommandInteraction, window: ExpiryWindow) {
        let message = match command.get_response(&ctx.http).await {
            Ok(message) => message,
            Err(e) => {
                warn!("Could not fetch invite reply, expiry not armed: {:?}", e);
                return;
            }
        };

        let events = reply_events(ctx.shard.clone(), message.id);
        let correlation_id = command.id.to_string();
        let effect = InteractionExpiry::new(Arc::clone(&ctx.http), command);

        tokio::spawn(async move {
            let mut controller = ExpiryController::arm(window);
            let state = controller.run(events, &effect).await;

            EventLogger::log_event(
                &correlation_id,
                BotEvent::ExpiryFinished {
                    requester_id: controller.window().requester_id().to_string(),
                    state: state_label(state).to_string(),
                },
            );
        });
    }

    /// Component clicks reach the reply's collector separately; here they are only acknowledged.
    async fn handle_component(&self, ctx: &Context, component: ComponentInteraction) {
        if let Err(e) = component
            .create_response(&ctx.http, CreateInteractionResponse::Acknowledge)
            .await
        {
            warn!("Error acknowledging component interaction: {:?}", e);
        }
    }
}

fn state_label(state: ExpiryState) -> &'static str {
    match state {
        ExpiryState::Armed => "armed",
        ExpiryState::Fired => "fired",
        ExpiryState::Expired => "expired",
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: DiscordMessage) {
        if self.reactions.is_empty() {
            return;
        }

        let channel_id = msg.channel_id.to_string();
        let author_id = msg.author.id.to_string();
        for rule in self.reactions.matching(&channel_id, &author_id) {
            if let Err(e) = msg.react(&ctx.http, parse_reaction(&rule.emoji)).await {
                warn!(channel = %channel_id, emoji = %rule.emoji, "Error when reacting to message: {:?}", e);
                EventLogger::log_event(
                    &msg.id.to_string(),
                    BotEvent::ReactionFailed {
                        channel_id: channel_id.clone(),
                        emoji: rule.emoji.clone(),
                        error_msg: e.to_string(),
                    },
                );
            }
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Command(command) => self.handle_command(&ctx, command).await,
            Interaction::Component(component) => self.handle_component(&ctx, component).await,
            _ => {}
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);
        match DiscordSlash::register_commands(&ctx.http, &self.registry, self.guild_id).await {
            Ok(count) => info!(count, "Commands have been updated for {}", ready.user.name),
            Err(e) => error!("Failed to register slash commands: {:?}", e),
        }
    }
}

/// Connection settings for the Discord gateway.
#[derive(Debug, Clone)]
pub struct DiscordSettings {
    pub token: String,
    /// Register commands to this guild only; global when `None`.
    pub guild_id: Option<GuildId>,
    pub reactions: ReactionRules,
}

impl DiscordSettings {
    pub fn from_config(config: &BotConfig) -> anyhow::Result<Self> {
        let token = config
            .discord
            .token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("discord.token is not configured"))?;

        let guild_id = match config.discord.guild_id.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(parse_guild_id(raw)?),
        };

        Ok(Self {
            token,
            guild_id,
            reactions: ReactionRules::new(config.reactions.clone()),
        })
    }
}

fn parse_guild_id(raw: &str) -> anyhow::Result<GuildId> {
    raw.parse::<u64>()
        .ok()
        .filter(|&id| id != 0)
        .map(GuildId::new)
        .ok_or_else(|| anyhow::anyhow!("discord.guildId '{raw}' is not a Discord id"))
}

pub struct DiscordAdapter {
    settings: DiscordSettings,
    dispatcher: Arc<CommandDispatcher>,
    registry: CommandRegistry,
}

impl DiscordAdapter {
    pub fn new(settings: DiscordSettings, dispatcher: Arc<CommandDispatcher>) -> Self {
        Self {
            settings,
            dispatcher,
            registry: CommandRegistry::new(),
        }
    }
}

#[async_trait]
impl ChannelAdapter for DiscordAdapter {
    fn name(&self) -> &str { "discord" }

    async fn start(&self) -> anyhow::Result<()> {
        info!(guild = ?self.settings.guild_id, "Starting Discord adapter");

        let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES;

        let handler = Handler {
            dispatcher: Arc::clone(&self.dispatcher),
            registry: self.registry.clone(),
            guild_id: self.settings.guild_id,
            reactions: self.settings.reactions.clone(),
        };

        let mut client = Client::builder(&self.settings.token, intents)
            .event_handler(handler)
            .await?;

        if let Err(why) = client.start().await {
            error!("Client error: {:?}", why);
            anyhow::bail!("Discord client error: {:?}", why);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lobbybot_config::ReactionRule;

    #[test]
    fn settings_require_a_token() {
        let err = DiscordSettings::from_config(&BotConfig::default()).unwrap_err();
        assert!(err.to_string().contains("discord.token"));
    }

    #[test]
    fn settings_parse_guild_and_rules() {
        let mut config = BotConfig::default();
        config.discord.token = Some("token".into());
        config.discord.guild_id = Some("123456789012345678".into());
        config.reactions = vec![ReactionRule {
            channel_id: "1".into(),
            author_id: "2".into(),
            emoji: "👀".into(),
        }];

        let settings = DiscordSettings::from_config(&config).unwrap();
        assert_eq!(settings.guild_id, Some(GuildId::new(123456789012345678)));
        assert_eq!(settings.reactions.matching("1", "2").count(), 1);
    }

    #[test]
    fn bad_guild_id_is_rejected() {
        assert!(parse_guild_id("general").is_err());
        assert!(parse_guild_id("0").is_err());
    }

    #[test]
    fn state_labels() {
        assert_eq!(state_label(ExpiryState::Fired), "fired");
        assert_eq!(state_label(ExpiryState::Expired), "expired");
    }
}
