//! Expiry wiring for invite replies.
//!
//! Each armed window owns a component collector scoped to its reply message;
//! the collector is dropped together with the window.

use std::sync::Arc;

use async_trait::async_trait;
use lobbybot_invite::{ComponentEvent, ExpiryEffect};
use serenity::all::{
    CommandInteraction, ComponentInteractionCollector, Http, MessageId, ShardMessenger, UserId,
};
use tokio_stream::{Stream, StreamExt};

use crate::discord_embeds::DiscordEmbeds;

/// Interactions on one reply message, reduced to the clicking user.
pub fn reply_events(
    shard: ShardMessenger,
    message_id: MessageId,
) -> impl Stream<Item = ComponentEvent> + Send + 'static {
    let users = ComponentInteractionCollector::new(shard)
        .message_id(message_id)
        .stream()
        .map(|interaction| interaction.user.id);
    component_events(users)
}

pub fn component_events<S>(users: S) -> impl Stream<Item = ComponentEvent> + Send + 'static
where
    S: Stream<Item = UserId> + Send + 'static,
{
    users.map(|user| ComponentEvent::from_user(user.to_string()))
}

/// Marks an invite reply as expired by editing the original interaction response.
pub struct InteractionExpiry {
    http: Arc<Http>,
    command: CommandInteraction,
}

impl InteractionExpiry {
    pub fn new(http: Arc<Http>, command: CommandInteraction) -> Self {
        Self { http, command }
    }
}

#[async_trait]
impl ExpiryEffect for InteractionExpiry {
    async fn expire(&self) -> anyhow::Result<()> {
        self.command
            .edit_response(&*self.http, DiscordEmbeds::expired_edit())
            .await?;
        Ok(())
    }
}
