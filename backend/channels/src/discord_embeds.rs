//! Discord Embed Builder
//!
//! Maps platform-neutral command responses onto embeds, link buttons and
//! plain-text replies.

use lobbybot_commands::{CommandResponse, InviteCard, PlayerCard};
use serenity::builder::{
    CreateActionRow, CreateButton, CreateEmbed, CreateInteractionResponseMessage,
    EditInteractionResponse,
};

pub const SUCCESS_COLOUR: u32 = 0x57F287;
pub const WARNING_COLOUR: u32 = 0xFEE75C;

pub const JOIN_BUTTON_LABEL: &str = "Join Lobby";

/// A response rendered for Discord, usable for both the initial reply and later edits.
#[derive(Debug, Clone, Default)]
pub struct RenderedReply {
    pub content: Option<String>,
    pub embeds: Vec<CreateEmbed>,
    pub components: Vec<CreateActionRow>,
    pub ephemeral: bool,
}

impl RenderedReply {
    pub fn into_message(self) -> CreateInteractionResponseMessage {
        let mut message = CreateInteractionResponseMessage::new()
            .embeds(self.embeds)
            .components(self.components)
            .ephemeral(self.ephemeral);
        if let Some(content) = self.content {
            message = message.content(content);
        }
        message
    }
}

pub struct DiscordEmbeds;

impl DiscordEmbeds {
    pub fn render(response: &CommandResponse) -> RenderedReply {
        match response {
            CommandResponse::Text { content, ephemeral } => RenderedReply {
                content: Some(content.clone()),
                ephemeral: *ephemeral,
                ..Default::default()
            },
            CommandResponse::Invite(card) => RenderedReply {
                embeds: vec![Self::invite(card)],
                components: vec![Self::join_row(card)],
                ..Default::default()
            },
            CommandResponse::Player(card) => RenderedReply {
                embeds: vec![Self::player(card)],
                ..Default::default()
            },
            CommandResponse::PlayerCandidates(cards) => RenderedReply {
                embeds: vec![Self::candidates(cards)],
                ..Default::default()
            },
        }
    }

    pub fn invite(_card: &InviteCard) -> CreateEmbed {
        CreateEmbed::new()
            .title("You have been invited to a steam lobby!")
            .colour(SUCCESS_COLOUR)
    }

    /// Link buttons only accept http(s), hence the redirector URL.
    pub fn join_button(card: &InviteCard) -> CreateButton {
        CreateButton::new_link(&card.join_url).label(JOIN_BUTTON_LABEL)
    }

    pub fn join_row(card: &InviteCard) -> CreateActionRow {
        CreateActionRow::Buttons(vec![Self::join_button(card)])
    }

    pub fn expired() -> CreateEmbed {
        CreateEmbed::new()
            .title("Steam Invitation")
            .colour(SUCCESS_COLOUR)
            .field("This invite has expired.", " ", false)
    }

    /// Edit that replaces an invite with the expired embed and drops the button.
    pub fn expired_edit() -> EditInteractionResponse {
        EditInteractionResponse::new()
            .embed(Self::expired())
            .components(vec![])
    }

    pub fn player(card: &PlayerCard) -> CreateEmbed {
        let profile = &card.profile;
        CreateEmbed::new()
            .title("TEKKEN 8 Player data")
            .colour(SUCCESS_COLOUR)
            .thumbnail(&card.icon_url)
            .field("Name", &profile.name, false)
            .field("Tekken ID", &profile.tekken_id, false)
            .field("Most played character", &profile.most_played_character, false)
            .field("Rank", &profile.dan_rank_name, false)
            .field("Region", &card.region, false)
    }

    pub fn candidates(cards: &[PlayerCard]) -> CreateEmbed {
        let fields = cards.iter().map(|card| {
            (
                format!(
                    "{} ({}, {})",
                    card.profile.name, card.profile.most_played_character, card.region
                ),
                format!("ID: {}", card.profile.tekken_id),
                false,
            )
        });
        CreateEmbed::new()
            .title("Multiple matches found")
            .description("Please try again with one of these players' IDs.")
            .colour(WARNING_COLOUR)
            .fields(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lobbybot_core::PlayerProfile;
    use serde_json::Value;

    fn card(name: &str) -> PlayerCard {
        PlayerCard {
            profile: PlayerProfile {
                name: name.into(),
                tekken_id: format!("{name}-id"),
                most_played_character: "Devil Jin".into(),
                dan_rank_name: "Tekken God".into(),
                region_id: 4,
            },
            region: "Europe".into(),
            icon_url: "https://ewgf.gg/static/character-icons/Devil_JinT8.png".into(),
        }
    }

    fn invite_card() -> InviteCard {
        InviteCard {
            invite_uri: "steam://joinlobby/1/2/3".into(),
            join_url: "https://example.org/?uri=steam://joinlobby/1/2/3".into(),
            expiry: None,
        }
    }

    fn json(embed: &CreateEmbed) -> Value {
        serde_json::to_value(embed).unwrap()
    }

    #[test]
    fn invite_embed_is_green() {
        let embed = json(&DiscordEmbeds::invite(&invite_card()));
        assert_eq!(embed["title"], "You have been invited to a steam lobby!");
        assert_eq!(embed["color"], SUCCESS_COLOUR);
    }

    #[test]
    fn join_button_links_to_redirector() {
        let button = serde_json::to_value(DiscordEmbeds::join_button(&invite_card())).unwrap();
        assert_eq!(button["label"], JOIN_BUTTON_LABEL);
        assert_eq!(button["url"], "https://example.org/?uri=steam://joinlobby/1/2/3");
    }

    #[test]
    fn expired_embed_has_notice_field() {
        let embed = json(&DiscordEmbeds::expired());
        assert_eq!(embed["title"], "Steam Invitation");
        assert_eq!(embed["fields"][0]["name"], "This invite has expired.");
    }

    #[test]
    fn player_embed_lists_profile() {
        let embed = json(&DiscordEmbeds::player(&card("Arslan")));
        assert_eq!(embed["title"], "TEKKEN 8 Player data");
        assert_eq!(
            embed["thumbnail"]["url"],
            "https://ewgf.gg/static/character-icons/Devil_JinT8.png"
        );
        let names: Vec<_> = embed["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            names,
            vec!["Name", "Tekken ID", "Most played character", "Rank", "Region"]
        );
        assert_eq!(embed["fields"][4]["value"], "Europe");
    }

    #[test]
    fn candidates_embed_is_a_warning_list() {
        let embed = json(&DiscordEmbeds::candidates(&[card("A"), card("B")]));
        assert_eq!(embed["title"], "Multiple matches found");
        assert_eq!(embed["color"], WARNING_COLOUR);
        assert_eq!(embed["fields"][1]["name"], "B (Devil Jin, Europe)");
        assert_eq!(embed["fields"][1]["value"], "ID: B-id");
    }

    #[test]
    fn render_picks_shape_per_response() {
        let text = DiscordEmbeds::render(&CommandResponse::ephemeral("nope"));
        assert_eq!(text.content.as_deref(), Some("nope"));
        assert!(text.ephemeral && text.embeds.is_empty());

        let invite = DiscordEmbeds::render(&CommandResponse::Invite(invite_card()));
        assert!(invite.content.is_none());
        assert_eq!(invite.embeds.len(), 1);
        assert_eq!(invite.components.len(), 1);
        assert!(!invite.ephemeral);
    }
}
