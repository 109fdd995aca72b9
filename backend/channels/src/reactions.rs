//! Auto-react rules: react to messages from a given author in a given channel.

use lobbybot_config::ReactionRule;
use serenity::all::{EmojiId, ReactionType};

#[derive(Debug, Clone, Default)]
pub struct ReactionRules {
    rules: Vec<ReactionRule>,
}

impl ReactionRules {
    pub fn new(rules: Vec<ReactionRule>) -> Self {
        Self { rules }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn matching<'a>(
        &'a self,
        channel_id: &'a str,
        author_id: &'a str,
    ) -> impl Iterator<Item = &'a ReactionRule> + 'a {
        self.rules
            .iter()
            .filter(move |rule| rule.channel_id == channel_id && rule.author_id == author_id)
    }
}

/// Parse `<:name:id>` / `<a:name:id>` into a custom emoji; anything else is
/// sent as a unicode emoji.
pub fn parse_reaction(emoji: &str) -> ReactionType {
    let emoji = emoji.trim();
    if let Some(inner) = emoji.strip_prefix('<').and_then(|e| e.strip_suffix('>')) {
        if let [flag, name, id] = inner.splitn(3, ':').collect::<Vec<_>>().as_slice() {
            if let Some(id) = id.parse::<u64>().ok().filter(|&id| id != 0) {
                return ReactionType::Custom {
                    animated: *flag == "a",
                    id: EmojiId::new(id),
                    name: Some(name.to_string()),
                };
            }
        }
    }
    ReactionType::Unicode(emoji.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(channel: &str, author: &str, emoji: &str) -> ReactionRule {
        ReactionRule {
            channel_id: channel.into(),
            author_id: author.into(),
            emoji: emoji.into(),
        }
    }

    #[test]
    fn matches_channel_and_author() {
        let rules = ReactionRules::new(vec![
            rule("100", "200", "👀"),
            rule("100", "201", "🔥"),
            rule("101", "200", "✅"),
        ]);
        let hits: Vec<_> = rules.matching("100", "200").map(|r| r.emoji.as_str()).collect();
        assert_eq!(hits, vec!["👀"]);
        assert_eq!(rules.matching("102", "200").count(), 0);
    }

    #[test]
    fn parses_custom_emoji() {
        match parse_reaction("<:bombasticsideeye:1412038834601852958>") {
            ReactionType::Custom { animated, id, name } => {
                assert!(!animated);
                assert_eq!(id.get(), 1412038834601852958);
                assert_eq!(name.as_deref(), Some("bombasticsideeye"));
            }
            other => panic!("expected custom emoji, got {other:?}"),
        }
    }

    #[test]
    fn parses_animated_emoji() {
        assert!(matches!(
            parse_reaction("<a:party:112233445566778899>"),
            ReactionType::Custom { animated: true, .. }
        ));
    }

    #[test]
    fn falls_back_to_unicode() {
        assert!(matches!(parse_reaction(" 👀 "), ReactionType::Unicode(ref s) if s == "👀"));
        assert!(matches!(parse_reaction("<:broken>"), ReactionType::Unicode(_)));
    }
}
