//! Bot Event Logger
//!
//! Audit events (command invocations, invite outcomes, expiry, reactions)
//! emitted as one JSON document per event under the `bot_events` target.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::redact::redact_sensitive_data;

/// Tracing target for audit events, so they can be filtered separately.
pub const EVENT_TARGET: &str = "bot_events";

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BotEvent {
    CommandInvoked {
        command: String,
        user_id: String,
        channel_id: String,
        guild_id: Option<String>,
    },
    InviteOutcome {
        user_id: String,
        /// `direct`, `resolved` or a failure code.
        outcome: String,
        never_expire: bool,
    },
    ExpiryFinished {
        requester_id: String,
        /// `fired` or `expired`.
        state: String,
    },
    ReactionFailed {
        channel_id: String,
        emoji: String,
        error_msg: String,
    },
    Error {
        error_msg: String,
    },
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub event_id: Uuid,
    /// Discord interaction or message id the event belongs to.
    pub correlation_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: BotEvent,
}

impl EventLogEntry {
    pub fn new(correlation_id: &str, event: BotEvent) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            correlation_id: correlation_id.into(),
            timestamp: Utc::now(),
            event: scrub(event),
        }
    }
}

fn scrub(mut event: BotEvent) -> BotEvent {
    match &mut event {
        BotEvent::ReactionFailed { error_msg, .. } | BotEvent::Error { error_msg } => {
            *error_msg = redact_sensitive_data(error_msg);
        }
        _ => {}
    }
    event
}

pub struct EventLogger;

impl EventLogger {
    /// Logs a bot event, redacting free-text fields first.
    pub fn log_event(correlation_id: &str, event: BotEvent) {
        let entry = EventLogEntry::new(correlation_id, event);
        match serde_json::to_string(&entry) {
            Ok(json) => info!(target: EVENT_TARGET, event = %json, "Bot event"),
            Err(e) => info!(target: EVENT_TARGET, event = ?entry, error = %e, "Bot event"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_event_serializes_with_tag() {
        let entry = EventLogEntry::new(
            "1200000000000000000",
            BotEvent::CommandInvoked {
                command: "steaminvite".into(),
                user_id: "42".into(),
                channel_id: "7".into(),
                guild_id: None,
            },
        );
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["event"]["type"], "command_invoked");
        assert_eq!(json["event"]["command"], "steaminvite");
        assert_eq!(json["correlation_id"], "1200000000000000000");
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn error_text_is_redacted() {
        let entry = EventLogEntry::new(
            "1",
            BotEvent::Error {
                error_msg: "request to ?key=0123456789abcdef0123456789abcdef failed".into(),
            },
        );
        let BotEvent::Error { error_msg } = &entry.event else {
            panic!("unexpected event variant");
        };
        assert!(!error_msg.contains("0123456789abcdef"));
    }

    #[test]
    fn event_ids_are_unique() {
        let a = EventLogEntry::new("1", BotEvent::Error { error_msg: "x".into() });
        let b = EventLogEntry::new("1", BotEvent::Error { error_msg: "x".into() });
        assert_ne!(a.event_id, b.event_id);
    }
}
