//! Telemetry and structured logging for the lobby bot.
//!
//! Handles log redaction, JSON file output with daily rotation, and bot audit events.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{BotEvent, EventLogEntry, EventLogger};
pub use logger::{init_logger, LOG_FILE_NAME};
pub use redact::redact_sensitive_data;
