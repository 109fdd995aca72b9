//! Invite-link pipeline for `/steaminvite`.
//!
//! Validator -> Resolver -> Expiry Controller. Every stage short-circuits to a
//! typed outcome that the presentation layer renders.

pub mod expiry;
pub mod pipeline;
pub mod resolver;
pub mod validator;

pub use expiry::{
    ComponentEvent, ExpiryController, ExpiryEffect, ExpiryState, ExpiryWindow, DEFAULT_EXPIRY,
};
pub use pipeline::InvitePipeline;
pub use resolver::InviteResolver;
pub use validator::validate;
