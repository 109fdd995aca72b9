pub mod error;
pub mod traits;
pub mod types;

pub use error::{ApiError, FailureReason};
pub use traits::{PlayerSearch, SteamDirectory};
pub use types::{
    LinkClass, LobbyDescriptor, PlayerProfile, ProfileKind, ProfileRecord, ProfileReference,
    RawReference, ResolutionOutcome, VanityResolution, INVITE_URI_SCHEME,
};
