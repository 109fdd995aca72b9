use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FailureReason;

/// Scheme + host prefix of a joinable lobby URI.
pub const INVITE_URI_SCHEME: &str = "steam://joinlobby";

// ---------------------------------------------------------------------------
// Raw input
// ---------------------------------------------------------------------------

/// User-submitted text for `/steaminvite`: a direct invite, a profile URL,
/// or anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawReference(String);

impl RawReference {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RawReference {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RawReference {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for RawReference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RawReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Profile references
// ---------------------------------------------------------------------------

/// Which form of profile URL was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    /// `/id/{vanityName}/`, needs a resolution hop.
    VanityName,
    /// `/profiles/{numericId}/`
    NumericId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileReference {
    pub kind: ProfileKind,
    pub value: String,
}

impl ProfileReference {
    pub fn vanity(name: impl Into<String>) -> Self {
        Self {
            kind: ProfileKind::VanityName,
            value: name.into(),
        }
    }

    pub fn numeric(id: impl Into<String>) -> Self {
        Self {
            kind: ProfileKind::NumericId,
            value: id.into(),
        }
    }
}

/// Syntactic classification of a raw reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkClass {
    /// Already a `steam://joinlobby/<app>/<lobby>/<owner>` URI; used verbatim.
    DirectInvite(String),
    /// A profile URL that has to be resolved remotely.
    Profile(ProfileReference),
    Invalid,
}

// ---------------------------------------------------------------------------
// Remote records
// ---------------------------------------------------------------------------

/// Outcome of a vanity-name lookup. `steam_id` is `None` when there is no match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VanityResolution {
    pub steam_id: Option<String>,
    /// Upstream explanation when no id was returned (e.g. "No match").
    pub message: Option<String>,
}

/// One profile record from the profile-lookup capability.
/// Every field is optional upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub owner_id: Option<String>,
    pub lobby_id: Option<String>,
    pub game_id: Option<String>,
    pub persona_name: Option<String>,
    pub game_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Lobby descriptor
// ---------------------------------------------------------------------------

/// The identifier triple needed to join a lobby. Only constructible from a
/// record with all three ids present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LobbyDescriptor {
    game_id: String,
    lobby_id: String,
    owner_id: String,
}

impl LobbyDescriptor {
    /// Build a descriptor from a profile record, or `None` if any id is
    /// missing or empty.
    pub fn from_record(record: &ProfileRecord) -> Option<Self> {
        let present = |field: &Option<String>| {
            field
                .as_deref()
                .filter(|value| !value.is_empty())
                .map(str::to_owned)
        };
        Some(Self {
            game_id: present(&record.game_id)?,
            lobby_id: present(&record.lobby_id)?,
            owner_id: present(&record.owner_id)?,
        })
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub fn lobby_id(&self) -> &str {
        &self.lobby_id
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    /// Canonical `steam://joinlobby/{gameId}/{lobbyId}/{ownerId}`.
    pub fn invite_uri(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            INVITE_URI_SCHEME, self.game_id, self.lobby_id, self.owner_id
        )
    }
}

impl fmt::Display for LobbyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.invite_uri())
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// Input was already a direct invite.
    Direct(String),
    /// Invite built from a resolved profile.
    Resolved(String),
    Failed(FailureReason),
}

impl ResolutionOutcome {
    pub fn invite_uri(&self) -> Option<&str> {
        match self {
            ResolutionOutcome::Direct(uri) | ResolutionOutcome::Resolved(uri) => Some(uri),
            ResolutionOutcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<FailureReason> {
        match self {
            ResolutionOutcome::Failed(reason) => Some(*reason),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResolutionOutcome::Direct(_) => "direct",
            ResolutionOutcome::Resolved(_) => "resolved",
            ResolutionOutcome::Failed(reason) => reason.code(),
        }
    }
}

impl From<Result<String, FailureReason>> for ResolutionOutcome {
    fn from(value: Result<String, FailureReason>) -> Self {
        match value {
            Ok(uri) => ResolutionOutcome::Resolved(uri),
            Err(reason) => ResolutionOutcome::Failed(reason),
        }
    }
}

// ---------------------------------------------------------------------------
// Player search
// ---------------------------------------------------------------------------

/// A TEKKEN 8 player as returned by the player search API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub name: String,
    pub tekken_id: String,
    pub most_played_character: String,
    pub dan_rank_name: String,
    pub region_id: u32,
}
