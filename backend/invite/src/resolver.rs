//! Two-hop resolution of a profile reference into a joinable lobby URI.

use std::sync::Arc;

use tracing::{debug, warn};

use lobbybot_core::{
    FailureReason, LobbyDescriptor, ProfileKind, ProfileRecord, ProfileReference,
    ResolutionOutcome, SteamDirectory,
};

/// Resolves profile references through a [`SteamDirectory`].
///
/// At most two sequential calls: vanity name -> numeric id, then numeric id ->
/// profile. Any failed hop aborts the chain; nothing is retried.
pub struct InviteResolver {
    directory: Arc<dyn SteamDirectory>,
}

impl InviteResolver {
    pub fn new(directory: Arc<dyn SteamDirectory>) -> Self {
        Self { directory }
    }

    pub async fn resolve(&self, reference: &ProfileReference) -> ResolutionOutcome {
        self.resolve_uri(reference).await.into()
    }

    async fn resolve_uri(&self, reference: &ProfileReference) -> Result<String, FailureReason> {
        let steam_id = match reference.kind {
            ProfileKind::VanityName => self.steam_id_for_vanity(&reference.value).await?,
            ProfileKind::NumericId => reference.value.clone(),
        };

        let record = self.first_profile(&steam_id).await?;

        let descriptor = LobbyDescriptor::from_record(&record).ok_or_else(|| {
            debug!(steam_id = %steam_id, "Player is not in a joinable lobby");
            FailureReason::NotInLobby
        })?;

        debug!(steam_id = %steam_id, game_id = descriptor.game_id(), "Resolved lobby");
        Ok(descriptor.invite_uri())
    }

    async fn steam_id_for_vanity(&self, vanity_name: &str) -> Result<String, FailureReason> {
        let resolution = self
            .directory
            .resolve_vanity(vanity_name)
            .await
            .map_err(|e| {
                warn!(provider = self.directory.name(), error = %e, "Vanity lookup failed");
                FailureReason::UpstreamError
            })?;

        match resolution.steam_id.filter(|id| !id.is_empty()) {
            Some(id) => Ok(id),
            None => {
                debug!(
                    vanity = vanity_name,
                    message = resolution.message.as_deref().unwrap_or(""),
                    "Vanity name did not resolve to a steam id"
                );
                Err(FailureReason::UpstreamError)
            }
        }
    }

    async fn first_profile(&self, steam_id: &str) -> Result<ProfileRecord, FailureReason> {
        let records = self
            .directory
            .player_summaries(steam_id)
            .await
            .map_err(|e| {
                warn!(provider = self.directory.name(), error = %e, "Profile lookup failed");
                FailureReason::UpstreamError
            })?;

        records.into_iter().next().ok_or_else(|| {
            debug!(steam_id = %steam_id, "Profile lookup returned no records");
            FailureReason::UpstreamError
        })
    }
}
