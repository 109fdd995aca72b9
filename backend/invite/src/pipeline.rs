use std::sync::Arc;

use tracing::debug;

use lobbybot_core::{FailureReason, LinkClass, RawReference, ResolutionOutcome, SteamDirectory};

use crate::resolver::InviteResolver;
use crate::validator::validate;

/// Validator followed by resolver: raw input in, typed outcome out.
pub struct InvitePipeline {
    resolver: InviteResolver,
}

impl InvitePipeline {
    pub fn new(directory: Arc<dyn SteamDirectory>) -> Self {
        Self {
            resolver: InviteResolver::new(directory),
        }
    }

    pub async fn run(&self, raw: &RawReference) -> ResolutionOutcome {
        match validate(raw.as_str()) {
            LinkClass::DirectInvite(uri) => {
                debug!("Input is already a direct invite");
                ResolutionOutcome::Direct(uri)
            }
            LinkClass::Profile(reference) => {
                debug!(kind = ?reference.kind, "Resolving profile reference");
                self.resolver.resolve(&reference).await
            }
            LinkClass::Invalid => ResolutionOutcome::Failed(FailureReason::InvalidFormat),
        }
    }
}
