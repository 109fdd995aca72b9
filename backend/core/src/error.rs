use thiserror::Error;

/// Terminal failure of the invite pipeline.
///
/// The `Display` text is what the requester sees; none of the variants carry
/// upstream detail so nothing internal leaks into a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FailureReason {
    #[error("Your steam URL appears to be invalid. Please double check the URL and try again.")]
    InvalidFormat,

    #[error("Please make sure the user is in a joinable lobby and try again.")]
    NotInLobby,

    #[error("Something went wrong while contacting Steam. Please try again later.")]
    UpstreamError,
}

impl FailureReason {
    /// Stable machine-readable code, used in structured logs.
    pub fn code(&self) -> &'static str {
        match self {
            FailureReason::InvalidFormat => "invalid_format",
            FailureReason::NotInLobby => "not_in_lobby",
            FailureReason::UpstreamError => "upstream_error",
        }
    }
}

/// Failure of a single remote capability call.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("transport error calling {endpoint}: {message}")]
    Transport {
        endpoint: &'static str,
        message: String,
    },

    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },

    #[error("failed to decode {endpoint} response: {message}")]
    Decode {
        endpoint: &'static str,
        message: String,
    },
}

impl ApiError {
    pub fn endpoint(&self) -> &'static str {
        match self {
            ApiError::Transport { endpoint, .. }
            | ApiError::Status { endpoint, .. }
            | ApiError::Decode { endpoint, .. } => endpoint,
        }
    }
}
