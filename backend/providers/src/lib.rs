pub mod ewgf;
pub mod mock;
pub mod steam;

pub use ewgf::EwgfClient;
pub use mock::{MockPlayerSearch, MockSteamDirectory};
pub use steam::SteamWebApi;

use lobbybot_core::ApiError;
use reqwest::Response;
use serde::de::DeserializeOwned;

/// Turn a raw response into a typed body, mapping status and decode errors.
///
/// reqwest errors are stripped of their URL: the Steam key travels in the
/// query string and must never reach a log line.
pub(crate) async fn decode_json<T: DeserializeOwned>(
    endpoint: &'static str,
    sent: Result<Response, reqwest::Error>,
) -> Result<T, ApiError> {
    let response = sent.map_err(|e| ApiError::Transport {
        endpoint,
        message: e.without_url().to_string(),
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status {
            endpoint,
            status: status.as_u16(),
        });
    }

    response.json::<T>().await.map_err(|e| ApiError::Decode {
        endpoint,
        message: e.without_url().to_string(),
    })
}
