use thiserror::Error;

/// Why a promotions fetch produced no result.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Promotions request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Failed to fetch promotions ({status}): {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Invalid promotions payload: {0}")]
    Parse(#[source] serde_json::Error),
}
