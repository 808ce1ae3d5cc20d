use reqwest::StatusCode;

/// Why a weather request did not produce a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to weather provider failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("weather provider returned status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("weather provider returned malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Why the host could not report its position.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("location access denied: {0}")]
    Denied(String),

    #[error("location service unavailable: {0}")]
    Unavailable(String),
}
