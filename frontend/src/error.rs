/// Why a generate request did not produce a usable response.
///
/// Every variant ends up as the same fixed message in the UI; the variant
/// only matters for the log.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Transport(String),
    #[error("Service answered with status {status}: {status_text}")]
    Status { status: u16, status_text: String },
    #[error("Failed to parse JSON response: {0}")]
    Decode(#[from] serde_json::Error),
}

// ehttp reports transport failures as plain strings
impl From<ehttp::Error> for ClientError {
    fn from(err: ehttp::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

/// Errors raised while handing a file to the platform.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Browser refused the download: {0}")]
    Browser(String),
}
