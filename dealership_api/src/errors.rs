//! Error types for the API client.

/// Message shown when neither the server nor the transport gave anything usable.
pub const FALLBACK_MESSAGE: &str = "Something went wrong";

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request never produced a response (network, DNS, timeout).
    #[error("Request failed: {0}")]
    RequestFailed(String),
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The response body was not the expected JSON shape.
    #[error("Failed to parse response: {0}")]
    Parse(String),
    /// The base URL and path did not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// A local file could not be read for upload.
    #[error("Failed to read {path}: {reason}")]
    File { path: String, reason: String },
}

impl Error {
    /// Message suitable for a user-facing notification.
    ///
    /// Prefers the server's error body (`message`, then `error`), then the
    /// transport error text, then a generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            Error::HttpStatus { body, .. } => {
                server_message(body).unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
            }
            Error::RequestFailed(text) if !text.trim().is_empty() => text.clone(),
            Error::File { .. } => self.to_string(),
            _ => FALLBACK_MESSAGE.to_string(),
        }
    }

    /// HTTP status code, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(*key))
        .filter_map(|v| v.as_str())
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}
