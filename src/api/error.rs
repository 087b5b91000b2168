use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors returned by [`crate::api::ApiClient`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("{message} (status {status})")]
    Status { status: StatusCode, message: String },
    /// A success response whose body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    /// An authenticated call was attempted without a bearer credential.
    #[error("not logged in: no access token in session")]
    MissingToken,
}

impl ApiError {
    /// HTTP status, when the server answered.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    #[serde(default)]
    message: Option<String>,
}

/// Pull a human-readable message out of an error response body.
///
/// Looks for a top-level `message`, then the first `errors[].message`.
pub(crate) fn server_message(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    parsed
        .message
        .filter(|m| !m.is_empty())
        .or_else(|| {
            parsed
                .errors
                .into_iter()
                .find_map(|e| e.message.filter(|m| !m.is_empty()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_message() {
        let body = br#"{"message": "Post not found"}"#;
        assert_eq!(server_message(body).as_deref(), Some("Post not found"));
    }

    #[test]
    fn test_errors_array_message() {
        let body = br#"{"errors": [{"code": "invalid", "message": "Title is required"}], "statusCode": 400}"#;
        assert_eq!(server_message(body).as_deref(), Some("Title is required"));
    }

    #[test]
    fn test_unusable_bodies() {
        assert!(server_message(b"").is_none());
        assert!(server_message(b"<html>Bad Gateway</html>").is_none());
        assert!(server_message(br#"{"message": ""}"#).is_none());
        assert!(server_message(br#"{"status": "Bad Request"}"#).is_none());
    }

    #[test]
    fn test_status_display() {
        let err = ApiError::Status {
            status: StatusCode::NOT_FOUND,
            message: "Failed to fetch post".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to fetch post (status 404 Not Found)");
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }
}
