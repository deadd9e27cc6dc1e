use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Error code the backend sets when a delete would orphan dependent rows.
pub const FOREIGN_KEY_CONSTRAINT: &str = "FOREIGN_KEY_CONSTRAINT";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    ForeignKeyConstraint { message: String },

    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Server Error: {status} - {message}")]
    Server {
        status: u16,
        code: String,
        message: String,
    },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Decode error: {0}")]
    Decode(String),
}

impl PartialEq for ApiError {
    fn eq(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Error payload the backend attaches to non-success responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Maps a non-success response to an [`ApiError`]. The foreign key code wins
/// over status-based mapping because the backend reports it with varying
/// statuses.
pub fn classify_response(status: StatusCode, body: &str) -> ApiError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => {
            let code = parsed.error.unwrap_or_default();
            let message = parsed
                .message
                .unwrap_or_else(|| format!("Server Error: {}", status.as_u16()));
            if code == FOREIGN_KEY_CONSTRAINT {
                ApiError::ForeignKeyConstraint { message }
            } else if status == StatusCode::NOT_FOUND {
                ApiError::NotFound(message)
            } else {
                ApiError::Server {
                    status: status.as_u16(),
                    code,
                    message,
                }
            }
        }
        Err(_) => {
            if status == StatusCode::NOT_FOUND {
                ApiError::NotFound(format!("Server Error: {}", status.as_u16()))
            } else {
                ApiError::Server {
                    status: status.as_u16(),
                    code: "SERVER_ERROR".to_string(),
                    message: format!("Server Error: {} - {}", status.as_u16(), body.trim()),
                }
            }
        }
    }
}

/// Passes success responses through and reshapes everything else.
pub(crate) async fn check_response(
    response: reqwest::Response,
) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(classify_response(status, &body))
}
