use std::fmt::{Display, Formatter, Result};

use api_client::api_error::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    ForeignKeyConstraint(String),
    NotFound(String),
    ApiError(String),
    NetworkError(String),
    DecodeError(String),
    InvalidInput(String),
    IoError(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Error::ForeignKeyConstraint(message) => write!(f, "{}", message),
            Error::NotFound(message) => write!(f, "Not found: {}", message),
            Error::ApiError(message) => write!(f, "Api error: {}", message),
            Error::NetworkError(message) => write!(f, "Network error: {}", message),
            Error::DecodeError(message) => write!(f, "Decode error: {}", message),
            Error::InvalidInput(message) => write!(f, "Invalid input: {}", message),
            Error::IoError(message) => write!(f, "IO error: {}", message),
        }
    }
}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::ForeignKeyConstraint { message } => Error::ForeignKeyConstraint(message),
            ApiError::NotFound(message) => Error::NotFound(message),
            ApiError::Server { status, message, .. } => {
                Error::ApiError(format!("Server Error: {} - {}", status, message))
            }
            ApiError::Network(message) => Error::NetworkError(message),
            ApiError::Decode(message) => Error::DecodeError(message),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foreign_key_api_error_stays_typed_through_conversion() {
        let api_err = ApiError::ForeignKeyConstraint {
            message: "Customer has quotes".to_string(),
        };
        let err = Error::from(api_err);
        assert_eq!(
            err,
            Error::ForeignKeyConstraint("Customer has quotes".to_string())
        );
        assert_eq!(err.to_string(), "Customer has quotes");
    }

    #[test]
    fn server_api_error_flattens_to_api_error_message() {
        let api_err = ApiError::Server {
            status: 500,
            code: "SERVER_ERROR".to_string(),
            message: "boom".to_string(),
        };
        let err = Error::from(api_err);
        assert_eq!(err, Error::ApiError("Server Error: 500 - boom".to_string()));
    }
}
