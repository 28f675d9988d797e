//! Application Errors

use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    /// Request never got a response
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-success status
    #[error("Server error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),

    /// No token, or the server rejected it
    #[error("Not signed in")]
    Unauthorized,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Unauthorized | AppError::Http { status: 401, .. })
    }

    /// Short text for a toast
    pub fn user_message(&self) -> String {
        match self {
            AppError::Network(_) => "Could not reach the server".to_string(),
            AppError::Http { status, message } if message.is_empty() => {
                format!("Request failed ({})", status)
            }
            AppError::Http { message, .. } => message.clone(),
            AppError::Unauthorized => "Your session has expired, please sign in again".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            AppError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            AppError::Http { status: status.as_u16(), message: e.to_string() }
        } else {
            AppError::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_detection() {
        assert!(AppError::Unauthorized.is_unauthorized());
        assert!(AppError::Http { status: 401, message: String::new() }.is_unauthorized());
        assert!(!AppError::Http { status: 500, message: String::new() }.is_unauthorized());
    }

    #[test]
    fn test_user_message() {
        let e = AppError::Http { status: 502, message: String::new() };
        assert_eq!(e.user_message(), "Request failed (502)");
        let e = AppError::Http { status: 400, message: "Title taken".into() };
        assert_eq!(e.user_message(), "Title taken");
    }
}
