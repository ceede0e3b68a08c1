//! Transport error taxonomy for backend calls

use std::fmt;

/// Errors returned by [`super::ApiClient`]
///
/// A 404 on the DNI lookup is not an error; `find_by_dni` maps it to `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Connection refused, DNS failure, reset, etc.
    Network(String),
    /// Backend answered with a non-2xx status
    Status {
        status: u16,
        /// `error` field of the JSON body, if the backend sent one
        message: Option<String>,
    },
    /// 2xx response whose body could not be decoded
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Status {
                status,
                message: Some(message),
            } => write!(f, "Request failed with status code {}: {}", status, message),
            Self::Status {
                status,
                message: None,
            } => write!(f, "Request failed with status code {}", status),
            Self::Decode(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    /// Server-provided error text if present, otherwise the transport description
    pub fn user_text(&self) -> String {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status {
                status: status.as_u16(),
                message: None,
            }
        } else {
            Self::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_text_prefers_server_message() {
        let err = ApiError::Status {
            status: 400,
            message: Some("El DNI ya existe".to_string()),
        };
        assert_eq!(err.user_text(), "El DNI ya existe");

        let err = ApiError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_text(), "Request failed with status code 500");

        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(err.user_text(), "Network error: connection refused");
    }

    #[test]
    fn test_not_found_only_for_404() {
        assert!(ApiError::Status {
            status: 404,
            message: None
        }
        .is_not_found());
        assert!(!ApiError::Status {
            status: 500,
            message: None
        }
        .is_not_found());
        assert!(!ApiError::Network("x".to_string()).is_not_found());
    }
}
