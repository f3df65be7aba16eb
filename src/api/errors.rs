//! Structured errors for the account service client.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Categories of client errors for consistent error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// No response received (connect failure, timeout, broken transport)
    Transport,
    /// Non-2xx HTTP status
    Status,
    /// 401/403 on an authenticated call
    Auth,
    /// Response body failed to decode (e.g. missing token field)
    Malformed,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Transport => write!(f, "transport"),
            ApiErrorKind::Status => write!(f, "status"),
            ApiErrorKind::Auth => write!(f, "auth"),
            ApiErrorKind::Malformed => write!(f, "malformed"),
        }
    }
}

/// Structured error from the client with kind and details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error category
    pub kind: ApiErrorKind,
    /// HTTP status code, when a response was received
    pub status: Option<u16>,
    /// One-line summary suitable for logs
    pub message: String,
    /// Raw response body for non-2xx statuses
    pub body: Option<String>,
}

impl ApiError {
    /// Creates a transport error (no response received).
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Transport,
            status: None,
            message: message.into(),
            body: None,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(status: u16, body: &str) -> Self {
        Self::from_status(ApiErrorKind::Status, status, body)
    }

    /// Creates an authentication error (401/403 on an authenticated call).
    pub fn auth(status: u16, body: &str) -> Self {
        Self::from_status(ApiErrorKind::Auth, status, body)
    }

    /// Creates a malformed-response error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Malformed,
            status: None,
            message: message.into(),
            body: None,
        }
    }

    /// Returns true for 401/403 authentication failures.
    pub fn is_auth(&self) -> bool {
        self.kind == ApiErrorKind::Auth
    }

    fn from_status(kind: ApiErrorKind, status: u16, body: &str) -> Self {
        let message = format!("HTTP {}", status);
        let body_field = if body.is_empty() {
            None
        } else {
            // Try to extract a cleaner error message from the JSON detail field
            if let Ok(json) = serde_json::from_str::<Value>(body)
                && let Some(detail) = json.get("detail").and_then(|v| v.as_str())
            {
                return Self {
                    kind,
                    status: Some(status),
                    message: format!("HTTP {}: {}", status, detail),
                    body: Some(body.to_string()),
                };
            }
            Some(body.to_string())
        };
        Self {
            kind,
            status: Some(status),
            message,
            body: body_field,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: status errors capture code and body.
    #[test]
    fn test_http_status_captures_code_and_body() {
        let err = ApiError::http_status(500, "oops");
        assert_eq!(err.kind, ApiErrorKind::Status);
        assert_eq!(err.status, Some(500));
        assert_eq!(err.message, "HTTP 500");
        assert_eq!(err.body.as_deref(), Some("oops"));
    }

    /// Test: a JSON detail field is lifted into the message.
    #[test]
    fn test_http_status_extracts_detail() {
        let err = ApiError::http_status(401, r#"{"detail": "Invalid credentials"}"#);
        assert_eq!(err.message, "HTTP 401: Invalid credentials");
        assert_eq!(err.status, Some(401));
        assert!(err.body.is_some());
    }

    /// Test: auth errors carry the distinct kind.
    #[test]
    fn test_auth_kind_is_distinct() {
        let err = ApiError::auth(403, "");
        assert_eq!(err.kind, ApiErrorKind::Auth);
        assert!(err.is_auth());
        assert!(!ApiError::http_status(401, "").is_auth());
    }

    /// Test: transport errors have no status.
    #[test]
    fn test_transport_has_no_status() {
        let err = ApiError::transport("Connection failed");
        assert_eq!(err.kind, ApiErrorKind::Transport);
        assert_eq!(err.status, None);
        assert_eq!(err.to_string(), "Connection failed");
    }

    /// Test: an empty body stays None.
    #[test]
    fn test_empty_body_is_none() {
        let err = ApiError::http_status(502, "");
        assert_eq!(err.body, None);
    }
}
