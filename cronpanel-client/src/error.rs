use thiserror::Error;

use crate::dto::ErrorBody;

/// Shown to the operator whenever no HTTP response was obtained.
pub const NETWORK_UNAVAILABLE: &str = "Network error: the server is unavailable.";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Application { status: u16, message: String },
    /// The server rejected the credential on an authenticated call.
    #[error("{message}")]
    Unauthorized { message: String },
    /// No response was obtained (connection refused, timeout, TLS, ...).
    #[error("Transport failure: {0}")]
    Transport(String),
    /// A 2xx response whose body did not have the expected shape.
    #[error("Unexpected {call} response: {reason}")]
    Decode { call: &'static str, reason: String },
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Build an application-class error from a failed response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        ApiError::Application {
            status,
            message: server_message(status, body),
        }
    }

    /// The text to surface to the operator.
    ///
    /// Application errors carry the server's own message verbatim; transport
    /// failures collapse to [`NETWORK_UNAVAILABLE`].
    pub fn operator_message(&self) -> String {
        match self {
            ApiError::Transport(_) => NETWORK_UNAVAILABLE.to_string(),
            other => other.to_string(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

/// Extract the machine-readable message from an error body.
///
/// The control plane answers `{"error": "..."}`, but some paths (the auth
/// middleware among them) reply with bare text.
pub fn server_message(status: u16, body: &str) -> String {
    let body = body.trim();
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.error;
    }
    if body.is_empty() {
        format!("Request failed with status {}", status)
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_error_body_is_used_verbatim() {
        let err = ApiError::from_response(
            401,
            "{\"error\": \"Invalid Liara API Token or API error\"}\n",
        );
        assert_eq!(
            err.operator_message(),
            "Invalid Liara API Token or API error"
        );
    }

    #[test]
    fn plain_text_body_falls_back_to_raw_text() {
        assert_eq!(
            server_message(401, "Authorization header required\n"),
            "Authorization header required"
        );
    }

    #[test]
    fn empty_body_reports_status() {
        assert_eq!(server_message(502, "  "), "Request failed with status 502");
    }

    #[test]
    fn transport_failure_uses_generic_message() {
        let err = ApiError::Transport("connection refused".to_string());
        assert!(err.is_transport());
        assert_eq!(err.operator_message(), NETWORK_UNAVAILABLE);
        assert_ne!(err.operator_message(), "connection refused");
    }
}
