use serde_json::Value;
use thiserror::Error;

/// Main error type for Zaim API operations
#[derive(Debug, Error)]
pub enum ZaimError {
    /// A required credential or configuration value is missing or empty
    #[error("missing required field: {field}")]
    MissingField { field: String },

    /// No HTTP response was received (DNS, connection refused, timeout)
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Non-2xx response returned by the API
    #[error("{service} API Error: {status} - {message}")]
    Api {
        service: String,
        status: u16,
        message: String,
        body: Value,
    },

    /// The response did not carry the expected record or list
    #[error("unexpected response shape: expected {expected} under `{field}`")]
    UnexpectedShape { field: String, expected: String },

    /// Request building error
    #[error("failed to build request: {0}")]
    RequestBuild(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl ZaimError {
    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        ZaimError::MissingField {
            field: field.into(),
        }
    }

    /// Create a network error wrapping the transport failure
    pub fn network<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ZaimError::Network {
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an API error from a non-2xx status and its parsed body.
    ///
    /// The message is read from `message`, then `error`, falling back to
    /// "Unknown error" when neither is a string.
    pub fn from_status(service: &str, status: u16, body: Value) -> Self {
        let message = ["message", "error"]
            .iter()
            .find_map(|key| body.get(key).and_then(Value::as_str))
            .unwrap_or("Unknown error")
            .to_string();

        ZaimError::Api {
            service: service.to_string(),
            status,
            message,
            body,
        }
    }

    /// Create an unexpected shape error
    pub fn unexpected_shape(field: &str, expected: &str) -> Self {
        ZaimError::UnexpectedShape {
            field: field.to_string(),
            expected: expected.to_string(),
        }
    }

    /// Get the HTTP status code if this is an API error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ZaimError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if the credentials were rejected (401)
    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == Some(401)
    }

    /// Check if this error is a not found error (404)
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// Check if the API asked us to slow down (429)
    pub fn is_rate_limited(&self) -> bool {
        self.status_code() == Some(429)
    }

    /// Check if the request never got a response
    pub fn is_network(&self) -> bool {
        matches!(self, ZaimError::Network { .. })
    }
}

/// Result type for Zaim operations
pub type Result<T> = std::result::Result<T, ZaimError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_error_prefers_message_field() {
        let body = json!({"message": "invalid token", "error": "Unauthorized"});
        let error = ZaimError::from_status("Zaim", 401, body);

        assert_eq!(error.to_string(), "Zaim API Error: 401 - invalid token");
        assert!(error.is_unauthorized());
    }

    #[test]
    fn test_api_error_uses_error_field() {
        let error = ZaimError::from_status("Zaim", 404, json!({"error": "Not Found"}));

        assert_eq!(error.to_string(), "Zaim API Error: 404 - Not Found");
        assert!(error.is_not_found());
        assert!(!error.is_rate_limited());
    }

    #[test]
    fn test_api_error_unknown_message() {
        // Zaim sometimes sends `"error": true` alongside a message; without one
        // there is nothing readable to report.
        let error = ZaimError::from_status("Zaim", 429, json!({"error": true}));

        assert_eq!(error.to_string(), "Zaim API Error: 429 - Unknown error");
        assert!(error.is_rate_limited());
        assert_eq!(error.status_code(), Some(429));
    }

    #[test]
    fn test_network_error_wraps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let error = ZaimError::network(io);

        assert!(error.is_network());
        assert_eq!(error.status_code(), None);
        assert_eq!(error.to_string(), "Network error: connection refused");
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_missing_field_message() {
        let error = ZaimError::missing_field("consumer_key");
        assert_eq!(error.to_string(), "missing required field: consumer_key");
    }
}
