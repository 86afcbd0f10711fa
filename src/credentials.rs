use crate::error::{Result, ZaimError};

/// Long-lived OAuth 1.0a credentials for one Zaim account.
///
/// All four values are non-empty; the only way to build a `Credentials`
/// is through [`Credentials::new`] or [`Credentials::from_env`], which
/// enforce that.
#[derive(Clone)]
pub struct Credentials {
    consumer_key: String,
    consumer_secret: String,
    access_token: String,
    access_token_secret: String,
}

impl Credentials {
    /// Create a new credential set
    ///
    /// # Errors
    /// Returns `ZaimError::MissingField` naming the first value that is
    /// empty after trimming.
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_token_secret: impl Into<String>,
    ) -> Result<Self> {
        let credentials = Credentials {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token: access_token.into(),
            access_token_secret: access_token_secret.into(),
        };

        let fields = [
            ("consumer_key", &credentials.consumer_key),
            ("consumer_secret", &credentials.consumer_secret),
            ("access_token", &credentials.access_token),
            ("access_token_secret", &credentials.access_token_secret),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ZaimError::missing_field(*name));
        }

        Ok(credentials)
    }

    /// Load credentials from `ZAIM_CONSUMER_KEY`, `ZAIM_CONSUMER_SECRET`,
    /// `ZAIM_ACCESS_TOKEN` and `ZAIM_ACCESS_TOKEN_SECRET`
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| std::env::var(name).map_err(|_| ZaimError::missing_field(name));

        Credentials::new(
            var("ZAIM_CONSUMER_KEY")?,
            var("ZAIM_CONSUMER_SECRET")?,
            var("ZAIM_ACCESS_TOKEN")?,
            var("ZAIM_ACCESS_TOKEN_SECRET")?,
        )
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    pub fn consumer_secret(&self) -> &str {
        &self.consumer_secret
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn access_token_secret(&self) -> &str {
        &self.access_token_secret
    }
}

// Implement Debug manually to avoid exposing the secrets
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("access_token", &"<redacted>")
            .field("access_token_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_creation() {
        let credentials = Credentials::new("ck", "cs", "at", "ats").unwrap();

        assert_eq!(credentials.consumer_key(), "ck");
        assert_eq!(credentials.consumer_secret(), "cs");
        assert_eq!(credentials.access_token(), "at");
        assert_eq!(credentials.access_token_secret(), "ats");
    }

    #[test]
    fn test_empty_consumer_key_rejected() {
        let err = Credentials::new("", "cs", "at", "ats").unwrap_err();
        match err {
            ZaimError::MissingField { field } => assert_eq!(field, "consumer_key"),
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_whitespace_secret_rejected() {
        let err = Credentials::new("ck", "cs", "at", "   ").unwrap_err();
        assert!(matches!(
            err,
            ZaimError::MissingField { ref field } if field == "access_token_secret"
        ));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let credentials = Credentials::new("ck", "consumer-secret", "token", "token-secret").unwrap();
        let debug = format!("{:?}", credentials);

        assert!(debug.contains("ck"));
        assert!(!debug.contains("consumer-secret"));
        assert!(!debug.contains("token-secret"));
    }
}
