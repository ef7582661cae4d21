//! Identity service configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Identity service configuration
///
/// The identity service owns user accounts and sessions; this service only
/// validates and refreshes the tokens it issues. Both values are required,
/// so a misconfigured process fails at startup instead of silently running
/// with degraded access control.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Base URL of the identity service (e.g. "https://identity.example.com")
    pub identity_url: String,

    /// Publishable API key sent with every identity service call
    pub publishable_key: Secret<String>,

    /// Path unauthenticated requests to protected pages are redirected to
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Name of the access token session cookie
    #[serde(default = "default_access_cookie")]
    pub access_cookie: String,

    /// Name of the refresh token session cookie
    #[serde(default = "default_refresh_cookie")]
    pub refresh_cookie: String,

    /// Identity service request timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
}

impl AuthConfig {
    /// Get the identity service request timeout as Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Validate identity service configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.identity_url.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH_IDENTITY_URL"));
        }
        if !self.identity_url.starts_with("http://") && !self.identity_url.starts_with("https://") {
            return Err(ValidationError::InvalidIdentityUrl);
        }
        if *environment == Environment::Production && !self.identity_url.starts_with("https://") {
            return Err(ValidationError::IdentityUrlMustBeHttps);
        }
        if self.publishable_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH_PUBLISHABLE_KEY"));
        }
        if !self.login_path.starts_with('/') {
            return Err(ValidationError::InvalidLoginPath);
        }
        Ok(())
    }
}

fn default_login_path() -> String {
    "/auth/login".to_string()
}

fn default_access_cookie() -> String {
    "burrow-access-token".to_string()
}

fn default_refresh_cookie() -> String {
    "burrow-refresh-token".to_string()
}

fn default_http_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AuthConfig {
        AuthConfig {
            identity_url: "https://identity.example.com".to_string(),
            publishable_key: Secret::new("pk_test_xxx".to_string()),
            login_path: default_login_path(),
            access_cookie: default_access_cookie(),
            refresh_cookie: default_refresh_cookie(),
            http_timeout_secs: default_http_timeout(),
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(valid_config().validate(&Environment::Development).is_ok());
        assert!(valid_config().validate(&Environment::Production).is_ok());
    }

    #[test]
    fn empty_identity_url_rejected() {
        let config = AuthConfig {
            identity_url: String::new(),
            ..valid_config()
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn non_http_identity_url_rejected() {
        let config = AuthConfig {
            identity_url: "ftp://identity.example.com".to_string(),
            ..valid_config()
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidIdentityUrl)
        ));
    }

    #[test]
    fn plain_http_rejected_in_production() {
        let config = AuthConfig {
            identity_url: "http://identity.example.com".to_string(),
            ..valid_config()
        };
        assert!(config.validate(&Environment::Development).is_ok());
        assert!(matches!(
            config.validate(&Environment::Production),
            Err(ValidationError::IdentityUrlMustBeHttps)
        ));
    }

    #[test]
    fn empty_publishable_key_rejected() {
        let config = AuthConfig {
            publishable_key: Secret::new(String::new()),
            ..valid_config()
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn relative_login_path_rejected() {
        let config = AuthConfig {
            login_path: "auth/login".to_string(),
            ..valid_config()
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidLoginPath)
        ));
    }

    #[test]
    fn default_cookie_names() {
        let config = valid_config();
        assert_eq!(config.access_cookie, "burrow-access-token");
        assert_eq!(config.refresh_cookie, "burrow-refresh-token");
    }
}
