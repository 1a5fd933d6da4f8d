//! Session resolution configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ConfigResult;
use crate::validation::{validate_required_string, Validatable};

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Upper bound for one session or user-store lookup. A check that cannot
    /// complete within this window fails closed.
    #[serde(with = "crate::domains::utils::serde_duration_ms")]
    pub lookup_timeout: Duration,

    /// Where unauthenticated view requests are redirected
    pub sign_in_path: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            lookup_timeout: Duration::from_millis(250),
            sign_in_path: "/auth/sign-in".to_string(),
        }
    }
}

impl Validatable for AuthConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.lookup_timeout.is_zero() {
            return Err(self.validation_error("lookup_timeout must be greater than 0"));
        }

        // An authorization check hanging for seconds is an availability
        // outage for every protected endpoint.
        if self.lookup_timeout > Duration::from_secs(5) {
            return Err(self.validation_error("lookup_timeout must not exceed 5000ms"));
        }

        validate_required_string(&self.sign_in_path, "sign_in_path", self.domain_name())?;
        if !self.sign_in_path.starts_with('/') {
            return Err(self.validation_error("sign_in_path must start with '/'"));
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "auth"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(AuthConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let mut config = AuthConfig::default();
        config.lookup_timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_relative_sign_in_path_is_rejected() {
        let mut config = AuthConfig::default();
        config.sign_in_path = "auth/sign-in".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_timeout_parses_as_milliseconds() {
        let config: AuthConfig = serde_yaml::from_str("lookup_timeout: 150\n").unwrap();
        assert_eq!(config.lookup_timeout, Duration::from_millis(150));
    }
}
