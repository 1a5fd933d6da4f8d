//! Audit sink configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::domains::utils::default_true;
use crate::error::ConfigResult;
use crate::validation::Validatable;

/// Audit sink configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Append attempts before the failure is alerted and given up on
    pub retry_attempts: u32,

    /// Delay between append attempts
    #[serde(with = "crate::domains::utils::serde_duration_ms")]
    pub retry_delay: Duration,

    /// Upper bound for a single append attempt
    #[serde(with = "crate::domains::utils::serde_duration_ms")]
    pub write_timeout: Duration,

    /// Directory for file-backed audit logs; tracing-backed when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            retry_attempts: 3,
            retry_delay: Duration::from_millis(100),
            write_timeout: Duration::from_millis(250),
            log_dir: None,
        }
    }
}

impl Validatable for AuditConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.retry_attempts == 0 {
            return Err(self.validation_error("retry_attempts must be at least 1"));
        }

        if self.write_timeout.is_zero() {
            return Err(self.validation_error("write_timeout must be greater than 0"));
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "audit"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = AuditConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.enabled);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_zero_attempts_is_rejected() {
        let mut config = AuditConfig::default();
        config.retry_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_dir_parses() {
        let config: AuditConfig =
            serde_yaml::from_str("log_dir: /var/log/aspire/audit\n").unwrap();
        assert_eq!(
            config.log_dir,
            Some(PathBuf::from("/var/log/aspire/audit"))
        );
    }
}
