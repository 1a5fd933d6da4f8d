//! Configuration loading and environment variable handling

use std::path::Path;
use std::time::Duration;

use crate::domains::AspireConfig;
use crate::error::{ConfigError, ConfigResult};

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl ConfigLoader {
    /// Create a new config loader with default prefix
    pub fn new() -> Self {
        Self {
            prefix: "ASPIRE".to_string(),
        }
    }

    /// Create a new config loader with custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Load configuration from a YAML file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<AspireConfig> {
        let content = std::fs::read_to_string(path)?;
        let mut config: AspireConfig = serde_yaml::from_str(&content)?;

        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env(&self) -> ConfigResult<AspireConfig> {
        let mut config = AspireConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration with fallback chain
    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<AspireConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(&self, config: &mut AspireConfig) -> ConfigResult<()> {
        self.apply_auth_overrides(&mut config.auth)?;
        self.apply_audit_overrides(&mut config.audit)?;
        Ok(())
    }

    /// Apply auth config overrides
    fn apply_auth_overrides(
        &self,
        config: &mut crate::domains::auth::AuthConfig,
    ) -> ConfigResult<()> {
        if let Ok(timeout) = self.get_env_var("AUTH_LOOKUP_TIMEOUT_MS") {
            let millis: u64 = timeout.parse().map_err(|e| {
                ConfigError::EnvError(format!("invalid AUTH_LOOKUP_TIMEOUT_MS: {}", e))
            })?;
            config.lookup_timeout = Duration::from_millis(millis);
        }

        if let Ok(path) = self.get_env_var("AUTH_SIGN_IN_PATH") {
            config.sign_in_path = path;
        }

        Ok(())
    }

    /// Apply audit config overrides
    fn apply_audit_overrides(
        &self,
        config: &mut crate::domains::audit::AuditConfig,
    ) -> ConfigResult<()> {
        if let Ok(enabled) = self.get_env_var("AUDIT_ENABLED") {
            config.enabled = enabled
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("invalid AUDIT_ENABLED: {}", e)))?;
        }

        if let Ok(attempts) = self.get_env_var("AUDIT_RETRY_ATTEMPTS") {
            config.retry_attempts = attempts.parse().map_err(|e| {
                ConfigError::EnvError(format!("invalid AUDIT_RETRY_ATTEMPTS: {}", e))
            })?;
        }

        if let Ok(delay) = self.get_env_var("AUDIT_RETRY_DELAY_MS") {
            let millis: u64 = delay.parse().map_err(|e| {
                ConfigError::EnvError(format!("invalid AUDIT_RETRY_DELAY_MS: {}", e))
            })?;
            config.retry_delay = Duration::from_millis(millis);
        }

        if let Ok(timeout) = self.get_env_var("AUDIT_WRITE_TIMEOUT_MS") {
            let millis: u64 = timeout.parse().map_err(|e| {
                ConfigError::EnvError(format!("invalid AUDIT_WRITE_TIMEOUT_MS: {}", e))
            })?;
            config.write_timeout = Duration::from_millis(millis);
        }

        if let Ok(dir) = self.get_env_var("AUDIT_LOG_DIR") {
            config.log_dir = Some(dir.into());
        }

        Ok(())
    }

    fn get_env_var(&self, name: &str) -> Result<String, std::env::VarError> {
        std::env::var(format!("{}_{}", self.prefix, name))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
