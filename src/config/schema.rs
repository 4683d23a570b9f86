//! Typed configuration sections built from resolved values

use super::keys::ConfigKey;
use super::resolver::ConfigResolver;
use super::secret::SecretString;
use crate::domain::{PhenomlError, Result};
use url::Url;

/// Credentials needed to reach the workflow service
#[derive(Debug, Clone)]
pub struct PhenomlCredentials {
    pub username: String,
    /// Stored securely in memory and zeroized on drop
    pub password: SecretString,
    pub base_url: String,
}

impl PhenomlCredentials {
    /// Resolve and validate the three core credentials
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first missing key, or a
    /// validation error when the base URL is not an absolute http(s) URL.
    pub fn from_resolver(resolver: &ConfigResolver) -> Result<Self> {
        let username = resolver.require(ConfigKey::PhenomlUsername, None)?;
        let password = resolver.require(ConfigKey::PhenomlPassword, None)?;
        let base_url = resolver.require(ConfigKey::PhenomlBaseUrl, None)?;
        validate_http_url(ConfigKey::PhenomlBaseUrl.as_str(), base_url.expose())?;

        Ok(Self {
            username: username.expose().to_string(),
            password: password.secret().clone(),
            base_url: base_url.expose().trim_end_matches('/').to_string(),
        })
    }
}

/// Check that `value` is an absolute http or https URL
pub fn validate_http_url(field: &str, value: &str) -> Result<Url> {
    let url = Url::parse(value)
        .map_err(|e| PhenomlError::validation(field, format!("'{value}' is not a valid URL: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(PhenomlError::validation(
            field,
            format!("URL scheme must be http or https, got '{scheme}'"),
        )),
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    pub local_enabled: bool,

    /// Directory for log files
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: "logs".to_string(),
            local_rotation: "daily".to_string(),
        }
    }
}

impl LoggingConfig {
    /// File logging into `dir`
    pub fn with_local_path(dir: impl Into<String>) -> Self {
        Self {
            local_enabled: true,
            local_path: dir.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid log rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("Log directory cannot be empty when file logging is enabled".to_string());
        }
        Ok(())
    }
}
