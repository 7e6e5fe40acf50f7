// storyspoiler-cli/src/config.rs
// ============================================================================
// Module: StorySpoiler Configuration
// Description: Configuration loading and validation for the harness CLI.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, thiserror, toml, url
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits,
//! then overlaid with `STORYSPOILER_*` environment variables. Set-but-invalid
//! values fail closed rather than falling back silently. When no file is
//! requested and none exists in the working directory, built-in defaults
//! target the public demo deployment.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "storyspoiler.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV: &str = "STORYSPOILER_CONFIG";
/// Environment variable overriding the target base URL.
pub const BASE_URL_ENV: &str = "STORYSPOILER_BASE_URL";
/// Environment variable overriding the login username.
pub const USERNAME_ENV: &str = "STORYSPOILER_USERNAME";
/// Environment variable overriding the login password.
pub const PASSWORD_ENV: &str = "STORYSPOILER_PASSWORD";
/// Environment variable overriding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "STORYSPOILER_TIMEOUT_SEC";
/// Maximum configuration file size in bytes.
const MAX_CONFIG_FILE_SIZE: usize = 64 * 1024;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum length of the base URL string.
const MAX_BASE_URL_LENGTH: usize = 2048;
/// Maximum length of a credential value.
const MAX_CREDENTIAL_LENGTH: usize = 256;
/// Minimum request timeout in seconds.
const MIN_TIMEOUT_SECONDS: u64 = 1;
/// Maximum request timeout in seconds.
const MAX_TIMEOUT_SECONDS: u64 = 300;
/// Base URL of the public demo deployment.
const DEFAULT_BASE_URL: &str = "https://d3s5nxhwblsjbi.cloudfront.net";
/// Username of the documented demo account.
const DEFAULT_USERNAME: &str = "reex";
/// Password of the documented demo account.
const DEFAULT_PASSWORD: &str = "qwerty123";
/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// StorySpoiler harness configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct StorySpoilerConfig {
    /// Target deployment settings.
    #[serde(default)]
    pub target: TargetConfig,
    /// Login credentials for the scenario session.
    #[serde(default)]
    pub credentials: CredentialsConfig,
}

/// Target deployment settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TargetConfig {
    /// Base URL of the story service deployment.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in whole seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Login credentials for the scenario session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CredentialsConfig {
    /// Account username.
    #[serde(default = "default_username")]
    pub username: String,
    /// Account password.
    #[serde(default = "default_password")]
    pub password: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            password: default_password(),
        }
    }
}

impl StorySpoilerConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// Resolution order for the file: explicit `path`, then [`CONFIG_ENV`],
    /// then `storyspoiler.toml` in the working directory if present, then
    /// built-in defaults. Environment overrides apply after the file and
    /// before validation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading, parsing, or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match resolve_source(path)? {
            ConfigSource::File(resolved) => Self::from_file(&resolved)?,
            ConfigSource::Defaults => Self::default(),
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a configuration file with fail-closed limits.
    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        validate_path(path)?;
        let bytes = fs::read(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Applies `STORYSPOILER_*` environment overrides.
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(base_url) = read_env_nonempty(BASE_URL_ENV)? {
            self.target.base_url = base_url;
        }
        if let Some(raw) = read_env_nonempty(TIMEOUT_ENV)? {
            self.target.timeout_seconds = parse_timeout_seconds(TIMEOUT_ENV, &raw)?;
        }
        if let Some(username) = read_env_nonempty(USERNAME_ENV)? {
            self.credentials.username = username;
        }
        if let Some(password) = read_env_nonempty(PASSWORD_ENV)? {
            self.credentials.password = password;
        }
        Ok(())
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_base_url(&self.target.base_url)?;
        validate_timeout_seconds(self.target.timeout_seconds)?;
        validate_credential("credentials.username", &self.credentials.username)?;
        validate_credential("credentials.password", &self.credentials.password)?;
        Ok(())
    }

    /// Parses the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the URL is empty, malformed, or not http(s).
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        parse_base_url(&self.target.base_url)
    }

    /// Returns the configured request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.target.timeout_seconds)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Where configuration values come from.
enum ConfigSource {
    /// Read and parse the file at this path.
    File(PathBuf),
    /// No file requested or present; use built-in defaults.
    Defaults,
}

/// Resolves the config source from CLI, environment, or working directory.
fn resolve_source(path: Option<&Path>) -> Result<ConfigSource, ConfigError> {
    if let Some(path) = path {
        return Ok(ConfigSource::File(path.to_path_buf()));
    }
    if let Some(env_path) = read_env_nonempty(CONFIG_ENV)? {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(ConfigSource::File(PathBuf::from(env_path)));
    }
    let default = Path::new(DEFAULT_CONFIG_NAME);
    if default.exists() {
        return Ok(ConfigSource::File(default.to_path_buf()));
    }
    Ok(ConfigSource::Defaults)
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Reads an environment variable with strict UTF-8 enforcement, rejecting
/// set-but-empty values.
fn read_env_nonempty(name: &str) -> Result<Option<String>, ConfigError> {
    let Some(raw) = env::var_os(name) else {
        return Ok(None);
    };
    let value = raw
        .into_string()
        .map_err(|_| ConfigError::Invalid(format!("{name} must be valid utf-8")))?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{name} must not be empty")));
    }
    Ok(Some(trimmed.to_string()))
}

/// Parses a timeout override value in whole seconds.
fn parse_timeout_seconds(name: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| {
        ConfigError::Invalid(format!("{name} must be a positive integer number of seconds"))
    })
}

/// Validates a base URL string and returns the parsed URL.
fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid("target.base_url must be non-empty".to_string()));
    }
    if trimmed.len() > MAX_BASE_URL_LENGTH {
        return Err(ConfigError::Invalid("target.base_url exceeds max length".to_string()));
    }
    let url = Url::parse(trimmed)
        .map_err(|err| ConfigError::Invalid(format!("target.base_url is invalid: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid("target.base_url must use http or https".to_string()));
    }
    Ok(url)
}

/// Validates a timeout value against the allowed range.
fn validate_timeout_seconds(value: u64) -> Result<(), ConfigError> {
    if !(MIN_TIMEOUT_SECONDS..=MAX_TIMEOUT_SECONDS).contains(&value) {
        return Err(ConfigError::Invalid(format!(
            "target.timeout_seconds must be between {MIN_TIMEOUT_SECONDS} and \
             {MAX_TIMEOUT_SECONDS}"
        )));
    }
    Ok(())
}

/// Validates a credential value is non-empty and within length limits.
fn validate_credential(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if value.len() > MAX_CREDENTIAL_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    Ok(())
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Returns the default deployment base URL.
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Returns the default request timeout in seconds.
const fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

/// Returns the demo account username.
fn default_username() -> String {
    DEFAULT_USERNAME.to_string()
}

/// Returns the demo account password.
fn default_password() -> String {
    DEFAULT_PASSWORD.to_string()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
