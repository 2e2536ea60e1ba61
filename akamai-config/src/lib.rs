//! # Akamai Config
//!
//! Loads Akamai streaming token parameters from JSON or TOML files and from
//! environment variables, and merges the sources into a single
//! [`TokenParams`] set ready for [`TokenBuilder`].
//!
//! ## Example
//!
//! ```no_run
//! use akamai_config::StreamingConfig;
//!
//! # fn main() -> Result<(), akamai_config::ConfigError> {
//! let config = StreamingConfig::from_path("./token.toml")?
//!     .merge(StreamingConfig::from_env("AKAMAI_TOKEN")?);
//!
//! let token = config.builder()?.encrypted_token()?;
//! println!("{token}");
//! # Ok(())
//! # }
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use akamai_token::{TokenBuilder, TokenError, TokenParams};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Directory name used under the platform config directory
pub const CONFIG_DIR_NAME: &str = "akamai-streaming";

/// File name of the default configuration
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors that can occur while loading token configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error occurred while reading configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "toml")]
    #[error("Failed to parse TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[cfg(feature = "toml")]
    #[error("Failed to serialize TOML configuration: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Environment variable {name} could not be read: {reason}")]
    EnvVar { name: String, reason: String },

    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: String, value: String },

    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    #[error("Could not determine the user configuration directory")]
    NoConfigDir,

    #[error("Invalid token parameters: {0}")]
    Token(#[from] TokenError),
}

/// Token parameters loaded from one or more configuration sources
///
/// The on-disk format is a flat map of the token fields, for example:
///
/// ```toml
/// window = 600
/// key = "0123456789abcdef0123456789abcdef"
/// acl = "/live/*"
/// ```
///
/// Unknown keys are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamingConfig {
    pub params: TokenParams,
}

impl From<TokenParams> for StreamingConfig {
    fn from(params: TokenParams) -> Self {
        Self { params }
    }
}

impl StreamingConfig {
    pub fn new(params: TokenParams) -> Self {
        Self { params }
    }

    /// Configuration listing every default explicitly, used for templates
    pub fn template() -> Self {
        Self::new(TokenParams::with_defaults())
    }

    /// Create a configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: StreamingConfig = serde_json::from_str(&content)?;
        debug!("loaded token parameters from JSON file {}", path.display());
        Ok(config)
    }

    /// Create a configuration from a TOML file
    #[cfg(feature = "toml")]
    pub fn from_toml(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: StreamingConfig = toml::from_str(&content)?;
        debug!("loaded token parameters from TOML file {}", path.display());
        Ok(config)
    }

    /// Load a file, picking the format from its extension (`json` or `toml`)
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Self::from_file(path),
            #[cfg(feature = "toml")]
            Some("toml") => Self::from_toml(path),
            Some(other) => Err(ConfigError::UnsupportedFormat(other.to_string())),
            None => Err(ConfigError::UnsupportedFormat(format!(
                "no file extension on {}",
                path.display()
            ))),
        }
    }

    /// Create a configuration from environment variables
    ///
    /// The variables are named with the given prefix followed by:
    /// - START_TIME, WINDOW: integers
    /// - ALGO: md5, sha1 or sha256
    /// - KEY: hex key
    /// - FIELD_DELIMITER: a single character
    /// - ACL, URL, IP, SESSION_ID, DATA, SALT: strings
    /// - EARLY_URL_ENCODING, DEBUG: true/false, 1/0, yes/no
    ///
    /// Unset variables leave the field unset. Values are not validated
    /// beyond their type; that happens when a builder is created.
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let params = TokenParams {
            start_time: env_parsed(prefix, "START_TIME")?,
            window: env_parsed(prefix, "WINDOW")?,
            algo: env_string(prefix, "ALGO")?,
            key: env_string(prefix, "KEY")?,
            field_delimiter: env_delimiter(prefix)?,
            acl: env_string(prefix, "ACL")?,
            url: env_string(prefix, "URL")?,
            ip: env_string(prefix, "IP")?,
            session_id: env_string(prefix, "SESSION_ID")?,
            data: env_string(prefix, "DATA")?,
            salt: env_string(prefix, "SALT")?,
            early_url_encoding: env_bool(prefix, "EARLY_URL_ENCODING")?,
            debug: env_bool(prefix, "DEBUG")?,
        };

        debug!("loaded token parameters from environment prefix {}", prefix);
        Ok(Self { params })
    }

    /// Path of the per-user configuration file
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load the per-user configuration file, or an empty configuration if
    /// it does not exist
    #[cfg(feature = "toml")]
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = Self::default_config_path()?;
        if !path.exists() {
            debug!("no configuration at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::from_toml(path)
    }

    /// Render as TOML
    #[cfg(feature = "toml")]
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write as TOML, creating parent directories
    #[cfg(feature = "toml")]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Overlay `other` on this configuration; `other`'s fields win
    pub fn merge(self, other: StreamingConfig) -> Self {
        Self {
            params: self.params.merge(other.params),
        }
    }

    /// Check that the parameters would produce a token
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.builder().map(|_| ())
    }

    /// Create a token builder from the loaded parameters
    pub fn builder(&self) -> Result<TokenBuilder, ConfigError> {
        Ok(TokenBuilder::new(self.params.clone())?)
    }
}

fn env_name(prefix: &str, name: &str) -> String {
    format!("{}_{}", prefix, name)
}

fn env_string(prefix: &str, name: &str) -> Result<Option<String>, ConfigError> {
    let var = env_name(prefix, name);
    match env::var(&var) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(ConfigError::EnvVar {
            name: var,
            reason: e.to_string(),
        }),
    }
}

fn env_parsed(prefix: &str, name: &str) -> Result<Option<i64>, ConfigError> {
    env_string(prefix, name)?
        .map(|value| {
            value
                .trim()
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidValue {
                    name: env_name(prefix, name),
                    value,
                })
        })
        .transpose()
}

fn env_bool(prefix: &str, name: &str) -> Result<Option<bool>, ConfigError> {
    env_string(prefix, name)?
        .map(|value| match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                name: env_name(prefix, name),
                value,
            }),
        })
        .transpose()
}

fn env_delimiter(prefix: &str) -> Result<Option<char>, ConfigError> {
    env_string(prefix, "FIELD_DELIMITER")?
        .map(|value| {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => Err(ConfigError::InvalidValue {
                    name: env_name(prefix, "FIELD_DELIMITER"),
                    value,
                }),
            }
        })
        .transpose()
}
