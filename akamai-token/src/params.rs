use serde::{Deserialize, Serialize};

use crate::algorithm::Algorithm;
use crate::utils::hex_to_bytes;

/// Default validity window in seconds (5 minutes)
pub const DEFAULT_WINDOW: i64 = 300;

/// Default digest algorithm name
pub const DEFAULT_ALGORITHM: Algorithm = Algorithm::Sha256;

/// Key used when the caller does not supply one
pub const DEFAULT_KEY: &str = "aabbccddeeff00112233445566778899";

/// Separator placed after every rendered field
pub const DEFAULT_FIELD_DELIMITER: char = '~';

/// Largest accepted start time (unsigned 32-bit epoch seconds)
pub const MAX_START_TIME: i64 = u32::MAX as i64;

/// Caller-supplied token parameters
///
/// Every field is optional; unset fields fall back to the documented
/// defaults when a [`TokenBuilder`](crate::TokenBuilder) is constructed.
/// Values are carried unvalidated here. `algo` and `key` stay strings so
/// that the builder's setters are the single place where they are checked.
///
/// When deserialized, unknown keys are ignored.
///
/// # Examples
///
/// ```
/// use akamai_token::TokenParams;
///
/// let params = TokenParams::new()
///     .start_time(1_600_000_000)
///     .window(600)
///     .acl("/videos/*")
///     .key("0123456789abcdef0123456789abcdef");
///
/// assert_eq!(params.window, Some(600));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algo: Option<String>,
    /// Hex-encoded signing key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_delimiter: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub early_url_encoding: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
}

impl TokenParams {
    /// Create an empty parameter set (every field at its default)
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameter set with every field spelled out at its default value,
    /// except `start_time`, which is always resolved when a builder is made.
    pub fn with_defaults() -> Self {
        Self {
            window: Some(DEFAULT_WINDOW),
            algo: Some(DEFAULT_ALGORITHM.to_string()),
            key: Some(DEFAULT_KEY.to_string()),
            field_delimiter: Some(DEFAULT_FIELD_DELIMITER),
            early_url_encoding: Some(false),
            debug: Some(false),
            ..Self::default()
        }
    }

    pub fn start_time(mut self, start_time: i64) -> Self {
        self.start_time = Some(start_time);
        self
    }

    pub fn window(mut self, window: i64) -> Self {
        self.window = Some(window);
        self
    }

    pub fn algo(mut self, algo: impl Into<String>) -> Self {
        self.algo = Some(algo.into());
        self
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn field_delimiter(mut self, delimiter: char) -> Self {
        self.field_delimiter = Some(delimiter);
        self
    }

    pub fn acl(mut self, acl: impl Into<String>) -> Self {
        self.acl = Some(acl.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn salt(mut self, salt: impl Into<String>) -> Self {
        self.salt = Some(salt.into());
        self
    }

    pub fn early_url_encoding(mut self, enabled: bool) -> Self {
        self.early_url_encoding = Some(enabled);
        self
    }

    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = Some(enabled);
        self
    }

    /// Overlay `other` on top of `self`; fields set in `other` win.
    ///
    /// An overlay that sets `acl` drops an inherited `url` and vice versa, so
    /// a command-line `--acl` can replace a `url` read from a config file.
    /// Setting both in the same overlay is left for the builder to reject.
    pub fn merge(mut self, other: TokenParams) -> Self {
        if other.acl.is_some() && other.url.is_none() {
            self.url = None;
        }
        if other.url.is_some() && other.acl.is_none() {
            self.acl = None;
        }

        self.start_time = other.start_time.or(self.start_time);
        self.window = other.window.or(self.window);
        self.algo = other.algo.or(self.algo);
        self.key = other.key.or(self.key);
        self.field_delimiter = other.field_delimiter.or(self.field_delimiter);
        self.acl = other.acl.or(self.acl);
        self.url = other.url.or(self.url);
        self.ip = other.ip.or(self.ip);
        self.session_id = other.session_id.or(self.session_id);
        self.data = other.data.or(self.data);
        self.salt = other.salt.or(self.salt);
        self.early_url_encoding = other.early_url_encoding.or(self.early_url_encoding);
        self.debug = other.debug.or(self.debug);
        self
    }

    /// True when the key is unset or decodes to the same bytes as the
    /// built-in default (any case, any spacing). An undecodable key is not
    /// the default.
    pub fn uses_default_key(&self) -> bool {
        match self.key.as_deref() {
            None => true,
            Some(key) => match (hex_to_bytes(key), hex_to_bytes(DEFAULT_KEY)) {
                (Ok(key), Ok(default)) => key == default,
                _ => false,
            },
        }
    }
}
