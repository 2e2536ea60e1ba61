use std::fmt;

use tracing::debug;

use crate::algorithm::Algorithm;
use crate::error::TokenError;
use crate::params::{
    TokenParams, DEFAULT_ALGORITHM, DEFAULT_FIELD_DELIMITER, DEFAULT_KEY, DEFAULT_WINDOW,
    MAX_START_TIME,
};
use crate::utils::{current_timestamp, escape_slashes, hex_to_bytes, hmac_sha256_hex};

/// What a token grants access to: a path ACL, a single URL, or neither.
///
/// Holding both is unrepresentable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Target {
    #[default]
    None,
    Acl(String),
    Url(String),
}

/// Builds and signs an Akamai streaming token
///
/// Each setter validates its own field, so an instance always holds a
/// signable configuration. The key is decoded from hex once, on assignment,
/// and only the raw bytes are kept.
///
/// # Examples
///
/// ```
/// use akamai_token::{TokenBuilder, TokenParams};
///
/// let params = TokenParams::new()
///     .start_time(1000)
///     .key("aabbccddeeff00112233445566778899");
///
/// let builder = TokenBuilder::new(params).expect("valid parameters");
/// assert_eq!(builder.raw_token(), "st=1000~exp=1300~acl=/*~");
///
/// let token = builder.encrypted_token().expect("signed token");
/// assert!(token.starts_with("st=1000~exp=1300~acl=%2f*~hmac="));
/// ```
#[derive(Clone)]
pub struct TokenBuilder {
    start_time: u32,
    window: i64,
    algo: Algorithm,
    key: Vec<u8>,
    field_delimiter: char,
    target: Target,
    ip: Option<String>,
    session_id: Option<String>,
    data: Option<String>,
    salt: Option<String>,
    early_url_encoding: bool,
    debug: bool,
}

impl TokenBuilder {
    /// Build from `params`, defaulting `start_time` to the current time
    pub fn new(params: TokenParams) -> Result<Self, TokenError> {
        Self::new_at(params, current_timestamp())
    }

    /// Build from `params`, defaulting `start_time` to `now`
    ///
    /// Fields are applied in a fixed order with `acl` before `url`, so a
    /// parameter set carrying both fails with [`TokenError::UrlWithAcl`].
    pub fn new_at(params: TokenParams, now: i64) -> Result<Self, TokenError> {
        let mut builder = TokenBuilder {
            start_time: 0,
            window: DEFAULT_WINDOW,
            algo: DEFAULT_ALGORITHM,
            key: Vec::new(),
            field_delimiter: DEFAULT_FIELD_DELIMITER,
            target: Target::None,
            ip: None,
            session_id: None,
            data: None,
            salt: None,
            early_url_encoding: false,
            debug: false,
        };

        builder.set_start_time(params.start_time.unwrap_or(now))?;
        builder.set_window(params.window.unwrap_or(DEFAULT_WINDOW));
        match params.algo {
            Some(algo) => builder.set_algo(&algo)?,
            None => builder.set_algorithm(DEFAULT_ALGORITHM),
        }
        builder.set_key(params.key.as_deref().unwrap_or(DEFAULT_KEY))?;
        builder.set_field_delimiter(params.field_delimiter.unwrap_or(DEFAULT_FIELD_DELIMITER));
        builder.set_early_url_encoding(params.early_url_encoding.unwrap_or(false));
        builder.set_debug(params.debug.unwrap_or(false));
        builder.set_acl(params.acl)?;
        builder.set_url(params.url)?;
        builder.set_ip(params.ip);
        builder.set_session_id(params.session_id);
        builder.set_data(params.data);
        builder.set_salt(params.salt);

        Ok(builder)
    }

    pub fn set_start_time(&mut self, start_time: i64) -> Result<(), TokenError> {
        if !(0..=MAX_START_TIME).contains(&start_time) {
            return Err(TokenError::InvalidStartTime);
        }
        self.start_time = u32::try_from(start_time).map_err(|_| TokenError::InvalidStartTime)?;
        Ok(())
    }

    /// Window in seconds; not range-checked, a negative window yields an
    /// expiration before the start time.
    pub fn set_window(&mut self, window: i64) {
        self.window = window;
    }

    pub fn set_algo(&mut self, algo: &str) -> Result<(), TokenError> {
        self.algo = algo.parse()?;
        Ok(())
    }

    pub fn set_algorithm(&mut self, algo: Algorithm) {
        self.algo = algo;
    }

    /// Decode and store the hex key. Whitespace is ignored.
    pub fn set_key(&mut self, hex_key: &str) -> Result<(), TokenError> {
        self.key = hex_to_bytes(hex_key)?;
        Ok(())
    }

    pub fn set_field_delimiter(&mut self, delimiter: char) {
        self.field_delimiter = delimiter;
    }

    /// Set or clear the ACL.
    ///
    /// Fails with [`TokenError::AclWithUrl`] when a URL is held. Clearing
    /// (`None`) never fails and leaves a held URL alone.
    pub fn set_acl(&mut self, acl: Option<String>) -> Result<(), TokenError> {
        match acl {
            Some(acl) => {
                if let Target::Url(_) = self.target {
                    return Err(TokenError::AclWithUrl);
                }
                self.target = Target::Acl(acl);
            }
            None => {
                if let Target::Acl(_) = self.target {
                    self.target = Target::None;
                }
            }
        }
        Ok(())
    }

    /// Set or clear the URL; the mirror image of [`TokenBuilder::set_acl`].
    pub fn set_url(&mut self, url: Option<String>) -> Result<(), TokenError> {
        match url {
            Some(url) => {
                if let Target::Acl(_) = self.target {
                    return Err(TokenError::UrlWithAcl);
                }
                self.target = Target::Url(url);
            }
            None => {
                if let Target::Url(_) = self.target {
                    self.target = Target::None;
                }
            }
        }
        Ok(())
    }

    pub fn set_ip(&mut self, ip: Option<String>) {
        self.ip = ip;
    }

    pub fn set_session_id(&mut self, session_id: Option<String>) {
        self.session_id = session_id;
    }

    pub fn set_data(&mut self, data: Option<String>) {
        self.data = data;
    }

    pub fn set_salt(&mut self, salt: Option<String>) {
        self.salt = salt;
    }

    pub fn set_early_url_encoding(&mut self, enabled: bool) {
        self.early_url_encoding = enabled;
    }

    pub fn set_debug(&mut self, enabled: bool) {
        self.debug = enabled;
    }

    pub fn start_time(&self) -> u32 {
        self.start_time
    }

    pub fn window(&self) -> i64 {
        self.window
    }

    /// The configured algorithm name. The signature is HMAC-SHA256 whatever
    /// this returns.
    pub fn algo(&self) -> Algorithm {
        self.algo
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn field_delimiter(&self) -> char {
        self.field_delimiter
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn acl(&self) -> Option<&str> {
        match &self.target {
            Target::Acl(acl) => Some(acl),
            _ => None,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match &self.target {
            Target::Url(url) => Some(url),
            _ => None,
        }
    }

    pub fn ip(&self) -> Option<&str> {
        self.ip.as_deref()
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    pub fn salt(&self) -> Option<&str> {
        self.salt.as_deref()
    }

    pub fn early_url_encoding(&self) -> bool {
        self.early_url_encoding
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// `start_time + window`
    pub fn expiration(&self) -> i64 {
        i64::from(self.start_time).saturating_add(self.window)
    }

    fn optional_field(&self, name: &str, value: Option<&str>) -> String {
        match value {
            Some(value) => format!("{}={}{}", name, value, self.field_delimiter),
            None => String::new(),
        }
    }

    pub fn start_time_field(&self) -> String {
        format!("st={}{}", self.start_time, self.field_delimiter)
    }

    pub fn expiration_field(&self) -> String {
        format!("exp={}{}", self.expiration(), self.field_delimiter)
    }

    /// `acl=/*` when neither an ACL nor a URL is held.
    ///
    /// With a URL held the ACL value is rendered empty (`acl=~`); existing
    /// edge configurations depend on this exact output.
    pub fn acl_field(&self) -> String {
        match &self.target {
            Target::None => format!("acl=/*{}", self.field_delimiter),
            Target::Acl(acl) => format!("acl={}{}", acl, self.field_delimiter),
            Target::Url(_) => format!("acl={}", self.field_delimiter),
        }
    }

    pub fn url_field(&self) -> String {
        self.optional_field("url", self.url())
    }

    pub fn ip_field(&self) -> String {
        self.optional_field("ip", self.ip())
    }

    pub fn session_id_field(&self) -> String {
        self.optional_field("id", self.session_id())
    }

    pub fn data_field(&self) -> String {
        self.optional_field("data", self.data())
    }

    pub fn salt_field(&self) -> String {
        self.optional_field("salt", self.salt())
    }

    /// The fields that appear in the issued token, in wire order
    pub fn raw_token(&self) -> String {
        [
            self.ip_field(),
            self.start_time_field(),
            self.expiration_field(),
            self.acl_field(),
            self.session_id_field(),
            self.data_field(),
        ]
        .concat()
    }

    /// The raw token plus the fields that are signed but never sent
    pub fn token_digest(&self) -> String {
        let mut digest = self.raw_token();
        digest.push_str(&self.url_field());
        digest.push_str(&self.salt_field());
        digest
    }

    /// [`TokenBuilder::token_digest`] without its final delimiter.
    ///
    /// Exactly one trailing delimiter is removed, and only if it is the last
    /// character.
    pub fn trimmed_token_digest(&self) -> String {
        let digest = self.token_digest();
        match digest.strip_suffix(self.field_delimiter) {
            Some(trimmed) => trimmed.to_string(),
            None => digest,
        }
    }

    /// Sign the token and return it in its wire form
    ///
    /// The signature is HMAC-SHA256 keyed with the decoded key over
    /// [`TokenBuilder::trimmed_token_digest`]. Every `/` in the result is
    /// escaped as `%2f`.
    pub fn encrypted_token(&self) -> Result<String, TokenError> {
        let raw_token = self.raw_token();
        let payload = self.trimmed_token_digest();
        let hmac = hmac_sha256_hex(&self.key, payload.as_bytes())?;

        debug!(
            "signed token (raw): {}, payload length: {}",
            raw_token,
            payload.len()
        );

        Ok(escape_slashes(&format!("{}hmac={}", raw_token, hmac)))
    }
}

impl fmt::Debug for TokenBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenBuilder")
            .field("start_time", &self.start_time)
            .field("window", &self.window)
            .field("algo", &self.algo)
            .field("key", &format_args!("<{} bytes>", self.key.len()))
            .field("field_delimiter", &self.field_delimiter)
            .field("target", &self.target)
            .field("ip", &self.ip)
            .field("session_id", &self.session_id)
            .field("data", &self.data)
            .field("salt", &self.salt)
            .field("early_url_encoding", &self.early_url_encoding)
            .field("debug", &self.debug)
            .finish()
    }
}

/// Build and sign a token in one step
///
/// # Arguments
///
/// * `params` - Token parameters; unset fields take their defaults
///
/// # Returns
///
/// The signed token string or the first validation error
pub fn generate_token(params: TokenParams) -> Result<String, TokenError> {
    TokenBuilder::new(params)?.encrypted_token()
}
