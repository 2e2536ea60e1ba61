//! # Akamai Streaming
//!
//! A Rust SDK for generating Akamai streaming tokens: signed, delimited
//! `key=value` strings that authorize requests for streaming media at the
//! edge.
//!
//! This crate bundles the token builder ([`akamai_token`]) with parameter
//! loading from files and the environment ([`akamai_config`]).
//!
//! ## Feature Flags
//!
//! - `toml`: Enables configuration loading from TOML files (on by default)
//!
//! ## Basic Usage
//!
//! ```rust
//! use akamai_streaming::{TokenBuilder, TokenParams};
//!
//! # fn main() -> Result<(), akamai_streaming::TokenError> {
//! let params = TokenParams::new()
//!     .start_time(1000)
//!     .acl("/live/*")
//!     .key("0123456789abcdef0123456789abcdef");
//!
//! let builder = TokenBuilder::new(params)?;
//! assert_eq!(builder.raw_token(), "st=1000~exp=1300~acl=/live/*~");
//!
//! let token = builder.encrypted_token()?;
//! assert!(token.starts_with("st=1000~exp=1300~acl=%2flive%2f*~hmac="));
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! ```no_run
//! use akamai_streaming::StreamingConfig;
//!
//! # fn main() -> Result<(), akamai_streaming::ConfigError> {
//! // File values first, environment variables override them
//! let config = StreamingConfig::from_path("token.json")?
//!     .merge(StreamingConfig::from_env("AKAMAI_TOKEN")?);
//!
//! let token = akamai_streaming::generate_from_config(&config)?;
//! # Ok(())
//! # }
//! ```

pub use akamai_config::{ConfigError, StreamingConfig};
pub use akamai_token::{
    current_timestamp, generate_token, hex_to_bytes, Algorithm, Target, TokenBuilder, TokenError,
    TokenParams, DEFAULT_ALGORITHM, DEFAULT_FIELD_DELIMITER, DEFAULT_KEY, DEFAULT_WINDOW,
    MAX_START_TIME,
};

/// Generate a signed token from a loaded configuration
pub fn generate_from_config(config: &StreamingConfig) -> Result<String, ConfigError> {
    Ok(config.builder()?.encrypted_token()?)
}

/// Generate a token and describe it as JSON
///
/// The description carries the token together with its validity window so
/// callers can cache it until it expires.
pub fn token_response(params: TokenParams) -> Result<serde_json::Value, TokenError> {
    let builder = TokenBuilder::new(params)?;
    let token = builder.encrypted_token()?;
    Ok(serde_json::json!({
        "token": token,
        "start_time": builder.start_time(),
        "expiration": builder.expiration(),
    }))
}
