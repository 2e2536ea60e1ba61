//! # Akamai Token
//!
//! Generation library for Akamai streaming tokens.
//!
//! A streaming token is a delimited `key=value` string carrying a validity
//! window, an optional path ACL (or a single URL), optional client IP,
//! session id and custom data, terminated with an HMAC-SHA256 signature.
//! This crate only produces tokens; it has no networking or verification.
//!
//! ## Features
//!
//! - Validated configuration: every field is checked when it is assigned
//! - Mutually exclusive ACL and URL targets
//! - Canonical signing payload with URL and salt signed but not sent
//! - Injectable start time for deterministic tokens
//!
//! ## Usage
//!
//! ```
//! use akamai_token::{TokenBuilder, TokenParams};
//!
//! fn main() -> Result<(), akamai_token::TokenError> {
//!     let params = TokenParams::new()
//!         .start_time(1_600_000_000)
//!         .window(600)
//!         .acl("/videos/*")
//!         .key("0123456789abcdef0123456789abcdef");
//!
//!     let token = TokenBuilder::new(params)?.encrypted_token()?;
//!     assert!(token.starts_with("st=1600000000~exp=1600000600~acl=%2fvideos%2f*~hmac="));
//!     Ok(())
//! }
//! ```

mod algorithm;
mod error;
mod params;
mod token;
mod utils;

pub use algorithm::Algorithm;
pub use error::TokenError;
pub use params::{
    TokenParams, DEFAULT_ALGORITHM, DEFAULT_FIELD_DELIMITER, DEFAULT_KEY, DEFAULT_WINDOW,
    MAX_START_TIME,
};
pub use token::{generate_token, Target, TokenBuilder};
pub use utils::{current_timestamp, hex_to_bytes};

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_KEY: &str = "aabbccddeeff00112233445566778899";

    #[test]
    fn test_full_token() {
        let params = TokenParams::new()
            .start_time(1_600_000_000)
            .window(600)
            .key(TEST_KEY)
            .ip("127.0.0.1")
            .acl("/videos/*")
            .session_id("abc")
            .data("payload")
            .salt("pepper");

        let token = TokenBuilder::new(params).unwrap().encrypted_token().unwrap();
        assert_eq!(
            token,
            "ip=127.0.0.1~st=1600000000~exp=1600000600~acl=%2fvideos%2f*~id=abc~data=payload~hmac=119bea9c797fb93dcbcd9f101b7740e93f56f7f31d7d551eebb5529a762ebd4d"
        );
    }

    #[test]
    fn test_token_with_custom_key() {
        let params = TokenParams::new()
            .start_time(1_700_000_000)
            .acl("/live/*")
            .key("0123456789abcdef0123456789abcdef");

        let token = generate_token(params).unwrap();
        assert_eq!(
            token,
            "st=1700000000~exp=1700000300~acl=%2flive%2f*~hmac=f7c3a73f18606d8afc42bdab4fb450702028cf9c126e608aed5bc32aa4f3fa60"
        );
    }

    #[test]
    fn test_key_with_whitespace_signs_like_compact_key() {
        let compact = TokenParams::new().start_time(1000).key(TEST_KEY);
        let spaced = TokenParams::new()
            .start_time(1000)
            .key("aabbccdd eeff0011 22334455 66778899");

        assert_eq!(
            generate_token(compact).unwrap(),
            generate_token(spaced).unwrap()
        );
    }

    #[test]
    fn test_params_from_json_mapping() {
        let params: TokenParams = serde_json::from_value(serde_json::json!({
            "start_time": 1000,
            "key": TEST_KEY,
            "unknown_field": true
        }))
        .unwrap();

        assert_eq!(
            generate_token(params).unwrap(),
            "st=1000~exp=1300~acl=%2f*~hmac=d90a931262653bc075fa6049ea7fb115a59f780738e9166275da5d3329994adc"
        );
    }

    #[test]
    fn test_tokens_from_threads() {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                std::thread::spawn(move || {
                    generate_token(TokenParams::new().start_time(1000 + i)).unwrap()
                })
            })
            .collect();

        let tokens: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(
            tokens[0],
            "st=1000~exp=1300~acl=%2f*~hmac=d90a931262653bc075fa6049ea7fb115a59f780738e9166275da5d3329994adc"
        );
        assert!(tokens[3].starts_with("st=1003~exp=1303~"));
    }
}
