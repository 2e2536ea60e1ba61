use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::TokenError;

type HmacSha256 = Hmac<Sha256>;

/// Decode a hex key string to raw bytes
///
/// ASCII whitespace anywhere in the string (space, tab, newline, vertical
/// tab, form feed, carriage return) is ignored, so keys copied from a config
/// file in grouped form ("aabb ccdd") decode the same as compact ones. Other
/// Unicode spaces are kept and counted.
///
/// # Arguments
///
/// * `hex_string` - The key as hex digits
///
/// # Returns
///
/// The decoded bytes, or `OddLengthHex` / `InvalidHexCharacters`. The digit
/// count is checked before the characters.
pub fn hex_to_bytes(hex_string: &str) -> Result<Vec<u8>, TokenError> {
    let stripped: String = hex_string
        .chars()
        .filter(|c| !is_key_whitespace(*c))
        .collect();

    if stripped.chars().count() % 2 != 0 {
        return Err(TokenError::OddLengthHex);
    }
    if !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(TokenError::InvalidHexCharacters);
    }

    hex::decode(&stripped).map_err(|e| match e {
        hex::FromHexError::OddLength => TokenError::OddLengthHex,
        _ => TokenError::InvalidHexCharacters,
    })
}

// `is_ascii_whitespace` leaves out vertical tab
fn is_key_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

/// Compute HMAC-SHA256 over `payload` and render it as lowercase hex
pub fn hmac_sha256_hex(key: &[u8], payload: &[u8]) -> Result<String, TokenError> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|e| TokenError::Mac(e.to_string()))?;
    mac.update(payload);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Escape every `/` as `%2f`. No other character is touched.
pub fn escape_slashes(token: &str) -> String {
    token.replace('/', "%2f")
}

/// Get the current Unix timestamp in seconds
pub fn current_timestamp() -> i64 {
    Utc::now().timestamp()
}
