use thiserror::Error;

/// Errors raised while configuring or signing a streaming token.
///
/// Every variant is a validation failure detected at the moment a field is
/// assigned; a token is never produced from a partially valid configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The start time does not fit in an unsigned 32-bit epoch value
    #[error("Invalid start time")]
    InvalidStartTime,

    /// The algorithm name is not one of md5, sha1 or sha256
    #[error("Invalid crypto algorithm")]
    InvalidAlgorithm(String),

    /// An ACL was assigned while a URL is already set
    #[error("Cannot set ACL with URL")]
    AclWithUrl,

    /// A URL was assigned while an ACL is already set
    #[error("Cannot set URL with ACL")]
    UrlWithAcl,

    /// The hex key has an odd number of digits
    #[error("Can't translate a string unless it has an even number of digits (odd-length hex)")]
    OddLengthHex,

    /// The hex key contains characters outside [0-9A-Fa-f]
    #[error("Can't translate non-hex characters (invalid hex characters)")]
    InvalidHexCharacters,

    /// The HMAC could not be keyed
    #[error("HMAC error: {0}")]
    Mac(String),
}

impl TokenError {
    /// Returns true for the two acl/url exclusivity failures.
    pub fn is_target_conflict(&self) -> bool {
        matches!(self, TokenError::AclWithUrl | TokenError::UrlWithAcl)
    }
}
