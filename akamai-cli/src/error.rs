use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Token error: {0}")]
    Token(#[from] akamai_token::TokenError),

    #[error("Configuration error: {0}")]
    Config(#[from] akamai_config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
