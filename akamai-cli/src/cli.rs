use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "akamai-token",
    version,
    about = "Generate signed Akamai streaming tokens",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a signed token
    Generate(GenerateArgs),

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Configuration file (JSON or TOML); defaults to the per-user config
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Also read parameters from environment variables with this prefix
    /// (e.g. AKAMAI_TOKEN reads AKAMAI_TOKEN_WINDOW, AKAMAI_TOKEN_ACL, ...)
    #[arg(long)]
    pub env_prefix: Option<String>,

    /// Start of the validity window, epoch seconds (default: now)
    #[arg(long, allow_negative_numbers = true)]
    pub start_time: Option<i64>,

    /// Validity window in seconds (default: 300)
    #[arg(short, long, allow_negative_numbers = true)]
    pub window: Option<i64>,

    /// Algorithm name: md5, sha1 or sha256 (default: sha256)
    #[arg(long)]
    pub algo: Option<String>,

    /// Hex-encoded signing key
    #[arg(short, long, env = "AKAMAI_TOKEN_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Field delimiter (default: ~)
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Access control list, e.g. "/live/*"
    #[arg(short, long, conflicts_with = "url")]
    pub acl: Option<String>,

    /// Single URL the token is valid for
    #[arg(short, long, conflicts_with = "acl")]
    pub url: Option<String>,

    /// Client IP address the token is bound to
    #[arg(long)]
    pub ip: Option<String>,

    /// Session identifier
    #[arg(long)]
    pub session_id: Option<String>,

    /// Custom payload data
    #[arg(short, long)]
    pub data: Option<String>,

    /// Salt included in the signature but not in the token
    #[arg(short, long)]
    pub salt: Option<String>,

    /// Reserved flag carried with the configuration; `=false` overrides a
    /// config file
    #[arg(long, num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub early_url_encoding: Option<bool>,

    /// Reserved flag carried with the configuration; `=false` overrides a
    /// config file
    #[arg(long, num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub debug: Option<bool>,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write a configuration file with the default values
    Init {
        /// Overwrite existing configuration
        #[arg(long)]
        force: bool,
    },

    /// Show the configuration file path
    Path,

    /// Show the effective token parameters (key redacted)
    Show {
        /// Configuration file to show instead of the per-user config
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
