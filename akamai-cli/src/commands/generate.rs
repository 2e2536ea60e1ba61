use crate::cli::GenerateArgs;
use crate::error::Result;
use akamai_config::StreamingConfig;
use akamai_token::TokenParams;
use serde_json::json;
use tracing::{debug, warn};

pub fn handle_generate_command(args: GenerateArgs, json_output: bool) -> Result<()> {
    let config = resolve_config(&args)?;

    if config.params.uses_default_key() {
        warn!("signing with the built-in default key; pass --key or set AKAMAI_TOKEN_KEY");
    }

    let builder = config.builder()?;
    let token = builder.encrypted_token()?;
    debug!("generated token for {:?}", builder.target());

    if json_output {
        let output = json!({
            "token": token,
            "start_time": builder.start_time(),
            "expiration": builder.expiration(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{token}");
    }

    Ok(())
}

/// Merge the parameter sources: config file, then environment, then flags
pub(crate) fn resolve_config(args: &GenerateArgs) -> Result<StreamingConfig> {
    let file = match &args.config {
        Some(path) => StreamingConfig::from_path(path)?,
        None => StreamingConfig::load_default()?,
    };

    let env = match &args.env_prefix {
        Some(prefix) => StreamingConfig::from_env(prefix)?,
        None => StreamingConfig::default(),
    };

    Ok(file.merge(env).merge(args.to_params().into()))
}

impl GenerateArgs {
    /// Parameters given on the command line. Absent flags, boolean ones
    /// included, never override a config file.
    pub fn to_params(&self) -> TokenParams {
        TokenParams {
            start_time: self.start_time,
            window: self.window,
            algo: self.algo.clone(),
            key: self.key.clone(),
            field_delimiter: self.delimiter,
            acl: self.acl.clone(),
            url: self.url.clone(),
            ip: self.ip.clone(),
            session_id: self.session_id.clone(),
            data: self.data.clone(),
            salt: self.salt.clone(),
            early_url_encoding: self.early_url_encoding,
            debug: self.debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::io::Write;

    fn parse_generate(args: &[&str]) -> GenerateArgs {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Generate(args) => args,
            _ => panic!("Expected generate command"),
        }
    }

    #[test]
    fn test_flags_to_params() {
        let args = parse_generate(&[
            "akamai-token",
            "generate",
            "--start-time",
            "1000",
            "--window",
            "-10",
            "--acl",
            "/live/*",
            "--delimiter",
            "|",
            "--early-url-encoding",
            "--key",
            "00ff",
        ]);
        let params = args.to_params();
        assert_eq!(params.start_time, Some(1000));
        assert_eq!(params.window, Some(-10));
        assert_eq!(params.acl.as_deref(), Some("/live/*"));
        assert_eq!(params.field_delimiter, Some('|'));
        assert_eq!(params.early_url_encoding, Some(true));
        assert_eq!(params.debug, None);
        assert_eq!(params.key.as_deref(), Some("00ff"));
    }

    #[test]
    fn test_acl_and_url_flags_conflict() {
        let result = Cli::try_parse_from([
            "akamai-token",
            "generate",
            "--acl",
            "/*",
            "--url",
            "http://example.com",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "window = 60\nurl = \"/vod/a.mp4\"\nip = \"10.0.0.1\"").unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let args = parse_generate(&[
            "akamai-token",
            "generate",
            "--config",
            &path,
            "--window",
            "120",
            "--acl",
            "/live/*",
        ]);

        let params = resolve_config(&args).unwrap().params;
        assert_eq!(params.window, Some(120));
        assert_eq!(params.acl.as_deref(), Some("/live/*"));
        assert!(params.url.is_none());
        assert_eq!(params.ip.as_deref(), Some("10.0.0.1"));
    }

    #[test]
    fn test_boolean_flags_accept_explicit_values() {
        let args = parse_generate(&["akamai-token", "generate", "--debug=false"]);
        assert_eq!(args.to_params().debug, Some(false));
        assert_eq!(args.to_params().early_url_encoding, None);

        let args = parse_generate(&["akamai-token", "generate", "--debug", "--acl", "/*"]);
        assert_eq!(args.to_params().debug, Some(true));
        assert_eq!(args.to_params().acl.as_deref(), Some("/*"));
    }

    #[test]
    fn test_debug_flag_turns_off_config_file_value() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "debug = true\nearly_url_encoding = true").unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let args = parse_generate(&["akamai-token", "generate", "--config", &path, "--debug=false"]);

        let params = resolve_config(&args).unwrap().params;
        assert_eq!(params.debug, Some(false));
        assert_eq!(params.early_url_encoding, Some(true));
    }

    #[test]
    fn test_sources_merge_file_then_env_then_flags() {
        let prefix = "AKAMAI_CLI_MERGE_ORDER";
        std::env::set_var(format!("{prefix}_WINDOW"), "90");
        std::env::set_var(format!("{prefix}_ACL"), "/env/*");
        std::env::set_var(format!("{prefix}_DATA"), "from-env");

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "window = 60\nurl = \"http://example.com/a.mp4\"\ndata = \"from-file\"\nip = \"10.0.0.1\""
        )
        .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let args = parse_generate(&[
            "akamai-token",
            "generate",
            "--config",
            &path,
            "--env-prefix",
            prefix,
            "--window",
            "120",
        ]);

        let params = resolve_config(&args).unwrap().params;
        // flag beats env
        assert_eq!(params.window, Some(120));
        // env beats file
        assert_eq!(params.data.as_deref(), Some("from-env"));
        // env acl replaces the file's url
        assert_eq!(params.acl.as_deref(), Some("/env/*"));
        assert!(params.url.is_none());
        // untouched file values survive
        assert_eq!(params.ip.as_deref(), Some("10.0.0.1"));

        std::env::remove_var(format!("{prefix}_WINDOW"));
        std::env::remove_var(format!("{prefix}_ACL"));
        std::env::remove_var(format!("{prefix}_DATA"));
    }

    #[test]
    fn test_config_file_token() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"start_time": 1000, "key": "aabbccddeeff00112233445566778899"}}"#
        )
        .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let args = parse_generate(&["akamai-token", "generate", "--config", &path]);
        let token = resolve_config(&args)
            .unwrap()
            .builder()
            .unwrap()
            .encrypted_token()
            .unwrap();
        assert_eq!(
            token,
            "st=1000~exp=1300~acl=%2f*~hmac=d90a931262653bc075fa6049ea7fb115a59f780738e9166275da5d3329994adc"
        );
    }
}
