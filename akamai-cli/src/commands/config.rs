use crate::cli::ConfigCommands;
use crate::error::Result;
use akamai_config::StreamingConfig;
use akamai_token::TokenParams;
use colored::Colorize;
use serde_json::json;
use std::path::{Path, PathBuf};

pub fn handle_config_command(command: ConfigCommands, json_output: bool) -> Result<()> {
    match command {
        ConfigCommands::Init { force } => init(force, json_output),
        ConfigCommands::Path => {
            let path = StreamingConfig::default_config_path()?;
            if json_output {
                let output = json!({ "config_path": path });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{}", path.display());
            }
            Ok(())
        }
        ConfigCommands::Show { config } => show(config, json_output),
    }
}

fn init(force: bool, json_output: bool) -> Result<()> {
    let config_path = StreamingConfig::default_config_path()?;
    let written = write_template(&config_path, force)?;

    if json_output {
        let output = json!({ "path": config_path, "written": written });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if written {
        println!(
            "{} Wrote default token parameters to {}",
            "+".green(),
            config_path.display()
        );
        println!("Replace the key before signing real tokens.");
    } else {
        println!(
            "{} Left existing token parameters at {} untouched (--force replaces them)",
            "=".yellow(),
            config_path.display()
        );
    }
    Ok(())
}

/// Write the default template unless a file exists and `force` is off.
/// Returns whether the file was written.
fn write_template(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    StreamingConfig::template().save(path)?;
    Ok(true)
}

fn show(path: Option<PathBuf>, json_output: bool) -> Result<()> {
    let config = match path {
        Some(path) => StreamingConfig::from_path(path)?,
        None => StreamingConfig::load_default()?,
    };
    let params = redacted(&config.params);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&params)?);
        return Ok(());
    }

    println!("{}", "Token parameters:".bright_cyan());
    for (name, value) in display_rows(&params) {
        println!("  {name}: {value}");
    }
    Ok(())
}

fn redacted(params: &TokenParams) -> TokenParams {
    let mut params = params.clone();
    if params.key.is_some() {
        params.key = Some("<redacted>".to_string());
    }
    params
}

fn display_rows(params: &TokenParams) -> Vec<(&'static str, String)> {
    fn or_default<T: ToString>(value: &Option<T>) -> String {
        value
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "(default)".to_string())
    }
    fn or_unset(value: &Option<String>) -> String {
        value.clone().unwrap_or_else(|| "(not set)".to_string())
    }

    vec![
        (
            "start_time",
            params
                .start_time
                .map(|t| t.to_string())
                .unwrap_or_else(|| "(now)".to_string()),
        ),
        ("window", or_default(&params.window)),
        ("algo", or_default(&params.algo)),
        ("key", or_default(&params.key)),
        ("field_delimiter", or_default(&params.field_delimiter)),
        ("acl", or_unset(&params.acl)),
        ("url", or_unset(&params.url)),
        ("ip", or_unset(&params.ip)),
        ("session_id", or_unset(&params.session_id)),
        ("data", or_unset(&params.data)),
        ("salt", or_unset(&params.salt)),
        ("early_url_encoding", or_default(&params.early_url_encoding)),
        ("debug", or_default(&params.debug)),
    ]
}
