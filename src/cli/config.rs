//! Configuration management command

use clap::Subcommand;
use ponder_core::{error::Result, PonderConfig};
use secrecy::ExposeSecret;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Print the default configuration file location
    Path,
}

/// Handle configuration management command
pub fn handle(config: &PonderConfig, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            print!("{}", toml::to_string_pretty(config).map_err(|e| {
                ponder_core::PonderError::Other(format!("Failed to render configuration: {}", e))
            })?);
            println!();

            match config.api_key() {
                Some(key) => println!(
                    "API key configured: {} (from {})",
                    mask(key.expose_secret()),
                    config.llm.api_key_env
                ),
                None => println!("API key not set ({} is empty)", config.llm.api_key_env),
            }
            Ok(())
        }
        ConfigAction::Path => {
            match PonderConfig::default_path() {
                Some(path) => println!("{}", path.display()),
                None => println!("No configuration directory on this platform"),
            }
            Ok(())
        }
    }
}

/// Show only the first 8 and last 4 characters
fn mask(key: &str) -> String {
    if key.len() > 12 && key.is_char_boundary(8) && key.is_char_boundary(key.len() - 4) {
        format!("{}...{}", &key[..8], &key[key.len() - 4..])
    } else {
        "***".to_string()
    }
}
