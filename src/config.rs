//! Configuration for Ponder
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then `PONDER__`-prefixed environment variables
//! (e.g. `PONDER__TAGGING__MODE=local`, `PONDER__LLM__MODEL=...`).
//! The API key itself is never part of the configuration; only the name of
//! the environment variable that holds it.

use crate::error::{PonderError, Result};
use crate::services::llm::LlmConfig;
use crate::taxonomy::Taxonomy;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

const ENV_PREFIX: &str = "PONDER";
const ENV_SEPARATOR: &str = "__";

/// Which tagging strategy a deployment uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaggingMode {
    /// Heuristics only
    Local,
    /// LLM only; fails when unavailable
    Remote,
    /// LLM when credentials exist, heuristics otherwise
    #[default]
    Auto,
}

impl fmt::Display for TaggingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaggingMode::Local => "local",
            TaggingMode::Remote => "remote",
            TaggingMode::Auto => "auto",
        };
        f.write_str(s)
    }
}

impl FromStr for TaggingMode {
    type Err = PonderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "local" => Ok(TaggingMode::Local),
            "remote" => Ok(TaggingMode::Remote),
            "auto" => Ok(TaggingMode::Auto),
            other => Err(PonderError::Config(::config::ConfigError::Message(format!(
                "Unknown tagging mode: '{}' (expected local, remote or auto)",
                other
            )))),
        }
    }
}

/// Tagging settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaggingConfig {
    pub mode: TaggingMode,

    /// Upper bound on a single tagging call, in seconds
    pub timeout_secs: Option<u64>,
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PonderConfig {
    pub tagging: TaggingConfig,
    pub llm: LlmConfig,

    /// TOML file replacing the built-in taxonomy
    pub taxonomy_path: Option<PathBuf>,
}

impl PonderConfig {
    /// Default location: `<config dir>/ponder/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ponder").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist; the default path is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder()
            .add_source(::config::Config::try_from(&PonderConfig::default())?);

        match path {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                builder = builder.add_source(::config::File::from(path).required(true));
            }
            None => {
                if let Some(default_path) = Self::default_path() {
                    builder =
                        builder.add_source(::config::File::from(default_path).required(false));
                }
            }
        }

        let config: PonderConfig = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.tagging.timeout_secs == Some(0) {
            return Err(invalid("tagging.timeout_secs must be greater than 0"));
        }

        if self.llm.timeout_secs == 0 {
            return Err(invalid("llm.timeout_secs must be greater than 0"));
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(invalid("llm.temperature must be between 0.0 and 2.0"));
        }

        if self.llm.model.trim().is_empty() {
            return Err(invalid("llm.model cannot be empty"));
        }

        if self.llm.structured_model.trim().is_empty() {
            return Err(invalid("llm.structured_model cannot be empty"));
        }

        Ok(())
    }

    /// API key from the configured environment variable, if set
    pub fn api_key(&self) -> Option<SecretString> {
        self.llm.api_key_from_env()
    }

    /// Taxonomy from `taxonomy_path`, or the built-in one
    pub fn load_taxonomy(&self) -> Result<Arc<Taxonomy>> {
        let taxonomy = match &self.taxonomy_path {
            Some(path) => Taxonomy::from_file(path)?,
            None => Taxonomy::default(),
        };
        Ok(Arc::new(taxonomy))
    }
}

fn invalid(message: &str) -> PonderError {
    PonderError::Config(::config::ConfigError::Message(message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("LOCAL".parse::<TaggingMode>().unwrap(), TaggingMode::Local);
        assert_eq!("auto".parse::<TaggingMode>().unwrap(), TaggingMode::Auto);
        assert!("cloud".parse::<TaggingMode>().is_err());
        assert_eq!(TaggingMode::Remote.to_string(), "remote");
    }

    #[test]
    fn test_defaults_validate() {
        let config = PonderConfig::default();
        assert_eq!(config.tagging.mode, TaggingMode::Auto);
        assert!(config.taxonomy_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_failures() {
        let mut config = PonderConfig::default();
        config.tagging.timeout_secs = Some(0);
        assert!(config.validate().is_err());

        let mut config = PonderConfig::default();
        config.llm.temperature = 3.5;
        assert!(config.validate().is_err());

        let mut config = PonderConfig::default();
        config.llm.structured_model = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[tagging]
mode = "local"
timeout_secs = 5

[llm]
model = "gpt-4o-mini"
"#
        )
        .unwrap();

        let config = PonderConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.tagging.mode, TaggingMode::Local);
        assert_eq!(config.tagging.timeout_secs, Some(5));
        assert_eq!(config.llm.model, "gpt-4o-mini");
        // untouched keys keep their defaults
        assert_eq!(config.llm.max_tokens, 256);
    }

    #[test]
    #[serial]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(PonderConfig::load(Some(&missing)).is_err());
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[tagging]\nmode = \"local\"").unwrap();

        std::env::set_var("PONDER__TAGGING__MODE", "remote");
        let config = PonderConfig::load(Some(file.path()));
        std::env::remove_var("PONDER__TAGGING__MODE");

        assert_eq!(config.unwrap().tagging.mode, TaggingMode::Remote);
    }

    #[test]
    fn test_load_taxonomy_default() {
        let taxonomy = PonderConfig::default().load_taxonomy().unwrap();
        assert_eq!(taxonomy.domains.len(), 5);
    }
}
