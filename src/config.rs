use crate::core::error::BankbotError;
use crate::providers::mistral;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const API_KEY_ENV: &str = "MISTRAL_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Credential for the completion service. The MISTRAL_API_KEY environment
    /// variable takes precedence over this field.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Bind address for `bankbot serve`.
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_base_url() -> String {
    mistral::DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    mistral::DEFAULT_MODEL.to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".bankbot")
    }

    fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Saved-transcript directory used by the /save and /load commands.
    pub fn history_dir() -> PathBuf {
        Self::config_dir().join("history")
    }

    /// Load `~/.bankbot/config.yaml` if present, then let the environment
    /// override the credential.
    pub fn load() -> Result<Config, BankbotError> {
        let mut config = Self::load_from(&Self::config_path())?;
        if let Ok(key) = env::var(API_KEY_ENV) {
            if !key.is_empty() {
                config.api_key = Some(key);
            }
        }
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Config, BankbotError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(path)?;
        serde_yml::from_str::<Config>(&contents)
            .map_err(|e| BankbotError::Config(format!("parse {}: {}", path.display(), e)))
    }

    /// CLI flags win over both the config file and the environment.
    pub fn apply_overrides(&mut self, model: Option<String>, base_url: Option<String>) {
        if let Some(model) = model {
            self.model = model;
        }
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
    }

    /// The credential is required before any front end starts; reporting its
    /// absence is a startup-time failure, not something to recover from.
    pub fn api_key(&self) -> Result<&str, BankbotError> {
        self.api_key.as_deref().ok_or_else(|| {
            BankbotError::Config(format!(
                "no API key configured; set {} or add api_key to {}",
                API_KEY_ENV,
                Self::config_path().display()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.yaml")).unwrap();

        assert!(config.api_key.is_none());
        assert_eq!(config.base_url, mistral::DEFAULT_BASE_URL);
        assert_eq!(config.model, mistral::DEFAULT_MODEL);
        assert_eq!(config.port, 8000);
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "api_key: sk-test\nport: 9100").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.port, 9100);
        assert_eq!(config.model, mistral::DEFAULT_MODEL);
    }

    #[test]
    fn unparsable_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "port: [not a number").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, BankbotError::Config(_)));
    }

    #[test]
    fn cli_overrides_win() {
        let mut config = Config::default();
        config.apply_overrides(Some("mistral-small-latest".into()), None);

        assert_eq!(config.model, "mistral-small-latest");
        assert_eq!(config.base_url, mistral::DEFAULT_BASE_URL);
    }

    #[test]
    fn absent_api_key_is_reported_with_the_env_var_name() {
        let config = Config::default();
        let err = config.api_key().unwrap_err();
        assert!(err.to_string().contains(API_KEY_ENV));
    }
}
