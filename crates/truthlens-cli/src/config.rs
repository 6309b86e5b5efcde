//! Configuration management for the CLI.
//!
//! Profiles live in `~/.truthlens/config.toml` unless `--config` names
//! another file. API keys are never stored here; providers read them from
//! the environment.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use truthlens_llm::ProviderKind;
use truthlens_meter::MeterConfig;
use truthlens_retrieval::RetrievalMode;

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name
    #[serde(default = "default_profile")]
    pub active_profile: String,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Pipeline tuning shared by every profile
    #[serde(default)]
    pub meter: MeterConfig,

    /// Available profiles
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,

    /// File this configuration was loaded from
    #[serde(skip)]
    location: Option<PathBuf>,
}

/// A named set of backend choices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Text-generation provider (`openai`, `anthropic`, `ollama`)
    pub llm_provider: String,

    /// Model name; the provider default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Base URL override for the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Where evidence comes from
    #[serde(default)]
    pub retrieval_method: RetrievalMode,

    /// Judge claims with the model rather than embedding similarity
    #[serde(default = "default_true")]
    pub use_llm_verification: bool,

    /// Embedding provider (`openai`, `ollama`); none disables similarity scoring
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding_provider: Option<String>,

    /// Embedding model; the provider default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding_model: Option<String>,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Upper bound on one evaluation, in seconds
    #[serde(default = "default_evaluation_timeout")]
    pub evaluation_timeout_secs: u64,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (one-line summary) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".truthlens").join("config.toml"))
    }

    /// Load configuration from `path`, or defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = fs::read_to_string(path)?;
            toml::from_str::<Config>(&contents)?
        } else {
            Self::default()
        };
        config.location = Some(path.to_path_buf());
        Ok(config)
    }

    /// Save configuration to the file it was loaded from.
    pub fn save(&self) -> Result<()> {
        let path = match &self.location {
            Some(path) => path.clone(),
            None => Self::default_path()?,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Get the active profile.
    pub fn get_active_profile(&self) -> Result<&Profile> {
        self.profiles
            .get(&self.active_profile)
            .ok_or_else(|| CliError::Config(format!("Profile '{}' not found", self.active_profile)))
    }

    /// Add or update a profile.
    pub fn set_profile(&mut self, name: String, profile: Profile) -> Result<()> {
        profile.validate()?;
        self.profiles.insert(name, profile);
        Ok(())
    }

    /// Switch to a different profile.
    pub fn switch_profile(&mut self, name: String) -> Result<()> {
        if !self.profiles.contains_key(&name) {
            return Err(CliError::Config(format!("Profile '{}' does not exist", name)));
        }
        self.active_profile = name;
        Ok(())
    }

    /// Remove a profile, returning whether it existed.
    pub fn delete_profile(&mut self, name: &str) -> Result<bool> {
        if name == self.active_profile {
            return Err(CliError::NotPermitted(
                "Cannot delete the active profile".to_string(),
            ));
        }
        Ok(self.profiles.remove(name).is_some())
    }

    /// Pipeline configuration for the active profile.
    pub fn meter_config(&self) -> Result<MeterConfig> {
        let config = self.get_active_profile()?.apply(&self.meter);
        config.validate().map_err(CliError::Config)?;
        Ok(config)
    }
}

impl Profile {
    /// Check that provider names are known.
    pub fn validate(&self) -> Result<()> {
        self.llm_kind()?;
        if let Some(kind) = self.embedding_kind()? {
            if kind.default_embedding_model().is_none() {
                return Err(CliError::Config(format!(
                    "Provider '{}' does not offer embeddings",
                    kind
                )));
            }
        }
        Ok(())
    }

    /// The text-generation provider.
    pub fn llm_kind(&self) -> Result<ProviderKind> {
        Ok(self.llm_provider.parse::<ProviderKind>()?)
    }

    /// The embedding provider, if one is configured.
    pub fn embedding_kind(&self) -> Result<Option<ProviderKind>> {
        match &self.embedding_provider {
            Some(name) => Ok(Some(name.parse::<ProviderKind>()?)),
            None => Ok(None),
        }
    }

    /// Overlay this profile's choices onto `base`.
    pub fn apply(&self, base: &MeterConfig) -> MeterConfig {
        let mut config = base.clone();
        config.use_llm_verification = self.use_llm_verification;
        config.retrieval.mode = self.retrieval_method;
        config
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert("default".to_string(), Profile::default());

        Self {
            active_profile: "default".to_string(),
            settings: Settings::default(),
            meter: MeterConfig::default(),
            profiles,
            location: None,
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            llm_provider: ProviderKind::OpenAi.as_str().to_string(),
            model: None,
            endpoint: None,
            retrieval_method: RetrievalMode::Wikipedia,
            use_llm_verification: true,
            embedding_provider: Some(ProviderKind::OpenAi.as_str().to_string()),
            embedding_model: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            evaluation_timeout_secs: default_evaluation_timeout(),
        }
    }
}

fn default_profile() -> String {
    "default".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_evaluation_timeout() -> u64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ollama_profile() -> Profile {
        Profile {
            llm_provider: "ollama".to_string(),
            model: Some("mistral".to_string()),
            endpoint: Some("http://gpu-box:11434".to_string()),
            retrieval_method: RetrievalMode::Web,
            use_llm_verification: false,
            embedding_provider: Some("ollama".to_string()),
            embedding_model: None,
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.active_profile, "default");
        assert!(config.profiles.contains_key("default"));
        assert!(config.settings.color);
        assert_eq!(config.settings.evaluation_timeout_secs, 300);
        assert!(config.meter_config().unwrap().use_llm_verification);
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.active_profile, "default");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::load_from(&path).unwrap();
        config.set_profile("local".to_string(), ollama_profile()).unwrap();
        config.switch_profile("local".to_string()).unwrap();
        config.settings.evaluation_timeout_secs = 60;
        config.save().unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.active_profile, "local");
        assert_eq!(reloaded.profiles["local"], ollama_profile());
        assert_eq!(reloaded.settings.evaluation_timeout_secs, 60);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
active_profile = "claude"

[profiles.claude]
llm_provider = "anthropic"
retrieval_method = "encyclopedic"
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        let profile = config.get_active_profile().unwrap();
        assert_eq!(profile.llm_kind().unwrap(), ProviderKind::Anthropic);
        assert_eq!(profile.retrieval_method, RetrievalMode::Wikipedia);
        assert!(profile.use_llm_verification);
        assert!(profile.embedding_provider.is_none());
        assert_eq!(config.settings.format, OutputFormat::Table);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "active_profile = [").unwrap();
        assert!(matches!(Config::load_from(&path), Err(CliError::Toml(_))));
    }

    #[test]
    fn test_profile_overrides_meter_config() {
        let mut config = Config::default();
        config.meter.evidence_per_claim = 5;
        config.set_profile("local".to_string(), ollama_profile()).unwrap();
        config.switch_profile("local".to_string()).unwrap();

        let meter = config.meter_config().unwrap();
        assert!(!meter.use_llm_verification);
        assert_eq!(meter.retrieval.mode, RetrievalMode::Web);
        assert_eq!(meter.evidence_per_claim, 5);
    }

    #[test]
    fn test_invalid_meter_config_is_rejected() {
        let mut config = Config::default();
        config.meter.claim_workers = 0;
        assert!(matches!(config.meter_config(), Err(CliError::Config(_))));
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let mut config = Config::default();
        let profile = Profile {
            llm_provider: "gemini".to_string(),
            ..Profile::default()
        };
        assert!(config.set_profile("bad".to_string(), profile).is_err());

        let profile = Profile {
            embedding_provider: Some("anthropic".to_string()),
            ..Profile::default()
        };
        assert!(config.set_profile("bad".to_string(), profile).is_err());
        assert!(!config.profiles.contains_key("bad"));
    }

    #[test]
    fn test_switch_to_nonexistent_profile() {
        let mut config = Config::default();
        assert!(config.switch_profile("nonexistent".to_string()).is_err());
    }

    #[test]
    fn test_cannot_delete_active_profile() {
        let mut config = Config::default();
        assert!(matches!(
            config.delete_profile("default"),
            Err(CliError::NotPermitted(_))
        ));
        assert!(!config.delete_profile("missing").unwrap());
    }
}
