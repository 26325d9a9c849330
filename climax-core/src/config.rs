use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use crate::provider::{CityParam, ResponseShape};

/// How to reach one weather endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// e.g. "http://localhost/weather"
    pub base_url: String,

    pub shape: ResponseShape,

    #[serde(default)]
    pub city_param: CityParam,

    /// Query-string key used when `city_param = "query"`.
    #[serde(default = "default_query_key")]
    pub query_key: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_query_key() -> String {
    "city".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl ProviderConfig {
    pub fn new(base_url: impl Into<String>, shape: ResponseShape) -> Self {
        Self {
            base_url: base_url.into(),
            shape,
            city_param: CityParam::default(),
            query_key: default_query_key(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Name of the profile used when none is given on the command line.
    pub default_provider: Option<String>,

    /// Example TOML:
    /// [providers.local]
    /// base_url = "http://localhost/weather"
    /// shape = "nested"
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderConfig>,
}

impl Config {
    /// Name of the default profile.
    pub fn default_provider_name(&self) -> Result<&str> {
        self.default_provider.as_deref().ok_or_else(|| {
            anyhow!(
                "No default provider configured.\n\
                 Hint: run `climax configure <name> --base-url <url> --shape <nested|flat>` first."
            )
        })
    }

    pub fn provider(&self, name: &str) -> Result<&ProviderConfig> {
        self.providers.get(name).ok_or_else(|| {
            let known: Vec<&str> = self.providers.keys().map(String::as_str).collect();
            anyhow!(
                "Unknown provider '{name}'. Configured providers: {}.\n\
                 Hint: run `climax configure {name}` to add it.",
                if known.is_empty() { "none".to_string() } else { known.join(", ") }
            )
        })
    }

    /// Resolve an explicit profile name, or fall back to the default one.
    pub fn resolve_provider(&self, name: Option<&str>) -> Result<&ProviderConfig> {
        let name = match name {
            Some(name) => name,
            None => self.default_provider_name()?,
        };
        self.provider(name)
    }

    pub fn set_default_provider(&mut self, name: &str) -> Result<()> {
        self.provider(name)?;
        self.default_provider = Some(name.to_string());
        Ok(())
    }

    /// Add or replace a profile. The first profile added becomes the default.
    pub fn upsert_provider(&mut self, name: &str, provider: ProviderConfig) {
        self.providers.insert(name.to_string(), provider);

        if self.default_provider.is_none() {
            self.default_provider = Some(name.to_string());
        }
    }

    /// Load config from the platform location, or an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save config, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "climax", "climax")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
