use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const ALTER_DIR: &str = ".alter";

pub const DEFAULT_MAX_TURNS: usize = 5;
pub const DEFAULT_MAX_SOURCE_CHARS: usize = 20_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaSource {
    pub title: String,
    pub path: PathBuf,
}

impl PersonaSource {
    pub fn new(title: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaConfig {
    pub name: String,
    pub sources: Vec<PersonaSource>,
    pub policy: Option<String>,
    pub style: Option<String>,
    pub max_source_chars: usize,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            name: "Alter".to_string(),
            sources: vec![
                PersonaSource::new("Summary", "me/summary.txt"),
                PersonaSource::new("LinkedIn Profile", "me/linkedin.txt"),
            ],
            policy: None,
            style: None,
            max_source_chars: DEFAULT_MAX_SOURCE_CHARS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pushover_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pushover_user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub provider: String,
    pub api_key: String,
    pub base_url: Option<String>,
    pub model: String,
    pub temperature: Option<f64>,
    pub request_timeout_secs: u64,
    pub max_turns: usize,
    pub persona: PersonaConfig,
    pub notify: NotifyConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            provider: "gemini".to_string(),
            api_key: String::new(),
            base_url: None,
            model: "gemini-1.5-flash".to_string(),
            temperature: None,
            request_timeout_secs: 120,
            max_turns: DEFAULT_MAX_TURNS,
            persona: PersonaConfig::default(),
            notify: NotifyConfig::default(),
        }
    }
}

impl Config {
    /// Loads `path` if it exists, otherwise starts from defaults. Environment
    /// overrides are applied either way.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            load_config(path)?
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Config::default()
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let key_vars: &[&str] = match self.provider.to_lowercase().as_str() {
            "openai" => &["ALTER_API_KEY", "OPENAI_API_KEY"],
            _ => &["ALTER_API_KEY", "GEMINI_API_KEY"],
        };
        if let Some(key) = key_vars.iter().find_map(|&var| non_empty(lookup(var))) {
            self.api_key = key;
        }
        if let Some(token) = non_empty(lookup("PUSHOVER_TOKEN")) {
            self.notify.pushover_token = Some(token);
        }
        if let Some(user) = non_empty(lookup("PUSHOVER_USER")) {
            self.notify.pushover_user = Some(user);
        }
        if let Some(url) = non_empty(lookup("ALTER_WEBHOOK_URL")) {
            self.notify.webhook_url = Some(url);
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn get_alter_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(ALTER_DIR)
}

pub fn get_config_path() -> PathBuf {
    get_alter_dir().join("config.toml")
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;

    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", path.display()))
}

pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }

    let content =
        toml::to_string_pretty(config).with_context(|| "Failed to serialize config to TOML")?;

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}
