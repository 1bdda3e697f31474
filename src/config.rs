use crate::error::{ConvertError, Result};
use derivative::Derivative;
use reqwest::Url;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const CONFIG_FILE_NAME: &str = "intelliconvert.toml";

#[derive(Debug, Clone, Deserialize, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the conversion site; `api_path` and download links are
    /// resolved against it.
    #[derivative(Default(value = "String::from(\"https://conversion.doodax.com/\")"))]
    pub server_url: String,

    #[derivative(Default(value = "String::from(\"api.php\")"))]
    pub api_path: String,

    /// Prepended verbatim to the path the server returns.
    #[derivative(Default(value = "String::from(\"download.php?file=\")"))]
    pub download_prefix: String,

    #[derivative(Default(value = "10 * 1024 * 1024"))]
    pub max_upload_bytes: u64,

    #[derivative(Default(value = "String::from(\"your-contact@conversion.doodax.com\")"))]
    pub contact_email: String,

    pub suggestions: SuggestionConfig,
}

#[derive(Derivative, Clone, Deserialize)]
#[derivative(Debug, Default)]
#[serde(default)]
pub struct SuggestionConfig {
    #[derivative(Default(value = "true"))]
    pub enabled: bool,

    #[derivative(Default(value = "String::from(\"https://generativelanguage.googleapis.com\")"))]
    pub endpoint: String,

    #[derivative(Default(value = "String::from(\"gemini-2.5-flash\")"))]
    pub model: String,

    #[derivative(Debug = "ignore")]
    pub api_key: Option<String>,
}

impl AppConfig {
    /// Reads the config file (if any) and applies environment overrides.
    pub fn load() -> Result<Self> {
        let path = env::var("INTELLICONVERT_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(CONFIG_FILE_NAME));

        let mut config = if path.exists() {
            info!("Loading configuration from {}", path.display());
            Self::from_file(&path)?
        } else {
            debug!("No config file at {}, using defaults", path.display());
            Self::default()
        };

        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ConvertError::Config(e.to_string()))
    }

    fn apply_env(&mut self) {
        if let Ok(url) = env::var("INTELLICONVERT_SERVER_URL") {
            self.server_url = url;
        }

        let key = env::var("API_KEY")
            .or_else(|_| env::var("GEMINI_API_KEY"))
            .ok()
            .filter(|k| !k.trim().is_empty());
        if key.is_some() {
            self.suggestions.api_key = key;
        }

        if self.suggestions.enabled && self.suggestions.api_key.is_none() {
            warn!("API_KEY environment variable not set. Format suggestions are disabled.");
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.base_url().map(|_| ())
    }

    /// `server_url` as a directory-style base, so joins keep its path.
    pub fn base_url(&self) -> Result<Url> {
        let mut raw = self.server_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Url::parse(&raw)
            .map_err(|e| ConvertError::Config(format!("invalid server_url '{}': {}", raw, e)))
    }

    pub fn api_url(&self) -> Result<Url> {
        self.resolve(&self.api_path)
    }

    /// Turns a relative link such as `download.php?file=x.pdf` into an
    /// absolute URL on the conversion server.
    pub fn resolve(&self, relative: &str) -> Result<Url> {
        self.base_url()?
            .join(relative)
            .map_err(|e| ConvertError::Config(format!("cannot resolve '{}': {}", relative, e)))
    }
}
