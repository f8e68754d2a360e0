//! Configuration for conversion runs and FoodData Central access
//!
//! Values come from defaults, a TOML document, or the environment (a `.env`
//! file is loaded first when present).

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::schema::ConstructOptions;
use crate::structured_data::RecipeOptions;

/// FoodData Central v1 endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";

/// Value `.env` templates ship with in place of a real key
pub const PLACEHOLDER_API_KEY: &str = "MY_API_KEY";

/// Errors while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Library configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatatransConfig {
    /// data.gov API key
    pub api_key: Option<String>,

    /// Base URL of the FoodData Central API, without trailing slash
    pub api_base_url: String,

    /// Directory holding the raw dataset files
    pub assets_dir: PathBuf,

    /// Reject unconsumed keys instead of warning about them
    pub strict: bool,

    /// Keep recipes missing a required property during batch conversion
    pub suppress_required: bool,
}

impl Default for DatatransConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            assets_dir: PathBuf::from("assets"),
            strict: true,
            suppress_required: true,
        }
    }
}

impl DatatransConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> DatatransConfigBuilder {
        DatatransConfigBuilder::default()
    }

    /// Defaults overridden by `DATA_GOV_API_KEY`, `FDC_API_BASE_URL` and
    /// `DATATRANS_ASSETS_DIR`
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file loaded: {}", e);
        }

        let mut config = Self::default();
        if let Ok(key) = env::var("DATA_GOV_API_KEY") {
            config.api_key = Some(key);
        }
        if let Ok(url) = env::var("FDC_API_BASE_URL") {
            config.api_base_url = url;
        }
        if let Ok(dir) = env::var("DATATRANS_ASSETS_DIR") {
            config.assets_dir = PathBuf::from(dir);
        }
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                key: "apiBaseUrl".to_string(),
                message: format!("'{}' is not an http(s) URL", self.api_base_url),
            });
        }
        Ok(())
    }

    /// A usable API key: set, non-empty and not the placeholder
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != PLACEHOLDER_API_KEY)
    }

    pub fn construct_options(&self) -> ConstructOptions {
        ConstructOptions {
            strict: self.strict,
        }
    }

    /// Recipe options for batch conversion
    pub fn recipe_options(&self) -> RecipeOptions {
        RecipeOptions::new()
            .strict(self.strict)
            .suppress(self.suppress_required)
    }
}

/// Builder for [`DatatransConfig`]
#[derive(Debug, Default)]
pub struct DatatransConfigBuilder {
    config: DatatransConfig,
}

impl DatatransConfigBuilder {
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.assets_dir = dir.into();
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.config.strict = strict;
        self
    }

    pub fn suppress_required(mut self, suppress: bool) -> Self {
        self.config.suppress_required = suppress;
        self
    }

    pub fn build(self) -> DatatransConfig {
        self.config
    }
}
