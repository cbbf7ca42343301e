use crate::adapters::gemini::{self, GeminiConfig};
use crate::core::layout::{RadialLayout, DEFAULT_CONTAINER_DIAMETER, DEFAULT_ITEM_DIAMETER, WHEEL_PADDING};
use crate::utils::error::{CompassError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_STORE_PATH: &str = "./.celestial-compass/selection.json";
const LOG_FORMATS: [&str; 2] = ["compact", "json"];
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompassConfig {
    pub provider: ProviderConfig,
    pub store: StoreConfig,
    pub wheel: WheelConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub text_model: String,
    pub image_model: String,
    pub timeout_seconds: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: gemini::DEFAULT_BASE_URL.to_string(),
            api_key: None,
            text_model: gemini::DEFAULT_TEXT_MODEL.to_string(),
            image_model: gemini::DEFAULT_IMAGE_MODEL.to_string(),
            timeout_seconds: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_STORE_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    pub container_diameter: f64,
    pub item_diameter: f64,
    pub padding: f64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            container_diameter: DEFAULT_CONTAINER_DIAMETER,
            item_diameter: DEFAULT_ITEM_DIAMETER,
            padding: WHEEL_PADDING,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
            format: "compact".to_string(),
        }
    }
}

impl CompassConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CompassError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value. Unset variables are left
    /// as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CompassError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    /// The configured key, else `GEMINI_API_KEY`. An unresolved `${VAR}`
    /// counts as unset.
    pub fn api_key(&self) -> Result<String> {
        let configured = self
            .provider
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && !key.starts_with("${"));

        if let Some(key) = configured {
            return Ok(key.to_string());
        }

        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| CompassError::MissingConfigError {
                field: format!("provider.api_key (or {})", API_KEY_ENV),
            })
    }

    pub fn gemini_config(&self) -> Result<GeminiConfig> {
        Ok(self.gemini_config_with_key(self.api_key()?))
    }

    pub fn gemini_config_with_key(&self, api_key: String) -> GeminiConfig {
        GeminiConfig {
            api_key,
            base_url: self.provider.base_url.clone(),
            text_model: self.provider.text_model.clone(),
            image_model: self.provider.image_model.clone(),
            timeout: Duration::from_secs(self.provider.timeout_seconds),
        }
    }

    pub fn wheel_layout(&self) -> RadialLayout {
        RadialLayout::new(self.wheel.container_diameter, self.wheel.item_diameter)
            .with_padding(self.wheel.padding)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.format == "json"
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("provider.base_url", &self.provider.base_url)?;
        validation::validate_non_empty_string("provider.text_model", &self.provider.text_model)?;
        validation::validate_non_empty_string("provider.image_model", &self.provider.image_model)?;
        validation::validate_positive_number(
            "provider.timeout_seconds",
            self.provider.timeout_seconds,
            1,
        )?;

        validation::validate_path("store.path", &self.store.path)?;

        validation::validate_positive_dimension(
            "wheel.container_diameter",
            self.wheel.container_diameter,
        )?;
        validation::validate_positive_dimension("wheel.item_diameter", self.wheel.item_diameter)?;
        validation::validate_range(
            "wheel.padding",
            self.wheel.padding,
            0.0,
            self.wheel.container_diameter,
        )?;
        if self.wheel_layout().radius().is_none() {
            return Err(CompassError::InvalidConfigValueError {
                field: "wheel".to_string(),
                value: format!(
                    "{}/{}/{}",
                    self.wheel.container_diameter, self.wheel.item_diameter, self.wheel.padding
                ),
                reason: "Items and padding leave no room for a wheel".to_string(),
            });
        }

        validation::validate_one_of("logging.format", &self.logging.format, &LOG_FORMATS)?;
        if let Some(level) = &self.logging.level {
            validation::validate_one_of("logging.level", level, &LOG_LEVELS)?;
        }

        Ok(())
    }
}

impl Validate for CompassConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[provider]
base_url = "https://gemini.example.com/v1beta"
api_key = "abc123"
text_model = "text-model"
image_model = "image-model"
timeout_seconds = 15

[store]
path = "./state/selection.json"

[wheel]
container_diameter = 400.0
item_diameter = 80.0
padding = 10.0

[logging]
level = "debug"
format = "json"
"#;

        let config = CompassConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.provider.base_url, "https://gemini.example.com/v1beta");
        assert_eq!(config.api_key().unwrap(), "abc123");
        assert_eq!(config.store.path, "./state/selection.json");
        assert_eq!(config.wheel_layout().radius(), Some(150.0));
        assert!(config.json_logs());
        assert!(config.validate().is_ok());

        let gemini = config.gemini_config().unwrap();
        assert_eq!(gemini.text_model, "text-model");
        assert_eq!(gemini.timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CompassConfig::from_toml_str("").unwrap();

        assert_eq!(config.provider.base_url, gemini::DEFAULT_BASE_URL);
        assert_eq!(config.store.path, DEFAULT_STORE_PATH);
        assert_eq!(config.wheel_layout().radius(), Some(120.0));
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("COMPASS_TEST_STORE_PATH", "/tmp/compass-test.json");

        let toml_content = r#"
[store]
path = "${COMPASS_TEST_STORE_PATH}"

[provider]
api_key = "${COMPASS_TEST_UNSET_KEY}"
"#;

        let config = CompassConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.store.path, "/tmp/compass-test.json");
        assert_eq!(
            config.provider.api_key.as_deref(),
            Some("${COMPASS_TEST_UNSET_KEY}")
        );

        std::env::remove_var("COMPASS_TEST_STORE_PATH");
    }

    #[test]
    fn test_config_validation() {
        let bad_url = CompassConfig::from_toml_str("[provider]\nbase_url = \"not-a-url\"").unwrap();
        assert!(bad_url.validate().is_err());

        let bad_format = CompassConfig::from_toml_str("[logging]\nformat = \"xml\"").unwrap();
        assert!(bad_format.validate().is_err());

        let cramped = CompassConfig::from_toml_str(
            "[wheel]\ncontainer_diameter = 64.0\nitem_diameter = 64.0\npadding = 8.0",
        )
        .unwrap();
        assert!(cramped.validate().is_err());

        let zero_timeout = CompassConfig::from_toml_str("[provider]\ntimeout_seconds = 0").unwrap();
        assert!(zero_timeout.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = CompassConfig::from_toml_str("[provider\nbase_url = 1").unwrap_err();
        assert!(matches!(err, CompassError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[provider]\napi_key = \"from-file\"\n")
            .unwrap();

        let config = CompassConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.api_key().unwrap(), "from-file");
    }
}
