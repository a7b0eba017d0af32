use crate::core::CdnConfigProvider;
use crate::domain::image::ImageOptions;
use crate::utils::error::{Result, StoreError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_API_BASE: &str = "https://api.cloudinary.com";
pub const DEFAULT_DELIVERY_BASE: &str = "https://res.cloudinary.com";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorefrontConfig {
    pub cdn: CdnConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CdnConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub api_base: Option<String>,
    pub delivery_base: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub defaults: Option<ImageOptions>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl StorefrontConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(StoreError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| StoreError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CLOUDINARY_API_SECRET})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| StoreError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        let cdn = &self.cdn;
        validation::validate_non_empty_string("cdn.cloud_name", &cdn.cloud_name)?;
        validation::validate_non_empty_string("cdn.api_key", &cdn.api_key)?;
        validation::validate_non_empty_string("cdn.api_secret", &cdn.api_secret)?;

        // An unresolved ${VAR} means the environment was missing a secret.
        for (field, value) in [
            ("cdn.cloud_name", &cdn.cloud_name),
            ("cdn.api_key", &cdn.api_key),
            ("cdn.api_secret", &cdn.api_secret),
        ] {
            if value.starts_with("${") {
                return Err(StoreError::MissingConfigError {
                    field: field.to_string(),
                });
            }
        }

        validation::validate_url("cdn.api_base", self.api_base())?;
        validation::validate_url("cdn.delivery_base", self.delivery_base())?;
        validation::validate_range("cdn.timeout_seconds", self.timeout_seconds(), 1, 300)?;

        Ok(())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.json)
            .unwrap_or(false)
    }
}

impl CdnConfigProvider for StorefrontConfig {
    fn cloud_name(&self) -> &str {
        &self.cdn.cloud_name
    }

    fn api_key(&self) -> &str {
        &self.cdn.api_key
    }

    fn api_secret(&self) -> &str {
        &self.cdn.api_secret
    }

    fn api_base(&self) -> &str {
        self.cdn.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }

    fn delivery_base(&self) -> &str {
        self.cdn
            .delivery_base
            .as_deref()
            .unwrap_or(DEFAULT_DELIVERY_BASE)
    }

    fn timeout_seconds(&self) -> u64 {
        self.cdn.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn default_image_options(&self) -> ImageOptions {
        let builtin = ImageOptions::storefront_defaults();
        match &self.cdn.defaults {
            Some(configured) => builtin.merge(configured),
            None => builtin,
        }
    }
}

impl Validate for StorefrontConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
