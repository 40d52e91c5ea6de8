use crate::adapters::file_store::DEFAULT_PROFILE_FILE;
use crate::adapters::http_source::DEFAULT_TIMEOUT_SECONDS;
use crate::app::pipelines::match_report::DEFAULT_ARCHIVE_NAME;
use crate::core::service::DEFAULT_MIN_PASSWORD_LENGTH;
use crate::core::ConfigProvider;
use crate::utils::error::{Result, SkillSwapError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const EXPORT_FORMATS: [&str; 3] = ["csv", "tsv", "json"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillSwapConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    #[default]
    File,
    Http,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub r#type: SourceType,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_output_path")]
    pub output_path: String,
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
    #[serde(default = "default_archive_name")]
    pub archive_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_file_name() -> String {
    DEFAULT_PROFILE_FILE.to_string()
}

fn default_output_path() -> String {
    "./output".to_string()
}

fn default_formats() -> Vec<String> {
    EXPORT_FORMATS.iter().map(|f| f.to_string()).collect()
}

fn default_archive_name() -> String {
    DEFAULT_ARCHIVE_NAME.to_string()
}

fn default_min_password_length() -> usize {
    DEFAULT_MIN_PASSWORD_LENGTH
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            file_name: default_file_name(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            formats: default_formats(),
            archive_name: default_archive_name(),
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            min_password_length: default_min_password_length(),
        }
    }
}

impl SkillSwapConfig {
    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SkillSwapError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parse settings from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SkillSwapError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Substitute environment variables (e.g. ${PROFILE_ENDPOINT}); unset variables are left as-is
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SkillSwapError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("store.data_dir", &self.store.data_dir)?;
        validation::validate_non_empty_string("store.file_name", &self.store.file_name)?;

        if self.source.r#type == SourceType::Http {
            let endpoint = validation::validate_required_field("source.endpoint", &self.source.endpoint)?;
            validation::validate_url("source.endpoint", endpoint)?;
        }
        if let Some(timeout) = self.source.timeout_seconds {
            validation::validate_range("source.timeout_seconds", timeout, 1, 300)?;
        }

        validation::validate_path("export.output_path", &self.export.output_path)?;
        validation::validate_output_formats("export.formats", &self.export.formats, &EXPORT_FORMATS)?;
        validation::validate_non_empty_string("export.archive_name", &self.export.archive_name)?;

        validation::validate_positive_number(
            "security.min_password_length",
            self.security.min_password_length,
            1,
        )?;

        Ok(())
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.source.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }
}

impl ConfigProvider for ExportConfig {
    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn archive_name(&self) -> &str {
        &self.archive_name
    }
}

impl Validate for SkillSwapConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
