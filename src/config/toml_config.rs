use crate::config::{default_output_formats, default_team_names, DEFAULT_ARCHIVE_NAME};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, SchedulerError};
use crate::utils::validation::{
    validate_client_source, validate_non_empty_string, validate_output_formats, validate_path,
    validate_team_names, Validate,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

static ENV_VAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("Valid regex pattern"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub roster: RosterConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    #[serde(default = "default_team_names")]
    pub teams: Vec<String>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            teams: default_team_names(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Local CSV path or http(s) URL.
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    #[serde(default = "default_output_formats")]
    pub formats: Vec<String>,
    pub compression: Option<CompressionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    pub enabled: bool,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SchedulerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SchedulerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CLIENTS_URL})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_client_source("input.source", &self.input.source)?;
        validate_team_names("roster.teams", &self.roster.teams)?;
        validate_path("output.path", &self.output.path)?;
        validate_output_formats("output.formats", &self.output.formats)?;
        if self.zip_output() {
            validate_non_empty_string("output.compression.filename", self.archive_name())?;
        }
        Ok(())
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn clients_source(&self) -> &str {
        &self.input.source
    }

    fn team_names(&self) -> &[String] {
        &self.roster.teams
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn output_formats(&self) -> &[String] {
        &self.output.formats
    }

    // 未設定 compression 時預設壓縮
    fn zip_output(&self) -> bool {
        self.output
            .compression
            .as_ref()
            .map(|c| c.enabled)
            .unwrap_or(true)
    }

    fn archive_name(&self) -> &str {
        self.output
            .compression
            .as_ref()
            .and_then(|c| c.filename.as_deref())
            .unwrap_or(DEFAULT_ARCHIVE_NAME)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
