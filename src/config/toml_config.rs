use crate::config::source::SourceSettings;
use crate::core::ConfigProvider;
use crate::domain::services::OrderingPolicy;
use crate::utils::error::{RankerError, Result};
use crate::utils::validation::{self, Validate};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub input: InputConfig,
    pub source: SourceSettings,
    #[serde(default)]
    pub ranking: RankingConfig,
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub course_list: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankingConfig {
    #[serde(default)]
    pub sort: OrderingPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub report_name: Option<String>,
    #[serde(default)]
    pub exports: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
    pub json_logs: Option<bool>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("static pattern is valid"))
}

impl TomlConfig {
    /// Loads a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration text after `${VAR}` substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| RankerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with its environment value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &Captures| {
                std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
            })
            .into_owned()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().is_some_and(|m| m.enabled)
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.json_logs)
            .unwrap_or(false)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_level.as_deref())
    }
}

impl ConfigProvider for TomlConfig {
    fn course_list(&self) -> &str {
        &self.input.course_list
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn report_name(&self) -> Option<&str> {
        self.load.report_name.as_deref()
    }

    fn export_formats(&self) -> &[String] {
        &self.load.exports
    }

    fn ordering_policy(&self) -> OrderingPolicy {
        self.ranking.sort
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input.course_list", &self.input.course_list)?;
        validation::validate_path("load.output_path", &self.load.output_path)?;
        if let Some(name) = &self.load.report_name {
            crate::config::validate_report_name("load.report_name", name, &self.load.exports)?;
        }
        crate::config::validate_exports("load.exports", &self.load.exports)?;
        if let Some(level) = self.log_level() {
            validation::validate_one_of(
                "monitoring.log_level",
                level,
                &["trace", "debug", "info", "warn", "error"],
            )?;
        }
        self.source.validate()
    }
}
