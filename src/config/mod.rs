pub mod source;
pub mod toml_config;

use crate::utils::error::{RankerError, Result};
use crate::utils::validation;
use std::path::Path;
#[cfg(feature = "cli")]
use crate::{core::ConfigProvider, domain::services::OrderingPolicy, utils::validation::Validate};
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub use source::{SourceKind, SourceSettings};

/// Export formats written next to the fixed-width report.
pub const EXPORT_FORMATS: [&str; 2] = ["csv", "json"];

pub(crate) fn validate_exports(field: &str, exports: &[String]) -> Result<()> {
    exports
        .iter()
        .try_for_each(|format| validation::validate_one_of(field, format, &EXPORT_FORMATS))
}

/// A report named like one of its own exports would be overwritten by it.
pub(crate) fn validate_report_name(field: &str, name: &str, exports: &[String]) -> Result<()> {
    validation::validate_path(field, name)?;
    let extension = Path::new(name).extension().and_then(|e| e.to_str());
    match extension {
        Some(ext) if exports.iter().any(|format| format.eq_ignore_ascii_case(ext)) => {
            Err(RankerError::InvalidConfigValueError {
                field: field.to_string(),
                value: name.to_string(),
                reason: format!("the {ext} export would overwrite the report"),
            })
        }
        _ => Ok(()),
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, clap::Parser)]
#[command(name = "course-ranker")]
#[command(about = "Rank courses by grade, workload or title and write a fixed-width report")]
pub struct CliConfig {
    /// Course list, one course per line; lines starting with '#' are skipped
    #[arg(short, long)]
    pub input: String,

    /// Ordering: name, workload, grade, title or id (also 1-5)
    #[arg(short, long, default_value = "name", value_parser = OrderingPolicy::parse_arg)]
    pub sort: OrderingPolicy,

    /// Where course data comes from: http or fixture
    #[arg(long, default_value = "http")]
    pub source: SourceKind,

    /// Course API base URL; the course name is appended as a path segment
    #[arg(long)]
    pub endpoint: Option<String>,

    /// TOML or JSON file of recorded course data (with --source fixture)
    #[arg(long)]
    pub fixture: Option<String>,

    /// Extra request header, e.g. --header "Authorization=Bearer abc"
    #[arg(long = "header", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    #[arg(long, default_value_t = source::DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    #[arg(long, default_value = ".")]
    pub output_path: String,

    /// Report file name; defaults to "<input stem>-out.txt"
    #[arg(long)]
    pub report_name: Option<String>,

    /// Extra exports of the ranked courses: csv, json
    #[arg(long, value_delimiter = ',')]
    pub exports: Vec<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
fn parse_header(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected NAME=VALUE, got {raw:?}"))
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn source_settings(&self) -> SourceSettings {
        SourceSettings {
            kind: self.source,
            endpoint: self.endpoint.clone(),
            fixture: self.fixture.clone(),
            timeout_seconds: Some(self.timeout_seconds),
            headers: self.headers.iter().cloned().collect(),
        }
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn course_list(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn report_name(&self) -> Option<&str> {
        self.report_name.as_deref()
    }

    fn export_formats(&self) -> &[String] {
        &self.exports
    }

    fn ordering_policy(&self) -> OrderingPolicy {
        self.sort
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        validation::validate_path("output_path", &self.output_path)?;
        if let Some(name) = &self.report_name {
            validate_report_name("report_name", name, &self.exports)?;
        }
        validate_exports("exports", &self.exports)?;
        self.source_settings().validate()
    }
}
