use crate::adapters::{FixtureCourseSource, HttpCourseSource};
use crate::domain::ports::CourseSource;
use crate::utils::error::{RankerError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub use crate::adapters::http_source::DEFAULT_TIMEOUT_SECONDS;

const MAX_TIMEOUT_SECONDS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Http,
    Fixture,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Http => f.write_str("http"),
            SourceKind::Fixture => f.write_str("fixture"),
        }
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(SourceKind::Http),
            "fixture" => Ok(SourceKind::Fixture),
            other => Err(format!("unknown source type {other:?}, expected http or fixture")),
        }
    }
}

/// Where course fields come from, shared by the CLI and TOML front ends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceSettings {
    #[serde(rename = "type", default)]
    pub kind: SourceKind,
    pub endpoint: Option<String>,
    pub fixture: Option<String>,
    pub timeout_seconds: Option<u64>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl SourceSettings {
    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    /// One-line description for logs; never includes header values.
    pub fn describe(&self) -> String {
        match self.kind {
            SourceKind::Http => format!("http {}", self.endpoint.as_deref().unwrap_or("<unset>")),
            SourceKind::Fixture => format!("fixture {}", self.fixture.as_deref().unwrap_or("<unset>")),
        }
    }

    pub fn build(&self) -> Result<Box<dyn CourseSource>> {
        match self.kind {
            SourceKind::Http => {
                let endpoint = validation::validate_required_field("source.endpoint", &self.endpoint)?;
                let source = HttpCourseSource::new(endpoint, &self.headers, self.timeout_seconds())?;
                Ok(Box::new(source))
            }
            SourceKind::Fixture => {
                let path = validation::validate_required_field("source.fixture", &self.fixture)?;
                let source = FixtureCourseSource::from_file(path)?;
                tracing::debug!("Loaded {} recorded courses from {}", source.len(), path);
                Ok(Box::new(source))
            }
        }
    }
}

impl Validate for SourceSettings {
    fn validate(&self) -> Result<()> {
        match self.kind {
            SourceKind::Http => {
                let endpoint = validation::validate_required_field("source.endpoint", &self.endpoint)?;
                validation::validate_url("source.endpoint", endpoint)?;
            }
            SourceKind::Fixture => {
                let fixture = validation::validate_required_field("source.fixture", &self.fixture)?;
                validation::validate_path("source.fixture", fixture)?;
            }
        }

        validation::validate_range("source.timeout_seconds", self.timeout_seconds(), 1, MAX_TIMEOUT_SECONDS)?;

        if let Some(key) = self.headers.keys().find(|key| key.trim().is_empty()) {
            return Err(RankerError::InvalidConfigValueError {
                field: "source.headers".to_string(),
                value: key.clone(),
                reason: "Header names cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}
