use crate::core::ranking::normalize_name;
use crate::domain::model::RawFields;
use crate::domain::ports::CourseSource;
use crate::utils::error::{RankerError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct FixtureFile {
    #[serde(default)]
    courses: HashMap<String, RawFields>,
}

/// Offline course source: field values recorded in a TOML or JSON file.
///
/// ```toml
/// [courses."EECS 281"]
/// title = "Data Structures and Algorithms"
/// grade = "B+"
/// workload = "80%"
/// ```
#[derive(Debug, Clone, Default)]
pub struct FixtureCourseSource {
    courses: HashMap<String, RawFields>,
}

impl FixtureCourseSource {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: FixtureFile = toml::from_str(content).map_err(|e| RankerError::ConfigValidationError {
            field: "fixture".to_string(),
            message: format!("TOML parsing error: {}", e),
        })?;
        Ok(Self::from_courses(file.courses))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: FixtureFile = serde_json::from_str(content)?;
        Ok(Self::from_courses(file.courses))
    }

    fn from_courses(courses: HashMap<String, RawFields>) -> Self {
        let courses = courses
            .into_iter()
            .map(|(name, fields)| (normalize_name(&name), fields))
            .collect();
        Self { courses }
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

#[async_trait]
impl CourseSource for FixtureCourseSource {
    async fn fetch(&self, name: &str) -> Result<RawFields> {
        match self.courses.get(name) {
            Some(fields) => Ok(fields.clone()),
            None => {
                tracing::warn!("⚠️ No recorded data for {}, treating all fields as N/A", name);
                Ok(RawFields::absent())
            }
        }
    }
}
