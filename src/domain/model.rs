use crate::domain::services::{display, grade_scale, workload};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// Field values exactly as the course source reported them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFields {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "median_grade")]
    pub grade: Option<String>,
    #[serde(default = "not_available")]
    pub workload: String,
}

fn not_available() -> String {
    display::NOT_AVAILABLE.to_string()
}

impl RawFields {
    pub fn new(title: Option<&str>, grade: Option<&str>, workload: &str) -> Self {
        Self {
            title: title.map(str::to_string),
            grade: grade.map(str::to_string),
            workload: workload.to_string(),
        }
    }

    /// What a source reports for a course it knows nothing about.
    pub fn absent() -> Self {
        Self {
            title: None,
            grade: None,
            workload: not_available(),
        }
    }
}

impl Default for RawFields {
    fn default() -> Self {
        Self::absent()
    }
}

/// A course name paired with the fields fetched for it, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCourse {
    pub name: String,
    pub fields: RawFields,
}

/// One normalized course. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRecord {
    sequence_id: u64,
    name: String,
    title: Option<String>,
    grade: Option<String>,
    grade_rank: Option<u8>,
    workload: u8,
    display_line: String,
}

impl CourseRecord {
    /// Normalizes `raw` and renders the display line.
    ///
    /// Fails only when the grade is present but not on the grade scale.
    pub fn new(sequence_id: u64, name: &str, raw: &RawFields) -> Result<Self> {
        let title = present(raw.title.as_deref());
        let grade = present(raw.grade.as_deref());
        let grade_rank = grade.as_deref().map(grade_scale::rank).transpose()?;
        let display_line = display::render_line(name, title.as_deref(), grade.as_deref(), &raw.workload);

        Ok(Self {
            sequence_id,
            name: name.to_string(),
            title,
            grade,
            grade_rank,
            workload: workload::parse(&raw.workload),
            display_line,
        })
    }

    pub fn sequence_id(&self) -> u64 {
        self.sequence_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full title, before any display shortening.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn grade(&self) -> Option<&str> {
        self.grade.as_deref()
    }

    pub fn grade_rank(&self) -> Option<u8> {
        self.grade_rank
    }

    /// The workload, or `None` for the unknown sentinel.
    pub fn known_workload(&self) -> Option<u8> {
        Some(self.workload).filter(|w| !workload::is_unknown(*w))
    }

    pub fn display_line(&self) -> &str {
        &self.display_line
    }
}

/// Collapses the source's "no value" spellings to `None`.
fn present(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != display::NOT_AVAILABLE)
        .map(str::to_string)
}

/// Result of ranking: surviving records in final order plus run counters.
#[derive(Debug, Clone, Default)]
pub struct RankedReport {
    pub records: Vec<CourseRecord>,
    pub fetched: usize,
    pub duplicates_removed: usize,
}

impl RankedReport {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(CourseRecord::display_line)
    }

    /// The report text, one newline-terminated line per course.
    pub fn render(&self) -> String {
        self.lines().fold(String::new(), |mut out, line| {
            out.push_str(line);
            out.push('\n');
            out
        })
    }
}
