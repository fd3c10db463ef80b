use crate::config::EXPORT_FORMATS;
use crate::core::ranking;
use crate::core::{ConfigProvider, CourseSource, Pipeline, RankedReport, RawCourse, Storage};
use crate::domain::model::CourseRecord;
use crate::utils::error::{RankerError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

const REPORT_SUFFIX: &str = "-out";
const REPORT_EXTENSION: &str = "txt";

/// Reads a course list, fetches every course, ranks them and writes the
/// fixed-width report plus any configured exports.
pub struct CoursePipeline<S: Storage, F: CourseSource, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) source: F,
    pub(crate) config: C,
}

impl<S: Storage, F: CourseSource, C: ConfigProvider> CoursePipeline<S, F, C> {
    pub fn new(storage: S, source: F, config: C) -> Self {
        Self {
            storage,
            source,
            config,
        }
    }

    /// Output file name: the configured one, or `<list stem>-out.txt`.
    pub fn report_name(&self) -> String {
        match self.config.report_name() {
            Some(name) => name.to_string(),
            None => default_report_name(self.config.course_list()),
        }
    }
}

pub fn default_report_name(course_list: &str) -> String {
    let stem = Path::new(course_list)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("courses");
    format!("{stem}{REPORT_SUFFIX}.{REPORT_EXTENSION}")
}

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    name: &'a str,
    title: Option<&'a str>,
    grade: Option<&'a str>,
    workload: Option<u8>,
}

impl<'a> From<&'a CourseRecord> for ExportRow<'a> {
    fn from(record: &'a CourseRecord) -> Self {
        Self {
            name: record.name(),
            title: record.title(),
            grade: record.grade(),
            workload: record.known_workload(),
        }
    }
}

fn export_csv(rows: &[ExportRow<'_>]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    writer.into_inner().map_err(|e| RankerError::Io(e.into_error()))
}

/// Export files sit next to the report with the format as extension. Fails
/// before anything is written when an export would land on the report.
fn export_targets<'a>(report_path: &Path, formats: &'a [String]) -> Result<Vec<(&'a str, PathBuf)>> {
    let mut targets = Vec::with_capacity(formats.len());
    for format in formats {
        if !EXPORT_FORMATS.contains(&format.as_str()) {
            tracing::warn!("Skipping unsupported export format: {}", format);
            continue;
        }
        let export_path = report_path.with_extension(format);
        if export_path == report_path {
            return Err(RankerError::ConfigValidationError {
                field: "report_name".to_string(),
                message: format!(
                    "the {format} export would overwrite the report {}",
                    report_path.display()
                ),
            });
        }
        targets.push((format.as_str(), export_path));
    }
    Ok(targets)
}

#[async_trait::async_trait]
impl<S: Storage, F: CourseSource, C: ConfigProvider> Pipeline for CoursePipeline<S, F, C> {
    async fn extract(&self) -> Result<Vec<RawCourse>> {
        let course_list = self.config.course_list();
        tracing::info!("📋 Reading course list from: {}", course_list);

        let bytes = self.storage.read_file(course_list).await?;
        let text = String::from_utf8(bytes)
            .map_err(|e| RankerError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;

        let names = ranking::course_names(text.lines());
        tracing::debug!("Course list has {} entries", names.len());

        ranking::fetch_all(names, &self.source).await
    }

    async fn transform(&self, courses: Vec<RawCourse>) -> Result<RankedReport> {
        let policy = self.config.ordering_policy();
        tracing::debug!("Ranking {} courses by {}", courses.len(), policy);

        let records = ranking::build_records(&courses)?;
        Ok(ranking::rank(records, policy))
    }

    async fn load(&self, report: RankedReport) -> Result<String> {
        let report_name = self.report_name();
        let report_path = Path::new(self.config.output_path()).join(&report_name);
        let report_path_str = report_path.to_string_lossy().into_owned();
        let exports = export_targets(&report_path, self.config.export_formats())?;

        self.storage
            .write_file(&report_path_str, report.render().as_bytes())
            .await?;

        let rows: Vec<ExportRow<'_>> = report.records.iter().map(ExportRow::from).collect();
        for (format, export_path) in exports {
            let data = match format {
                "csv" => export_csv(&rows)?,
                _ => serde_json::to_vec_pretty(&rows)?,
            };
            self.storage
                .write_file(&export_path.to_string_lossy(), &data)
                .await?;
            tracing::debug!("Exported {} courses as {}", rows.len(), format);
        }

        Ok(report_path_str)
    }
}
