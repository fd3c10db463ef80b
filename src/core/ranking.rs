use crate::domain::model::{CourseRecord, RankedReport, RawCourse};
use crate::domain::ports::CourseSource;
use crate::domain::services::OrderingPolicy;
use crate::utils::error::Result;

const COMMENT_MARKER: char = '#';

/// Course names from course-list lines, in input order.
///
/// A line is a comment only when `#` is its very first character. Runs of
/// whitespace collapse to one space and blank lines are dropped.
pub fn course_names<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter(|line| !line.as_ref().starts_with(COMMENT_MARKER))
        .map(|line| normalize_name(line.as_ref()))
        .filter(|name| !name.is_empty())
        .collect()
}

pub fn normalize_name(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Fetches every course strictly one after another; the source may hold a
/// single session that cannot serve concurrent requests.
pub async fn fetch_all<F>(names: Vec<String>, source: &F) -> Result<Vec<RawCourse>>
where
    F: CourseSource + ?Sized,
{
    let mut courses = Vec::with_capacity(names.len());
    for name in names {
        let fields = source.fetch(&name).await?;
        tracing::info!("Retrieved {} data", name);
        courses.push(RawCourse { name, fields });
    }
    Ok(courses)
}

/// Builds one record per course, numbering them in input order.
pub fn build_records(courses: &[RawCourse]) -> Result<Vec<CourseRecord>> {
    courses
        .iter()
        .zip(0u64..)
        .map(|(course, sequence_id)| CourseRecord::new(sequence_id, &course.name, &course.fields))
        .collect()
}

/// Orders `records` by `policy` and keeps only the first record of every
/// run of equal names in that order. Equal names that end up apart are
/// both kept.
pub fn rank(mut records: Vec<CourseRecord>, policy: OrderingPolicy) -> RankedReport {
    let fetched = records.len();
    records.sort_unstable_by(|a, b| policy.compare(a, b));
    records.dedup_by(|next, kept| next.name() == kept.name());

    let duplicates_removed = fetched - records.len();
    if duplicates_removed > 0 {
        tracing::debug!("Dropped {} repeated course entries", duplicates_removed);
    }

    RankedReport {
        records,
        fetched,
        duplicates_removed,
    }
}

/// Course-list lines in, report lines out.
pub async fn run<I, S, F>(lines: I, policy: OrderingPolicy, source: &F) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: CourseSource + ?Sized,
{
    let courses = fetch_all(course_names(lines), source).await?;
    let report = rank(build_records(&courses)?, policy);
    Ok(report.lines().map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RawFields;
    use crate::utils::error::RankerError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves canned fields and records the order of requests.
    #[derive(Default)]
    struct StubSource {
        courses: HashMap<String, RawFields>,
        requests: Mutex<Vec<String>>,
    }

    impl StubSource {
        fn with(mut self, name: &str, title: Option<&str>, grade: Option<&str>, workload: &str) -> Self {
            self.courses
                .insert(name.to_string(), RawFields::new(title, grade, workload));
            self
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CourseSource for StubSource {
        async fn fetch(&self, name: &str) -> Result<RawFields> {
            self.requests.lock().unwrap().push(name.to_string());
            Ok(self.courses.get(name).cloned().unwrap_or_default())
        }
    }

    fn names_of(lines: &[String]) -> Vec<&str> {
        lines.iter().map(|line| line[..12].trim_start()).collect()
    }

    #[test]
    fn course_list_skips_comments_and_collapses_whitespace() {
        let lines = ["# fall term", "EECS   281", "  MATH\t215  ", "", "   ", " # not a comment"];
        assert_eq!(
            course_names(lines),
            ["EECS 281", "MATH 215", "# not a comment"]
        );
    }

    #[tokio::test]
    async fn adjacent_duplicates_collapse_under_insertion_order() {
        let source = StubSource::default();
        let lines = run(
            ["EECS 281", "EECS 281", "EECS 280"],
            OrderingPolicy::InsertionOrder,
            &source,
        )
        .await
        .unwrap();

        assert_eq!(names_of(&lines), ["EECS 281", "EECS 280"]);
        assert_eq!(source.requests(), ["EECS 281", "EECS 281", "EECS 280"]);
    }

    #[tokio::test]
    async fn separated_duplicates_both_survive() {
        let source = StubSource::default();
        let lines = run(
            ["EECS 281", "EECS 280", "EECS 281"],
            OrderingPolicy::InsertionOrder,
            &source,
        )
        .await
        .unwrap();

        assert_eq!(names_of(&lines), ["EECS 281", "EECS 280", "EECS 281"]);
    }

    #[tokio::test]
    async fn name_policy_merges_every_duplicate() {
        let source = StubSource::default();
        let lines = run(
            ["EECS 482", "EECS 281", "EECS 280", "EECS 281"],
            OrderingPolicy::Name,
            &source,
        )
        .await
        .unwrap();

        assert_eq!(names_of(&lines), ["EECS 280", "EECS 281", "EECS 482"]);
    }

    #[tokio::test]
    async fn grade_policy_keeps_first_fetched_of_a_duplicate_run() {
        let source = StubSource::default()
            .with("EECS 281", Some("Data Structures and Algorithms"), Some("B+"), "80%")
            .with("EECS 376", Some("Foundations of Computer Science"), Some("A-"), "70%")
            .with("EECS 370", None, None, "N/A")
            .with("EECS 485", Some("Web Systems"), Some("A"), "60%");

        let lines = run(
            ["EECS 281", "EECS 376", "EECS 370", "EECS 485", "EECS 281"],
            OrderingPolicy::GradeDescending,
            &source,
        )
        .await
        .unwrap();

        assert_eq!(
            names_of(&lines),
            ["EECS 485", "EECS 376", "EECS 281", "EECS 370"]
        );
    }

    #[tokio::test]
    async fn unknown_grade_aborts_without_output() {
        let source = StubSource::default()
            .with("EECS 280", None, Some("A"), "50%")
            .with("EECS 281", None, Some("Z+"), "80%");

        let err = run(["EECS 280", "EECS 281"], OrderingPolicy::Name, &source)
            .await
            .unwrap_err();
        assert!(matches!(err, RankerError::UnknownGrade { .. }));
    }

    #[test]
    fn rank_counts_removed_duplicates() {
        let records = build_records(&[
            RawCourse { name: "EECS 281".into(), fields: RawFields::absent() },
            RawCourse { name: "EECS 281".into(), fields: RawFields::absent() },
            RawCourse { name: "EECS 280".into(), fields: RawFields::absent() },
        ])
        .unwrap();
        assert_eq!(
            records.iter().map(CourseRecord::sequence_id).collect::<Vec<_>>(),
            [0, 1, 2]
        );

        let report = rank(records, OrderingPolicy::Name);
        assert_eq!(report.fetched, 3);
        assert_eq!(report.duplicates_removed, 1);
        assert_eq!(report.records[0].name(), "EECS 280");
        assert_eq!(report.records[1].sequence_id(), 0);
    }
}
