use super::title;

pub const NAME_WIDTH: usize = 12;
pub const TITLE_WIDTH: usize = 35;
pub const GRADE_WIDTH: usize = 5;
pub const WORKLOAD_WIDTH: usize = 4;

/// Placeholder printed for any field the source did not report.
pub const NOT_AVAILABLE: &str = "N/A";

/// Renders one fixed-width report line (without the trailing newline).
/// Values wider than their column are not cut, except the title which is
/// shortened to [`TITLE_WIDTH`].
pub fn render_line(name: &str, title: Option<&str>, grade: Option<&str>, workload: &str) -> String {
    let title = title
        .map(|t| title::shorten(t, TITLE_WIDTH))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let grade = grade.unwrap_or(NOT_AVAILABLE);
    let workload = match workload.trim() {
        "" => NOT_AVAILABLE,
        text => text,
    };

    format!(
        "{:>name_w$} {:<title_w$} {:<grade_w$} {:>work_w$}",
        name,
        title,
        grade,
        workload,
        name_w = NAME_WIDTH,
        title_w = TITLE_WIDTH,
        grade_w = GRADE_WIDTH,
        work_w = WORKLOAD_WIDTH,
    )
}
