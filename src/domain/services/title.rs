pub const ELLIPSIS: &str = "...";

/// Shortens `title` to at most `max_width` characters, replacing the tail
/// with [`ELLIPSIS`] when it does not fit.
///
/// Widths are counted in `char`s. When `max_width` is narrower than the
/// ellipsis itself, no title text is kept and the ellipsis is cut to fit,
/// so the result is always exactly `max_width` long once truncation kicks in.
pub fn shorten(title: &str, max_width: usize) -> String {
    if title.chars().count() <= max_width {
        return title.to_string();
    }

    let keep = max_width.saturating_sub(ELLIPSIS.len());
    title
        .chars()
        .take(keep)
        .chain(ELLIPSIS.chars())
        .take(max_width)
        .collect()
}
