/// Workload value for a course whose workload is unknown or unparseable.
/// Larger than any real percentage.
pub const UNKNOWN_WORKLOAD: u8 = 101;

const MAX_WORKLOAD: u8 = 100;

/// Parses workload text such as `"75%"`. Anything that is not a bare
/// base-10 integer in `0..=100` followed by `%` maps to [`UNKNOWN_WORKLOAD`].
pub fn parse(raw: &str) -> u8 {
    raw.trim()
        .strip_suffix('%')
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|digits| digits.parse::<u8>().ok())
        .filter(|value| *value <= MAX_WORKLOAD)
        .unwrap_or(UNKNOWN_WORKLOAD)
}

pub fn is_unknown(workload: u8) -> bool {
    workload == UNKNOWN_WORKLOAD
}
