use crate::domain::model::CourseRecord;
use crate::utils::error::RankerError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// How ranked courses are ordered in the report. Selected once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum OrderingPolicy {
    /// Course name, lexically.
    #[default]
    Name,
    /// Lightest workload first; unknown workloads last.
    WorkloadAscending,
    /// Best median grade first; ungraded courses last.
    GradeDescending,
    /// Full course title, lexically; untitled courses last.
    Title,
    /// Input order.
    InsertionOrder,
}

impl OrderingPolicy {
    pub const ALL: [OrderingPolicy; 5] = [
        OrderingPolicy::Name,
        OrderingPolicy::WorkloadAscending,
        OrderingPolicy::GradeDescending,
        OrderingPolicy::Title,
        OrderingPolicy::InsertionOrder,
    ];

    /// Strict total order over records: every tie, including two absent
    /// values, is broken by `sequence_id`.
    pub fn compare(self, lhs: &CourseRecord, rhs: &CourseRecord) -> Ordering {
        let primary = match self {
            OrderingPolicy::Name => lhs.name().cmp(rhs.name()),
            OrderingPolicy::WorkloadAscending => {
                present_first(lhs.known_workload(), rhs.known_workload(), |a, b| a.cmp(&b))
            }
            OrderingPolicy::GradeDescending => {
                present_first(lhs.grade_rank(), rhs.grade_rank(), |a, b| b.cmp(&a))
            }
            OrderingPolicy::Title => present_first(lhs.title(), rhs.title(), |a, b| a.cmp(b)),
            OrderingPolicy::InsertionOrder => Ordering::Equal,
        };
        primary.then_with(|| lhs.sequence_id().cmp(&rhs.sequence_id()))
    }

    /// Numeric code accepted on the command line (1-5).
    pub fn code(self) -> u8 {
        match self {
            OrderingPolicy::Name => 1,
            OrderingPolicy::WorkloadAscending => 2,
            OrderingPolicy::GradeDescending => 3,
            OrderingPolicy::Title => 4,
            OrderingPolicy::InsertionOrder => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderingPolicy::Name => "name",
            OrderingPolicy::WorkloadAscending => "workload-ascending",
            OrderingPolicy::GradeDescending => "grade-descending",
            OrderingPolicy::Title => "title",
            OrderingPolicy::InsertionOrder => "insertion-order",
        }
    }

    /// Adapter for clap's `value_parser`.
    pub fn parse_arg(value: &str) -> std::result::Result<Self, String> {
        value.parse().map_err(|e: RankerError| e.to_string())
    }
}

/// Orders present values with `cmp` and puts `None` after every present
/// value. Two `None`s compare equal so the caller's tie-break decides.
fn present_first<T>(lhs: Option<T>, rhs: Option<T>, cmp: impl FnOnce(T, T) -> Ordering) -> Ordering {
    match (lhs, rhs) {
        (Some(a), Some(b)) => cmp(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl fmt::Display for OrderingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderingPolicy {
    type Err = RankerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let policy = match s.trim().to_ascii_lowercase().as_str() {
            "1" | "name" => OrderingPolicy::Name,
            "2" | "workload" | "workload-ascending" => OrderingPolicy::WorkloadAscending,
            "3" | "grade" | "grade-descending" => OrderingPolicy::GradeDescending,
            "4" | "title" => OrderingPolicy::Title,
            "5" | "id" | "none" | "insertion-order" => OrderingPolicy::InsertionOrder,
            _ => {
                return Err(RankerError::InvalidConfigValueError {
                    field: "sort".to_string(),
                    value: s.to_string(),
                    reason: "Expected one of name, workload, grade, title, id (or 1-5)".to_string(),
                })
            }
        };
        Ok(policy)
    }
}

impl TryFrom<String> for OrderingPolicy {
    type Error = RankerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RawFields;
    use crate::domain::services::grade_scale;
    use proptest::prelude::*;

    fn record(id: u64, name: &str, title: Option<&str>, grade: Option<&str>, workload: &str) -> CourseRecord {
        CourseRecord::new(id, name, &RawFields::new(title, grade, workload)).unwrap()
    }

    fn sorted_names(policy: OrderingPolicy, mut records: Vec<CourseRecord>) -> Vec<String> {
        records.sort_by(|a, b| policy.compare(a, b));
        records.iter().map(|r| r.name().to_string()).collect()
    }

    #[test]
    fn name_policy_sorts_lexically() {
        let records = vec![
            record(0, "EECS 482", None, None, "N/A"),
            record(1, "EECS 281", None, None, "N/A"),
            record(2, "EECS 280", None, None, "N/A"),
        ];
        assert_eq!(
            sorted_names(OrderingPolicy::Name, records),
            ["EECS 280", "EECS 281", "EECS 482"]
        );
    }

    #[test]
    fn grade_policy_puts_best_first_and_ungraded_last() {
        let records = vec![
            record(0, "B+ course", None, Some("B+"), "N/A"),
            record(1, "A- course", None, Some("A-"), "N/A"),
            record(2, "no grade", None, None, "N/A"),
            record(3, "A course", None, Some("A"), "N/A"),
        ];
        assert_eq!(
            sorted_names(OrderingPolicy::GradeDescending, records),
            ["A course", "A- course", "B+ course", "no grade"]
        );
    }

    #[test]
    fn workload_policy_puts_unknown_last_and_keeps_zero() {
        let records = vec![
            record(0, "unknown", None, None, "N/A"),
            record(1, "heavy", None, None, "90%"),
            record(2, "none", None, None, "0%"),
            record(3, "light", None, None, "10%"),
        ];
        assert_eq!(
            sorted_names(OrderingPolicy::WorkloadAscending, records),
            ["none", "light", "heavy", "unknown"]
        );
    }

    #[test]
    fn title_policy_uses_full_title() {
        // Both titles shorten to the same display text; only the full text differs.
        let prefix = "Special Topics in Computer Science and";
        let b = format!("{prefix} Beta");
        let a = format!("{prefix} Alpha");
        let records = vec![
            record(0, "untitled", None, None, "N/A"),
            record(1, "EECS 498 B", Some(&b), None, "N/A"),
            record(2, "EECS 498 A", Some(&a), None, "N/A"),
        ];
        assert_eq!(records[1].display_line().len(), records[2].display_line().len());
        assert_eq!(
            sorted_names(OrderingPolicy::Title, records),
            ["EECS 498 A", "EECS 498 B", "untitled"]
        );
    }

    #[test]
    fn absent_values_tie_break_on_sequence() {
        let records = vec![
            record(7, "later", None, None, "N/A"),
            record(2, "earlier", None, None, "N/A"),
        ];
        for policy in [
            OrderingPolicy::WorkloadAscending,
            OrderingPolicy::GradeDescending,
            OrderingPolicy::Title,
            OrderingPolicy::InsertionOrder,
        ] {
            assert_eq!(sorted_names(policy, records.clone()), ["earlier", "later"]);
        }
    }

    #[test]
    fn policies_parse_from_names_and_codes() {
        for policy in OrderingPolicy::ALL {
            assert_eq!(policy.code().to_string().parse::<OrderingPolicy>().unwrap(), policy);
            assert_eq!(policy.as_str().parse::<OrderingPolicy>().unwrap(), policy);
        }
        assert_eq!("Grade".parse::<OrderingPolicy>().unwrap(), OrderingPolicy::GradeDescending);
        assert_eq!("id".parse::<OrderingPolicy>().unwrap(), OrderingPolicy::InsertionOrder);
        assert!("6".parse::<OrderingPolicy>().is_err());
        assert!(OrderingPolicy::parse_arg("fastest").is_err());
    }

    #[test]
    fn policy_deserializes_from_config_strings() {
        #[derive(Deserialize)]
        struct Ranking {
            sort: OrderingPolicy,
        }
        let parsed: Ranking = toml::from_str(r#"sort = "workload""#).unwrap();
        assert_eq!(parsed.sort, OrderingPolicy::WorkloadAscending);
        assert!(toml::from_str::<Ranking>(r#"sort = "random""#).is_err());
    }

    fn arb_record() -> impl Strategy<Value = (String, Option<String>, Option<String>, String)> {
        let grades: Vec<&'static str> = grade_scale::tokens().collect();
        (
            prop::sample::select(vec!["EECS 280", "EECS 281", "MATH 215", "STATS 250"]),
            prop::option::of(prop::sample::select(vec!["Algorithms", "Calculus", "Data", "Statistics"])),
            prop::option::of(prop::sample::select(grades)),
            prop_oneof![
                (0u8..=100).prop_map(|w| format!("{w}%")),
                Just("N/A".to_string()),
                Just("abc%".to_string()),
            ],
        )
            .prop_map(|(name, title, grade, workload)| {
                (
                    name.to_string(),
                    title.map(str::to_string),
                    grade.map(str::to_string),
                    workload,
                )
            })
    }

    fn build(rows: Vec<(String, Option<String>, Option<String>, String)>) -> Vec<CourseRecord> {
        rows
            .into_iter()
            .enumerate()
            .map(|(id, (name, title, grade, workload))| {
                record(id as u64, &name, title.as_deref(), grade.as_deref(), &workload)
            })
            .collect()
    }

    proptest! {
        #[test]
        fn every_policy_is_a_strict_total_order(
            rows in prop::collection::vec(arb_record(), 3..12),
            policy_index in 0usize..5,
        ) {
            let policy = OrderingPolicy::ALL[policy_index];
            let records = build(rows);

            for a in &records {
                prop_assert_eq!(policy.compare(a, a), Ordering::Equal);
                for b in &records {
                    let ab = policy.compare(a, b);
                    prop_assert_eq!(ab, policy.compare(b, a).reverse());
                    if a.sequence_id() != b.sequence_id() {
                        prop_assert_ne!(ab, Ordering::Equal);
                    }
                    for c in &records {
                        if ab == Ordering::Less && policy.compare(b, c) == Ordering::Less {
                            prop_assert_eq!(policy.compare(a, c), Ordering::Less);
                        }
                    }
                }
            }
        }
    }
}
