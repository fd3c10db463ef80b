use crate::utils::error::{RankerError, Result};

/// Median-grade tokens with their ordinal rank, best first. Blended tokens
/// such as `A-~B+` sit between the two grades they straddle.
static GRADE_RANKS: [(&str, u8); 25] = [
    ("A+", HIGHEST_RANK),
    ("A+~A", 23),
    ("A", 22),
    ("A~A-", 21),
    ("A-", 20),
    ("A-~B+", 19),
    ("B+", 18),
    ("B+~B", 17),
    ("B", 16),
    ("B~B-", 15),
    ("B-", 14),
    ("B-~C+", 13),
    ("C+", 12),
    ("C+~C", 11),
    ("C", 10),
    ("C~C-", 9),
    ("C-", 8),
    ("C-~D+", 7),
    ("D+", 6),
    ("D+~D", 5),
    ("D", 4),
    ("D~D-", 3),
    ("D-", 2),
    ("D-~E", 1),
    ("E", 0),
];

/// Tokens outside the letter scale that rank at the bottom with `E`.
static FLOOR_TOKENS: [&str; 2] = ["F", "P"];

const HIGHEST_RANK: u8 = 24;

/// Ordinal rank of a median-grade token; higher is better.
pub fn rank(token: &str) -> Result<u8> {
    if FLOOR_TOKENS.contains(&token) {
        return Ok(0);
    }
    GRADE_RANKS
        .iter()
        .find(|(known, _)| *known == token)
        .map(|(_, rank)| *rank)
        .ok_or_else(|| RankerError::UnknownGrade {
            token: token.to_string(),
        })
}

/// Every recognised token, best first.
pub fn tokens() -> impl Iterator<Item = &'static str> {
    GRADE_RANKS
        .iter()
        .map(|(token, _)| *token)
        .chain(FLOOR_TOKENS.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_has_twenty_five_levels() {
        assert_eq!(tokens().count(), 27);
        assert!(tokens().all(|token| rank(token).is_ok()));

        let mut ranks: Vec<u8> = tokens().map(|t| rank(t).unwrap()).collect();
        ranks.dedup();
        assert_eq!(ranks, (0..=HIGHEST_RANK).rev().collect::<Vec<_>>());
    }

    #[test]
    fn blended_tokens_rank_between_neighbours() {
        assert!(rank("A-").unwrap() > rank("A-~B+").unwrap());
        assert!(rank("A-~B+").unwrap() > rank("B+").unwrap());
        assert_eq!(rank("A+").unwrap(), HIGHEST_RANK);
    }

    #[test]
    fn failing_and_pass_tokens_share_the_floor() {
        assert_eq!(rank("F").unwrap(), 0);
        assert_eq!(rank("P").unwrap(), 0);
        assert_eq!(rank("E").unwrap(), 0);
    }

    #[test]
    fn unknown_tokens_are_rejected() {
        for token in ["A++", "a", "N/A", " B", ""] {
            assert!(matches!(
                rank(token),
                Err(RankerError::UnknownGrade { .. })
            ));
        }
    }
}
