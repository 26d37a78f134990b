//! [`ConjunctionPolicy`] — how day-of-month and day-of-week constraints combine.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Rule for combining the day-of-month and day-of-week sets.
///
/// `And` requires a day to be in both sets. `OrWhenBothRestricted` follows the
/// classic cron convention: when both fields are restricted a day matches if
/// it is in either set, otherwise the unrestricted field is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConjunctionPolicy {
    #[default]
    And,
    OrWhenBothRestricted,
}

impl ConjunctionPolicy {
    /// Combine the two membership tests for one calendar day.
    ///
    /// `dom_restricted` / `dow_restricted` say whether each field narrows its
    /// domain at all; they only matter under `OrWhenBothRestricted`.
    pub fn day_matches(
        self,
        in_dom: bool,
        in_dow: bool,
        dom_restricted: bool,
        dow_restricted: bool,
    ) -> bool {
        match self {
            ConjunctionPolicy::And => in_dom && in_dow,
            ConjunctionPolicy::OrWhenBothRestricted => {
                if dom_restricted && dow_restricted {
                    in_dom || in_dow
                } else {
                    in_dom && in_dow
                }
            }
        }
    }
}

impl fmt::Display for ConjunctionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConjunctionPolicy::And => f.write_str("and"),
            ConjunctionPolicy::OrWhenBothRestricted => f.write_str("or"),
        }
    }
}

impl FromStr for ConjunctionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "and" => Ok(ConjunctionPolicy::And),
            "or" | "or_when_both_restricted" | "or-when-both-restricted" => {
                Ok(ConjunctionPolicy::OrWhenBothRestricted)
            }
            other => Err(format!(
                "unknown conjunction policy '{other}', expected 'and' or 'or'"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn and_requires_both() {
        let p = ConjunctionPolicy::And;
        assert!(p.day_matches(true, true, true, true));
        assert!(!p.day_matches(true, false, true, true));
        assert!(!p.day_matches(false, true, false, false));
    }

    #[test]
    fn or_applies_only_when_both_restricted() {
        let p = ConjunctionPolicy::OrWhenBothRestricted;
        assert!(p.day_matches(true, false, true, true));
        assert!(p.day_matches(false, true, true, true));
        assert!(!p.day_matches(false, false, true, true));
        // Unrestricted day-of-week: day-of-month alone decides.
        assert!(!p.day_matches(false, true, true, false));
        assert!(p.day_matches(true, true, true, false));
    }

    #[test]
    fn parses_and_displays() {
        assert_eq!("AND".parse::<ConjunctionPolicy>(), Ok(ConjunctionPolicy::And));
        assert_eq!(
            "or_when_both_restricted".parse::<ConjunctionPolicy>(),
            Ok(ConjunctionPolicy::OrWhenBothRestricted)
        );
        assert!("xor".parse::<ConjunctionPolicy>().is_err());
        assert_eq!(ConjunctionPolicy::OrWhenBothRestricted.to_string(), "or");
    }
}
