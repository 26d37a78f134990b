//! Field bounds and name tables for every positional cron field.
//!
//! The tables are plain `static` data: built at compile time, shared by every
//! thread, never mutated.

use serde::Serialize;

// ── Token tables ────────────────────────────────────────────────────

/// Bidirectional three-letter name table (e.g. `JAN` ↔ 1).
#[derive(Debug)]
pub struct TokenTable {
    names: &'static [&'static str],
    first: u32,
}

impl TokenTable {
    const fn new(names: &'static [&'static str], first: u32) -> Self {
        Self { names, first }
    }

    /// Resolve a name to its number, ignoring ASCII case.
    pub fn lookup(&self, token: &str) -> Option<u32> {
        self.names
            .iter()
            .position(|name| name.eq_ignore_ascii_case(token))
            .map(|idx| self.first + idx as u32)
    }

    /// Reverse lookup: number back to its canonical upper-case name.
    pub fn name_of(&self, value: u32) -> Option<&'static str> {
        let idx = value.checked_sub(self.first)? as usize;
        self.names.get(idx).copied()
    }
}

/// JAN=1 … DEC=12.
pub static MONTH_TOKENS: TokenTable = TokenTable::new(
    &[
        "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
    ],
    1,
);

/// SUN=0, MON=1 … SAT=6. Numeric 7 is also Sunday but has no name of its own.
pub static WEEKDAY_TOKENS: TokenTable =
    TokenTable::new(&["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"], 0);

// ── Field kinds ─────────────────────────────────────────────────────

/// The positional fields of a cron expression, in input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Minute,
    Hour,
    DayOfMonth,
    Month,
    DayOfWeek,
    Year,
}

impl FieldKind {
    /// The five fields every expression must carry.
    pub const MANDATORY: [FieldKind; 5] = [
        FieldKind::Minute,
        FieldKind::Hour,
        FieldKind::DayOfMonth,
        FieldKind::Month,
        FieldKind::DayOfWeek,
    ];

    pub fn spec(self) -> &'static FieldSpec {
        match self {
            FieldKind::Minute => &MINUTE,
            FieldKind::Hour => &HOUR,
            FieldKind::DayOfMonth => &DAY_OF_MONTH,
            FieldKind::Month => &MONTH,
            FieldKind::DayOfWeek => &DAY_OF_WEEK,
            FieldKind::Year => &YEAR,
        }
    }

    /// Human-readable label, used in errors and rendering.
    pub fn label(self) -> &'static str {
        self.spec().name
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ── Field specs ─────────────────────────────────────────────────────

/// Bounds and optional name table for one field kind.
#[derive(Debug)]
pub struct FieldSpec {
    pub kind: FieldKind,
    pub name: &'static str,
    pub min: u32,
    pub max: u32,
    pub tokens: Option<&'static TokenTable>,
}

impl FieldSpec {
    /// Number of distinct values in `[min, max]`.
    pub fn width(&self) -> u32 {
        self.max - self.min + 1
    }

    /// Resolve a name through this field's table, if it has one.
    pub fn lookup_name(&self, token: &str) -> Option<u32> {
        self.tokens.and_then(|table| table.lookup(token))
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

pub static MINUTE: FieldSpec = FieldSpec {
    kind: FieldKind::Minute,
    name: "minute",
    min: 0,
    max: 59,
    tokens: None,
};

pub static HOUR: FieldSpec = FieldSpec {
    kind: FieldKind::Hour,
    name: "hour",
    min: 0,
    max: 23,
    tokens: None,
};

pub static DAY_OF_MONTH: FieldSpec = FieldSpec {
    kind: FieldKind::DayOfMonth,
    name: "day of month",
    min: 1,
    max: 31,
    tokens: None,
};

pub static MONTH: FieldSpec = FieldSpec {
    kind: FieldKind::Month,
    name: "month",
    min: 1,
    max: 12,
    tokens: Some(&MONTH_TOKENS),
};

pub static DAY_OF_WEEK: FieldSpec = FieldSpec {
    kind: FieldKind::DayOfWeek,
    name: "day of week",
    min: 0,
    max: 7,
    tokens: Some(&WEEKDAY_TOKENS),
};

pub static YEAR: FieldSpec = FieldSpec {
    kind: FieldKind::Year,
    name: "year",
    min: 1970,
    max: 2099,
    tokens: None,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_lookup_is_case_insensitive() {
        assert_eq!(MONTH_TOKENS.lookup("JAN"), Some(1));
        assert_eq!(MONTH_TOKENS.lookup("dec"), Some(12));
        assert_eq!(MONTH_TOKENS.lookup("Jun"), Some(6));
        assert_eq!(MONTH_TOKENS.lookup("JANUARY"), None);
    }

    #[test]
    fn weekday_numbering_starts_at_sunday_zero() {
        assert_eq!(WEEKDAY_TOKENS.lookup("SUN"), Some(0));
        assert_eq!(WEEKDAY_TOKENS.lookup("mon"), Some(1));
        assert_eq!(WEEKDAY_TOKENS.lookup("SAT"), Some(6));
        assert_eq!(WEEKDAY_TOKENS.name_of(5), Some("FRI"));
        assert_eq!(WEEKDAY_TOKENS.name_of(7), None);
    }

    #[test]
    fn reverse_lookup_below_first_is_none() {
        assert_eq!(MONTH_TOKENS.name_of(0), None);
        assert_eq!(MONTH_TOKENS.name_of(12), Some("DEC"));
    }

    #[test]
    fn only_month_and_weekday_have_names() {
        assert!(MINUTE.lookup_name("JAN").is_none());
        assert!(YEAR.lookup_name("MON").is_none());
        assert_eq!(MONTH.lookup_name("mar"), Some(3));
        assert_eq!(DAY_OF_WEEK.lookup_name("Wed"), Some(3));
    }

    #[test]
    fn bounds_match_field_kinds() {
        assert_eq!((MINUTE.min, MINUTE.max), (0, 59));
        assert_eq!((HOUR.min, HOUR.max), (0, 23));
        assert_eq!((DAY_OF_MONTH.min, DAY_OF_MONTH.max), (1, 31));
        assert_eq!((MONTH.min, MONTH.max), (1, 12));
        assert_eq!((DAY_OF_WEEK.min, DAY_OF_WEEK.max), (0, 7));
        assert_eq!((YEAR.min, YEAR.max), (1970, 2099));
        assert_eq!(DAY_OF_WEEK.width(), 8);
    }
}
