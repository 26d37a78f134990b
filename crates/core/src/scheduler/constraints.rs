//! [`ConstraintMap`] — resolved field sets handed to the occurrence search.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::error::{CronError, Result};
use crate::expression::ScheduleExpression;
use crate::field::{parse_field, ParsedField};
use crate::grammar::FieldKind;
use crate::validation::validate_field;

use super::cursor::DayFilter;
use super::policy::ConjunctionPolicy;

/// Field kind → resolved value set.
///
/// The five mandatory kinds must be present and non-empty before a search;
/// `Year` is optional and, when present, limits which years are scanned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintMap {
    fields: BTreeMap<FieldKind, ParsedField>,
}

impl ConstraintMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and parse the five mandatory fields from their source text.
    pub fn from_fields(fields: [&str; 5]) -> Result<Self> {
        let mut map = Self::new();
        for (kind, text) in FieldKind::MANDATORY.into_iter().zip(fields) {
            let spec = kind.spec();
            validate_field(text, spec)?;
            map.insert(kind, parse_field(text, spec)?);
        }
        Ok(map)
    }

    pub fn insert(&mut self, kind: FieldKind, field: ParsedField) -> Option<ParsedField> {
        self.fields.insert(kind, field)
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, kind: FieldKind, field: ParsedField) -> Self {
        self.insert(kind, field);
        self
    }

    pub fn get(&self, kind: FieldKind) -> Option<&ParsedField> {
        self.fields.get(&kind)
    }

    pub fn years(&self) -> Option<&ParsedField> {
        self.get(FieldKind::Year)
    }

    /// Fetch a field that must be present and non-empty.
    pub(crate) fn require(&self, kind: FieldKind) -> Result<&ParsedField> {
        match self.fields.get(&kind) {
            Some(field) if !field.is_empty() => Ok(field),
            Some(_) => Err(CronError::Precondition(format!(
                "{kind} constraint has no values"
            ))),
            None => Err(CronError::Precondition(format!(
                "{kind} constraint is missing"
            ))),
        }
    }

    /// Whether a single instant satisfies every constraint. Seconds are
    /// ignored; missing or empty constraints never match.
    pub fn matches(&self, instant: NaiveDateTime, policy: ConjunctionPolicy) -> bool {
        let lookup = |kind| self.require(kind).ok();
        let (Some(minutes), Some(hours), Some(doms), Some(months), Some(dows)) = (
            lookup(FieldKind::Minute),
            lookup(FieldKind::Hour),
            lookup(FieldKind::DayOfMonth),
            lookup(FieldKind::Month),
            lookup(FieldKind::DayOfWeek),
        ) else {
            return false;
        };

        if let Some(years) = self.years() {
            let in_years = u32::try_from(instant.year())
                .map(|year| years.contains(year))
                .unwrap_or(false);
            if !in_years {
                return false;
            }
        }

        months.contains(instant.month())
            && hours.contains(instant.hour())
            && minutes.contains(instant.minute())
            && DayFilter::new(doms, dows, policy).matches(instant.date())
    }
}

impl From<&ScheduleExpression> for ConstraintMap {
    fn from(expr: &ScheduleExpression) -> Self {
        let mut map = Self::new();
        for kind in FieldKind::MANDATORY {
            if let Some(field) = expr.field(kind) {
                map.insert(kind, field.clone());
            }
        }
        if let Some(years) = expr.years().as_field() {
            map.insert(FieldKind::Year, years.clone());
        }
        map
    }
}

impl FromIterator<(FieldKind, ParsedField)> for ConstraintMap {
    fn from_iter<I: IntoIterator<Item = (FieldKind, ParsedField)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
