//! Resolution of a field string into its concrete value set.

use serde::Serialize;

use crate::error::{CronError, Result};
use crate::grammar::FieldSpec;
use crate::validation::{resolve_range, resolve_single, resolve_step};

/// The concrete integers a field expands to.
///
/// Order is whatever the resolution rule produced: ascending for wildcard,
/// step and range fields, input order for lists. Duplicates in a list are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParsedField(Vec<u32>);

impl ParsedField {
    pub fn new(values: Vec<u32>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[u32] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    pub fn contains(&self, value: u32) -> bool {
        self.0.contains(&value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<u32> for ParsedField {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<u32>> for ParsedField {
    fn from(values: Vec<u32>) -> Self {
        Self(values)
    }
}

/// Parse a field string. The first matching branch wins:
///
/// 1. `*` — every value in `[min, max]`
/// 2. contains `/` — `start/step` or `*/step`
/// 3. contains `-` — an inclusive range of names or numbers
/// 4. contains `,` — a list of single values
/// 5. a single value
///
/// Because branches apply to the whole field, a list that contains ranges or
/// steps (`1-5,7`) is rejected here even though each element would validate.
pub fn parse_field(field: &str, spec: &FieldSpec) -> Result<ParsedField> {
    if field == "*" {
        return Ok((spec.min..=spec.max).collect());
    }

    if let Some((start, step)) = field.split_once('/') {
        if step.contains('/') {
            return Err(CronError::syntax(spec.name, field, "more than one '/' in step"));
        }
        let step = resolve_step(step, spec, field)?;
        let start = if start == "*" {
            spec.min
        } else {
            resolve_single(start, spec, field)?
        };
        return Ok((start..=spec.max).step_by(step as usize).collect());
    }

    if let Some((start, end)) = field.split_once('-') {
        if end.contains('-') {
            return Err(CronError::syntax(spec.name, field, "more than one '-' in range"));
        }
        let (lo, hi) = resolve_range(start, end, spec, field)?;
        return Ok((lo..=hi).collect());
    }

    if field.contains(',') {
        return field
            .split(',')
            .map(|token| resolve_single(token, spec, field))
            .collect::<Result<Vec<_>>>()
            .map(ParsedField::new);
    }

    resolve_single(field, spec, field).map(|value| ParsedField::new(vec![value]))
}
