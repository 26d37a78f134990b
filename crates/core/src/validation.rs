//! Syntactic and range pre-check for a single cron field.
//!
//! Validation walks the comma-separated tokens of a field and fails on the
//! first bad one without ever materializing value lists. The token helpers at
//! the bottom are shared with [`crate::field`] so that anything the parser
//! accepts also passes validation.

use crate::error::{CronError, Result};
use crate::grammar::FieldSpec;

/// Validate one field string against its spec.
///
/// Accepted token shapes: `*`, `*/step`, `start/step`, `a-b`, and a plain
/// value (number, or a name on month and day-of-week fields).
pub fn validate_field(field: &str, spec: &FieldSpec) -> Result<()> {
    if field == "*" {
        return Ok(());
    }

    for part in field.split(',') {
        validate_part(part, spec, field)?;
    }
    Ok(())
}

fn validate_part(part: &str, spec: &FieldSpec, raw: &str) -> Result<()> {
    if part.is_empty() {
        return Err(CronError::syntax(spec.name, raw, "empty list element"));
    }
    if part == "*" {
        return Ok(());
    }

    if let Some((start, step)) = part.split_once('/') {
        if step.contains('/') {
            return Err(CronError::syntax(spec.name, raw, "more than one '/' in step"));
        }
        resolve_step(step, spec, raw)?;
        if start != "*" {
            resolve_single(start, spec, raw)?;
        }
        return Ok(());
    }

    if let Some((start, end)) = part.split_once('-') {
        if end.contains('-') {
            return Err(CronError::syntax(spec.name, raw, "more than one '-' in range"));
        }
        resolve_range(start, end, spec, raw)?;
        return Ok(());
    }

    resolve_single(part, spec, raw).map(|_| ())
}

// ── Shared token helpers ────────────────────────────────────────────

/// Parse an unsigned decimal number. Signs, spaces and other characters are
/// syntax errors; digit strings too large for `u32` are range errors.
fn parse_number(token: &str, spec: &FieldSpec, raw: &str) -> Result<u32> {
    if token.is_empty() {
        return Err(CronError::syntax(spec.name, raw, "missing value"));
    }
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CronError::syntax(
            spec.name,
            raw,
            format!("'{token}' is not a number"),
        ));
    }
    token.parse::<u32>().map_err(|_| {
        CronError::range(
            spec.name,
            raw,
            format!("'{token}' is too large"),
            spec.min,
            spec.max,
        )
    })
}

/// Resolve a single value: a recognized name, or a number within bounds.
pub(crate) fn resolve_single(token: &str, spec: &FieldSpec, raw: &str) -> Result<u32> {
    if let Some(value) = spec.lookup_name(token) {
        return Ok(value);
    }
    let value = parse_number(token, spec, raw)?;
    if !spec.contains(value) {
        return Err(CronError::range(
            spec.name,
            raw,
            format!("{value} is outside the field bounds"),
            spec.min,
            spec.max,
        ));
    }
    Ok(value)
}

/// Resolve a step divisor: a positive integer no larger than `max - min`.
pub(crate) fn resolve_step(token: &str, spec: &FieldSpec, raw: &str) -> Result<u32> {
    let step = parse_number(token, spec, raw)?;
    let limit = spec.max - spec.min;
    if step == 0 || step > limit {
        return Err(CronError::range(
            spec.name,
            raw,
            format!("step {step} must be between 1 and {limit}"),
            1,
            limit,
        ));
    }
    Ok(step)
}

/// Resolve both endpoints of `a-b`. Endpoints must be of the same kind (both
/// names or both numbers) and the start must not exceed the end.
pub(crate) fn resolve_range(
    start: &str,
    end: &str,
    spec: &FieldSpec,
    raw: &str,
) -> Result<(u32, u32)> {
    if start.is_empty() || end.is_empty() {
        return Err(CronError::syntax(spec.name, raw, "range is missing an endpoint"));
    }

    let (lo, hi) = match (spec.lookup_name(start), spec.lookup_name(end)) {
        (Some(lo), Some(hi)) => (lo, hi),
        (None, None) => (
            resolve_single(start, spec, raw)?,
            resolve_single(end, spec, raw)?,
        ),
        _ => {
            return Err(CronError::syntax(
                spec.name,
                raw,
                "range mixes a name and a number",
            ))
        }
    };

    if lo > hi {
        return Err(CronError::range(
            spec.name,
            raw,
            format!("range start {lo} exceeds end {hi}"),
            spec.min,
            spec.max,
        ));
    }
    Ok((lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{DAY_OF_MONTH, DAY_OF_WEEK, HOUR, MINUTE, MONTH, YEAR};

    fn is_syntax(res: Result<()>) -> bool {
        matches!(res, Err(CronError::Syntax { .. }))
    }

    fn is_range(res: Result<()>) -> bool {
        matches!(res, Err(CronError::Range { .. }))
    }

    #[test]
    fn accepts_common_shapes() {
        assert!(validate_field("*", &MINUTE).is_ok());
        assert!(validate_field("*/15", &MINUTE).is_ok());
        assert!(validate_field("5/10", &MINUTE).is_ok());
        assert!(validate_field("0,30", &MINUTE).is_ok());
        assert!(validate_field("9-17", &HOUR).is_ok());
        assert!(validate_field("1,15,31", &DAY_OF_MONTH).is_ok());
        assert!(validate_field("JAN-MAR", &MONTH).is_ok());
        assert!(validate_field("mon-fri", &DAY_OF_WEEK).is_ok());
        assert!(validate_field("7", &DAY_OF_WEEK).is_ok());
        assert!(validate_field("2024,2026", &YEAR).is_ok());
    }

    #[test]
    fn list_elements_are_checked_independently() {
        assert!(validate_field("1-5,7", &DAY_OF_WEEK).is_ok());
        assert!(validate_field("*/5,59", &MINUTE).is_ok());
        assert!(is_range(validate_field("1,60", &MINUTE)));
    }

    #[test]
    fn out_of_bounds_values_are_range_errors() {
        assert!(is_range(validate_field("60", &MINUTE)));
        assert!(is_range(validate_field("24", &HOUR)));
        assert!(is_range(validate_field("0", &DAY_OF_MONTH)));
        assert!(is_range(validate_field("13", &MONTH)));
        assert!(is_range(validate_field("8", &DAY_OF_WEEK)));
        assert!(is_range(validate_field("1969", &YEAR)));
        assert!(is_range(validate_field("99999999999", &MINUTE)));
    }

    #[test]
    fn malformed_tokens_are_syntax_errors() {
        assert!(is_syntax(validate_field("", &MINUTE)));
        assert!(is_syntax(validate_field("1,,2", &MINUTE)));
        assert!(is_syntax(validate_field("abc", &MINUTE)));
        assert!(is_syntax(validate_field("-1", &MINUTE)));
        assert!(is_syntax(validate_field("1-2-3", &HOUR)));
        assert!(is_syntax(validate_field("*/5/2", &MINUTE)));
        assert!(is_syntax(validate_field("+5", &MINUTE)));
        assert!(is_syntax(validate_field("1-5/2", &MINUTE)));
    }

    #[test]
    fn step_must_be_positive_and_bounded() {
        assert!(is_range(validate_field("*/0", &MINUTE)));
        assert!(is_range(validate_field("*/60", &MINUTE)));
        assert!(validate_field("*/59", &MINUTE).is_ok());
        assert!(is_syntax(validate_field("*/-1", &MINUTE)));
        assert!(is_syntax(validate_field("*/x", &MINUTE)));
    }

    #[test]
    fn step_start_follows_single_value_rule() {
        assert!(validate_field("FEB/3", &MONTH).is_ok());
        assert!(is_range(validate_field("70/5", &MINUTE)));
    }

    #[test]
    fn ranges_must_be_ordered_and_homogeneous() {
        assert!(is_range(validate_field("17-9", &HOUR)));
        assert!(is_range(validate_field("DEC-JAN", &MONTH)));
        assert!(is_syntax(validate_field("JAN-3", &MONTH)));
        assert!(is_syntax(validate_field("5-", &HOUR)));
    }

    #[test]
    fn names_are_rejected_on_numeric_fields() {
        assert!(is_syntax(validate_field("JAN", &MINUTE)));
        assert!(is_syntax(validate_field("MON", &YEAR)));
    }

    #[test]
    fn errors_carry_field_name_and_raw_text() {
        let err = validate_field("0,61", &MINUTE).unwrap_err();
        assert_eq!(err.field(), Some("minute"));
        assert!(err.to_string().contains("0,61"));
    }
}
