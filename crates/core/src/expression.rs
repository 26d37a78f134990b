//! [`ScheduleExpression`] — the immutable result of parsing a cron line.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{CronError, Result};
use crate::field::ParsedField;
use crate::grammar::FieldKind;
use crate::scheduler::{ConstraintMap, OccurrenceSearch};

/// Whether an expression carried the optional sixth (year) field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "values", rename_all = "snake_case")]
pub enum YearField {
    Absent,
    Present(ParsedField),
}

impl YearField {
    pub fn as_field(&self) -> Option<&ParsedField> {
        match self {
            YearField::Absent => None,
            YearField::Present(field) => Some(field),
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, YearField::Present(_))
    }
}

/// A fully resolved cron expression plus the command it schedules.
///
/// Built once by the parser and never mutated, so it can be shared across
/// threads freely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleExpression {
    minutes: ParsedField,
    hours: ParsedField,
    days_of_month: ParsedField,
    months: ParsedField,
    days_of_week: ParsedField,
    years: YearField,
    command: String,
}

impl ScheduleExpression {
    /// Assemble an expression, enforcing that every mandatory field is
    /// non-empty and that the trimmed command is non-empty.
    pub fn new(
        minutes: ParsedField,
        hours: ParsedField,
        days_of_month: ParsedField,
        months: ParsedField,
        days_of_week: ParsedField,
        years: YearField,
        command: &str,
    ) -> Result<Self> {
        let mandatory = [&minutes, &hours, &days_of_month, &months, &days_of_week];
        for (kind, field) in FieldKind::MANDATORY.iter().zip(mandatory) {
            if field.is_empty() {
                return Err(CronError::MalformedExpression(format!(
                    "{kind} field resolved to no values"
                )));
            }
        }
        if let YearField::Present(field) = &years {
            if field.is_empty() {
                return Err(CronError::MalformedExpression(
                    "year field resolved to no values".to_string(),
                ));
            }
        }

        let command = command.trim();
        if command.is_empty() {
            return Err(CronError::MalformedExpression(
                "command cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            minutes,
            hours,
            days_of_month,
            months,
            days_of_week,
            years,
            command: command.to_string(),
        })
    }

    pub fn minutes(&self) -> &ParsedField {
        &self.minutes
    }

    pub fn hours(&self) -> &ParsedField {
        &self.hours
    }

    pub fn days_of_month(&self) -> &ParsedField {
        &self.days_of_month
    }

    pub fn months(&self) -> &ParsedField {
        &self.months
    }

    pub fn days_of_week(&self) -> &ParsedField {
        &self.days_of_week
    }

    pub fn years(&self) -> &YearField {
        &self.years
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Look up a field by kind. `Year` returns `None` when absent.
    pub fn field(&self, kind: FieldKind) -> Option<&ParsedField> {
        match kind {
            FieldKind::Minute => Some(&self.minutes),
            FieldKind::Hour => Some(&self.hours),
            FieldKind::DayOfMonth => Some(&self.days_of_month),
            FieldKind::Month => Some(&self.months),
            FieldKind::DayOfWeek => Some(&self.days_of_week),
            FieldKind::Year => self.years.as_field(),
        }
    }

    /// The constraint map the occurrence search consumes.
    pub fn constraints(&self) -> ConstraintMap {
        ConstraintMap::from(self)
    }

    /// Shorthand for running `search` over this expression's constraints.
    pub fn next_occurrences(
        &self,
        search: &OccurrenceSearch,
        from: NaiveDateTime,
        n: usize,
    ) -> Result<Vec<NaiveDateTime>> {
        search.next_n(&self.constraints(), from, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(values: &[u32]) -> ParsedField {
        ParsedField::new(values.to_vec())
    }

    #[test]
    fn command_is_trimmed() {
        let expr = ScheduleExpression::new(
            field(&[0]),
            field(&[1]),
            field(&[1]),
            field(&[1]),
            field(&[1]),
            YearField::Absent,
            "  /usr/bin/find  ",
        )
        .unwrap();
        assert_eq!(expr.command(), "/usr/bin/find");
        assert!(expr.field(FieldKind::Year).is_none());
    }

    #[test]
    fn blank_command_is_malformed() {
        let err = ScheduleExpression::new(
            field(&[0]),
            field(&[1]),
            field(&[1]),
            field(&[1]),
            field(&[1]),
            YearField::Absent,
            "   ",
        )
        .unwrap_err();
        assert!(matches!(err, CronError::MalformedExpression(_)));
    }

    #[test]
    fn empty_field_is_malformed() {
        let err = ScheduleExpression::new(
            field(&[0]),
            field(&[]),
            field(&[1]),
            field(&[1]),
            field(&[1]),
            YearField::Absent,
            "cmd",
        )
        .unwrap_err();
        assert!(err.to_string().contains("hour"));

        let err = ScheduleExpression::new(
            field(&[0]),
            field(&[1]),
            field(&[1]),
            field(&[1]),
            field(&[1]),
            YearField::Present(field(&[])),
            "cmd",
        )
        .unwrap_err();
        assert!(err.to_string().contains("year"));
    }

    #[test]
    fn year_field_is_reachable_by_kind() {
        let expr = ScheduleExpression::new(
            field(&[0]),
            field(&[1]),
            field(&[1]),
            field(&[1]),
            field(&[1]),
            YearField::Present(field(&[2030])),
            "cmd",
        )
        .unwrap();
        assert!(expr.years().is_present());
        assert_eq!(expr.field(FieldKind::Year).unwrap().values(), &[2030]);
    }
}
