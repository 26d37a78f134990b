//! Splits a raw cron line and drives validation and parsing per field.

use tracing::debug;

use crate::config::ParserConfig;
use crate::error::{CronError, Result};
use crate::expression::{ScheduleExpression, YearField};
use crate::field::{parse_field, ParsedField};
use crate::grammar::FieldKind;
use crate::validation::validate_field;

const MANDATORY_FIELDS: usize = 5;

/// Parses `minute hour day-of-month month day-of-week [year] command...`.
///
/// With year support off the line must be exactly five fields plus one
/// command token. With it on, a sixth numeric-looking token followed by at
/// least one more token is taken as the year, and the command may span any
/// number of trailing tokens (joined by single spaces).
#[derive(Debug, Clone, Default)]
pub struct CronParser {
    config: ParserConfig,
}

impl CronParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn parse(&self, raw: &str) -> Result<ScheduleExpression> {
        let tokens: Vec<&str> = raw.split_whitespace().collect();

        if tokens.len() < MANDATORY_FIELDS + 1 {
            return Err(CronError::MalformedExpression(format!(
                "expected at least {} fields (5 schedule fields and a command), found {}",
                MANDATORY_FIELDS + 1,
                tokens.len()
            )));
        }
        if !self.config.allow_year_field && tokens.len() != MANDATORY_FIELDS + 1 {
            return Err(CronError::MalformedExpression(format!(
                "expected exactly {} fields, found {}",
                MANDATORY_FIELDS + 1,
                tokens.len()
            )));
        }

        let mut fields = Vec::with_capacity(MANDATORY_FIELDS);
        for (kind, text) in FieldKind::MANDATORY.iter().zip(&tokens) {
            fields.push(parse_checked(text, *kind)?);
        }

        let (years, command_tokens) = if self.config.allow_year_field
            && tokens.len() > MANDATORY_FIELDS + 1
            && looks_like_year(tokens[MANDATORY_FIELDS])
        {
            let years = parse_checked(tokens[MANDATORY_FIELDS], FieldKind::Year)?;
            (YearField::Present(years), &tokens[MANDATORY_FIELDS + 1..])
        } else {
            (YearField::Absent, &tokens[MANDATORY_FIELDS..])
        };

        let command = command_tokens.join(" ");

        let [minutes, hours, days_of_month, months, days_of_week]: [ParsedField; MANDATORY_FIELDS] =
            fields.try_into().map_err(|_| {
                CronError::MalformedExpression("missing schedule field".to_string())
            })?;
        let expression = ScheduleExpression::new(
            minutes,
            hours,
            days_of_month,
            months,
            days_of_week,
            years,
            &command,
        )?;

        debug!(
            raw = %raw.trim(),
            has_year = expression.years().is_present(),
            "parsed cron expression"
        );
        Ok(expression)
    }
}

/// Validate then parse one field.
fn parse_checked(text: &str, kind: FieldKind) -> Result<ParsedField> {
    let spec = kind.spec();
    validate_field(text, spec)?;
    parse_field(text, spec)
}

/// A year token is built only from digits and the field operators.
fn looks_like_year(token: &str) -> bool {
    token
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '*' | ',' | '-' | '/'))
}

/// Parse with the default configuration (year support on).
pub fn parse(raw: &str) -> Result<ScheduleExpression> {
    CronParser::default().parse(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict() -> CronParser {
        CronParser::new(ParserConfig {
            allow_year_field: false,
        })
    }

    #[test]
    fn parses_simple_expression() {
        let expr = parse("*/15 0 1,15 * 1-5 /usr/bin/find").unwrap();
        assert_eq!(expr.minutes().values(), &[0, 15, 30, 45]);
        assert_eq!(expr.hours().values(), &[0]);
        assert_eq!(expr.days_of_month().values(), &[1, 15]);
        assert_eq!(expr.months().values(), (1..=12).collect::<Vec<_>>().as_slice());
        assert_eq!(expr.days_of_week().values(), &[1, 2, 3, 4, 5]);
        assert_eq!(expr.years(), &YearField::Absent);
        assert_eq!(expr.command(), "/usr/bin/find");
    }

    #[test]
    fn too_few_fields_is_malformed() {
        assert!(matches!(
            parse("*/15 0 * 1-5 /usr/bin/find"),
            Err(CronError::MalformedExpression(_))
        ));
        assert!(matches!(
            parse("*/15 0 * 1-5"),
            Err(CronError::MalformedExpression(_))
        ));
        assert!(matches!(parse(""), Err(CronError::MalformedExpression(_))));
    }

    #[test]
    fn whitespace_runs_are_collapsed() {
        let expr = parse("  0\t9   *  *  MON-FRI   backup.sh   --full  ").unwrap();
        assert_eq!(expr.command(), "backup.sh --full");
        assert_eq!(expr.days_of_week().values(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn year_field_is_detected() {
        let expr = parse("0 0 1 JAN * 2030 /usr/bin/new-year").unwrap();
        assert_eq!(
            expr.years(),
            &YearField::Present(ParsedField::new(vec![2030]))
        );
        assert_eq!(expr.command(), "/usr/bin/new-year");

        let expr = parse("0 0 1 1 * 2025-2027 run").unwrap();
        assert_eq!(expr.years().as_field().unwrap().values(), &[2025, 2026, 2027]);
    }

    #[test]
    fn numeric_looking_sixth_token_without_command_is_the_command() {
        let expr = parse("0 0 1 1 * 2030").unwrap();
        assert_eq!(expr.years(), &YearField::Absent);
        assert_eq!(expr.command(), "2030");
    }

    #[test]
    fn invalid_year_is_rejected() {
        assert!(matches!(
            parse("0 0 1 1 * 2100 run"),
            Err(CronError::Range { field: "year", .. })
        ));
    }

    #[test]
    fn strict_mode_requires_single_command_token() {
        let parser = strict();
        assert_eq!(parser.parse("0 0 * * * run").unwrap().command(), "run");
        assert!(matches!(
            parser.parse("0 0 * * * run --now"),
            Err(CronError::MalformedExpression(_))
        ));
        assert!(matches!(
            parser.parse("0 0 * * * 2030 run"),
            Err(CronError::MalformedExpression(_))
        ));
    }

    #[test]
    fn first_invalid_field_is_reported() {
        let err = parse("0 24 32 * * cmd").unwrap_err();
        assert_eq!(err.field(), Some("hour"));

        let err = parse("-1 0 1 * * /usr/bin/find").unwrap_err();
        assert_eq!(err.field(), Some("minute"));

        let err = parse("0 0 1 13 * /usr/bin/find").unwrap_err();
        assert_eq!(err.field(), Some("month"));
    }

    #[test]
    fn sunday_alias_is_accepted() {
        let expr = parse("0 0 1 * 7 /usr/bin/find").unwrap();
        assert_eq!(expr.days_of_week().values(), &[7]);
    }

    #[test]
    fn parser_precedence_errors_surface() {
        let err = parse("0 0 * * 1-5,7 cmd").unwrap_err();
        assert!(matches!(err, CronError::Syntax { field: "day of week", .. }));
    }
}
