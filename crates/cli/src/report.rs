//! Per-expression results as printed by the binary.

use std::fmt::Write;

use chrono::NaiveDateTime;
use cronplan_core::render::render_table;
use cronplan_core::{OccurrenceSearch, ScheduleExpression};
use cronplan_pool::PoolError;
use serde::Serialize;
use tracing::warn;

const OCCURRENCE_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Serialize)]
pub struct Report {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<ScheduleExpression>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub occurrences: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Report {
    /// Combine a parse result with an occurrence search of `next` instants.
    /// A search failure keeps the parsed expression and records the error.
    pub fn build(
        input: &str,
        parsed: Result<ScheduleExpression, PoolError>,
        search: &OccurrenceSearch,
        from: NaiveDateTime,
        next: usize,
    ) -> Self {
        let expression = match parsed {
            Ok(expression) => expression,
            Err(e) => {
                return Self {
                    input: input.to_string(),
                    expression: None,
                    occurrences: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        };

        let (occurrences, error) = if next == 0 {
            (Vec::new(), None)
        } else {
            match expression.next_occurrences(search, from, next) {
                Ok(found) => (
                    found
                        .iter()
                        .map(|t| t.format(OCCURRENCE_FORMAT).to_string())
                        .collect(),
                    None,
                ),
                Err(e) => {
                    warn!(expression = %input, error = %e, "occurrence search failed");
                    (Vec::new(), Some(e.to_string()))
                }
            }
        };

        Self {
            input: input.to_string(),
            expression: Some(expression),
            occurrences,
            error,
        }
    }

    pub fn failed(&self) -> bool {
        self.error.is_some()
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        match &self.expression {
            Some(expression) => out.push_str(&render_table(expression)),
            None => {
                let _ = writeln!(out, "{}", self.input);
            }
        }
        for occurrence in &self.occurrences {
            let _ = writeln!(out, "next          {occurrence}");
        }
        if let Some(error) = &self.error {
            let _ = writeln!(out, "error         {error}");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use cronplan_core::{parse, CronError};

    fn from() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 28)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    #[test]
    fn successful_report_lists_occurrences() {
        let input = "0 9 * * * backup.sh";
        let report = Report::build(input, Ok(parse(input).unwrap()), &OccurrenceSearch::default(), from(), 2);

        assert!(!report.failed());
        assert_eq!(report.occurrences, vec!["2025-03-29 09:00", "2025-03-30 09:00"]);
        let text = report.to_text();
        assert!(text.starts_with("minute        0\n"));
        assert!(text.ends_with("next          2025-03-30 09:00\n"));
    }

    #[test]
    fn parse_failure_is_reported() {
        let report = Report::build(
            "0 24 * * * run",
            Err(PoolError::Parse(CronError::MalformedExpression("bad".into()))),
            &OccurrenceSearch::default(),
            from(),
            1,
        );
        assert!(report.failed());
        assert!(report.expression.is_none());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["input"], "0 24 * * * run");
        assert!(json.get("expression").is_none());
        assert!(json["error"].as_str().unwrap().contains("bad"));
    }

    #[test]
    fn exhausted_search_keeps_the_expression() {
        let input = "0 0 31 2 * never";
        let search = OccurrenceSearch::default().with_max_scan_years(2);
        let report = Report::build(input, Ok(parse(input).unwrap()), &search, from(), 1);

        assert!(report.failed());
        assert!(report.expression.is_some());
        assert!(report.to_text().contains("error "));
    }
}
