//! Plain-text table rendering of a [`ScheduleExpression`].

use std::fmt::Write;

use crate::expression::ScheduleExpression;
use crate::field::ParsedField;
use crate::grammar::FieldKind;

const LABEL_WIDTH: usize = 14;
const SEPARATOR: &str = "****************************";

fn join_values(field: Option<&ParsedField>) -> String {
    match field {
        Some(field) if !field.is_empty() => field
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" "),
        _ => "N/A".to_string(),
    }
}

/// One line per field (year only when present), then the command and a
/// separator line. Every line ends with `\n`.
pub fn render_table(expr: &ScheduleExpression) -> String {
    let mut out = String::new();
    let mut kinds = FieldKind::MANDATORY.to_vec();
    if expr.years().is_present() {
        kinds.push(FieldKind::Year);
    }

    for kind in kinds {
        let _ = writeln!(
            out,
            "{:<width$}{}",
            kind.label(),
            join_values(expr.field(kind)),
            width = LABEL_WIDTH
        );
    }
    let _ = writeln!(out, "{:<width$}{}", "command", expr.command(), width = LABEL_WIDTH);
    out.push_str(SEPARATOR);
    out.push('\n');
    out
}
