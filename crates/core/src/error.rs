use thiserror::Error;

/// Errors produced while validating, parsing or searching a cron schedule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CronError {
    /// Malformed token shape: wrong split count on `/`, `-` or `,`, or a
    /// non-numeric token where a number is required.
    #[error("invalid {field} field '{text}': {reason}")]
    Syntax {
        field: &'static str,
        text: String,
        reason: String,
    },

    /// A numeric value (or step) outside the bounds allowed for its field.
    #[error("{field} value out of range in '{text}': {reason} (allowed {min}-{max})")]
    Range {
        field: &'static str,
        text: String,
        reason: String,
        min: u32,
        max: u32,
    },

    /// Wrong total field count or an empty command.
    #[error("malformed cron expression: {0}")]
    MalformedExpression(String),

    /// The occurrence search hit its year cap before collecting enough instants.
    #[error("no matching occurrence within {years} scanned years (found {found} of {wanted})")]
    SearchExhausted {
        years: u32,
        found: usize,
        wanted: usize,
    },

    /// A caller-supplied argument violated a documented precondition.
    #[error("precondition violated: {0}")]
    Precondition(String),
}

impl CronError {
    pub(crate) fn syntax(field: &'static str, text: &str, reason: impl Into<String>) -> Self {
        Self::Syntax {
            field,
            text: text.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn range(
        field: &'static str,
        text: &str,
        reason: impl Into<String>,
        min: u32,
        max: u32,
    ) -> Self {
        Self::Range {
            field,
            text: text.to_string(),
            reason: reason.into(),
            min,
            max,
        }
    }

    /// Name of the field that failed, for syntax and range errors.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Syntax { field, .. } | Self::Range { field, .. } => Some(field),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CronError>;
