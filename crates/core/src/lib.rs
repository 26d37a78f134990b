//! Cron schedule parsing and occurrence search.
//!
//! This crate provides:
//! - Field grammar with month and weekday name tables
//! - Per-field validation and resolution into concrete value sets
//! - [`ScheduleExpression`] assembly from a raw cron line, with optional year
//! - Year-scanning search for the next `n` matching instants
//! - Environment-driven configuration and table rendering

pub mod config;
pub mod error;
pub mod expression;
pub mod field;
pub mod grammar;
pub mod parser;
pub mod render;
pub mod scheduler;
pub mod validation;

pub use config::Config;
pub use error::{CronError, Result};
pub use expression::{ScheduleExpression, YearField};
pub use field::{parse_field, ParsedField};
pub use grammar::{FieldKind, FieldSpec};
pub use parser::{parse, CronParser};
pub use scheduler::{ConjunctionPolicy, ConstraintMap, OccurrenceSearch};
pub use validation::validate_field;
