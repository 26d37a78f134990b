//! Occurrence search: enumerate upcoming instants that satisfy a schedule.
//!
//! The search brute-forces `{month} × {day} × {hour} × {minute}` for one
//! calendar year at a time, advancing the year until enough instants are
//! collected or the scan cap is hit. Field domains are small, so no
//! closed-form next-time computation is attempted.
//!
//! - [`ConstraintMap`] — resolved field sets keyed by [`FieldKind`](crate::grammar::FieldKind)
//! - [`ConjunctionPolicy`] — how day-of-month and day-of-week combine
//! - [`OccurrenceSearch`] — the year-scanning search itself

mod constraints;
mod core;
mod cursor;
mod policy;


pub use self::constraints::ConstraintMap;
pub use self::core::OccurrenceSearch;
pub use self::policy::ConjunctionPolicy;
