//! [`OccurrenceSearch`] — year-by-year enumeration of upcoming instants.

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::config::SearchConfig;
use crate::error::{CronError, Result};

use super::constraints::ConstraintMap;
use super::cursor::{Domains, OccurrenceCursor};
use super::policy::ConjunctionPolicy;

/// Finds the next `n` instants (minute precision) satisfying a
/// [`ConstraintMap`].
///
/// Results are strictly increasing and never earlier than `from`. The search
/// scans at most `max_scan_years` calendar years; constraint sets that can
/// never be satisfied together (e.g. day 31 of February) end in
/// [`CronError::SearchExhausted`] instead of looping forever.
#[derive(Debug, Clone)]
pub struct OccurrenceSearch {
    policy: ConjunctionPolicy,
    max_scan_years: u32,
}

impl OccurrenceSearch {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            policy: config.policy,
            max_scan_years: config.max_scan_years,
        }
    }

    pub fn with_policy(mut self, policy: ConjunctionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_max_scan_years(mut self, years: u32) -> Self {
        self.max_scan_years = years;
        self
    }

    pub fn policy(&self) -> ConjunctionPolicy {
        self.policy
    }

    pub fn max_scan_years(&self) -> u32 {
        self.max_scan_years
    }

    /// Collect up to `n` upcoming instants, starting at `from` (inclusive).
    ///
    /// Fewer than `n` instants are returned only when a year constraint runs
    /// out of permitted years. Any other shortfall within the scan cap is a
    /// [`CronError::SearchExhausted`].
    pub fn next_n(
        &self,
        constraints: &ConstraintMap,
        from: NaiveDateTime,
        n: usize,
    ) -> Result<Vec<NaiveDateTime>> {
        if n == 0 {
            return Err(CronError::Precondition(
                "occurrence count must be positive".to_string(),
            ));
        }
        if self.max_scan_years == 0 {
            return Err(CronError::Precondition(
                "max_scan_years must be positive".to_string(),
            ));
        }

        let domains = Domains::from_constraints(constraints, self.policy)?;
        let mut cursor = OccurrenceCursor::new(from, n);

        while cursor.years_scanned() < self.max_scan_years {
            let Some(year) = domains.next_permitted_year(cursor.scan_year()) else {
                debug!(
                    found = cursor.found(),
                    wanted = n,
                    "year constraint exhausted"
                );
                return Ok(cursor.finish());
            };
            cursor.jump_to(year);

            if cursor.scan(&domains) {
                return Ok(cursor.finish());
            }
            debug!(
                year,
                found = cursor.found(),
                wanted = n,
                "scan year exhausted, advancing"
            );
        }

        warn!(
            years = self.max_scan_years,
            found = cursor.found(),
            wanted = n,
            "occurrence search hit the year cap"
        );
        Err(CronError::SearchExhausted {
            years: self.max_scan_years,
            found: cursor.found(),
            wanted: n,
        })
    }
}

impl Default for OccurrenceSearch {
    fn default() -> Self {
        Self::new(&SearchConfig::default())
    }
}
