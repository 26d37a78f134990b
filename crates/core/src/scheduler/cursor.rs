//! Transient per-search state: sorted domains and the accumulating cursor.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::error::Result;
use crate::field::ParsedField;
use crate::grammar::FieldKind;

use super::constraints::ConstraintMap;
use super::policy::ConjunctionPolicy;

/// Sort and deduplicate a field for iteration. The field itself keeps its
/// original order; only this search-local copy is normalized.
fn sorted_unique(field: &ParsedField) -> Vec<u32> {
    let mut values = field.values().to_vec();
    values.sort_unstable();
    values.dedup();
    values
}

// ── Day filter ──────────────────────────────────────────────────────

/// Day-level membership test combining day-of-month and day-of-week.
#[derive(Debug, Clone)]
pub(crate) struct DayFilter {
    dom: [bool; 32],
    dow: [bool; 7],
    dom_restricted: bool,
    dow_restricted: bool,
    policy: ConjunctionPolicy,
}

impl DayFilter {
    pub(crate) fn new(doms: &ParsedField, dows: &ParsedField, policy: ConjunctionPolicy) -> Self {
        let mut dom = [false; 32];
        for day in doms.iter().filter(|d| *d < 32) {
            dom[day as usize] = true;
        }
        // 7 folds onto 0: both mean Sunday.
        let mut dow = [false; 7];
        for weekday in dows.iter().filter(|w| *w <= 7) {
            dow[(weekday % 7) as usize] = true;
        }

        Self {
            dom_restricted: !dom[1..].iter().all(|hit| *hit),
            dow_restricted: !dow.iter().all(|hit| *hit),
            dom,
            dow,
            policy,
        }
    }

    pub(crate) fn matches(&self, date: NaiveDate) -> bool {
        let in_dom = self.dom[date.day() as usize];
        let in_dow = self.dow[date.weekday().num_days_from_sunday() as usize];
        self.policy
            .day_matches(in_dom, in_dow, self.dom_restricted, self.dow_restricted)
    }

    /// Under OR semantics a day outside the day-of-month set can still match
    /// through its weekday, so every calendar day has to be visited.
    fn visits_every_day(&self) -> bool {
        self.policy == ConjunctionPolicy::OrWhenBothRestricted
            && self.dom_restricted
            && self.dow_restricted
    }
}

// ── Domains ─────────────────────────────────────────────────────────

/// Search-local, ascending copies of every constraint.
#[derive(Debug)]
pub(crate) struct Domains {
    pub(crate) months: Vec<u32>,
    pub(crate) days: Vec<u32>,
    pub(crate) hours: Vec<u32>,
    pub(crate) minutes: Vec<u32>,
    pub(crate) years: Option<Vec<u32>>,
    pub(crate) day_filter: DayFilter,
}

impl Domains {
    pub(crate) fn from_constraints(
        constraints: &ConstraintMap,
        policy: ConjunctionPolicy,
    ) -> Result<Self> {
        let minutes = constraints.require(FieldKind::Minute)?;
        let hours = constraints.require(FieldKind::Hour)?;
        let doms = constraints.require(FieldKind::DayOfMonth)?;
        let months = constraints.require(FieldKind::Month)?;
        let dows = constraints.require(FieldKind::DayOfWeek)?;
        let years = match constraints.years() {
            Some(_) => Some(sorted_unique(constraints.require(FieldKind::Year)?)),
            None => None,
        };

        let day_filter = DayFilter::new(doms, dows, policy);
        let days = if day_filter.visits_every_day() {
            (1..=31).collect()
        } else {
            sorted_unique(doms)
        };

        Ok(Self {
            months: sorted_unique(months),
            days,
            hours: sorted_unique(hours),
            minutes: sorted_unique(minutes),
            years,
            day_filter,
        })
    }

    /// First permitted year at or after `year`, or `None` once the year
    /// constraint is exhausted. Without a year constraint every year is permitted.
    pub(crate) fn next_permitted_year(&self, year: i32) -> Option<i32> {
        match &self.years {
            None => Some(year),
            Some(years) => years
                .iter()
                .map(|y| *y as i32)
                .find(|y| *y >= year),
        }
    }
}

// ── Cursor ──────────────────────────────────────────────────────────

/// State of one search call: the year being scanned, how many instants are
/// wanted, and what has been collected so far.
#[derive(Debug)]
pub(crate) struct OccurrenceCursor {
    from: NaiveDateTime,
    scan_year: i32,
    years_scanned: u32,
    target: usize,
    found: Vec<NaiveDateTime>,
}

impl OccurrenceCursor {
    pub(crate) fn new(from: NaiveDateTime, target: usize) -> Self {
        Self {
            from,
            scan_year: from.year(),
            years_scanned: 0,
            target,
            found: Vec::with_capacity(target.min(1024)),
        }
    }

    pub(crate) fn scan_year(&self) -> i32 {
        self.scan_year
    }

    pub(crate) fn years_scanned(&self) -> u32 {
        self.years_scanned
    }

    pub(crate) fn found(&self) -> usize {
        self.found.len()
    }

    pub(crate) fn jump_to(&mut self, year: i32) {
        self.scan_year = year;
    }

    /// Enumerate every candidate in the current scan year, in ascending
    /// order. Returns `true` as soon as the target count is reached.
    pub(crate) fn scan(&mut self, domains: &Domains) -> bool {
        let year = self.scan_year;
        let from = self.from;
        let first_year = year == from.year();
        self.years_scanned += 1;

        for &month in &domains.months {
            if first_year && month < from.month() {
                continue;
            }
            for &day in &domains.days {
                // Feb 30, Apr 31, Feb 29 outside leap years: not a date, skip.
                let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
                    continue;
                };
                if date < from.date() || !domains.day_filter.matches(date) {
                    continue;
                }
                for &hour in &domains.hours {
                    for &minute in &domains.minutes {
                        let Some(instant) = date.and_hms_opt(hour, minute, 0) else {
                            continue;
                        };
                        if instant < from {
                            continue;
                        }
                        self.found.push(instant);
                        if self.found.len() >= self.target {
                            return true;
                        }
                    }
                }
            }
        }

        self.scan_year += 1;
        false
    }

    pub(crate) fn finish(self) -> Vec<NaiveDateTime> {
        self.found
    }
}
