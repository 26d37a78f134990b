use chrono::NaiveDateTime;
use clap::Parser;
use cronplan_core::{ConjunctionPolicy, Config};

/// Expand cron expressions and preview when they fire.
///
/// Each expression is parsed on a bounded worker pool and printed as a
/// field table in input order. With `--next`, the upcoming run times are
/// listed under each table.
#[derive(Parser, Debug)]
#[command(name = "cronplan", about = "Expand cron expressions and preview their next runs")]
pub struct CliArgs {
    /// Cron lines: `minute hour day-of-month month day-of-week [year] command...`
    #[arg(required = true, value_name = "EXPRESSION")]
    pub expressions: Vec<String>,

    /// Number of upcoming occurrences to list per expression
    #[arg(short = 'n', long = "next", default_value = "0")]
    pub next: usize,

    /// Search start, `YYYY-MM-DDTHH:MM` (default: local now)
    #[arg(long, value_parser = parse_from)]
    pub from: Option<NaiveDateTime>,

    /// Day-of-month / day-of-week combination: and, or
    #[arg(long)]
    pub conjunction: Option<ConjunctionPolicy>,

    /// Give up after scanning this many calendar years
    #[arg(long)]
    pub max_scan_years: Option<u32>,

    /// Reject the optional year field
    #[arg(long)]
    pub no_year_field: bool,

    /// Parse worker count
    #[arg(long)]
    pub workers: Option<usize>,

    /// Emit JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

impl CliArgs {
    /// Layer explicit flags over the environment-derived config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(policy) = self.conjunction {
            config.search.policy = policy;
        }
        if let Some(years) = self.max_scan_years {
            config.search.max_scan_years = years;
        }
        if self.no_year_field {
            config.parser.allow_year_field = false;
        }
        if let Some(workers) = self.workers {
            config.pool.workers = workers.max(1);
        }
    }
}

fn parse_from(raw: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .map_err(|e| format!("expected YYYY-MM-DDTHH:MM ({e})"))
}
