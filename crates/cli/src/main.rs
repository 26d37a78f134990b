mod cli;
mod report;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use futures::future::join_all;
use tracing::{debug, info};

use cronplan_core::config::{load_dotenv, Config};
use cronplan_core::{CronParser, OccurrenceSearch};
use cronplan_pool::ParsePool;

use crate::cli::CliArgs;
use crate::report::Report;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    load_dotenv();
    let args = CliArgs::parse();

    let mut config = Config::from_env();
    args.apply(&mut config);
    config.log_summary();

    let from = args.from.unwrap_or_else(|| Local::now().naive_local());
    let search = OccurrenceSearch::new(&config.search);
    let pool = ParsePool::new(&config.pool, CronParser::new(config.parser.clone()));

    let handles = args
        .expressions
        .iter()
        .map(|raw| pool.submit_parse(raw.as_str()))
        .collect::<Result<Vec<_>, _>>()
        .context("failed to submit expressions")?;
    let results = join_all(handles).await;

    let outcome = pool.shutdown().await;
    debug!(?outcome, "parse pool stopped");

    let reports: Vec<Report> = args
        .expressions
        .iter()
        .zip(results)
        .map(|(raw, parsed)| Report::build(raw, parsed, &search, from, args.next))
        .collect();

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&reports).context("failed to encode reports")?
        );
    } else {
        for report in &reports {
            print!("{}", report.to_text());
        }
    }

    let failed = reports.iter().filter(|r| r.failed()).count();
    info!(total = reports.len(), failed, "done");
    if failed > 0 {
        anyhow::bail!("{failed} of {} expressions failed", reports.len());
    }
    Ok(())
}
