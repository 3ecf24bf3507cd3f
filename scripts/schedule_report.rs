use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use paceline::clock::{Clock, SystemClock};
use paceline::model::RecurringItem;
use paceline::schedule::{dueness_report, format_human_summary};

#[derive(Parser)]
#[command(
    name = "schedule_report",
    about = "Dueness report over a JSON export of recurring items"
)]
struct Cli {
    /// Path to a JSON array of recurring items.
    #[arg(value_name = "PATH")]
    input: PathBuf,

    /// Evaluate dueness against this date instead of the system clock.
    #[arg(long, value_name = "YYYY-MM-DD")]
    today: Option<NaiveDate>,

    /// Emit the report as JSON instead of the human summary.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    paceline::logging::init();
    let cli = Cli::parse();

    let data = fs::read_to_string(&cli.input)
        .with_context(|| format!("read items file: {}", cli.input.display()))?;
    let items: Vec<RecurringItem> = serde_json::from_str(&data)
        .with_context(|| format!("parse items file: {}", cli.input.display()))?;
    for item in &items {
        item.validate()
            .with_context(|| format!("invalid recurring item {}", item.id))?;
    }

    let today = cli.today.unwrap_or_else(|| SystemClock.today());
    let report = dueness_report(&items, today);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_human_summary(&report));
    }
    Ok(())
}
