//! History command - show recorded builds

use crate::cli::args::{HistoryArgs, OutputFormat};
use crate::config::Config;
use crate::error::ForgeResult;
use crate::state::{BuildRecord, BuildStatus, RecordStore};
use crate::ui::{self, UiContext};
use console::style;

/// Execute the history command
pub async fn execute(args: HistoryArgs, _config: &Config) -> ForgeResult<()> {
    let store = RecordStore::new().await?;
    let records = store.list().await?;

    if records.is_empty() {
        match args.format {
            OutputFormat::Json => println!("[]"),
            OutputFormat::Plain => {}
            OutputFormat::Table => {
                let ctx = UiContext::detect();
                ui::step_info(&ctx, "No recorded builds");
            }
        }
        return Ok(());
    }

    match args.format {
        OutputFormat::Table => print_table(&records),
        OutputFormat::Json => print_json(&records)?,
        OutputFormat::Plain => print_plain(&records),
    }

    Ok(())
}

fn print_table(records: &[BuildRecord]) {
    println!(
        "{:<14} {:<20} {:<11} {:<17}",
        style("TARGET").bold(),
        style("FOR").bold(),
        style("STATUS").bold(),
        style("STARTED").bold()
    );
    println!("{}", "-".repeat(62));

    for record in records {
        let status_styled = match record.status {
            BuildStatus::Running => style("running").yellow(),
            BuildStatus::Succeeded => style("succeeded").green(),
            BuildStatus::Failed => style("failed").red(),
        };

        let started = record.started_at.format("%Y-%m-%d %H:%M").to_string();

        println!(
            "{:<14} {:<20} {:<11} {:<17}",
            record.target, record.compilation_target, status_styled, started
        );
    }

    println!();
    println!("{} build(s)", records.len());
}

fn print_json(records: &[BuildRecord]) -> ForgeResult<()> {
    let json = serde_json::to_string_pretty(records)?;
    println!("{}", json);
    Ok(())
}

fn print_plain(records: &[BuildRecord]) {
    for record in records {
        println!("{}-{}", record.target, record.compilation_target);
    }
}
