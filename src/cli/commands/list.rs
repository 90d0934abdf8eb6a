//! List command - show registered recipes

use crate::cli::args::{ListArgs, OutputFormat};
use crate::config::Config;
use crate::error::ForgeResult;
use crate::recipes::{self, Recipe};
use console::style;

/// Execute the list command
pub async fn execute(args: ListArgs, _config: &Config) -> ForgeResult<()> {
    let registry = recipes::registry();

    match args.format {
        OutputFormat::Table => print_table(&registry),
        OutputFormat::Json => print_json(&registry)?,
        OutputFormat::Plain => print_plain(&registry),
    }

    Ok(())
}

fn print_table(registry: &[Box<dyn Recipe>]) {
    println!(
        "{:<12} {:<10} {:<9} {:<45}",
        style("NAME").bold(),
        style("TOOL").bold(),
        style("TARGETS").bold(),
        style("REPOSITORY").bold()
    );
    println!("{}", "-".repeat(78));

    for recipe in registry {
        let spec = recipe.spec();
        println!(
            "{:<12} {:<10} {:<9} {:<45}",
            spec.target,
            spec.configure_tool.name(),
            spec.supported_targets.len(),
            spec.repository.url()
        );
    }

    println!();
    println!("{} recipe(s)", registry.len());
}

fn print_json(registry: &[Box<dyn Recipe>]) -> ForgeResult<()> {
    let entries: Vec<serde_json::Value> = registry
        .iter()
        .map(|recipe| {
            let spec = recipe.spec();
            serde_json::json!({
                "target": spec.target,
                "repository": spec.repository.url(),
                "configure_tool": spec.configure_tool.name(),
                "supported_targets": spec
                    .supported_targets
                    .iter()
                    .map(|t| t.triple())
                    .collect::<Vec<_>>(),
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}

fn print_plain(registry: &[Box<dyn Recipe>]) {
    for recipe in registry {
        println!("{}", recipe.spec().target);
    }
}
