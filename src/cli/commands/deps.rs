//! Deps command - report a recipe's dependency targets
//!
//! The names are reported as the recipe computes them for the given
//! compilation target; whether they resolve to registered recipes is the
//! caller's problem.

use crate::cli::args::{DepsArgs, OutputFormat};
use crate::cli::commands::resolve_target;
use crate::config::Config;
use crate::error::ForgeResult;
use crate::recipes::{self, BuildContext, Recipe};
use crate::ui::{self, UiContext};
use console::style;

/// Execute the deps command
pub async fn execute(args: DepsArgs, config: &Config) -> ForgeResult<()> {
    let recipe = recipes::find(&args.target)?;
    let target = resolve_target(args.for_target.as_deref(), config)?;

    let ctx = BuildContext::new(config.clone(), target);
    let deps = recipe.dependencies(&ctx);

    match args.format {
        OutputFormat::Plain => {
            for dep in &deps {
                println!("{}", dep);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "target": args.target,
                "compilation_target": target.triple(),
                "dependencies": deps,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Table => {
            let ui_ctx = UiContext::detect();
            if deps.is_empty() {
                ui::step_info(
                    &ui_ctx,
                    &format!("{} has no dependencies for {}", args.target, target.triple()),
                );
            } else {
                println!(
                    "{} {} {}",
                    style(&args.target).bold(),
                    style("for").dim(),
                    target.triple()
                );
                for dep in &deps {
                    println!("  {}", dep);
                }
            }
        }
    }

    Ok(())
}
