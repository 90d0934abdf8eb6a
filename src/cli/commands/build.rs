//! Build command - run one recipe's full lifecycle
//!
//! Lifecycle order is fixed: check system dependencies, fetch, configure,
//! build, install. A failure in any step aborts the run; nothing is
//! retried. Dependencies reported by the recipe are not resolved here.

use crate::cli::args::BuildArgs;
use crate::cli::commands::resolve_target;
use crate::config::Config;
use crate::error::{ForgeError, ForgeResult};
use crate::recipes::{self, BuildContext, Recipe};
use crate::state::{BuildStatus, RecordStore};
use crate::ui::{self, BuildProgress, TaskSpinner, UiContext};

/// Execute the build command
pub async fn execute(args: BuildArgs, config: &Config) -> ForgeResult<()> {
    let recipe = recipes::find(&args.target)?;
    let target = resolve_target(args.for_target.as_deref(), config)?;

    if !recipe.supports(target) {
        return Err(ForgeError::UnsupportedTarget {
            recipe: args.target.clone(),
            target: target.triple(),
        });
    }

    let mut ctx = BuildContext::new(config.clone(), target);
    ctx.reconfigure = args.reconfigure;
    ctx.jobs = args.jobs;

    let ui_ctx = UiContext::detect();
    ui::intro(
        &ui_ctx,
        &format!("Building {} for {}", args.target, target.triple()),
    );

    let store = RecordStore::new().await?;
    let record = store.start(&args.target, &target.triple()).await?;

    match run_lifecycle(recipe.as_ref(), &ctx, &ui_ctx).await {
        Ok(()) => {
            store.finish(record, BuildStatus::Succeeded).await?;
            ui::outro_success(&ui_ctx, &format!("{} built and installed", args.target));
            Ok(())
        }
        Err(e) => {
            store.finish(record, BuildStatus::Failed).await?;
            Err(e)
        }
    }
}

async fn run_lifecycle(
    recipe: &dyn Recipe,
    ctx: &BuildContext,
    ui_ctx: &UiContext,
) -> ForgeResult<()> {
    let spec = recipe.spec();
    let mut spinner = TaskSpinner::new(ui_ctx);

    spinner.start("Checking system dependencies...");
    if let Err(e) = recipe.check_system_dependencies(ctx).await {
        spinner.stop_error("System dependency check failed");
        return Err(e);
    }
    spinner.stop("System dependencies present");

    spinner.start(&format!("Fetching {}...", spec.repository.url()));
    if let Err(e) = spec.repository.ensure_cloned(&ctx.source_dir(spec)).await {
        spinner.stop_error("Fetch failed");
        return Err(e);
    }
    spinner.stop(&format!("Source ready at {}", ctx.source_dir(spec).display()));

    spinner.start(&format!("Configuring with {}...", spec.configure_tool));
    if let Err(e) = recipe.configure(ctx).await {
        spinner.stop_error("Configure failed");
        return Err(e);
    }
    spinner.stop("Configured");

    let progress = BuildProgress::new(ui_ctx, spec.target);
    let built = recipe.build(ctx, &|line| progress.on_line(line)).await;
    progress.finish();
    built?;
    ui::step_ok(ui_ctx, "Build finished");

    spinner.start("Installing...");
    if let Err(e) = recipe.install(ctx).await {
        spinner.stop_error("Install failed");
        return Err(e);
    }
    spinner.stop(&format!(
        "Installed into {}",
        ctx.install_dir(spec).display()
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::BuildArgs;

    #[tokio::test]
    async fn unknown_recipe_is_rejected() {
        let args = BuildArgs {
            target: "no-such-project".to_string(),
            for_target: None,
            reconfigure: false,
            jobs: None,
        };
        let err = execute(args, &Config::default()).await.unwrap_err();
        assert!(matches!(err, ForgeError::RecipeNotFound(_)));
    }

    #[tokio::test]
    async fn unsupported_target_is_rejected_before_side_effects() {
        let args = BuildArgs {
            target: "epoll-shim".to_string(),
            for_target: Some("native".to_string()),
            reconfigure: false,
            jobs: None,
        };
        let err = execute(args, &Config::default()).await.unwrap_err();
        assert!(matches!(err, ForgeError::UnsupportedTarget { .. }));
    }
}
