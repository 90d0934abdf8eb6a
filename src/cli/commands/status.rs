//! Status command - check host tools and versions

use crate::config::Config;
use crate::error::ForgeResult;
use crate::tools::{self, cmake};
use console::{style, Emoji};

static CHECK: Emoji<'_, '_> = Emoji("✓ ", "[OK] ");
static CROSS: Emoji<'_, '_> = Emoji("✗ ", "[FAIL] ");
static WARN: Emoji<'_, '_> = Emoji("⚠ ", "[WARN] ");

/// Execute the status command
///
/// Reports missing or outdated tools without failing; a bad exit code
/// here would just get in the way of scripting around it.
pub async fn execute(config: &Config) -> ForgeResult<()> {
    println!("{}", style("crossforge host status").bold().cyan());
    println!();

    println!("{}", style("Paths:").bold());
    println!("  {} Sources: {}", CHECK, config.paths.source_root.display());
    println!("  {} Builds:  {}", CHECK, config.paths.build_root.display());
    println!("  {} Output:  {}", CHECK, config.paths.output_root.display());
    println!("  {} SDK:     {}", CHECK, config.sdk_dir().display());

    println!();
    println!("{}", style("Tools:").bold());

    let mut all_ok = check_cmake().await;
    for tool in ["ninja", "meson", "make", "autoreconf", "git"] {
        all_ok &= check_tool(tool).await;
    }

    println!();
    if all_ok {
        println!("{}", style("All critical checks passed").green().bold());
    } else {
        println!(
            "{}",
            style("Some checks failed - see above for details")
                .yellow()
                .bold()
        );
    }

    Ok(())
}

/// cmake gets the full version gate, not just a presence probe
async fn check_cmake() -> bool {
    let Some(first_line) = tools::probe("cmake").await else {
        println!(
            "  {} {} - Not found. {}",
            CROSS,
            style("cmake").red(),
            cmake::INSTALL_HINT
        );
        return false;
    };

    let detected = cmake::parse_version_output(&first_line);
    let minimum = cmake::minimum_version();
    if detected < minimum {
        println!(
            "  {} {} - {} is too old (need at least {})",
            WARN,
            style("cmake").yellow(),
            detected,
            minimum
        );
        return false;
    }

    println!("  {} {} - {}", CHECK, style("cmake").green(), first_line);
    true
}

async fn check_tool(name: &str) -> bool {
    match tools::probe(name).await {
        Some(first_line) => {
            println!("  {} {} - {}", CHECK, style(name).green(), first_line);
            true
        }
        None => {
            println!(
                "  {} {} - Not found. {}",
                WARN,
                style(name).yellow(),
                tools::install_hint(name)
            );
            false
        }
    }
}
