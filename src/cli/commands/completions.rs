//! Completions command - generate shell completion scripts

use crate::cli::args::{Cli, CompletionsArgs};
use crate::error::ForgeResult;
use clap::CommandFactory;
use clap_complete::generate;

/// Execute the completions command
pub async fn execute(args: CompletionsArgs) -> ForgeResult<()> {
    let mut command = Cli::command();
    generate(
        args.shell,
        &mut command,
        "crossforge",
        &mut std::io::stdout(),
    );
    Ok(())
}
