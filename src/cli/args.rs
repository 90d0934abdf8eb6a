//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// crossforge - cross-compilation build orchestrator
///
/// Fetches, configures, builds and installs CHERI software projects
/// for native and FreeBSD/CheriBSD compilation targets.
#[derive(Parser, Debug)]
#[command(name = "crossforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CROSSFORGE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch, configure, build and install one recipe
    Build(BuildArgs),

    /// Show the dependency targets a recipe reports
    Deps(DepsArgs),

    /// List registered recipes
    List(ListArgs),

    /// Show recorded builds
    History(HistoryArgs),

    /// Check host tools and versions
    Status,

    /// Show or edit configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the build command
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Recipe target name (see: crossforge list)
    pub target: String,

    /// Compilation target, e.g. native or cheribsd-riscv64
    #[arg(long = "for", value_name = "TARGET")]
    pub for_target: Option<String>,

    /// Rerun configure even when arguments are unchanged
    #[arg(long)]
    pub reconfigure: bool,

    /// Parallel job count for the build step
    #[arg(short, long)]
    pub jobs: Option<u32>,
}

/// Arguments for the deps command
#[derive(Parser, Debug)]
pub struct DepsArgs {
    /// Recipe target name
    pub target: String,

    /// Compilation target, e.g. native or cheribsd-riscv64
    #[arg(long = "for", value_name = "TARGET")]
    pub for_target: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "plain")]
    pub format: OutputFormat,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the history command
#[derive(Parser, Debug)]
pub struct HistoryArgs {
    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. build.default_target)
        key: String,
        /// Value to set
        value: String,
    },
}

/// Arguments for the completions command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}

/// Output format for listing commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_build() {
        let cli = Cli::parse_from(["crossforge", "build", "wayland", "--for", "cheribsd-riscv64"]);
        match cli.command {
            Commands::Build(args) => {
                assert_eq!(args.target, "wayland");
                assert_eq!(args.for_target.as_deref(), Some("cheribsd-riscv64"));
                assert!(!args.reconfigure);
            }
            _ => panic!("expected Build command"),
        }
    }

    #[test]
    fn cli_parses_build_flags() {
        let cli = Cli::parse_from(["crossforge", "build", "libffi", "--reconfigure", "-j", "8"]);
        match cli.command {
            Commands::Build(args) => {
                assert!(args.reconfigure);
                assert_eq!(args.jobs, Some(8));
                assert!(args.for_target.is_none());
            }
            _ => panic!("expected Build command"),
        }
    }

    #[test]
    fn cli_parses_deps() {
        let cli = Cli::parse_from(["crossforge", "deps", "wayland"]);
        match cli.command {
            Commands::Deps(args) => {
                assert_eq!(args.target, "wayland");
                assert!(matches!(args.format, OutputFormat::Plain));
            }
            _ => panic!("expected Deps command"),
        }
    }

    #[test]
    fn cli_parses_status() {
        let cli = Cli::parse_from(["crossforge", "status"]);
        assert!(matches!(cli.command, Commands::Status));
    }

    #[test]
    fn cli_parses_list_json() {
        let cli = Cli::parse_from(["crossforge", "list", "--format", "json"]);
        match cli.command {
            Commands::List(args) => assert!(matches!(args.format, OutputFormat::Json)),
            _ => panic!("expected List command"),
        }
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["crossforge", "config", "set", "build.jobs", "4"]);
        match cli.command {
            Commands::Config(args) => match args.action {
                Some(ConfigAction::Set { key, value }) => {
                    assert_eq!(key, "build.jobs");
                    assert_eq!(value, "4");
                }
                _ => panic!("expected Set action"),
            },
            _ => panic!("expected Config command"),
        }
    }

    #[test]
    fn cli_verbose_levels() {
        let cli = Cli::parse_from(["crossforge", "status"]);
        assert_eq!(cli.verbose, 0);

        let cli = Cli::parse_from(["crossforge", "-v", "status"]);
        assert_eq!(cli.verbose, 1);

        let cli = Cli::parse_from(["crossforge", "-vv", "status"]);
        assert_eq!(cli.verbose, 2);
    }
}
