//! CLI command implementations

pub mod build;
pub mod completions;
pub mod config;
pub mod deps;
pub mod history;
pub mod list;
pub mod status;

pub use build::execute as build;
pub use completions::execute as completions;
pub use config::execute as config;
pub use deps::execute as deps;
pub use history::execute as history;
pub use list::execute as list;
pub use status::execute as status;

use crate::config::Config;
use crate::error::ForgeResult;
use crate::target::CompilationTarget;

/// Resolve the compilation target from a `--for` flag or the config default
pub(crate) fn resolve_target(
    flag: Option<&str>,
    config: &Config,
) -> ForgeResult<CompilationTarget> {
    match flag {
        Some(name) => CompilationTarget::parse(name),
        None => CompilationTarget::parse(&config.build.default_target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_target_prefers_flag() {
        let config = Config::default();
        let target = resolve_target(Some("cheribsd-morello"), &config).unwrap();
        assert_eq!(target.triple(), "cheribsd-morello");
    }

    #[test]
    fn resolve_target_falls_back_to_config() {
        let mut config = Config::default();
        config.build.default_target = "freebsd-aarch64".to_string();
        let target = resolve_target(None, &config).unwrap();
        assert_eq!(target.triple(), "freebsd-aarch64");
    }

    #[test]
    fn resolve_target_rejects_bad_flag() {
        let config = Config::default();
        assert!(resolve_target(Some("hurd-i386"), &config).is_err());
    }
}
