//! libffi recipe
//!
//! Autotools project; the checkout ships no configure script, so
//! `autogen.sh` runs first.

use crate::error::ForgeResult;
use crate::process;
use crate::recipes::recipe::{BuildContext, InstallDir, Recipe, RecipeSpec};
use crate::repository::GitRepository;
use crate::target::CompilationTarget;
use crate::tools::{self, ConfigureTool};
use async_trait::async_trait;

#[derive(Debug)]
pub struct BuildLibffi {
    spec: RecipeSpec,
}

impl BuildLibffi {
    pub fn new() -> Self {
        Self {
            spec: RecipeSpec {
                target: "libffi",
                repository: GitRepository::new("https://github.com/libffi/libffi.git"),
                configure_tool: ConfigureTool::Autotools,
                supported_targets: CompilationTarget::all_freebsd_and_cheribsd_and_native(),
                native_install_dir: InstallDir::InBuildDirectory,
                cross_install_dir: InstallDir::RootfsLocalbase,
                base_dependencies: &[],
                append_cheri_bits: false,
            },
        }
    }
}

impl Default for BuildLibffi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Recipe for BuildLibffi {
    fn spec(&self) -> &RecipeSpec {
        &self.spec
    }

    async fn check_system_dependencies(&self, _ctx: &BuildContext) -> ForgeResult<()> {
        for program in self.spec.configure_tool.required_programs() {
            tools::require(program).await?;
        }
        // autogen.sh needs the autotools themselves
        tools::require("autoreconf").await
    }

    async fn pre_configure(&self, ctx: &BuildContext) -> ForgeResult<()> {
        let source_dir = ctx.source_dir(&self.spec);
        let autogen = source_dir.join("autogen.sh").display().to_string();
        process::run_checked(&autogen, &[], Some(&source_dir)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::path::PathBuf;

    #[test]
    fn configure_runs_the_generated_script() {
        let mut config = Config::default();
        config.paths.source_root = PathBuf::from("/cf/sources");
        let ctx = BuildContext::new(config, CompilationTarget::Native);

        let recipe = BuildLibffi::new();
        let inv = recipe.configure_args(&ctx);
        assert_eq!(inv.program(), "/cf/sources/libffi/configure");
        assert_eq!(inv.args().len(), 1);
        assert!(inv.args()[0].starts_with("--prefix="));
    }

    #[test]
    fn uses_autotools() {
        let recipe = BuildLibffi::new();
        assert_eq!(recipe.spec().configure_tool, ConfigureTool::Autotools);
    }
}
