//! libexpat recipe
//!
//! The upstream repository keeps the actual cmake project in an `expat`
//! subdirectory, so the source argument is rewritten before configure.

use crate::recipes::recipe::{BuildContext, InstallDir, Recipe, RecipeSpec};
use crate::repository::GitRepository;
use crate::target::CompilationTarget;
use crate::tools::{ConfigureInvocation, ConfigureTool};
use async_trait::async_trait;

#[derive(Debug)]
pub struct BuildExpat {
    spec: RecipeSpec,
}

impl BuildExpat {
    pub fn new() -> Self {
        Self {
            spec: RecipeSpec {
                target: "libexpat",
                repository: GitRepository::new("https://github.com/libexpat/libexpat"),
                configure_tool: ConfigureTool::CMake,
                supported_targets: CompilationTarget::all_freebsd_and_cheribsd_and_native(),
                native_install_dir: InstallDir::InBuildDirectory,
                cross_install_dir: InstallDir::RootfsLocalbase,
                base_dependencies: &[],
                append_cheri_bits: false,
            },
        }
    }
}

impl Default for BuildExpat {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Recipe for BuildExpat {
    fn spec(&self) -> &RecipeSpec {
        &self.spec
    }

    fn configure_args(&self, ctx: &BuildContext) -> ConfigureInvocation {
        let mut invocation = ConfigureInvocation::new(
            self.spec.configure_tool,
            &ctx.source_dir(&self.spec),
            &ctx.build_dir(&self.spec),
            &ctx.install_dir(&self.spec),
        );
        if !ctx.target.is_native() {
            // Work around CMAKE_CXX_FLAGS being overwritten
            // (https://github.com/libexpat/libexpat/pull/442)
            invocation.add_cmake_option("EXPAT_BUILD_TESTS", "FALSE");
        }
        // The actual cmake project lives in a subdirectory
        invocation.set_source_path(&ctx.source_dir(&self.spec).join("expat"));
        invocation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::target::Arch;
    use std::path::PathBuf;

    fn context(target: CompilationTarget) -> BuildContext {
        let mut config = Config::default();
        config.paths.source_root = PathBuf::from("/cf/sources");
        BuildContext::new(config, target)
    }

    #[test]
    fn source_argument_points_at_expat_subdir() {
        let recipe = BuildExpat::new();
        let inv = recipe.configure_args(&context(CompilationTarget::Native));
        assert_eq!(inv.args()[0], "/cf/sources/libexpat/expat");
    }

    #[test]
    fn source_rewrite_applies_on_cross_too() {
        let recipe = BuildExpat::new();
        let inv = recipe.configure_args(&context(CompilationTarget::CheriBsd(Arch::Riscv64)));
        assert_eq!(inv.args()[0], "/cf/sources/libexpat/expat");
        assert!(inv.args().contains(&"-DEXPAT_BUILD_TESTS=FALSE".to_string()));
    }

    #[test]
    fn native_build_keeps_tests() {
        let recipe = BuildExpat::new();
        let inv = recipe.configure_args(&context(CompilationTarget::Native));
        assert!(!inv.args().contains(&"-DEXPAT_BUILD_TESTS=FALSE".to_string()));
    }
}
