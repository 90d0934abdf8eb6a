//! CheriOS recipe
//!
//! A capability-based microkernel OS. Built with cmake/Ninja against the
//! CHERI SDK; the generated cmake setup requires a reasonably recent
//! cmake, so the dependency check gates on a minimum version.

use crate::error::ForgeResult;
use crate::recipes::recipe::{BuildContext, InstallDir, Recipe, RecipeSpec};
use crate::repository::GitRepository;
use crate::target::{Arch, CompilationTarget};
use crate::tools::{cmake, ConfigureInvocation, ConfigureTool};
use async_trait::async_trait;

#[derive(Debug)]
pub struct BuildCheriOs {
    spec: RecipeSpec,
}

impl BuildCheriOs {
    pub fn new() -> Self {
        Self {
            spec: RecipeSpec {
                target: "cherios",
                repository: GitRepository::new("https://github.com/CTSRD-CHERI/cherios.git"),
                configure_tool: ConfigureTool::CMake,
                supported_targets: vec![
                    CompilationTarget::CheriBsd(Arch::Riscv64),
                    CompilationTarget::CheriBsd(Arch::Morello),
                ],
                native_install_dir: InstallDir::OutputRoot,
                cross_install_dir: InstallDir::OutputRoot,
                base_dependencies: &[],
                append_cheri_bits: true,
            },
        }
    }
}

impl Default for BuildCheriOs {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Recipe for BuildCheriOs {
    fn spec(&self) -> &RecipeSpec {
        &self.spec
    }

    async fn check_system_dependencies(&self, _ctx: &BuildContext) -> ForgeResult<()> {
        for program in self.spec.configure_tool.required_programs() {
            crate::tools::require(program).await?;
        }
        cmake::check_version(&cmake::minimum_version()).await
    }

    fn configure_args(&self, ctx: &BuildContext) -> ConfigureInvocation {
        let mut invocation = ConfigureInvocation::new(
            self.spec.configure_tool,
            &ctx.source_dir(&self.spec),
            &ctx.build_dir(&self.spec),
            &ctx.install_dir(&self.spec),
        );
        invocation.add_cmake_option("CHERI_SDK_DIR", ctx.config.sdk_dir().display());
        invocation
    }

    async fn install(&self, _ctx: &BuildContext) -> ForgeResult<()> {
        // nothing to install yet
        Ok(())
    }
}
