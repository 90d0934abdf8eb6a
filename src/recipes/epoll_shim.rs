//! epoll-shim recipe
//!
//! epoll emulation on top of kqueue, needed by Linux-first software on
//! FreeBSD-family targets.

use crate::recipes::recipe::{BuildContext, InstallDir, Recipe, RecipeSpec};
use crate::repository::GitRepository;
use crate::target::CompilationTarget;
use crate::tools::{ConfigureInvocation, ConfigureTool};
use async_trait::async_trait;

#[derive(Debug)]
pub struct BuildEpollShim {
    spec: RecipeSpec,
}

impl BuildEpollShim {
    pub fn new() -> Self {
        Self {
            spec: RecipeSpec {
                target: "epoll-shim",
                repository: GitRepository::new("https://github.com/jiixyj/epoll-shim"),
                configure_tool: ConfigureTool::CMake,
                // TODO: enable a native FreeBSD host build once the test
                // harness stops assuming a cross sysroot
                supported_targets: CompilationTarget::all_freebsd_and_cheribsd(),
                native_install_dir: InstallDir::InBuildDirectory,
                cross_install_dir: InstallDir::RootfsLocalbase,
                base_dependencies: &[],
                append_cheri_bits: false,
            },
        }
    }
}

impl Default for BuildEpollShim {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Recipe for BuildEpollShim {
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
            // The bundled microatf cmake test glue breaks cross-compilation
            invocation.add_cmake_option("BUILD_TESTING", "FALSE");
        }
        invocation
    }
}
