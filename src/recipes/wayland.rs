//! Wayland recipe
//!
//! Meson project with target-dependent prerequisites: native builds pull
//! in the protocol/scanner libraries, FreeBSD-family targets need the
//! epoll shim.

use crate::recipes::recipe::{BuildContext, InstallDir, Recipe, RecipeSpec};
use crate::repository::GitRepository;
use crate::target::CompilationTarget;
use crate::tools::{ConfigureInvocation, ConfigureTool};
use async_trait::async_trait;

#[derive(Debug)]
pub struct BuildWayland {
    spec: RecipeSpec,
}

impl BuildWayland {
    pub fn new() -> Self {
        Self {
            spec: RecipeSpec {
                target: "wayland",
                // TODO: upstream the CHERI patches and switch back to
                // https://gitlab.freedesktop.org/wayland/wayland.git
                repository: GitRepository::new("https://github.com/CTSRD-CHERI/wayland"),
                configure_tool: ConfigureTool::Meson,
                supported_targets: CompilationTarget::all_freebsd_and_cheribsd_and_native(),
                native_install_dir: InstallDir::BootstrapTools,
                cross_install_dir: InstallDir::RootfsLocalbase,
                base_dependencies: &[],
                append_cheri_bits: false,
            },
        }
    }
}

impl Default for BuildWayland {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Recipe for BuildWayland {
    fn spec(&self) -> &RecipeSpec {
        &self.spec
    }

    fn dependencies(&self, ctx: &BuildContext) -> Vec<String> {
        let mut deps: Vec<String> = self
            .spec
            .base_dependencies
            .iter()
            .map(|s| s.to_string())
            .collect();
        if ctx.target.is_native() {
            deps.extend(
                ["libexpat", "libffi", "libxml2"]
                    .iter()
                    .map(|s| s.to_string()),
            );
            // A wayland-scanner is needed during the build
            deps.push("wayland-native".to_string());
        }
        if ctx.target.is_freebsd_family() {
            deps.push("epoll-shim".to_string());
        }
        deps
    }

    fn configure_args(&self, ctx: &BuildContext) -> ConfigureInvocation {
        let mut invocation = ConfigureInvocation::new(
            self.spec.configure_tool,
            &ctx.source_dir(&self.spec),
            &ctx.build_dir(&self.spec),
            &ctx.install_dir(&self.spec),
        );
        // Can be set to false to avoid the libxml2 dependency
        invocation.add_meson_option("dtd_validation", true);
        // Avoid the docbook dependency
        invocation.add_meson_option("documentation", false);
        if ctx.target.is_macos() {
            // Only build wayland-scanner
            invocation.add_meson_option("libraries", false);
        }
        invocation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::target::Arch;

    fn deps_for(target: CompilationTarget) -> Vec<String> {
        let ctx = BuildContext::new(Config::default(), target);
        BuildWayland::new().dependencies(&ctx)
    }

    #[test]
    fn native_target_pulls_in_host_libraries() {
        let deps = deps_for(CompilationTarget::Native);
        for expected in ["libexpat", "libffi", "libxml2", "wayland-native"] {
            assert!(deps.contains(&expected.to_string()), "missing {expected}");
        }
        assert!(!deps.contains(&"epoll-shim".to_string()));
    }

    #[test]
    fn freebsd_cross_target_adds_epoll_shim() {
        let deps = deps_for(CompilationTarget::FreeBsd(Arch::Aarch64));
        assert!(deps.contains(&"epoll-shim".to_string()));

        let deps = deps_for(CompilationTarget::CheriBsd(Arch::Riscv64));
        assert!(deps.contains(&"epoll-shim".to_string()));
    }

    #[test]
    fn cross_target_omits_native_only_prerequisites() {
        let deps = deps_for(CompilationTarget::CheriBsd(Arch::Morello));
        assert!(!deps.contains(&"libxml2".to_string()));
        assert!(!deps.contains(&"wayland-native".to_string()));
    }

    #[test]
    fn meson_options_always_present() {
        let ctx = BuildContext::new(Config::default(), CompilationTarget::FreeBsd(Arch::X86_64));
        let inv = BuildWayland::new().configure_args(&ctx);
        assert!(inv.args().contains(&"-Ddtd_validation=true".to_string()));
        assert!(inv.args().contains(&"-Ddocumentation=false".to_string()));
        // libraries=false only applies to native macOS builds
        assert!(!inv.args().contains(&"-Dlibraries=false".to_string()));
    }
}
