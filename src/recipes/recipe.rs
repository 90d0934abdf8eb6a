//! Recipe contract and shared build context
//!
//! A recipe is a declarative [`RecipeSpec`] plus a handful of hook
//! overrides. The driver calls the lifecycle methods in a fixed order,
//! once per run: `check_system_dependencies` → `configure` → `build` →
//! `install`. `dependencies` is a pure query and may be called at any
//! time. Dependency *resolution* is not done here at all: the reported
//! names are informational.

use crate::config::Config;
use crate::error::ForgeResult;
use crate::repository::GitRepository;
use crate::target::CompilationTarget;
use crate::tools::{self, ConfigureInvocation, ConfigureTool};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

/// Where a recipe's install output lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallDir {
    /// Stay inside the build directory
    InBuildDirectory,
    /// `<output root>/rootfs-<target>/usr/local`
    RootfsLocalbase,
    /// `<output root>/bootstrap`, for host tools needed by other builds
    BootstrapTools,
    /// `<output root>/<recipe><cheri bits>`
    OutputRoot,
}

/// Static description of one buildable project
#[derive(Debug, Clone)]
pub struct RecipeSpec {
    /// Unique name within the registry
    pub target: &'static str,
    /// Where the source comes from
    pub repository: GitRepository,
    /// Tool driving configure/build/install
    pub configure_tool: ConfigureTool,
    /// Compilation targets this recipe can build for
    pub supported_targets: Vec<CompilationTarget>,
    /// Install policy for native builds
    pub native_install_dir: InstallDir,
    /// Install policy for cross builds
    pub cross_install_dir: InstallDir,
    /// Dependency target names reported unconditionally
    pub base_dependencies: &'static [&'static str],
    /// Append the CHERI capability width to the build directory name
    pub append_cheri_bits: bool,
}

/// Everything a recipe hook needs to know about the current run
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub config: Config,
    pub target: CompilationTarget,
    /// Rerun configure even when the fingerprint stamp matches
    pub reconfigure: bool,
    /// Command-line jobs override
    pub jobs: Option<u32>,
}

impl BuildContext {
    pub fn new(config: Config, target: CompilationTarget) -> Self {
        Self {
            config,
            target,
            reconfigure: false,
            jobs: None,
        }
    }

    /// Effective parallel job count
    pub fn jobs(&self) -> Option<u32> {
        self.jobs.or(self.config.build.jobs)
    }

    /// Checkout location for a recipe's source
    pub fn source_dir(&self, spec: &RecipeSpec) -> PathBuf {
        self.config.paths.source_root.join(spec.target)
    }

    /// Per-(recipe, target) build directory
    pub fn build_dir(&self, spec: &RecipeSpec) -> PathBuf {
        let mut name = spec.target.to_string();
        if spec.append_cheri_bits {
            name.push_str(&format!("-{}", self.config.toolchain.cheri_bits));
        }
        self.config
            .paths
            .build_root
            .join(format!("{}-{}-build", name, self.target.triple()))
    }

    /// Rootfs staging tree for the current compilation target
    pub fn rootfs_dir(&self) -> PathBuf {
        self.config
            .paths
            .output_root
            .join(format!("rootfs-{}", self.target.triple()))
    }

    /// Resolved install prefix per the recipe's install policy
    pub fn install_dir(&self, spec: &RecipeSpec) -> PathBuf {
        let policy = if self.target.is_native() {
            spec.native_install_dir
        } else {
            spec.cross_install_dir
        };

        match policy {
            InstallDir::InBuildDirectory => self.build_dir(spec),
            InstallDir::RootfsLocalbase => self.rootfs_dir().join("usr").join("local"),
            InstallDir::BootstrapTools => self.config.paths.output_root.join("bootstrap"),
            InstallDir::OutputRoot => self
                .config
                .paths
                .output_root
                .join(format!("{}{}", spec.target, self.config.toolchain.cheri_bits)),
        }
    }
}

/// The per-project build contract
///
/// Provided methods implement the common path through the shared tool
/// drivers; recipes override only where their project deviates.
#[async_trait]
pub trait Recipe: Send + Sync + std::fmt::Debug {
    /// The declarative part of the recipe
    fn spec(&self) -> &RecipeSpec;

    /// Dependency target names for the given context
    fn dependencies(&self, _ctx: &BuildContext) -> Vec<String> {
        self.spec()
            .base_dependencies
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Whether the recipe can build for `target`
    fn supports(&self, target: CompilationTarget) -> bool {
        self.spec().supported_targets.contains(&target)
    }

    /// The configure command as it will be executed
    ///
    /// Overrides patch tool options or the source path here; the shared
    /// `configure` implementation takes care of running it.
    fn configure_args(&self, ctx: &BuildContext) -> ConfigureInvocation {
        let spec = self.spec();
        ConfigureInvocation::new(
            spec.configure_tool,
            &ctx.source_dir(spec),
            &ctx.build_dir(spec),
            &ctx.install_dir(spec),
        )
    }

    /// Hook run immediately before the configure command (autogen etc.)
    async fn pre_configure(&self, _ctx: &BuildContext) -> ForgeResult<()> {
        Ok(())
    }

    /// Verify the host has the tools this recipe needs
    async fn check_system_dependencies(&self, _ctx: &BuildContext) -> ForgeResult<()> {
        for program in self.spec().configure_tool.required_programs() {
            tools::require(program).await?;
        }
        Ok(())
    }

    /// Configure the build directory
    async fn configure(&self, ctx: &BuildContext) -> ForgeResult<()> {
        let invocation = self.configure_args(ctx);
        if !invocation.is_stale(ctx.reconfigure).await {
            info!(
                "{}: configure arguments unchanged, skipping (use --reconfigure to force)",
                self.spec().target
            );
            return Ok(());
        }
        self.pre_configure(ctx).await?;
        invocation.run().await
    }

    /// Run the build step
    async fn build(
        &self,
        ctx: &BuildContext,
        on_line: &(dyn Fn(String) + Send + Sync),
    ) -> ForgeResult<()> {
        let spec = self.spec();
        tools::run_build(
            spec.configure_tool,
            &ctx.build_dir(spec),
            ctx.jobs(),
            on_line,
        )
        .await
    }

    /// Run the install step
    async fn install(&self, ctx: &BuildContext) -> ForgeResult<()> {
        let spec = self.spec();
        tools::run_install(spec.configure_tool, &ctx.build_dir(spec)).await
    }
}
