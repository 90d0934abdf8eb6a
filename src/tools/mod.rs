//! Configure/build tool drivers
//!
//! Recipes declare which tool configures them; the drivers here own the
//! actual invocations. A [`ConfigureInvocation`] is built per run so recipe
//! hooks can patch arguments before the tool is executed, mirroring how a
//! recipe would tweak flags by hand.

pub mod autotools;
pub mod cmake;
pub mod meson;

use crate::error::{ForgeError, ForgeResult};
use crate::process;
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Name of the fingerprint stamp written into a configured build dir.
const CONFIGURE_STAMP: &str = ".crossforge-configure";

/// Which tool drives configure/build/install for a recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigureTool {
    CMake,
    Meson,
    Autotools,
}

impl ConfigureTool {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            ConfigureTool::CMake => "cmake",
            ConfigureTool::Meson => "meson",
            ConfigureTool::Autotools => "autotools",
        }
    }

    /// Programs that must be on PATH for this tool to work
    pub fn required_programs(&self) -> &'static [&'static str] {
        match self {
            ConfigureTool::CMake => &["cmake", "ninja"],
            ConfigureTool::Meson => &["meson", "ninja"],
            ConfigureTool::Autotools => &["make"],
        }
    }
}

impl fmt::Display for ConfigureTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A configure command under construction
///
/// Holds the program and ordered argument vector exactly as they will be
/// executed, so hooks can append tool options or rewrite the source
/// argument before [`ConfigureInvocation::run`] hands it to the tool.
#[derive(Debug, Clone)]
pub struct ConfigureInvocation {
    tool: ConfigureTool,
    program: String,
    args: Vec<String>,
    build_dir: PathBuf,
}

impl ConfigureInvocation {
    /// Build the default invocation for a tool
    pub fn new(
        tool: ConfigureTool,
        source_dir: &Path,
        build_dir: &Path,
        install_prefix: &Path,
    ) -> Self {
        let (program, args) = match tool {
            ConfigureTool::CMake => (
                "cmake".to_string(),
                vec![
                    source_dir.display().to_string(),
                    "-G".to_string(),
                    "Ninja".to_string(),
                    "-DCMAKE_BUILD_TYPE=Debug".to_string(),
                    format!("-DCMAKE_INSTALL_PREFIX={}", install_prefix.display()),
                ],
            ),
            ConfigureTool::Meson => (
                "meson".to_string(),
                vec![
                    "setup".to_string(),
                    "--prefix".to_string(),
                    install_prefix.display().to_string(),
                    build_dir.display().to_string(),
                    source_dir.display().to_string(),
                ],
            ),
            ConfigureTool::Autotools => (
                source_dir.join("configure").display().to_string(),
                vec![format!("--prefix={}", install_prefix.display())],
            ),
        };

        Self {
            tool,
            program,
            args,
            build_dir: build_dir.to_path_buf(),
        }
    }

    /// Append a `-D<KEY>=<VALUE>` cmake cache option
    pub fn add_cmake_option(&mut self, key: &str, value: impl fmt::Display) {
        self.args.push(format!("-D{key}={value}"));
    }

    /// Append a `-D<key>=<value>` meson project option
    pub fn add_meson_option(&mut self, key: &str, value: impl fmt::Display) {
        self.args.push(format!("-D{key}={value}"));
    }

    /// Append a raw argument
    pub fn add_arg(&mut self, arg: impl Into<String>) {
        self.args.push(arg.into());
    }

    /// Rewrite the source argument, regardless of its prior contents
    ///
    /// For cmake the source tree is the first argument; for meson it is
    /// the trailing argument of `setup`; for autotools it is the configure
    /// script itself.
    pub fn set_source_path(&mut self, path: &Path) {
        match self.tool {
            ConfigureTool::CMake => {
                self.args[0] = path.display().to_string();
            }
            ConfigureTool::Meson => {
                let last = self.args.len() - 1;
                self.args[last] = path.display().to_string();
            }
            ConfigureTool::Autotools => {
                self.program = path.join("configure").display().to_string();
            }
        }
    }

    pub fn tool(&self) -> ConfigureTool {
        self.tool
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Hash of the full command line, used to skip redundant reconfigures
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.program.as_bytes());
        for arg in &self.args {
            hasher.update([0u8]);
            hasher.update(arg.as_bytes());
        }
        hex::encode(hasher.finalize())
    }

    /// Whether the configure step needs to run.
    ///
    /// True when `force` is set, when the build dir was never configured,
    /// or when the stamped fingerprint no longer matches the invocation.
    pub async fn is_stale(&self, force: bool) -> bool {
        if force {
            return true;
        }
        match fs::read_to_string(self.build_dir.join(CONFIGURE_STAMP)).await {
            Ok(previous) => previous.trim() != self.fingerprint(),
            Err(_) => true,
        }
    }

    /// Execute the configure step in the build directory.
    ///
    /// The fingerprint stamp is only written after the tool succeeds.
    pub async fn run(&self) -> ForgeResult<()> {
        fs::create_dir_all(&self.build_dir).await.map_err(|e| {
            ForgeError::io(
                format!("creating build directory {}", self.build_dir.display()),
                e,
            )
        })?;

        process::run_checked(&self.program, &self.args, Some(&self.build_dir)).await?;

        let stamp_path = self.build_dir.join(CONFIGURE_STAMP);
        fs::write(&stamp_path, self.fingerprint())
            .await
            .map_err(|e| ForgeError::io("writing configure stamp", e))?;
        debug!("Wrote configure stamp to {}", stamp_path.display());

        Ok(())
    }
}

/// Run the build step for a tool
pub async fn run_build(
    tool: ConfigureTool,
    build_dir: &Path,
    jobs: Option<u32>,
    on_line: &(dyn Fn(String) + Send + Sync),
) -> ForgeResult<()> {
    match tool {
        ConfigureTool::CMake => cmake::build(build_dir, jobs, on_line).await,
        ConfigureTool::Meson => meson::compile(build_dir, jobs, on_line).await,
        ConfigureTool::Autotools => autotools::build(build_dir, jobs, on_line).await,
    }
}

/// Run the install step for a tool
pub async fn run_install(tool: ConfigureTool, build_dir: &Path) -> ForgeResult<()> {
    match tool {
        ConfigureTool::CMake => cmake::install(build_dir).await,
        ConfigureTool::Meson => meson::install(build_dir).await,
        ConfigureTool::Autotools => autotools::install(build_dir).await,
    }
}

/// Probe a tool by running its version flag
///
/// Returns the first line of output when the tool is present and working.
pub async fn probe(program: &str) -> Option<String> {
    match process::run(program, &["--version".to_string()], None).await {
        Ok(output) if output.status.success() => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            Some(stdout.lines().next().unwrap_or("unknown").trim().to_string())
        }
        _ => None,
    }
}

/// Fail with a `DependencyMissing` error when a tool is absent from PATH
pub async fn require(program: &str) -> ForgeResult<()> {
    if probe(program).await.is_none() {
        return Err(ForgeError::DependencyMissing {
            tool: program.to_string(),
            hint: install_hint(program).to_string(),
        });
    }
    Ok(())
}

/// Install instructions shown with dependency errors and in `status`
pub fn install_hint(program: &str) -> &'static str {
    match program {
        "cmake" => cmake::INSTALL_HINT,
        "ninja" => "Install ninja, e.g. pkg install ninja or apt install ninja-build",
        "meson" => "Install meson, e.g. pkg install meson or pip install meson",
        "make" => "Install GNU make, e.g. pkg install gmake or apt install make",
        "git" => "Install git from your package manager",
        "autoreconf" => "Install autoconf, automake and libtool from your package manager",
        _ => "Install it from your package manager",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(tool: ConfigureTool) -> ConfigureInvocation {
        ConfigureInvocation::new(
            tool,
            Path::new("/src/project"),
            Path::new("/build/project"),
            Path::new("/install/project"),
        )
    }

    #[test]
    fn cmake_invocation_shape() {
        let inv = sample(ConfigureTool::CMake);
        assert_eq!(inv.program(), "cmake");
        assert_eq!(inv.args()[0], "/src/project");
        assert!(inv.args().contains(&"-G".to_string()));
        assert!(inv.args().contains(&"Ninja".to_string()));
        assert!(inv
            .args()
            .contains(&"-DCMAKE_INSTALL_PREFIX=/install/project".to_string()));
    }

    #[test]
    fn meson_invocation_shape() {
        let inv = sample(ConfigureTool::Meson);
        assert_eq!(inv.program(), "meson");
        assert_eq!(inv.args()[0], "setup");
        assert_eq!(inv.args().last().unwrap(), "/src/project");
    }

    #[test]
    fn autotools_invocation_shape() {
        let inv = sample(ConfigureTool::Autotools);
        assert_eq!(inv.program(), "/src/project/configure");
        assert_eq!(inv.args(), ["--prefix=/install/project"]);
    }

    #[test]
    fn cmake_source_rewrite_replaces_first_arg() {
        let mut inv = sample(ConfigureTool::CMake);
        inv.add_cmake_option("SOME_OPTION", "ON");
        inv.set_source_path(Path::new("/src/project/subdir"));
        assert_eq!(inv.args()[0], "/src/project/subdir");
        // Later options survive the rewrite
        assert!(inv.args().contains(&"-DSOME_OPTION=ON".to_string()));
    }

    #[test]
    fn meson_source_rewrite_replaces_trailing_arg() {
        let mut inv = sample(ConfigureTool::Meson);
        inv.set_source_path(Path::new("/elsewhere"));
        assert_eq!(inv.args().last().unwrap(), "/elsewhere");
    }

    #[test]
    fn meson_options_render_lowercase_values() {
        let mut inv = sample(ConfigureTool::Meson);
        inv.add_meson_option("dtd_validation", true);
        inv.add_meson_option("documentation", false);
        assert!(inv.args().contains(&"-Ddtd_validation=true".to_string()));
        assert!(inv.args().contains(&"-Ddocumentation=false".to_string()));
    }

    #[test]
    fn fingerprint_tracks_arguments() {
        let a = sample(ConfigureTool::CMake);
        let mut b = sample(ConfigureTool::CMake);
        assert_eq!(a.fingerprint(), b.fingerprint());

        b.add_cmake_option("BUILD_TESTING", "FALSE");
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[tokio::test]
    async fn stamp_controls_staleness() {
        let temp = tempfile::TempDir::new().unwrap();
        let build_dir = temp.path().join("build");

        let inv = ConfigureInvocation {
            tool: ConfigureTool::CMake,
            program: "true".to_string(),
            args: vec![],
            build_dir: build_dir.clone(),
        };

        // Never configured: stale
        assert!(inv.is_stale(false).await);
        inv.run().await.unwrap();
        // Stamp matches: fresh, unless forced
        assert!(!inv.is_stale(false).await);
        assert!(inv.is_stale(true).await);

        // A different command line invalidates the stamp
        let mut changed = inv.clone();
        changed.add_arg("--extra");
        assert!(changed.is_stale(false).await);
    }

    #[test]
    fn required_programs_per_tool() {
        assert!(ConfigureTool::CMake.required_programs().contains(&"ninja"));
        assert!(ConfigureTool::Meson.required_programs().contains(&"meson"));
        assert_eq!(ConfigureTool::Autotools.required_programs(), ["make"]);
    }
}
