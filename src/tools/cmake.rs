//! CMake driver and version gate
//!
//! Builds configured with cmake always use the Ninja generator, so the
//! build and install steps go through `ninja`.

use crate::error::{ForgeError, ForgeResult};
use crate::process;
use regex::Regex;
use semver::Version;
use std::path::Path;
use std::sync::OnceLock;

/// Pattern matched against `cmake --version` stdout.
///
/// The patch group is optional; a missing group counts as 0. Output that
/// does not match at all parses as 0.0.0 and fails any minimum gate.
const VERSION_PATTERN: &str = r"cmake version (\d+)\.(\d+)\.?(\d+)?";

pub const INSTALL_HINT: &str =
    "Install CMake 3.5 or newer, e.g. pkg install cmake or https://cmake.org/download/";

static VERSION_RE: OnceLock<Regex> = OnceLock::new();

fn version_re() -> &'static Regex {
    VERSION_RE.get_or_init(|| Regex::new(VERSION_PATTERN).expect("version pattern compiles"))
}

/// Minimum cmake version required by recipes that gate on it
pub fn minimum_version() -> Version {
    Version::new(3, 5, 0)
}

/// Parse a version triple out of `cmake --version` output
pub fn parse_version_output(output: &str) -> Version {
    match version_re().captures(output) {
        Some(caps) => {
            let component = |i: usize| {
                caps.get(i)
                    .and_then(|m| m.as_str().parse::<u64>().ok())
                    .unwrap_or(0)
            };
            Version::new(component(1), component(2), component(3))
        }
        None => Version::new(0, 0, 0),
    }
}

/// Check that the cmake on PATH meets `minimum`.
///
/// Fails with `DependencyTooOld` carrying the detected version string and
/// install instructions.
pub async fn check_version(minimum: &Version) -> ForgeResult<()> {
    let output = process::capture_stdout("cmake", &["--version".to_string()])
        .await
        .map_err(|_| ForgeError::DependencyMissing {
            tool: "cmake".to_string(),
            hint: INSTALL_HINT.to_string(),
        })?;

    let detected = parse_version_output(&output);
    if detected < *minimum {
        return Err(ForgeError::DependencyTooOld {
            tool: "CMake".to_string(),
            detected: detected.to_string(),
            minimum: minimum.to_string(),
            hint: INSTALL_HINT.to_string(),
        });
    }

    Ok(())
}

/// Build a cmake-configured tree with ninja
pub async fn build(
    build_dir: &Path,
    jobs: Option<u32>,
    on_line: &(dyn Fn(String) + Send + Sync),
) -> ForgeResult<()> {
    let mut args = vec!["-C".to_string(), build_dir.display().to_string()];
    if let Some(jobs) = jobs {
        args.push(format!("-j{jobs}"));
    }
    process::run_streamed("ninja", &args, None, on_line).await
}

/// Install a cmake-configured tree with ninja
pub async fn install(build_dir: &Path) -> ForgeResult<()> {
    let args = vec![
        "-C".to_string(),
        build_dir.display().to_string(),
        "install".to_string(),
    ];
    process::run_checked("ninja", &args, None).await
}
