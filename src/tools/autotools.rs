//! Autotools driver
//!
//! The configure script itself is invoked via [`ConfigureInvocation`];
//! build and install run make in the build directory.
//!
//! [`ConfigureInvocation`]: super::ConfigureInvocation

use crate::error::ForgeResult;
use crate::process;
use std::path::Path;

/// Build an autotools-configured tree with make
pub async fn build(
    build_dir: &Path,
    jobs: Option<u32>,
    on_line: &(dyn Fn(String) + Send + Sync),
) -> ForgeResult<()> {
    let mut args = Vec::new();
    if let Some(jobs) = jobs {
        args.push(format!("-j{jobs}"));
    }
    process::run_streamed("make", &args, Some(build_dir), on_line).await
}

/// Install an autotools-configured tree
pub async fn install(build_dir: &Path) -> ForgeResult<()> {
    process::run_checked("make", &["install".to_string()], Some(build_dir)).await
}
