//! Meson driver

use crate::error::ForgeResult;
use crate::process;
use std::path::Path;

/// Compile a meson-configured tree
pub async fn compile(
    build_dir: &Path,
    jobs: Option<u32>,
    on_line: &(dyn Fn(String) + Send + Sync),
) -> ForgeResult<()> {
    let mut args = vec![
        "compile".to_string(),
        "-C".to_string(),
        build_dir.display().to_string(),
    ];
    if let Some(jobs) = jobs {
        args.push(format!("-j{jobs}"));
    }
    process::run_streamed("meson", &args, None, on_line).await
}

/// Install a meson-configured tree
pub async fn install(build_dir: &Path) -> ForgeResult<()> {
    let args = vec![
        "install".to_string(),
        "-C".to_string(),
        build_dir.display().to_string(),
    ];
    process::run_checked("meson", &args, None).await
}
