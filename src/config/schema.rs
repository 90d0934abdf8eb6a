//! Configuration schema for crossforge
//!
//! Configuration is stored at `~/.config/crossforge/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Directory layout
    pub paths: PathsConfig,

    /// CHERI toolchain settings
    pub toolchain: ToolchainConfig,

    /// Build defaults
    pub build: BuildConfig,
}

impl Config {
    /// Resolved SDK directory (defaults to `<output_root>/sdk`)
    pub fn sdk_dir(&self) -> PathBuf {
        self.toolchain
            .sdk_dir
            .clone()
            .unwrap_or_else(|| self.paths.output_root.join("sdk"))
    }
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,

    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            log_format: "text".to_string(),
        }
    }
}

/// Where sources are checked out and builds land
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Where repositories are cloned
    pub source_root: PathBuf,

    /// Where per-target build directories are created
    pub build_root: PathBuf,

    /// Where installs, rootfs trees and bootstrap tools land
    pub output_root: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        let home = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("crossforge");
        Self {
            source_root: home.join("sources"),
            build_root: home.join("build"),
            output_root: home.join("output"),
        }
    }
}

/// CHERI toolchain configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    /// SDK directory; defaults to `<output_root>/sdk` when unset
    pub sdk_dir: Option<PathBuf>,

    /// CHERI capability width (128 or 256)
    pub cheri_bits: u32,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            sdk_dir: None,
            cheri_bits: 128,
        }
    }
}

/// Build defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Compilation target used when `--for` is not given
    pub default_target: String,

    /// Parallel job count passed to ninja/make (tool default when unset)
    pub jobs: Option<u32>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            default_target: "native".to_string(),
            jobs: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.build.default_target, "native");
        assert_eq!(config.toolchain.cheri_bits, 128);
        assert!(config.toolchain.sdk_dir.is_none());
        assert!(config.paths.source_root.ends_with("crossforge/sources"));
    }

    #[test]
    fn sdk_dir_falls_back_to_output_root() {
        let mut config = Config::default();
        config.paths.output_root = PathBuf::from("/out");
        assert_eq!(config.sdk_dir(), PathBuf::from("/out/sdk"));

        config.toolchain.sdk_dir = Some(PathBuf::from("/opt/cheri-sdk"));
        assert_eq!(config.sdk_dir(), PathBuf::from("/opt/cheri-sdk"));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [build]
            default_target = "cheribsd-riscv64"
            jobs = 8
            "#,
        )
        .unwrap();
        assert_eq!(config.build.default_target, "cheribsd-riscv64");
        assert_eq!(config.build.jobs, Some(8));
        assert_eq!(config.toolchain.cheri_bits, 128);
    }

    #[test]
    fn toml_roundtrip() {
        let mut config = Config::default();
        config.toolchain.cheri_bits = 256;
        let rendered = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.toolchain.cheri_bits, 256);
    }
}
