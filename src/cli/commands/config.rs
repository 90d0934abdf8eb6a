//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::{ForgeError, ForgeResult};
use crate::target::CompilationTarget;
use crate::ui::{self, UiContext};
use std::path::PathBuf;

/// Execute the config command
pub async fn execute(args: ConfigArgs, config: &Config, manager: &ConfigManager) -> ForgeResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config),
        Some(ConfigAction::Path) => show_path(manager),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
        Some(ConfigAction::Set { key, value }) => set_value(manager, config, &key, &value).await?,
    }

    Ok(())
}

fn show_config(config: &Config) {
    let toml =
        toml::to_string_pretty(config).unwrap_or_else(|_| "Error serializing config".to_string());
    println!("{}", toml);
}

fn show_path(manager: &ConfigManager) {
    println!("{}", manager.path().display());
}

async fn init_config(manager: &ConfigManager, force: bool) -> ForgeResult<()> {
    let ctx = UiContext::detect();
    let path = manager.path();

    if path.exists() && !force {
        ui::step_warn_hint(
            &ctx,
            &format!("Config already exists at {}", path.display()),
            "Use --force to overwrite",
        );
        return Ok(());
    }

    let config = Config::default();
    manager.save(&config).await?;

    ui::step_ok_detail(
        &ctx,
        "Configuration initialized",
        &path.display().to_string(),
    );

    Ok(())
}

async fn set_value(
    manager: &ConfigManager,
    config: &Config,
    key: &str,
    value: &str,
) -> ForgeResult<()> {
    let ctx = UiContext::detect();
    let mut config = config.clone();

    // Parse dot-separated key path
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["general", "verbose"] => config.general.verbose = parse_bool(value)?,
        ["general", "log_format"] => config.general.log_format = value.to_string(),

        ["paths", "source_root"] => config.paths.source_root = PathBuf::from(value),
        ["paths", "build_root"] => config.paths.build_root = PathBuf::from(value),
        ["paths", "output_root"] => config.paths.output_root = PathBuf::from(value),

        ["toolchain", "sdk_dir"] => config.toolchain.sdk_dir = Some(PathBuf::from(value)),
        ["toolchain", "cheri_bits"] => {
            let bits = parse_u32(value)?;
            if bits != 128 && bits != 256 {
                return Err(ForgeError::User(format!(
                    "Invalid cheri_bits: {}. Use 128 or 256",
                    bits
                )));
            }
            config.toolchain.cheri_bits = bits;
        }

        ["build", "default_target"] => {
            // Reject typos now rather than at the next build
            CompilationTarget::parse(value)?;
            config.build.default_target = value.to_string();
        }
        ["build", "jobs"] => config.build.jobs = Some(parse_u32(value)?),

        _ => {
            ui::step_error_detail(&ctx, "Unknown config key", key);
            ui::remark(&ctx, "Valid keys:");
            print_valid_keys();
            return Ok(());
        }
    }

    manager.save(&config).await?;
    ui::step_ok(&ctx, &format!("Set {} = {}", key, value));

    Ok(())
}

fn parse_bool(value: &str) -> ForgeResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ForgeError::User(format!(
            "Invalid boolean value: {}. Use true/false",
            value
        ))),
    }
}

fn parse_u32(value: &str) -> ForgeResult<u32> {
    value
        .parse()
        .map_err(|_| ForgeError::User(format!("Invalid number: {}", value)))
}

fn print_valid_keys() {
    let keys = [
        "general.verbose",
        "general.log_format",
        "paths.source_root",
        "paths.build_root",
        "paths.output_root",
        "toolchain.sdk_dir",
        "toolchain.cheri_bits",
        "build.default_target",
        "build.jobs",
    ];

    for key in keys {
        eprintln!("  {}", key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parse_bool_values() {
        assert!(parse_bool("true").unwrap());
        assert!(parse_bool("YES").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(parse_bool("maybe").is_err());
    }

    #[tokio::test]
    async fn set_value_persists() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp.path().join("config.toml"));
        let config = Config::default();

        set_value(&manager, &config, "build.jobs", "12").await.unwrap();

        let loaded = manager.load().await.unwrap();
        assert_eq!(loaded.build.jobs, Some(12));
    }

    #[tokio::test]
    async fn set_rejects_bad_default_target() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp.path().join("config.toml"));
        let config = Config::default();

        let err = set_value(&manager, &config, "build.default_target", "solaris-sparc")
            .await
            .unwrap_err();
        assert!(matches!(err, ForgeError::UnknownTarget(_)));
    }

    #[tokio::test]
    async fn set_rejects_bad_cheri_bits() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp.path().join("config.toml"));
        let config = Config::default();

        let err = set_value(&manager, &config, "toolchain.cheri_bits", "64")
            .await
            .unwrap_err();
        assert!(matches!(err, ForgeError::User(_)));
    }
}
