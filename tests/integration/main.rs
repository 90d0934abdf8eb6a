//! Integration tests for crossforge

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;

    fn crossforge() -> Command {
        cargo_bin_cmd!("crossforge")
    }

    #[test]
    fn help_displays() {
        crossforge()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("cross-compilation build orchestrator"));
    }

    #[test]
    fn version_displays() {
        crossforge()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("crossforge"));
    }

    #[test]
    fn list_shows_recipes() {
        crossforge()
            .args(["list"])
            .assert()
            .success()
            .stdout(
                predicate::str::contains("wayland")
                    .and(predicate::str::contains("cherios"))
                    .and(predicate::str::contains("libexpat")),
            );
    }

    #[test]
    fn list_plain_one_per_line() {
        crossforge()
            .args(["list", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("libffi\n"));
    }

    #[test]
    fn deps_wayland_native_includes_host_libraries() {
        crossforge()
            .args(["deps", "wayland", "--for", "native"])
            .assert()
            .success()
            .stdout(
                predicate::str::contains("libexpat")
                    .and(predicate::str::contains("libffi"))
                    .and(predicate::str::contains("libxml2"))
                    .and(predicate::str::contains("wayland-native"))
                    .and(predicate::str::contains("epoll-shim").not()),
            );
    }

    #[test]
    fn deps_wayland_cheribsd_includes_epoll_shim() {
        crossforge()
            .args(["deps", "wayland", "--for", "cheribsd-riscv64"])
            .assert()
            .success()
            .stdout(
                predicate::str::contains("epoll-shim")
                    .and(predicate::str::contains("libxml2").not()),
            );
    }

    #[test]
    fn deps_unknown_recipe_fails() {
        crossforge()
            .args(["deps", "nonexistent-project"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Recipe not found"));
    }

    #[test]
    fn build_unknown_recipe_fails() {
        crossforge()
            .args(["build", "nonexistent-project"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Recipe not found"));
    }

    #[test]
    fn build_unsupported_target_fails() {
        crossforge()
            .args(["build", "epoll-shim", "--for", "native"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("does not support"));
    }

    #[test]
    fn build_unknown_compilation_target_fails() {
        crossforge()
            .args(["build", "wayland", "--for", "beos-ppc"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown compilation target"));
    }

    #[test]
    fn config_path() {
        crossforge()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        crossforge()
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[general]"));
    }

    #[test]
    fn config_set_roundtrip() {
        let temp = tempfile::TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");

        crossforge()
            .args(["--config"])
            .arg(&config_path)
            .args(["config", "set", "build.jobs", "4"])
            .assert()
            .success();

        crossforge()
            .args(["--config"])
            .arg(&config_path)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("jobs = 4"));
    }

    #[test]
    fn status_runs() {
        // Status reports missing tools without failing
        crossforge()
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("crossforge host status"));
    }

    #[test]
    fn history_runs() {
        crossforge().arg("history").assert().success();
    }

    #[test]
    fn completions_generate() {
        crossforge()
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("crossforge"));
    }
}
