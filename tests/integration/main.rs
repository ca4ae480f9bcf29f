//! Integration tests for texpng

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn texpng() -> Command {
        cargo_bin_cmd!("texpng")
    }

    /// Config pointing the toolchain at nonexistent binaries, so render
    /// exercises the failure path without a TeX installation.
    fn write_config(dir: &Path, work_dir: &Path) -> std::path::PathBuf {
        let path = dir.join("config.toml");
        let content = format!(
            "[tools]\nlatex = \"/nonexistent/texpng-latex\"\ndvipng = \"/nonexistent/texpng-dvipng\"\n\n[render]\nwork_dir = \"{}\"\n",
            work_dir.display()
        );
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn help_displays() {
        texpng()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("LaTeX formula to PNG"));
    }

    #[test]
    fn version_displays() {
        texpng()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("texpng"));
    }

    #[test]
    fn render_help_displays() {
        texpng()
            .args(["render", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Render a formula"));
    }

    #[test]
    fn config_path_honors_flag() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.toml");

        texpng()
            .args(["--config", path.to_str().unwrap(), "config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("custom.toml"));
    }

    #[test]
    fn config_path_honors_env() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("from-env.toml");

        texpng()
            .env("TEXPNG_CONFIG", path.to_str().unwrap())
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("from-env.toml"));
    }

    #[test]
    fn config_show_lists_sections() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        texpng()
            .args(["--config", path.to_str().unwrap(), "config", "show"])
            .assert()
            .success()
            .stdout(
                predicate::str::contains("[tools]").and(predicate::str::contains("[render]")),
            );
    }

    #[test]
    fn config_init_creates_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        texpng()
            .args(["--config", path.to_str().unwrap(), "config", "init"])
            .assert()
            .success();

        assert!(path.exists());
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("density = 155"));
    }

    #[test]
    fn config_set_roundtrips() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        texpng()
            .args([
                "--config",
                path.to_str().unwrap(),
                "config",
                "set",
                "render.density",
                "300",
            ])
            .assert()
            .success();

        texpng()
            .args(["--config", path.to_str().unwrap(), "config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("density = 300"));
    }

    #[test]
    fn status_runs() {
        // Checks may fail without a TeX installation, but must not panic
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        texpng()
            .args(["--config", path.to_str().unwrap(), "status"])
            .assert()
            .success()
            .stdout(predicate::str::contains("texpng System Status"));
    }

    #[test]
    fn render_missing_compiler_fails() {
        let temp = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let config = write_config(temp.path(), work.path());

        texpng()
            .args([
                "--config",
                config.to_str().unwrap(),
                "render",
                "x^2 + y^2 = z^2",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unable to compile formula"));
    }

    #[test]
    fn render_failure_leaves_workspace_clean() {
        let temp = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let config = write_config(temp.path(), work.path());

        texpng()
            .args(["--config", config.to_str().unwrap(), "render", "\\frac{1}{"])
            .assert()
            .failure();

        assert_eq!(std::fs::read_dir(work.path()).unwrap().count(), 0);
    }

    #[test]
    fn render_failure_shows_hint() {
        let temp = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let config = write_config(temp.path(), work.path());

        texpng()
            .args(["--config", config.to_str().unwrap(), "render", "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Hint:"));
    }
}
