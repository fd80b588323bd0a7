//! Integration tests for CLI behavior
//!
//! These tests run the binary against local CSV files with audio disabled,
//! so no network access is needed.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper to create a command for the vocadeck CLI
fn vocadeck_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_vocadeck"))
}

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Creates a working directory holding a copy of the named fixtures.
fn workspace_with(fixtures: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for name in fixtures {
        fs::copy(fixtures_dir().join(name), dir.path().join(name)).unwrap();
    }
    dir
}

fn build_offline(dir: &Path) -> Command {
    let mut cmd = vocadeck_cmd();
    cmd.current_dir(dir).arg("build").arg("--no-audio");
    cmd
}

mod help_command {
    use super::*;

    #[test]
    fn shows_help_with_flag() {
        vocadeck_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"));
    }

    #[test]
    fn shows_version_with_flag() {
        vocadeck_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn lists_subcommands() {
        vocadeck_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("build"))
            .stdout(predicate::str::contains("translate"))
            .stdout(predicate::str::contains("cache"));
    }
}

mod id_command {
    use super::*;

    #[test]
    fn prints_derived_identifiers() {
        vocadeck_cmd()
            .args(["id", "run"])
            .assert()
            .success()
            .stdout(predicate::str::contains("a53108f7543b75adbb34afc035d4cdf6"))
            .stdout(predicate::str::contains("a53108f7543b75adbb34afc035d4cdf6.mp3"))
            .stdout(predicate::str::contains("md5-v1"));
    }

    #[test]
    fn prints_deck_id() {
        vocadeck_cmd()
            .args(["id", "Verbs"])
            .assert()
            .success()
            .stdout(predicate::str::contains("2543540063"));
    }
}

mod init_command {
    use super::*;

    #[test]
    fn creates_default_config() {
        let dir = TempDir::new().unwrap();

        vocadeck_cmd()
            .current_dir(dir.path())
            .arg("init")
            .assert()
            .success();

        let content = fs::read_to_string(dir.path().join(".vocadeck.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json["cache_file"], ".sheet_cache.json");
        assert_eq!(json["output_dir"], "output");
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".vocadeck.json"), "{}").unwrap();

        vocadeck_cmd()
            .current_dir(dir.path())
            .arg("init")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("already exists"))
            .stderr(predicate::str::contains("--force"));

        assert_eq!(
            fs::read_to_string(dir.path().join(".vocadeck.json")).unwrap(),
            "{}"
        );
    }

    #[test]
    fn overwrites_with_force() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".vocadeck.json"), "{}").unwrap();

        vocadeck_cmd()
            .current_dir(dir.path())
            .args(["init", "--force"])
            .assert()
            .success();

        let content = fs::read_to_string(dir.path().join(".vocadeck.json")).unwrap();
        assert!(content.contains("audio_dir"));
    }

    #[test]
    fn writes_to_config_flag_path() {
        let dir = TempDir::new().unwrap();

        vocadeck_cmd()
            .current_dir(dir.path())
            .args(["init", "--config", "settings/deck.json"])
            .assert()
            .success();

        assert!(dir.path().join("settings/deck.json").is_file());
        assert!(!dir.path().join(".vocadeck.json").exists());
    }
}

mod build_command {
    use super::*;

    #[test]
    fn builds_deck_and_records_cache() {
        let dir = workspace_with(&["verbs.csv"]);

        build_offline(dir.path())
            .arg("verbs.csv")
            .assert()
            .success()
            .stdout(predicate::str::contains("verbs: built"))
            .stdout(predicate::str::contains("3 notes"));

        assert!(dir.path().join("output/verbs.apkg").is_file());
        let cache = fs::read_to_string(dir.path().join(".sheet_cache.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&cache).unwrap();
        assert_eq!(json["version"], 1);
        assert!(json["entries"]["verbs"]["fingerprint"].is_string());
    }

    #[test]
    fn second_run_is_up_to_date() {
        let dir = workspace_with(&["verbs.csv"]);

        build_offline(dir.path()).arg("verbs.csv").assert().success();
        build_offline(dir.path())
            .arg("verbs.csv")
            .assert()
            .success()
            .stdout(predicate::str::contains("verbs: up to date"));
    }

    #[test]
    fn edited_rows_rebuild() {
        let dir = workspace_with(&["verbs.csv"]);
        build_offline(dir.path()).arg("verbs.csv").assert().success();

        fs::write(
            dir.path().join("verbs.csv"),
            "English,French\nrun,courir\nswim,nager\n",
        )
        .unwrap();

        build_offline(dir.path())
            .arg("verbs.csv")
            .assert()
            .success()
            .stdout(predicate::str::contains("[stale]"));
    }

    #[test]
    fn deleted_output_rebuilds() {
        let dir = workspace_with(&["verbs.csv"]);
        build_offline(dir.path()).arg("verbs.csv").assert().success();
        fs::remove_file(dir.path().join("output/verbs.apkg")).unwrap();

        build_offline(dir.path())
            .arg("verbs.csv")
            .assert()
            .success()
            .stdout(predicate::str::contains("[missing-output]"));
        assert!(dir.path().join("output/verbs.apkg").is_file());
    }

    #[test]
    fn force_rebuilds_unchanged_source() {
        let dir = workspace_with(&["verbs.csv"]);
        build_offline(dir.path()).arg("verbs.csv").assert().success();

        build_offline(dir.path())
            .args(["verbs.csv", "--force"])
            .assert()
            .success()
            .stdout(predicate::str::contains("verbs: built"));
    }

    #[test]
    fn no_cache_leaves_no_cache_file() {
        let dir = workspace_with(&["verbs.csv"]);

        build_offline(dir.path())
            .args(["verbs.csv", "--no-cache"])
            .assert()
            .success();

        assert!(dir.path().join("output/verbs.apkg").is_file());
        assert!(!dir.path().join(".sheet_cache.json").exists());
    }

    #[test]
    fn uses_default_input() {
        let dir = workspace_with(&["verbs.csv"]);
        fs::rename(
            dir.path().join("verbs.csv"),
            dir.path().join("basic_french.csv"),
        )
        .unwrap();

        build_offline(dir.path()).assert().success();
        assert!(dir.path().join("output/basic_french.apkg").is_file());
    }

    #[test]
    fn missing_input_is_fatal() {
        let dir = TempDir::new().unwrap();

        build_offline(dir.path())
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Input file not found"));
        assert!(!dir.path().join("output").exists());
    }

    #[test]
    fn bad_source_fails_without_stopping_others() {
        let dir = workspace_with(&["no_english.csv", "verbs.csv"]);

        build_offline(dir.path())
            .args(["no_english.csv", "verbs.csv"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("no_english: failed"))
            .stdout(predicate::str::contains("verbs: built"));
        assert!(dir.path().join("output/verbs.apkg").is_file());
    }

    #[test]
    fn sheets_without_spreadsheet_config_is_fatal() {
        let dir = TempDir::new().unwrap();

        build_offline(dir.path())
            .args(["--sheet", "Verbs"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("No spreadsheet configured"));
    }

    #[test]
    fn json_output() {
        let dir = workspace_with(&["verbs.csv"]);

        let output = build_offline(dir.path())
            .args(["verbs.csv", "--format", "json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json[0]["outcome"], "generated");
        assert_eq!(json[0]["source_name"], "verbs");
        assert_eq!(json[0]["report"]["deck_name"], "Verbs");
        assert_eq!(json[0]["report"]["notes"], 3);
    }

    #[test]
    fn honours_config_directories() {
        let dir = workspace_with(&["verbs.csv"]);
        fs::write(
            dir.path().join(".vocadeck.json"),
            r#"{ "output_dir": "decks", "cache_file": "state/cache.json" }"#,
        )
        .unwrap();

        build_offline(dir.path()).arg("verbs.csv").assert().success();

        assert!(dir.path().join("decks/verbs.apkg").is_file());
        assert!(dir.path().join("state/cache.json").is_file());
    }

    #[test]
    fn invalid_config_is_fatal() {
        let dir = workspace_with(&["verbs.csv"]);
        fs::write(dir.path().join(".vocadeck.json"), r#"{ "outputdir": "x" }"#).unwrap();

        build_offline(dir.path())
            .arg("verbs.csv")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Config validation failed"));
    }
}

mod cache_command {
    use super::*;

    #[test]
    fn show_lists_entries() {
        let dir = workspace_with(&["verbs.csv"]);
        build_offline(dir.path()).arg("verbs.csv").assert().success();

        vocadeck_cmd()
            .current_dir(dir.path())
            .args(["cache", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("1 cached sources"))
            .stdout(predicate::str::contains("verbs"));
    }

    #[test]
    fn show_empty_cache() {
        let dir = TempDir::new().unwrap();

        vocadeck_cmd()
            .current_dir(dir.path())
            .args(["cache", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No cached sources"));
    }

    #[test]
    fn clean_forces_full_rebuild() {
        let dir = workspace_with(&["verbs.csv"]);
        build_offline(dir.path()).arg("verbs.csv").assert().success();

        vocadeck_cmd()
            .current_dir(dir.path())
            .args(["cache", "clean"])
            .assert()
            .success();
        assert!(!dir.path().join(".sheet_cache.json").exists());

        build_offline(dir.path())
            .arg("verbs.csv")
            .assert()
            .success()
            .stdout(predicate::str::contains("[untracked]"));
    }
}
