//! Integration tests for the Cachette CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`. The
//! password is always passed with `-p` (or the environment) so nothing
//! prompts, and every test directory carries a `.cachette.toml` with the
//! cheapest Argon2 settings so the suite stays fast.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const PASSWORD: &str = "cli-test-password";

/// Helper: a temp dir with a fast `.cachette.toml`.
fn workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    tmp.child(".cachette.toml")
        .write_str("argon2_memory_kib = 8192\nargon2_iterations = 1\nargon2_parallelism = 1\n")
        .unwrap();
    tmp
}

/// Helper: a Command for the cachette binary, run inside `tmp`.
fn cachette(tmp: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("cachette").expect("binary should exist");
    cmd.current_dir(tmp.path())
        .env_remove("CACHETTE_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper: run `cachette -p PASSWORD <args>` and require success.
fn run_ok(tmp: &TempDir, args: &[&str]) {
    cachette(tmp)
        .args(["-p", PASSWORD])
        .args(args)
        .assert()
        .success();
}

fn seed_greek(tmp: &TempDir) {
    run_ok(tmp, &["store.cache", "alpha", "1"]);
    run_ok(tmp, &["store.cache", "alba", "2"]);
    run_ok(tmp, &["store.cache", "beta", "3"]);
}

#[test]
fn help_flag_shows_usage() {
    let tmp = workspace();
    cachette(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Password-protected encrypted key-value store",
        ))
        .stdout(predicate::str::contains("With only FILE, every entry is listed"))
        .stdout(predicate::str::contains("<FILE>"))
        .stdout(predicate::str::contains("-D"));
}

#[test]
fn version_flag_shows_version() {
    let tmp = workspace();
    cachette(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cachette"));
}

#[test]
fn no_args_is_a_usage_error() {
    let tmp = workspace();
    cachette(&tmp)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn delete_flag_conflicts_with_key() {
    let tmp = workspace();
    cachette(&tmp)
        .args(["-p", PASSWORD, "-d", "alpha", "store.cache", "beta"])
        .assert()
        .failure()
        .code(2);
    tmp.child("store.cache").assert(predicate::path::missing());
}

#[test]
fn first_use_creates_store_file() {
    let tmp = workspace();
    cachette(&tmp)
        .args(["-p", PASSWORD, "store.cache"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("Initialized new store"));

    tmp.child("store.cache").assert(predicate::path::is_file());
}

#[test]
fn cheap_kdf_config_warns_on_stderr() {
    let tmp = workspace();
    cachette(&tmp)
        .args(["-p", PASSWORD, "store.cache"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("Argon2 costs below the defaults"));
}

#[test]
fn default_kdf_config_does_not_warn() {
    let tmp = TempDir::new().unwrap();
    cachette(&tmp)
        .args(["-p", PASSWORD, "store.cache"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Argon2 costs").not());
}

#[test]
fn list_prints_sorted_key_value_lines() {
    let tmp = workspace();
    seed_greek(&tmp);

    cachette(&tmp)
        .args(["-p", PASSWORD, "store.cache"])
        .assert()
        .success()
        .stdout("alba -> 2\nalpha -> 1\nbeta -> 3\n");
}

#[test]
fn get_prints_raw_value_without_newline() {
    let tmp = workspace();
    seed_greek(&tmp);

    cachette(&tmp)
        .args(["-p", PASSWORD, "store.cache", "ab"])
        .assert()
        .success()
        .stdout("2");

    cachette(&tmp)
        .args(["-p", PASSWORD, "-e", "store.cache", "alpha"])
        .assert()
        .success()
        .stdout("1");
}

#[test]
fn exact_get_does_not_fuzzy_match() {
    let tmp = workspace();
    seed_greek(&tmp);

    cachette(&tmp)
        .args(["-p", PASSWORD, "-e", "store.cache", "ab"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("key not found: ab"));
}

#[test]
fn missing_fuzzy_key_exits_one() {
    let tmp = workspace();
    seed_greek(&tmp);

    cachette(&tmp)
        .args(["-p", PASSWORD, "store.cache", "zz"])
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("key not found: zz(fuzzy)"));
}

#[test]
fn empty_value_reports_no_matched_data() {
    let tmp = workspace();
    run_ok(&tmp, &["store.cache", "blank", ""]);

    cachette(&tmp)
        .args(["-p", PASSWORD, "-e", "store.cache", "blank"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no matched data"));
}

#[test]
fn set_overwrites_value() {
    let tmp = workspace();
    run_ok(&tmp, &["store.cache", "db", "old"]);

    cachette(&tmp)
        .args(["-p", PASSWORD, "store.cache", "db", "new"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated 'db'"));

    cachette(&tmp)
        .args(["-p", PASSWORD, "-e", "store.cache", "db"])
        .assert()
        .success()
        .stdout("new");
}

#[test]
fn wrong_password_exits_one_with_generic_message() {
    let tmp = workspace();
    seed_greek(&tmp);
    let before = std::fs::read(tmp.child("store.cache").path()).unwrap();

    cachette(&tmp)
        .args(["-p", "not-it", "store.cache", "new-key", "value"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("wrong password or corrupted data"));

    assert_eq!(std::fs::read(tmp.child("store.cache").path()).unwrap(), before);
}

#[test]
fn foreign_file_reports_generic_message() {
    let tmp = workspace();
    tmp.child("notes.txt")
        .write_str(&"not a cachette store, just text\n".repeat(5))
        .unwrap();

    cachette(&tmp)
        .args(["-p", PASSWORD, "notes.txt"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("wrong password or corrupted data"));
}

#[test]
fn exact_delete_removes_one_key() {
    let tmp = workspace();
    seed_greek(&tmp);

    run_ok(&tmp, &["-d", "alba", "store.cache"]);

    cachette(&tmp)
        .args(["-p", PASSWORD, "store.cache"])
        .assert()
        .success()
        .stdout("alpha -> 1\nbeta -> 3\n");

    cachette(&tmp)
        .args(["-p", PASSWORD, "-d", "alba", "store.cache"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("key not found: alba"));
}

#[test]
fn regex_delete_removes_all_matches_then_fails() {
    let tmp = workspace();
    seed_greek(&tmp);

    cachette(&tmp)
        .args(["-p", PASSWORD, "-D", "^a", "store.cache"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alba, alpha"));

    cachette(&tmp)
        .args(["-p", PASSWORD, "store.cache"])
        .assert()
        .success()
        .stdout("beta -> 3\n");

    cachette(&tmp)
        .args(["-p", PASSWORD, "-D", "^a", "store.cache"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("key not found: ^a(regex)"));
}

#[test]
fn invalid_regex_exits_one() {
    let tmp = workspace();
    seed_greek(&tmp);

    cachette(&tmp)
        .args(["-p", PASSWORD, "-D", "(", "store.cache"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid key pattern"));
}

#[test]
fn password_can_come_from_environment() {
    let tmp = workspace();
    seed_greek(&tmp);

    cachette(&tmp)
        .env("CACHETTE_PASSWORD", PASSWORD)
        .args(["store.cache", "bt"])
        .assert()
        .success()
        .stdout("3");
}

#[test]
fn verbose_flag_emits_diagnostics_on_stderr() {
    let tmp = workspace();
    seed_greek(&tmp);

    cachette(&tmp)
        .args(["-v", "-p", PASSWORD, "store.cache", "ab"])
        .assert()
        .success()
        .stdout("2")
        .stderr(predicate::str::contains("opening store"));
}

#[test]
fn broken_config_file_exits_one() {
    let tmp = TempDir::new().unwrap();
    tmp.child(".cachette.toml").write_str("not valid {{toml").unwrap();

    cachette(&tmp)
        .args(["-p", PASSWORD, "store.cache"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Config file error"));
}
