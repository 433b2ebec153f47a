//! End-to-end CLI integration tests for the `tally` binary.
//!
//! Each test creates its own temporary directory, initializes a tally
//! project with one account, and exercises the `tally` binary as a
//! subprocess via `assert_cmd`.

use assert_cmd::Command;
use chrono::{Days, Local};
use predicates::prelude::*;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a `Command` targeting the cargo-built `tally` binary.
///
/// Ambient tally environment variables are stripped so the host shell
/// cannot leak a project or account into the test.
fn tally() -> Command {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.env_remove("TALLY_DIR").env_remove("TALLY_USER");
    cmd
}

/// Initialize a fresh project with one account and return the handle.
fn init_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    tally()
        .args(["init", "--quiet"])
        .current_dir(tmp.path())
        .assert()
        .success();
    tally()
        .args(["user", "add", "alice@example.com", "--quiet"])
        .current_dir(tmp.path())
        .assert()
        .success();
    tmp
}

/// Create a habit and return its ID (parsed from `--json` output).
fn create_habit(tmp: &TempDir, name: &str, extra_args: &[&str]) -> String {
    let mut args = vec!["add", name, "--json"];
    args.extend_from_slice(extra_args);
    let output = tally().args(&args).current_dir(tmp.path()).output().unwrap();
    assert!(
        output.status.success(),
        "add failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    json["id"].as_str().unwrap().to_string()
}

/// Run `tally list --json` and return the parsed array.
fn list_json(tmp: &TempDir, extra_args: &[&str]) -> serde_json::Value {
    let mut args = vec!["list", "--json"];
    args.extend_from_slice(extra_args);
    let output = tally().args(&args).current_dir(tmp.path()).output().unwrap();
    assert!(
        output.status.success(),
        "list failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

/// The local calendar day `n` days before today, as `YYYY-MM-DD`.
fn days_ago(n: u64) -> String {
    let day = Local::now().date_naive() - Days::new(n);
    day.format("%Y-%m-%d").to_string()
}

// ---------------------------------------------------------------------------
// Flow 1: Full lifecycle
// ---------------------------------------------------------------------------

#[test]
fn flow1_full_lifecycle() {
    let tmp = init_project();

    let id1 = create_habit(&tmp, "Drink water", &["-t", "2"]);
    let id2 = create_habit(&tmp, "Read", &[]);
    let id3 = create_habit(&tmp, "Walk", &[]);
    assert!(id1.starts_with("hb-"));

    // All three show up with zeroed statistics.
    let listed = list_json(&tmp, &[]);
    assert_eq!(listed.as_array().unwrap().len(), 3);
    for habit in listed.as_array().unwrap() {
        assert_eq!(habit["today_progress"], 0);
        assert_eq!(habit["completed_today"], false);
        assert_eq!(habit["streak"], 0);
        assert_eq!(habit["weekly_consistency"], 0);
    }

    // Log the two-a-day habit to its target.
    tally()
        .args(["log", &id1, "--quiet"])
        .current_dir(tmp.path())
        .assert()
        .success();
    tally()
        .args(["log", &id1, "--quiet"])
        .current_dir(tmp.path())
        .assert()
        .success();

    let listed = list_json(&tmp, &[]);
    let water = listed
        .as_array()
        .unwrap()
        .iter()
        .find(|h| h["id"] == id1.as_str())
        .unwrap();
    assert_eq!(water["today_progress"], 2);
    assert_eq!(water["completed_today"], true);
    assert_eq!(water["streak"], 1);
    // One successful day out of seven.
    assert_eq!(water["weekly_consistency"], 14);

    // Archive drops the habit from the default listing but not from --all.
    tally()
        .args(["archive", &id2, "--quiet"])
        .current_dir(tmp.path())
        .assert()
        .success();
    assert_eq!(list_json(&tmp, &[]).as_array().unwrap().len(), 2);
    let all = list_json(&tmp, &["--all"]);
    assert_eq!(all.as_array().unwrap().len(), 3);
    let archived = all
        .as_array()
        .unwrap()
        .iter()
        .find(|h| h["id"] == id2.as_str())
        .unwrap();
    assert_eq!(archived["lifecycle"], "archived");

    // Restore brings it back.
    tally()
        .args(["restore", &id2, "--quiet"])
        .current_dir(tmp.path())
        .assert()
        .success();
    assert_eq!(list_json(&tmp, &[]).as_array().unwrap().len(), 3);

    let _ = id3;
}

// ---------------------------------------------------------------------------
// Flow 2: The ledger cap
// ---------------------------------------------------------------------------

#[test]
fn flow2_log_caps_at_daily_target() {
    let tmp = init_project();
    let id = create_habit(&tmp, "Stretch", &["-t", "2"]);

    // First two calls record.
    for _ in 0..2 {
        let output = tally()
            .args(["log", &id, "--json"])
            .current_dir(tmp.path())
            .output()
            .unwrap();
        assert!(output.status.success());
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["recorded"], true);
    }

    // Third call in the same day is ignored and the count stays at 2.
    let output = tally()
        .args(["log", &id, "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["recorded"], false);
    assert_eq!(json["progress"], 2);
}

#[test]
fn flow2_undo_removes_one_event() {
    let tmp = init_project();
    let id = create_habit(&tmp, "Stretch", &["-t", "2"]);

    tally().args(["log", &id, "--quiet"]).current_dir(tmp.path()).assert().success();
    tally().args(["log", &id, "--quiet"]).current_dir(tmp.path()).assert().success();

    let output = tally()
        .args(["undo", &id, "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["removed"], true);
    assert_eq!(json["progress"], 1);

    // Undo twice more: second empties the day, third finds nothing.
    tally().args(["undo", &id, "--quiet"]).current_dir(tmp.path()).assert().success();
    let output = tally()
        .args(["undo", &id, "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["removed"], false);
    assert_eq!(json["progress"], 0);
}

// ---------------------------------------------------------------------------
// Flow 3: Streaks and consistency
// ---------------------------------------------------------------------------

#[test]
fn flow3_streak_accumulates_across_days() {
    let tmp = init_project();
    let id = create_habit(&tmp, "Read", &[]);

    tally()
        .args(["log", &id, "--date", &days_ago(1), "--quiet"])
        .current_dir(tmp.path())
        .assert()
        .success();
    tally()
        .args(["log", &id, "--quiet"])
        .current_dir(tmp.path())
        .assert()
        .success();

    let listed = list_json(&tmp, &[]);
    let habit = &listed.as_array().unwrap()[0];
    assert_eq!(habit["streak"], 2);
    assert_eq!(habit["completed_today"], true);
    // Two successful days out of seven.
    assert_eq!(habit["weekly_consistency"], 29);
}

#[test]
fn flow3_gap_stops_the_streak() {
    let tmp = init_project();
    let id = create_habit(&tmp, "Read", &[]);

    // Events today, 2 days ago and 3 days ago; nothing yesterday.
    tally().args(["log", &id, "--date", &days_ago(3), "--quiet"]).current_dir(tmp.path()).assert().success();
    tally().args(["log", &id, "--date", &days_ago(2), "--quiet"]).current_dir(tmp.path()).assert().success();
    tally().args(["log", &id, "--quiet"]).current_dir(tmp.path()).assert().success();

    let listed = list_json(&tmp, &[]);
    let habit = &listed.as_array().unwrap()[0];
    assert_eq!(habit["streak"], 1);
    // Three successful days out of seven.
    assert_eq!(habit["weekly_consistency"], 43);
}

#[test]
fn flow3_shortfall_today_keeps_yesterdays_run() {
    let tmp = init_project();
    let id = create_habit(&tmp, "Pushups", &["-t", "2"]);

    // Yesterday met the target; today has only one of two.
    tally().args(["log", &id, "--date", &days_ago(1), "--quiet"]).current_dir(tmp.path()).assert().success();
    tally().args(["log", &id, "--date", &days_ago(1), "--quiet"]).current_dir(tmp.path()).assert().success();
    tally().args(["log", &id, "--quiet"]).current_dir(tmp.path()).assert().success();

    let listed = list_json(&tmp, &[]);
    let habit = &listed.as_array().unwrap()[0];
    assert_eq!(habit["today_progress"], 1);
    assert_eq!(habit["completed_today"], false);
    assert_eq!(habit["streak"], 1);
}

#[test]
fn flow3_dashboard_aggregates() {
    let tmp = init_project();
    let id1 = create_habit(&tmp, "Read", &[]);
    let _id2 = create_habit(&tmp, "Walk", &[]);

    // Four successful days for the first habit, including today.
    for n in [0u64, 2, 4, 6] {
        tally()
            .args(["log", &id1, "--date", &days_ago(n), "--quiet"])
            .current_dir(tmp.path())
            .assert()
            .success();
    }

    let output = tally()
        .args(["stats", "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(json["active_habits"], 2);
    assert_eq!(json["completed_today"], 1);
    // Habit one sits at 57%, habit two at 0%; the average rounds to 29.
    assert_eq!(json["weekly_consistency"], 29);

    let habits = json["habits"].as_array().unwrap();
    let read = habits.iter().find(|h| h["id"] == id1.as_str()).unwrap();
    assert_eq!(read["weekly_consistency"], 57);
}

// ---------------------------------------------------------------------------
// Flow 4: Limits and validation
// ---------------------------------------------------------------------------

#[test]
fn flow4_active_habit_cap() {
    let tmp = init_project();
    for i in 0..6 {
        create_habit(&tmp, &format!("Habit {i}"), &[]);
    }

    tally()
        .args(["add", "One too many"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("limit"));

    // Archiving one frees a slot.
    let listed = list_json(&tmp, &[]);
    let first = listed.as_array().unwrap()[0]["id"].as_str().unwrap().to_string();
    tally().args(["archive", &first, "--quiet"]).current_dir(tmp.path()).assert().success();
    create_habit(&tmp, "Replacement", &[]);

    // And now the archived one cannot come back while the cap is full.
    tally()
        .args(["restore", &first])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("limit"));
}

#[test]
fn flow4_zero_target_is_rejected() {
    let tmp = init_project();
    let id = create_habit(&tmp, "Read", &[]);

    tally()
        .args(["target", &id, "0"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1"));

    tally()
        .args(["add", "Bad habit", "--target", "0"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1"));
}

#[test]
fn flow4_name_is_sanitized_and_required() {
    let tmp = init_project();

    // Angle brackets are stripped before the name is stored.
    let id = create_habit(&tmp, "  <b>Read</b>  ", &[]);
    let listed = list_json(&tmp, &[]);
    let habit = listed
        .as_array()
        .unwrap()
        .iter()
        .find(|h| h["id"] == id.as_str())
        .unwrap();
    assert_eq!(habit["name"], "bRead/b");

    // A name that sanitizes to nothing is rejected.
    tally()
        .args(["add", "<>"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("name is required"));
}

#[test]
fn flow4_rename_and_retarget() {
    let tmp = init_project();
    let id = create_habit(&tmp, "Wlak", &[]);

    tally()
        .args(["rename", &id, "Walk", "--quiet"])
        .current_dir(tmp.path())
        .assert()
        .success();
    tally()
        .args(["target", &id, "3", "--quiet"])
        .current_dir(tmp.path())
        .assert()
        .success();

    let listed = list_json(&tmp, &[]);
    let habit = &listed.as_array().unwrap()[0];
    assert_eq!(habit["name"], "Walk");
    assert_eq!(habit["daily_target"], 3);
}

#[test]
fn flow4_archived_habit_rejects_log() {
    let tmp = init_project();
    let id = create_habit(&tmp, "Read", &[]);
    tally().args(["log", &id, "--quiet"]).current_dir(tmp.path()).assert().success();
    tally().args(["archive", &id, "--quiet"]).current_dir(tmp.path()).assert().success();

    tally()
        .args(["log", &id])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("archived"));

    // The ledger survives archival: restoring picks the streak back up.
    tally().args(["restore", &id, "--quiet"]).current_dir(tmp.path()).assert().success();
    let listed = list_json(&tmp, &[]);
    assert_eq!(listed.as_array().unwrap()[0]["today_progress"], 1);
}

#[test]
fn flow4_unknown_habit_errors() {
    let tmp = init_project();
    tally()
        .args(["log", "hb-nope"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// ---------------------------------------------------------------------------
// Flow 5: Accounts
// ---------------------------------------------------------------------------

#[test]
fn flow5_accounts_scope_habits() {
    let tmp = init_project();
    create_habit(&tmp, "Alices habit", &[]);

    tally()
        .args(["user", "add", "bob@example.com", "--quiet"])
        .current_dir(tmp.path())
        .assert()
        .success();

    // Alice stays the default (first account wins); Bob sees nothing.
    assert_eq!(list_json(&tmp, &[]).as_array().unwrap().len(), 1);
    let bobs = list_json(&tmp, &["--user", "bob@example.com"]);
    assert_eq!(bobs.as_array().unwrap().len(), 0);

    // Switching the default moves the scope.
    tally()
        .args(["user", "use", "bob@example.com", "--quiet"])
        .current_dir(tmp.path())
        .assert()
        .success();
    assert_eq!(list_json(&tmp, &[]).as_array().unwrap().len(), 0);
}

#[test]
fn flow5_duplicate_email_rejected() {
    let tmp = init_project();
    tally()
        .args(["user", "add", "alice@example.com"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn flow5_unknown_account_is_a_helpful_error() {
    let tmp = init_project();
    tally()
        .args(["list", "--user", "carol@example.com"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("tally user add"));
}

// ---------------------------------------------------------------------------
// Flow 6: Setup
// ---------------------------------------------------------------------------

#[test]
fn flow6_init_guard_and_force() {
    let tmp = init_project();

    tally()
        .args(["init"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));

    tally()
        .args(["init", "--force", "--quiet"])
        .current_dir(tmp.path())
        .assert()
        .success();
}

#[test]
fn flow6_custom_prefix() {
    let tmp = TempDir::new().unwrap();
    tally()
        .args(["init", "--prefix", "daily", "--quiet"])
        .current_dir(tmp.path())
        .assert()
        .success();
    tally()
        .args(["user", "add", "alice@example.com", "--quiet"])
        .current_dir(tmp.path())
        .assert()
        .success();

    let id = create_habit(&tmp, "Read", &[]);
    assert!(id.starts_with("daily-"), "unexpected id: {id}");
}

#[test]
fn flow6_version_prints() {
    tally()
        .args(["version"])
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn flow6_commands_without_project_fail_with_hint() {
    let tmp = TempDir::new().unwrap();
    tally()
        .args(["list"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("tally init"));
}
