//! End-to-end `cf start` runs against the fake Cloud Controller.
//!
//! Each test writes a config targeting its own fake and points `CF_CONFIG`
//! at it. Poll ticks are real seconds here, so scenarios stay short.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::fake_cc::{
    FakeCloudController, Scenario, StartReply, cc_error, instances, not_staged,
};

fn cf() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("cf"));
    cmd.env("NO_COLOR", "1").env_remove("CF_LOG");
    cmd
}

/// Writes a config for `cc` and returns a command ready to `start my-app`.
fn cf_start(cc: &FakeCloudController, timeout_secs: u64) -> (TempDir, Command) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, cc.config_yaml(timeout_secs)).expect("write config");
    let mut cmd = cf();
    cmd.env("CF_CONFIG", &path).args(["start", "my-app"]);
    (dir, cmd)
}

#[test]
fn test_start_streams_log_and_reports_url() {
    let cc = FakeCloudController::spawn(Scenario::stopped(vec![
        not_staged(),
        instances(&["DOWN", "STARTING"]),
        instances(&["RUNNING", "RUNNING"]),
    ]));
    let (_dir, mut cmd) = cf_start(&cc, 30);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Starting app my-app..."))
        .stdout(predicate::str::contains("OK"))
        .stdout(predicate::str::contains("log line 1"))
        .stdout(predicate::str::contains(
            "0 of 2 instances running (1 starting, 1 down)",
        ))
        .stdout(predicate::str::contains(
            "Started: app my-app available at my-app.example.com",
        ))
        .stdout(predicate::str::contains("FAILED").not());
    assert_eq!(cc.start_calls(), 1);
    assert_eq!(cc.poll_calls(), 3);
}

#[test]
fn test_start_times_out_while_instances_keep_starting() {
    let cc = FakeCloudController::spawn(Scenario::stopped(vec![instances(&[
        "STARTING", "STARTING",
    ])]));
    let (_dir, mut cmd) = cf_start(&cc, 1);

    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("0 of 2 instances running (2 starting)"))
        .stdout(predicate::str::contains("FAILED"))
        .stdout(predicate::str::contains("Start app timeout"))
        .stdout(predicate::str::contains("Started").not());
}

#[test]
fn test_start_times_out_when_instance_poll_never_answers() {
    let mut scenario = Scenario::stopped(vec![instances(&["RUNNING", "RUNNING"])]);
    scenario.hang_polls = true;
    let cc = FakeCloudController::spawn(scenario);
    let (_dir, mut cmd) = cf_start(&cc, 2);
    cmd.timeout(std::time::Duration::from_secs(20));

    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("FAILED"))
        .stdout(predicate::str::contains("Start app timeout"))
        .stdout(predicate::str::contains("instances running").not());
    assert_eq!(cc.poll_calls(), 1);
}

#[test]
fn test_start_staging_error_fails() {
    let cc = FakeCloudController::spawn(Scenario::stopped(vec![cc_error(
        170_001,
        "Staging error: no buildpack",
    )]));
    let (_dir, mut cmd) = cf_start(&cc, 30);

    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("FAILED"))
        .stdout(predicate::str::contains("Error staging app"))
        .stdout(predicate::str::contains("instances running").not());
}

#[test]
fn test_start_flapping_instance_fails() {
    let cc = FakeCloudController::spawn(Scenario::stopped(vec![instances(&[
        "RUNNING", "FLAPPING",
    ])]));
    let (_dir, mut cmd) = cf_start(&cc, 30);

    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("1 of 2 instances running (1 flapping)"))
        .stdout(predicate::str::contains("Start unsuccessful"));
}

#[test]
fn test_start_rejected_request_reports_platform_reason() {
    let mut scenario = Scenario::stopped(vec![instances(&["RUNNING", "RUNNING"])]);
    scenario.start = StartReply::Rejected {
        code: 100_005,
        description: "You have exceeded your organization's memory limit.",
    };
    let cc = FakeCloudController::spawn(scenario);
    let (_dir, mut cmd) = cf_start(&cc, 30);

    cmd.assert().code(1).stdout(predicate::str::contains(
        "Error starting application my-app: You have exceeded your organization's memory limit.",
    ));
    assert_eq!(cc.poll_calls(), 0);
}

#[test]
fn test_start_already_started_app_is_a_no_op() {
    let mut scenario = Scenario::stopped(vec![instances(&["RUNNING", "RUNNING"])]);
    scenario.app_state = "STARTED";
    let cc = FakeCloudController::spawn(scenario);
    let (_dir, mut cmd) = cf_start(&cc, 30);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("App my-app is already started"))
        .stdout(predicate::str::contains("Starting").not());
    assert_eq!(cc.start_calls(), 0);
    assert_eq!(cc.poll_calls(), 0);
}

#[test]
fn test_start_unknown_app_fails_without_starting() {
    let cc = FakeCloudController::spawn(Scenario::stopped(vec![]));
    let (dir, _) = cf_start(&cc, 30);

    cf().env("CF_CONFIG", dir.path().join("config.yaml"))
        .args(["start", "other-app"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("FAILED"))
        .stdout(predicate::str::contains("App other-app not found"));
    assert_eq!(cc.start_calls(), 0);
}

#[test]
fn test_start_quiet_still_prints_failure() {
    let cc = FakeCloudController::spawn(Scenario::stopped(vec![cc_error(
        170_001,
        "Staging error: no buildpack",
    )]));
    let (_dir, mut cmd) = cf_start(&cc, 30);
    cmd.arg("--quiet");

    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("Starting app").not())
        .stdout(predicate::str::contains("FAILED"))
        .stdout(predicate::str::contains("Error staging app"));
}

#[test]
fn test_start_without_targeted_space_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "target: http://127.0.0.1:9\n").unwrap();

    cf().env("CF_CONFIG", &path)
        .args(["start", "my-app"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No space targeted"));
}
