use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("idm").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("idm"));
}

#[test]
fn get_requires_an_indicator() {
    let mut cmd = Command::cargo_bin("idm").unwrap();
    cmd.arg("get");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--indicator"));
}

// Live test (opt-in): cargo test --features online
#[cfg(feature = "online")]
#[test]
fn fetch_online_real_gdp_growth() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("idm").unwrap();
    cmd.args([
        "--cache-dir",
        dir.path().to_str().unwrap(),
        "get",
        "--indicator",
        "Real GDP growth",
        "--country",
        "India",
        "--stats",
    ]);
    cmd.assert().success();
}
