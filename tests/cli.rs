use assert_cmd::prelude::*;
use predicates::str::contains;
use std::process::Command;

#[test]
fn cli_version() {
    Command::cargo_bin("pool-demo")
        .unwrap()
        .arg("-V")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn cli_runs_sample_jobs() {
    // Job `i` returns `i % 3 + 1 + i`.
    Command::cargo_bin("pool-demo")
        .unwrap()
        .args(["--threads", "2", "--jobs", "4", "--unit-ms", "1"])
        .assert()
        .success()
        .stdout(contains("result : 1\n"))
        .stdout(contains("result : 3\n"))
        .stdout(contains("result : 5\n"))
        .stdout(contains("result : 4\n"))
        .stdout(contains("ID 2 end after 3 units"));
}

#[test]
fn cli_rejects_zero_threads() {
    Command::cargo_bin("pool-demo")
        .unwrap()
        .args(["--threads", "0", "--unit-ms", "1"])
        .assert()
        .failure()
        .stderr(contains("greater than zero"));
}

#[test]
fn cli_invalid_argument() {
    Command::cargo_bin("pool-demo")
        .unwrap()
        .args(["--threads", "many"])
        .assert()
        .failure();
}

#[test]
fn cli_rejects_out_of_range_values() {
    Command::cargo_bin("pool-demo")
        .unwrap()
        .args(["--unit-ms", "18446744073709551"])
        .assert()
        .failure()
        .stderr(contains("--unit-ms"));

    Command::cargo_bin("pool-demo")
        .unwrap()
        .args(["--jobs", "18446744073709551615"])
        .assert()
        .failure()
        .stderr(contains("--jobs"));

    Command::cargo_bin("pool-demo")
        .unwrap()
        .args(["--threads", "1000000"])
        .assert()
        .failure()
        .stderr(contains("--threads"));
}
