//! Binary-level tests which don't need any cloud infrastructure.
//!
//! End-to-end load semantics are covered by the `POSTGRES_TEST_URL`-gated
//! tests next to the PostgreSQL driver.

use cli_test_dir::*;

#[test]
fn help_flag() {
    let testdir = TestDir::new("csv2pg", "help_flag");
    let output = testdir.cmd().arg("--help").expect_success();
    assert!(output.stdout_str().contains("csv2pg"));
    assert!(output.stdout_str().contains("--if-exists"));
}

#[test]
fn version_flag() {
    let testdir = TestDir::new("csv2pg", "version_flag");
    let output = testdir.cmd().arg("--version").expect_success();
    assert!(output.stdout_str().contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn rejects_non_s3_sources() {
    let testdir = TestDir::new("csv2pg", "rejects_non_s3_sources");
    let output = testdir
        .cmd()
        .args([
            "https://bucket/file.csv",
            "postgres://postgres@localhost:5432/db#t",
        ])
        .expect_failure();
    assert!(output.stderr_str().contains("s3://"));
}

#[test]
fn rejects_directory_like_sources() {
    let testdir = TestDir::new("csv2pg", "rejects_directory_like_sources");
    testdir
        .cmd()
        .args([
            "s3://bucket/dir/",
            "postgres://postgres@localhost:5432/db#t",
        ])
        .expect_failure();
}

#[test]
fn rejects_destinations_without_a_table_name() {
    let testdir = TestDir::new("csv2pg", "rejects_destinations_without_a_table_name");
    let output = testdir
        .cmd()
        .args([
            "s3://bucket/file.csv",
            "postgres://postgres@localhost:5432/db",
        ])
        .expect_failure();
    assert!(output.stderr_str().contains("#table_name"));
}

#[test]
fn missing_aws_credentials_fail_before_any_network_call() {
    let testdir = TestDir::new("csv2pg", "missing_aws_credentials");
    let output = testdir
        .cmd()
        .env_remove("AWS_ACCESS_KEY_ID")
        .env_remove("AWS_SECRET_ACCESS_KEY")
        .args([
            "s3://bucket/file.csv",
            "postgres://postgres@localhost:5432/db#t",
        ])
        .expect_failure();
    assert!(output.stderr_str().contains("AWS_ACCESS_KEY_ID"));
}
