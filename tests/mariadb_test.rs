mod common;

use common::*;
use dbprobe::probe::{ConnectionOutcome, ConnectionProbe, Driver, MySqlConnector};

#[tokio::test]
#[ignore = "requires running MariaDB container"]
async fn test_mariadb_probe_succeeds() {
    if skip_if_no_mariadb() {
        return;
    }

    let (driver, params) = params_from_dsn(MARIADB_DSN);
    assert_eq!(driver, Driver::MySql);

    let probe = ConnectionProbe::new(MySqlConnector::default());
    let outcome = probe.probe(&params).await;
    assert_eq!(outcome, ConnectionOutcome::success());
}

#[tokio::test]
#[ignore = "requires running MariaDB container"]
async fn test_mariadb_invalid_credentials() {
    if skip_if_no_mariadb() {
        return;
    }

    let (_, params) = params_from_dsn(MARIADB_DSN);
    let probe = ConnectionProbe::new(MySqlConnector::default());
    let outcome = probe.probe(&with_password(&params, "invalid")).await;

    assert!(!outcome.succeeded);
    let diagnostic = outcome.diagnostic.unwrap();
    assert!(
        diagnostic.contains("Access denied"),
        "unexpected diagnostic: {diagnostic}"
    );
}

#[tokio::test]
#[ignore = "requires running MariaDB container"]
async fn test_mariadb_wrong_port_fails() {
    if skip_if_no_mariadb() {
        return;
    }

    let (_, params) = params_from_dsn(MARIADB_DSN);
    let probe = ConnectionProbe::new(MySqlConnector::default());
    let outcome = probe.probe(&with_port(&params, 1)).await;

    assert!(!outcome.succeeded);
    assert!(outcome.diagnostic.is_some_and(|d| !d.is_empty()));
}

#[tokio::test]
#[ignore = "requires running MariaDB container"]
async fn test_mariadb_probe_is_idempotent() {
    if skip_if_no_mariadb() {
        return;
    }

    let (_, params) = params_from_dsn(MARIADB_DSN);
    let probe = ConnectionProbe::new(MySqlConnector::default());
    let first = probe.probe(&params).await;
    let second = probe.probe(&params).await;
    assert_eq!(first, second);
}

#[test]
#[ignore = "requires running MariaDB container"]
fn test_mariadb_binary_exit_code() {
    if skip_if_no_mariadb() {
        return;
    }

    let output = run_dbprobe(&["--dsn", MARIADB_DSN]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("succeeded"));
}
