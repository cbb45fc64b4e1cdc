#![cfg(unix)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use std::{fs, time::Duration};
use vpndeck::{
    catalog::Catalog,
    client::{ActionResult, Client, Intent, invoker::ProcessInvoker},
};

fn client_for(script: &std::path::Path, timeout: Duration) -> Client<ProcessInvoker> {
    Client::new(
        script.to_str().unwrap(),
        Catalog::builtin(),
        timeout,
        ProcessInvoker,
    )
}

#[tokio::test]
async fn test_connect_round_trip() {
    let script = common::write_fake_client("client_connect");
    let client = client_for(&script, Duration::from_secs(10));

    let intent = Intent::Connect {
        region: "Japan".to_string(),
    };
    let result = client.dispatch(&intent, None).await;

    assert_eq!(
        result,
        ActionResult::Output("You are connected to Japan!\n".to_string())
    );

    fs::remove_file(&script).unwrap();
}

#[tokio::test]
async fn test_login_round_trip() {
    let script = common::write_fake_client("client_login");
    let client = client_for(&script, Duration::from_secs(10));

    let result = client.dispatch(&Intent::Login, Some("tok123")).await;
    assert_eq!(result, ActionResult::Output("Welcome!\n".to_string()));

    fs::remove_file(&script).unwrap();
}

#[tokio::test]
async fn test_stderr_warning_dominates_clean_exit() {
    let script = common::write_script(
        "client_warn",
        "#!/bin/sh\nprintf 'disconnected\\n'\nprintf 'warn: cache stale\\n' >&2\nexit 0\n",
    );
    let client = client_for(&script, Duration::from_secs(10));

    let result = client.dispatch(&Intent::Disconnect, None).await;
    assert_eq!(
        result,
        ActionResult::Error("warn: cache stale\n".to_string())
    );

    fs::remove_file(&script).unwrap();
}

#[tokio::test]
async fn test_status_round_trip() {
    let script = common::write_fake_client("client_status");
    let client = client_for(&script, Duration::from_secs(10));

    let status = client.status().await.unwrap();
    assert_eq!(status.get("Status"), Some("Connected"));
    assert_eq!(status.get("Country"), Some("Japan"));
    assert_eq!(status.get("Server"), Some("jp123"));
    assert!(status.malformed_lines().is_empty());

    fs::remove_file(&script).unwrap();
}

#[tokio::test]
async fn test_status_with_malformed_line_still_parses() {
    let script = common::write_script(
        "client_status_malformed",
        "#!/bin/sh\nprintf 'New feature available!\\nStatus: Connected\\nCountry: Japan\\n'\n",
    );
    let client = client_for(&script, Duration::from_secs(10));

    let status = client.status().await.unwrap();
    assert_eq!(status.get("Status"), Some("Connected"));
    assert_eq!(status.get("Country"), Some("Japan"));
    assert_eq!(status.malformed_lines(), ["New feature available!"]);

    fs::remove_file(&script).unwrap();
}

#[tokio::test]
async fn test_status_failure_reported_on_stderr() {
    let script = common::write_script(
        "client_status_err",
        "#!/bin/sh\nprintf 'You are not logged in.\\n' >&2\nexit 1\n",
    );
    let client = client_for(&script, Duration::from_secs(10));

    let result = client.status().await;
    assert!(result.is_err());
    assert_eq!(result.unwrap_err().to_string(), "You are not logged in.\n");

    fs::remove_file(&script).unwrap();
}

#[tokio::test]
async fn test_slow_client_times_out() {
    let script = common::write_script("client_slow", "#!/bin/sh\nsleep 10\n");
    let client = client_for(&script, Duration::from_millis(300));

    let result = client.dispatch(&Intent::Disconnect, None).await;
    match result {
        ActionResult::Error(message) => assert!(message.contains("timed out")),
        ActionResult::Output(output) => panic!("expected timeout, got output: {output}"),
    }

    fs::remove_file(&script).unwrap();
}
