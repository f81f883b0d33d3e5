use anyhow::{Context as _, Result};
use assert_cmd::Command;
use httpmock::Method::GET;
use httpmock::MockServer;
use predicates::prelude::*;
use serde_json::{Value, json};

#[test]
fn ledger_prints_completed_swaps_as_json() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/swaps");
        then.status(200).json_body(json!([
            { "hash": "0xold", "blockNumber": 1, "amount": 1, "sendTx": "0x01" },
            { "hash": "0xpending", "blockNumber": 9, "amount": 5, "sendTx": "" },
            { "hash": "0xnew", "blockNumber": 3, "amount": 8, "sendTx": "0x03" },
        ]));
    });

    let output = Command::cargo_bin("navette_cli")
        .context("locate navette_cli")?
        .args(["--relayer-url", &server.base_url(), "ledger"])
        .output()
        .context("run navette_cli ledger")?;
    assert!(output.status.success());

    let swaps: Value = serde_json::from_slice(&output.stdout).context("parse stdout")?;
    let hashes: Vec<&str> = swaps
        .as_array()
        .context("ledger output is an array")?
        .iter()
        .filter_map(|s| s["hash"].as_str())
        .collect();
    assert_eq!(hashes, vec!["0xnew", "0xold"]);
    Ok(())
}

#[test]
fn ledger_table_reports_empty_ledger() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/swaps");
        then.status(200).json_body(json!([]));
    });

    Command::cargo_bin("navette_cli")
        .context("locate navette_cli")?
        .args(["--relayer-url", &server.base_url(), "ledger", "--table"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No completed swaps found."));
    Ok(())
}

#[test]
fn available_prints_current_balance() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/swaps/available")
            .query_param("network", "op-sepolia")
            .query_param("ticker", "BASIC");
        then.status(200).json_body(json!({ "currentBalance": 500 }));
    });

    Command::cargo_bin("navette_cli")
        .context("locate navette_cli")?
        .args([
            "--relayer-url",
            &server.base_url(),
            "available",
            "--network",
            "op-sepolia",
            "--ticker",
            "BASIC",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"current_balance\": 500.0"));
    Ok(())
}

#[test]
fn swap_rejects_zero_amount_before_touching_the_chain() -> Result<()> {
    Command::cargo_bin("navette_cli")
        .context("locate navette_cli")?
        .args([
            "swap",
            "--rpc-url",
            "http://127.0.0.1:1",
            "--token-contract",
            "0x1111111111111111111111111111111111111111",
            "--amount",
            "0",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("parse amount"));
    Ok(())
}
