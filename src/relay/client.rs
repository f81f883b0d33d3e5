use std::time::Duration;

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use ethers::types::Address;
use serde::Deserialize;
use serde_json::json;

use super::{Relayer, parse_relay_response};
use crate::error::BridgeError;
use crate::funding::Faucet;
use crate::swap::BridgeRecord;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AvailableBalance {
    current_balance: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FaucetReply {
    tx_hash: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RelayerClient {
    http: reqwest::Client,
    base_url: String,
}

impl RelayerClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build relayer HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    pub async fn available_balance(
        &self,
        network: &str,
        ticker: &str,
    ) -> Result<Option<f64>, BridgeError> {
        let resp = self
            .http
            .get(self.url("/swaps/available"))
            .query(&[("network", network), ("ticker", ticker)])
            .header("accept", "*/*")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BridgeError::Connection(format!(
                "GET /swaps/available returned {status}: {body}"
            )));
        }

        let available: AvailableBalance = resp.json().await?;
        Ok(available.current_balance)
    }
}

#[async_trait]
impl Relayer for RelayerClient {
    async fn confirm_relay(&self, origin_tx_hash: &str) -> Result<BridgeRecord, BridgeError> {
        tracing::info!(%origin_tx_hash, relayer = %self.base_url, "submitting origin tx to relayer");

        let resp = self
            .http
            .post(self.url("/swaps"))
            .json(&json!({ "hash": origin_tx_hash }))
            .send()
            .await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;

        let record = parse_relay_response(origin_tx_hash, status, &body)?;
        tracing::info!(%origin_tx_hash, send_tx = %record.send_tx, "relayer confirmed payout");
        Ok(record)
    }

    async fn list_swaps(&self) -> Result<Vec<BridgeRecord>, BridgeError> {
        let resp = self
            .http
            .get(self.url("/swaps"))
            .header("accept", "*/*")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BridgeError::Connection(format!(
                "GET /swaps returned {status}: {body}"
            )));
        }

        Ok(resp.json().await?)
    }
}

#[async_trait]
impl Faucet for RelayerClient {
    async fn request_funds(&self, account: Address) -> Result<String, BridgeError> {
        let resp = self
            .http
            .post(self.url("/faucet"))
            .json(&json!({ "address": format!("{account:#x}") }))
            .send()
            .await
            .map_err(|e| BridgeError::Faucet(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| BridgeError::Faucet(e.to_string()))?;
        let reply: Option<FaucetReply> = serde_json::from_str(&body).ok();

        if !status.is_success() {
            let message = reply
                .and_then(|r| r.message)
                .unwrap_or_else(|| format!("status {status}"));
            return Err(BridgeError::Faucet(message));
        }

        reply
            .and_then(|r| r.tx_hash)
            .ok_or_else(|| BridgeError::Faucet("response has no txHash".to_string()))
    }
}
