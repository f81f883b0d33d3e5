use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::relay::SUCCESS_STATUS;

#[derive(Debug, Clone)]
pub struct ProxyState {
    http: reqwest::Client,
    relayer_url: String,
    faucet_url: Option<String>,
}

impl ProxyState {
    pub fn new(cfg: &ProxyConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .build()
            .context("build upstream HTTP client")?;
        Ok(Self {
            http,
            relayer_url: cfg.relayer_url.trim_end_matches('/').to_string(),
            faucet_url: cfg.faucet_url.clone(),
        })
    }

    fn relayer(&self, path: &str) -> String {
        format!("{}{path}", self.relayer_url)
    }
}

pub fn router(state: ProxyState) -> Router {
    Router::new()
        .route(
            "/swaps",
            get(list_swaps)
                .post(execute_swap)
                .fallback(method_not_allowed),
        )
        .route(
            "/swaps/available",
            get(available_balance).fallback(method_not_allowed),
        )
        .route("/faucet", post(request_faucet).fallback(method_not_allowed))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

#[derive(Debug, Deserialize)]
struct AvailableQuery {
    network: Option<String>,
    ticker: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SwapRequest {
    #[serde(alias = "txHash")]
    hash: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FaucetRequest {
    address: Option<String>,
}

fn reply(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn message(status: StatusCode, msg: &str) -> Response {
    reply(status, json!({ "message": msg }))
}

fn internal_error(err: &reqwest::Error) -> Response {
    reply(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "message": "Internal server error", "error": err.to_string() }),
    )
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

async fn upstream_failure(msg: &str, resp: reqwest::Response) -> Response {
    let upstream = resp.status();
    let status = StatusCode::from_u16(upstream.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let body = resp.text().await.unwrap_or_default();
    reply(
        status,
        json!({
            "message": msg,
            "status": upstream.as_u16(),
            "statusText": upstream.canonical_reason().unwrap_or_default(),
            "body": body,
        }),
    )
}

async fn method_not_allowed() -> Response {
    message(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}

async fn list_swaps(State(state): State<Arc<ProxyState>>) -> Response {
    let resp = match state
        .http
        .get(state.relayer("/swaps"))
        .header("accept", "*/*")
        .send()
        .await
    {
        Ok(resp) => resp,
        Err(err) => {
            tracing::error!(error = %err, "fetch swaps from relayer");
            return internal_error(&err);
        }
    };

    if !resp.status().is_success() {
        return upstream_failure("Failed to fetch swaps", resp).await;
    }

    match resp.json::<Value>().await {
        Ok(swaps) => reply(StatusCode::OK, swaps),
        Err(err) => {
            tracing::error!(error = %err, "decode swaps from relayer");
            internal_error(&err)
        }
    }
}

async fn available_balance(
    State(state): State<Arc<ProxyState>>,
    Query(query): Query<AvailableQuery>,
) -> Response {
    let (Some(network), Some(ticker)) = (non_empty(query.network), non_empty(query.ticker)) else {
        return message(
            StatusCode::BAD_REQUEST,
            "Network and ticker are required query parameters",
        );
    };

    let result = async {
        let resp = state
            .http
            .get(state.relayer("/swaps/available"))
            .query(&[("network", &network), ("ticker", &ticker)])
            .header("accept", "*/*")
            .send()
            .await?
            .error_for_status()?;
        resp.json::<Value>().await
    }
    .await;

    match result {
        Ok(available) => reply(StatusCode::OK, available),
        Err(err) => {
            tracing::error!(%network, %ticker, error = %err, "fetch available balance");
            message(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch available balance",
            )
        }
    }
}

async fn execute_swap(State(state): State<Arc<ProxyState>>, body: Bytes) -> Response {
    let hash = serde_json::from_slice::<SwapRequest>(&body)
        .ok()
        .and_then(|req| non_empty(req.hash));
    let Some(hash) = hash else {
        return message(StatusCode::BAD_REQUEST, "Transaction hash is required");
    };

    tracing::info!(%hash, "forwarding swap to relayer");
    let resp = match state
        .http
        .post(state.relayer("/swaps"))
        .json(&json!({ "hash": hash }))
        .send()
        .await
    {
        Ok(resp) => resp,
        Err(err) => {
            tracing::error!(%hash, error = %err, "post swap to relayer");
            return internal_error(&err);
        }
    };

    if !resp.status().is_success() {
        return upstream_failure("Failed to execute swap", resp).await;
    }

    let data = match resp.json::<Value>().await {
        Ok(data) => data,
        Err(err) => {
            tracing::error!(%hash, error = %err, "decode relayer swap response");
            return internal_error(&err);
        }
    };

    let succeeded = data.get("status").and_then(Value::as_str) == Some(SUCCESS_STATUS)
        && data.get("swapData").is_some_and(Value::is_object);
    if !succeeded {
        tracing::warn!(%hash, "relayer did not report a successful swap");
        return message(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Swap execution failed or incomplete",
        );
    }

    reply(StatusCode::OK, data)
}

async fn request_faucet(State(state): State<Arc<ProxyState>>, body: Bytes) -> Response {
    let address = serde_json::from_slice::<FaucetRequest>(&body)
        .ok()
        .and_then(|req| non_empty(req.address));
    let Some(address) = address else {
        return message(StatusCode::BAD_REQUEST, "Address is required");
    };
    let Some(faucet_url) = state.faucet_url.as_deref() else {
        return message(StatusCode::INTERNAL_SERVER_ERROR, "Faucet is not configured");
    };

    tracing::info!(%address, "requesting faucet credit");
    let resp = match state
        .http
        .post(faucet_url)
        .json(&json!({ "address": address }))
        .send()
        .await
    {
        Ok(resp) => resp,
        Err(err) => {
            tracing::error!(%address, error = %err, "post faucet request");
            return message(StatusCode::INTERNAL_SERVER_ERROR, "Faucet request failed");
        }
    };

    let ok = resp.status().is_success();
    let data = resp.json::<Value>().await.unwrap_or(Value::Null);
    let tx_hash = data.get("txHash").and_then(Value::as_str);

    match (ok, tx_hash) {
        (true, Some(tx_hash)) => reply(StatusCode::OK, json!({ "txHash": tx_hash })),
        _ => {
            let msg = data
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Faucet request failed");
            tracing::warn!(%address, message = %msg, "faucet request rejected");
            message(StatusCode::INTERNAL_SERVER_ERROR, msg)
        }
    }
}
