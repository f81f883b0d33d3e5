pub mod client;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::BridgeError;
use crate::swap::BridgeRecord;

pub const SUCCESS_STATUS: &str = "success";

#[async_trait]
pub trait Relayer: Send + Sync {
    async fn confirm_relay(&self, origin_tx_hash: &str) -> Result<BridgeRecord, BridgeError>;

    async fn list_swaps(&self) -> Result<Vec<BridgeRecord>, BridgeError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RelayResponse {
    status: Option<String>,
    swap_data: Option<BridgeRecord>,
}

// `{message, error}` with no upstream `status`: the proxy itself could not
// reach or decode the relayer, so nothing was refused.
#[derive(Debug, Deserialize)]
struct ProxyFault {
    error: Option<String>,
    status: Option<serde_json::Value>,
}

fn proxy_fault(status: u16, body: &str) -> Option<String> {
    if status != 500 {
        return None;
    }
    let fault: ProxyFault = serde_json::from_str(body).ok()?;
    match fault {
        ProxyFault {
            error: Some(error),
            status: None,
        } => Some(error),
        _ => None,
    }
}

pub fn parse_relay_response(
    origin_tx_hash: &str,
    status: u16,
    body: &str,
) -> Result<BridgeRecord, BridgeError> {
    if let Some(error) = proxy_fault(status, body) {
        return Err(BridgeError::RelayIncomplete {
            origin_tx_hash: origin_tx_hash.to_string(),
            reason: format!("relayer unreachable behind proxy: {error}"),
        });
    }
    if !(200..300).contains(&status) {
        return Err(BridgeError::RelayRejected {
            status,
            body: body.to_string(),
        });
    }

    let resp: RelayResponse =
        serde_json::from_str(body).map_err(|e| BridgeError::RelayIncomplete {
            origin_tx_hash: origin_tx_hash.to_string(),
            reason: format!("malformed relayer response: {e}"),
        })?;

    if resp.status.as_deref() != Some(SUCCESS_STATUS) {
        return Err(BridgeError::RelayRejected {
            status,
            body: body.to_string(),
        });
    }

    let Some(mut record) = resp.swap_data else {
        return Err(BridgeError::RelayRejected {
            status,
            body: body.to_string(),
        });
    };

    if !record.is_complete() {
        return Err(BridgeError::RelayIncomplete {
            origin_tx_hash: origin_tx_hash.to_string(),
            reason: "destination transaction not available yet".to_string(),
        });
    }

    if record.hash.is_empty() {
        record.hash = origin_tx_hash.to_string();
    }
    Ok(record)
}
