use std::fmt::Write as _;

use super::BridgeRecord;
use crate::config::destination_tx_link;
use crate::error::BridgeError;
use crate::relay::Relayer;

pub async fn list_completed_swaps(relayer: &dyn Relayer) -> Result<Vec<BridgeRecord>, BridgeError> {
    let records = relayer.list_swaps().await?;
    let total = records.len();
    let completed = completed_swaps(records);
    tracing::debug!(total, completed = completed.len(), "loaded swap ledger");
    Ok(completed)
}

// Ties keep relayer order.
pub fn completed_swaps(records: Vec<BridgeRecord>) -> Vec<BridgeRecord> {
    let mut completed: Vec<BridgeRecord> =
        records.into_iter().filter(BridgeRecord::is_complete).collect();
    completed.sort_by(|a, b| b.block_number.cmp(&a.block_number));
    completed
}

pub fn render_table(records: &[BridgeRecord]) -> String {
    if records.is_empty() {
        return "No completed swaps found.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<14} {:<14} {:>12} {:>12}  {:<9} {}",
        "SEND TX", "USER", "AMOUNT", "BLOCK", "STATUS", "LINK"
    );
    for r in records {
        let _ = writeln!(
            out,
            "{:<14} {:<14} {:>12} {:>12}  {:<9} {}",
            abbreviate(&r.send_tx),
            abbreviate(&r.user),
            r.amount,
            r.block_number,
            "Executed",
            destination_tx_link(&r.send_tx)
        );
    }
    out
}

fn abbreviate(s: &str) -> String {
    match s.char_indices().nth(10) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
