use serde::Serialize;

use super::{BridgeRecord, SwapPhase, SwapSession};
use crate::chain::{ChainGateway, WalletSession, hash_hex};
use crate::config::{BridgeConfig, destination_tx_link, origin_tx_link};
use crate::error::{BridgeError, Severity};
use crate::funding::{Faucet, ensure_funds};
use crate::relay::Relayer;

#[derive(Debug, Clone, PartialEq)]
pub enum SwapOutcome {
    NotStarted(BridgeError),
    Succeeded(BridgeRecord),
    Pending {
        origin_tx_hash: String,
        error: BridgeError,
    },
    Failed(BridgeError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: String,
    pub link: Option<String>,
}

impl SwapOutcome {
    pub fn notification(&self) -> Notification {
        match self {
            SwapOutcome::NotStarted(BridgeError::NotConnected) => Notification {
                level: NotificationLevel::Error,
                title: "Not connected yet".to_string(),
                description: "Please connect your wallet first.".to_string(),
                link: None,
            },
            SwapOutcome::NotStarted(err) | SwapOutcome::Failed(err) => error_notification(err),
            SwapOutcome::Succeeded(record) => Notification {
                level: NotificationLevel::Success,
                title: "Successful swap".to_string(),
                description: format!(
                    "Your tokens have been swapped. Amount: {} tokens",
                    record.amount
                ),
                link: Some(destination_tx_link(&record.send_tx)),
            },
            SwapOutcome::Pending { origin_tx_hash, .. } => Notification {
                level: NotificationLevel::Info,
                title: "Pending".to_string(),
                description: "Your swap is being processed, but we can't display the tx hash on OP Sepolia yet.".to_string(),
                link: Some(origin_tx_link(origin_tx_hash)),
            },
        }
    }
}

fn error_notification(err: &BridgeError) -> Notification {
    let description = match err {
        BridgeError::RelayRejected { .. } => format!(
            "The relayer refused the swap after your transfer was confirmed; it needs manual reconciliation. {err}"
        ),
        BridgeError::Connection(_) => "Network error, please try again.".to_string(),
        _ => err.to_string(),
    };
    Notification {
        level: NotificationLevel::Error,
        title: "Woops".to_string(),
        description,
        link: None,
    }
}

pub struct SwapFlow<'a> {
    config: &'a BridgeConfig,
    gateway: &'a dyn ChainGateway,
    faucet: &'a dyn Faucet,
    relayer: &'a dyn Relayer,
}

impl<'a> SwapFlow<'a> {
    pub fn new(
        config: &'a BridgeConfig,
        gateway: &'a dyn ChainGateway,
        faucet: &'a dyn Faucet,
        relayer: &'a dyn Relayer,
    ) -> Self {
        Self {
            config,
            gateway,
            faucet,
            relayer,
        }
    }

    pub async fn run(&self, wallet: &WalletSession, session: &mut SwapSession) -> SwapOutcome {
        let Some(account) = wallet.account else {
            tracing::warn!(session_id = %session.id(), "swap requested without a connected wallet");
            return SwapOutcome::NotStarted(BridgeError::NotConnected);
        };
        if session.phase() != SwapPhase::Idle {
            return SwapOutcome::NotStarted(BridgeError::SessionUsed(session.id().to_string()));
        }

        session.enter(SwapPhase::CheckingFunds);
        let balance = match ensure_funds(
            self.gateway,
            self.faucet,
            account,
            self.config.min_native_balance,
        )
        .await
        {
            Ok(balance) => balance,
            Err(err) => return fail(session, err),
        };
        tracing::info!(session_id = %session.id(), %account, %balance, "funds checked");

        session.enter(SwapPhase::AwaitingSignature);
        let pending = match self
            .gateway
            .submit_transfer(
                self.config.token_contract,
                self.config.relayer_address,
                session.requested_amount(),
            )
            .await
        {
            Ok(pending) => pending,
            Err(err) => return fail(session, err),
        };
        tracing::info!(
            session_id = %session.id(),
            tx_hash = %hash_hex(&pending.tx_hash),
            amount = %session.requested_amount(),
            "origin transfer submitted"
        );

        session.enter(SwapPhase::AwaitingConfirmation);
        let receipt = match self.gateway.await_receipt(&pending).await {
            Ok(receipt) => receipt,
            Err(err) => return fail(session, err),
        };
        let origin_tx_hash = hash_hex(&receipt.tx_hash);
        session.record_origin(origin_tx_hash.clone());
        tracing::info!(
            session_id = %session.id(),
            %origin_tx_hash,
            block_number = receipt.block_number,
            "origin transfer confirmed"
        );

        session.enter(SwapPhase::ConfirmingRelay);
        let confirmed = self
            .relayer
            .confirm_relay(&origin_tx_hash)
            .await
            .and_then(|record| require_complete(&origin_tx_hash, record));

        match confirmed {
            Ok(record) => {
                session.succeed(record.send_tx.clone());
                tracing::info!(
                    session_id = %session.id(),
                    %origin_tx_hash,
                    send_tx = %record.send_tx,
                    "swap succeeded"
                );
                SwapOutcome::Succeeded(record)
            }
            Err(err) => {
                let err = after_origin_confirmed(&origin_tx_hash, err);
                session.fail(err.clone());
                match err.severity() {
                    Severity::Pending => {
                        tracing::warn!(
                            session_id = %session.id(),
                            %origin_tx_hash,
                            error = %err,
                            "relay outcome unknown, swap pending"
                        );
                        SwapOutcome::Pending {
                            origin_tx_hash,
                            error: err,
                        }
                    }
                    Severity::Error => {
                        tracing::error!(
                            session_id = %session.id(),
                            %origin_tx_hash,
                            error = %err,
                            "relayer rejected confirmed transfer"
                        );
                        SwapOutcome::Failed(err)
                    }
                }
            }
        }
    }
}

fn fail(session: &mut SwapSession, err: BridgeError) -> SwapOutcome {
    tracing::warn!(session_id = %session.id(), phase = ?session.phase(), error = %err, "swap failed");
    session.fail(err.clone());
    SwapOutcome::Failed(err)
}

fn require_complete(origin_tx_hash: &str, record: BridgeRecord) -> Result<BridgeRecord, BridgeError> {
    if record.is_complete() {
        Ok(record)
    } else {
        Err(BridgeError::RelayIncomplete {
            origin_tx_hash: origin_tx_hash.to_string(),
            reason: "destination transaction not available yet".to_string(),
        })
    }
}

// Once funds have left the wallet, a relayer we cannot reach is an unknown
// outcome rather than a failure.
fn after_origin_confirmed(origin_tx_hash: &str, err: BridgeError) -> BridgeError {
    match err {
        BridgeError::RelayRejected { .. } | BridgeError::RelayIncomplete { .. } => err,
        other => BridgeError::RelayIncomplete {
            origin_tx_hash: origin_tx_hash.to_string(),
            reason: other.to_string(),
        },
    }
}
