use async_trait::async_trait;
use ethers::types::{Address, U256};

use crate::chain::ChainGateway;
use crate::error::BridgeError;

#[async_trait]
pub trait Faucet: Send + Sync {
    async fn request_funds(&self, account: Address) -> Result<String, BridgeError>;
}

// At most one top-up; the returned balance may still be below `minimum`.
pub async fn ensure_funds(
    gateway: &dyn ChainGateway,
    faucet: &dyn Faucet,
    account: Address,
    minimum: U256,
) -> Result<U256, BridgeError> {
    let balance = gateway.balance(account).await?;
    if balance >= minimum {
        tracing::debug!(%account, %balance, "native balance sufficient");
        return Ok(balance);
    }

    tracing::info!(%account, %balance, %minimum, "native balance low, requesting faucet credit");
    let faucet_tx = faucet.request_funds(account).await?;
    tracing::info!(%account, %faucet_tx, "faucet credit requested");

    let balance = gateway.balance(account).await?;
    if balance < minimum {
        tracing::warn!(%account, %balance, %minimum, "native balance still below minimum");
    }
    Ok(balance)
}
