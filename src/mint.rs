use crate::chain::{ChainGateway, Receipt, WalletSession, hash_hex};
use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::funding::{Faucet, ensure_funds};

/// Mints test tokens to the connected account, topping up gas first.
pub async fn mint_test_tokens(
    config: &BridgeConfig,
    gateway: &dyn ChainGateway,
    faucet: &dyn Faucet,
    wallet: &WalletSession,
) -> Result<Receipt, BridgeError> {
    let account = wallet.account.ok_or(BridgeError::NotConnected)?;

    ensure_funds(gateway, faucet, account, config.min_native_balance).await?;

    let pending = gateway
        .submit_mint(config.token_contract, config.mint_amount)
        .await?;
    tracing::info!(%account, tx_hash = %hash_hex(&pending.tx_hash), "mint submitted");

    let receipt = gateway.await_receipt(&pending).await?;
    tracing::info!(
        %account,
        tx_hash = %hash_hex(&receipt.tx_hash),
        block_number = receipt.block_number,
        "mint confirmed"
    );
    Ok(receipt)
}
