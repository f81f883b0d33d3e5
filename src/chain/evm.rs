use std::sync::Arc;

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use ethers::contract::abigen;
use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Middleware as _, PendingTransaction, Provider};
use ethers::signers::{LocalWallet, Signer as _};
use ethers::types::{Address, U256};

use super::{
    ChainGateway, PendingTransfer, Receipt, WalletSession, classify_submit_error, hash_hex,
    network_display_name,
};
use crate::error::BridgeError;

abigen!(
    Erc20Token,
    r#"[
        function transfer(address to, uint256 amount) external returns (bool)
        function mint(uint256 amount) external
    ]"#
);

type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

#[derive(Clone)]
pub struct EvmGateway {
    provider: Provider<Http>,
    signer: Option<Arc<SignerClient>>,
    chain_id: u64,
}

impl EvmGateway {
    pub async fn connect(rpc_url: &str, private_key_hex: Option<&str>) -> Result<Self> {
        let provider = Provider::<Http>::try_from(rpc_url.trim()).context("parse rpc_url")?;
        let chain_id = provider
            .get_chainid()
            .await
            .with_context(|| format!("get chain id from {rpc_url}"))?
            .as_u64();

        let signer = match private_key_hex {
            Some(key) => {
                let bytes = hex::decode(key.trim().trim_start_matches("0x"))
                    .context("decode private key hex")?;
                let wallet = LocalWallet::from_bytes(&bytes)
                    .context("load private key")?
                    .with_chain_id(chain_id);
                Some(Arc::new(SignerMiddleware::new(provider.clone(), wallet)))
            }
            None => None,
        };

        tracing::info!(
            chain_id,
            network = %network_display_name(chain_id),
            connected = signer.is_some(),
            "chain gateway ready"
        );

        Ok(Self {
            provider,
            signer,
            chain_id,
        })
    }

    pub fn session(&self) -> WalletSession {
        match &self.signer {
            Some(client) => WalletSession::connected(client.address(), self.chain_id),
            None => WalletSession::disconnected(self.chain_id),
        }
    }

    fn signer_client(&self) -> Result<Arc<SignerClient>, BridgeError> {
        self.signer.clone().ok_or(BridgeError::NotConnected)
    }
}

#[async_trait]
impl ChainGateway for EvmGateway {
    async fn balance(&self, account: Address) -> Result<U256, BridgeError> {
        let client = self
            .signer
            .as_ref()
            .ok_or_else(|| BridgeError::Connection("no active wallet session".to_string()))?;
        client
            .get_balance(account, None)
            .await
            .map_err(|e| BridgeError::Connection(format!("get balance: {e}")))
    }

    async fn network_name(&self) -> Result<String, BridgeError> {
        let chain_id = self
            .provider
            .get_chainid()
            .await
            .map_err(|e| BridgeError::Connection(format!("get chain id: {e}")))?;
        Ok(network_display_name(chain_id.as_u64()))
    }

    async fn submit_transfer(
        &self,
        token: Address,
        destination: Address,
        amount: U256,
    ) -> Result<PendingTransfer, BridgeError> {
        let contract = Erc20Token::new(token, self.signer_client()?);
        let call = contract.transfer(destination, amount);
        let pending = call
            .send()
            .await
            .map_err(|e| classify_submit_error(e.to_string()))?;
        Ok(PendingTransfer {
            tx_hash: pending.tx_hash(),
        })
    }

    async fn submit_mint(
        &self,
        token: Address,
        amount: U256,
    ) -> Result<PendingTransfer, BridgeError> {
        let contract = Erc20Token::new(token, self.signer_client()?);
        let call = contract.mint(amount);
        let pending = call
            .send()
            .await
            .map_err(|e| classify_submit_error(e.to_string()))?;
        Ok(PendingTransfer {
            tx_hash: pending.tx_hash(),
        })
    }

    async fn await_receipt(&self, pending: &PendingTransfer) -> Result<Receipt, BridgeError> {
        let tx_hash = hash_hex(&pending.tx_hash);
        let receipt = PendingTransaction::new(pending.tx_hash, &self.provider)
            .await
            .map_err(|e| BridgeError::Chain(format!("wait receipt for {tx_hash}: {e}")))?
            .ok_or_else(|| BridgeError::TransactionReverted {
                tx_hash: tx_hash.clone(),
            })?;

        if receipt.status.is_some_and(|s| s.as_u64() == 0) {
            return Err(BridgeError::TransactionReverted { tx_hash });
        }

        let block_number = receipt
            .block_number
            .ok_or_else(|| BridgeError::Chain(format!("receipt for {tx_hash} has no block")))?
            .as_u64();

        Ok(Receipt {
            tx_hash: receipt.transaction_hash,
            block_number,
        })
    }
}
