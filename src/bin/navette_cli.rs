use std::time::Duration;

use anyhow::{Context as _, Result};
use clap::{Parser as _, Subcommand};
use navette::chain::evm::EvmGateway;
use navette::chain::{ChainGateway as _, format_native_balance, hash_hex};
use navette::config::{
    BridgeConfig, DEFAULT_MIN_NATIVE_BALANCE_ETH, DEFAULT_MINT_AMOUNT, DEFAULT_RELAYER_ADDRESS,
    address_link, origin_tx_link,
};
use navette::mint::mint_test_tokens;
use navette::relay::client::RelayerClient;
use navette::swap::SwapSession;
use navette::swap::flow::{SwapFlow, SwapOutcome};
use navette::swap::ledger::{list_completed_swaps, render_table};
use serde_json::json;

#[derive(Debug, clap::Parser)]
struct Args {
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    relayer_url: String,

    #[arg(long, default_value_t = 30)]
    request_timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Args)]
struct ChainArgs {
    #[arg(long, default_value = "https://ethereum-sepolia-rpc.publicnode.com")]
    rpc_url: String,

    #[arg(long)]
    private_key: Option<String>,

    #[arg(long)]
    token_contract: String,

    #[arg(long, default_value = DEFAULT_RELAYER_ADDRESS)]
    relayer_address: String,

    #[arg(long, default_value = DEFAULT_MIN_NATIVE_BALANCE_ETH)]
    min_native_balance_eth: String,

    #[arg(long, default_value = DEFAULT_MINT_AMOUNT)]
    mint_amount: String,
}

impl ChainArgs {
    fn bridge_config(&self) -> Result<BridgeConfig> {
        BridgeConfig::new(
            &self.token_contract,
            &self.relayer_address,
            &self.min_native_balance_eth,
            &self.mint_amount,
        )
    }

    async fn gateway(&self) -> Result<EvmGateway> {
        EvmGateway::connect(&self.rpc_url, self.private_key.as_deref())
            .await
            .context("connect chain gateway")
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    Swap {
        #[command(flatten)]
        chain: ChainArgs,

        #[arg(long, default_value = "8")]
        amount: String,
    },
    Mint {
        #[command(flatten)]
        chain: ChainArgs,
    },
    Status {
        #[command(flatten)]
        chain: ChainArgs,
    },
    Ledger {
        #[arg(long)]
        table: bool,
    },
    Available {
        #[arg(long)]
        network: String,

        #[arg(long)]
        ticker: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    navette::logging::init().ok();
    let args = Args::parse();

    let relayer = RelayerClient::new(
        args.relayer_url,
        Duration::from_secs(args.request_timeout_secs),
    )
    .context("create relayer client")?;

    let out = match args.command {
        Command::Swap { chain, amount } => {
            let cfg = chain.bridge_config()?;
            let mut session = SwapSession::from_token_amount(&amount).context("parse amount")?;
            let gateway = chain.gateway().await?;
            let wallet = gateway.session();

            let outcome = SwapFlow::new(&cfg, &gateway, &relayer, &relayer)
                .run(&wallet, &mut session)
                .await;
            let notification = outcome.notification();

            let out = json!({
              "session_id": session.id().to_string(),
              "phase": session.phase(),
              "origin_tx_hash": session.origin_tx_hash(),
              "destination_tx_id": session.destination_tx_id(),
              "notification": notification,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);

            return match outcome {
                SwapOutcome::Succeeded(_) | SwapOutcome::Pending { .. } => Ok(()),
                SwapOutcome::NotStarted(err) | SwapOutcome::Failed(err) => {
                    Err(anyhow::Error::new(err).context("swap"))
                }
            };
        }
        Command::Mint { chain } => {
            let cfg = chain.bridge_config()?;
            let gateway = chain.gateway().await?;
            let wallet = gateway.session();

            let receipt = mint_test_tokens(&cfg, &gateway, &relayer, &wallet)
                .await
                .context("mint")?;
            let tx_hash = hash_hex(&receipt.tx_hash);

            json!({
              "tx_hash": tx_hash,
              "block_number": receipt.block_number,
              "link": origin_tx_link(&tx_hash),
            })
        }
        Command::Status { chain } => {
            let gateway = chain.gateway().await?;
            let wallet = gateway.session();
            let network = gateway.network_name().await.context("network name")?;

            match wallet.account {
                Some(account) => {
                    let balance = gateway.balance(account).await.context("balance")?;
                    let address = format!("{account:#x}");
                    json!({
                      "network": network,
                      "balance_eth": format_native_balance(balance),
                      "address": address,
                      "explorer": address_link(wallet.chain_id, &address),
                    })
                }
                None => json!({
                  "network": network,
                  "address": "Not connected",
                }),
            }
        }
        Command::Ledger { table } => {
            let swaps = list_completed_swaps(&relayer)
                .await
                .context("list completed swaps")?;
            if table {
                print!("{}", render_table(&swaps));
                return Ok(());
            }
            serde_json::to_value(&swaps)?
        }
        Command::Available { network, ticker } => {
            let current_balance = relayer
                .available_balance(&network, &ticker)
                .await
                .context("available balance")?;
            json!({
              "network": network,
              "ticker": ticker,
              "current_balance": current_balance,
            })
        }
    };

    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
