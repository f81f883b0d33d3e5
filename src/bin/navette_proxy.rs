use std::net::SocketAddr;

use anyhow::{Context as _, Result};
use clap::Parser as _;
use navette::config::{DEFAULT_RELAYER_URL, ProxyConfig};
use navette::proxy::{ProxyState, router};

#[derive(Debug, clap::Parser)]
struct Args {
    #[arg(long, default_value = "127.0.0.1:3000")]
    listen_addr: String,

    #[arg(long, default_value = DEFAULT_RELAYER_URL)]
    relayer_url: String,

    #[arg(long)]
    faucet_url: Option<String>,

    #[arg(long, default_value_t = 30)]
    request_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    navette::logging::init().ok();

    let args = Args::parse();
    let listen_addr: SocketAddr = args.listen_addr.parse().context("parse listen_addr")?;

    let cfg = ProxyConfig {
        relayer_url: args.relayer_url,
        faucet_url: args.faucet_url,
        request_timeout_secs: args.request_timeout_secs,
    };
    let state = ProxyState::new(&cfg).context("create proxy state")?;

    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("bind {listen_addr}"))?;

    tracing::info!(
        %listen_addr,
        relayer_url = %cfg.relayer_url,
        faucet_configured = cfg.faucet_url.is_some(),
        "starting relayer proxy"
    );

    axum::serve(listener, router(state))
        .await
        .context("serve HTTP")?;

    Ok(())
}
