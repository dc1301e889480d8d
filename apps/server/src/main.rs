use anyhow::Context;
use faucet::kernel::config::load_config;
use faucet_logger::Logger;
use faucet_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _log = Logger::builder().name(env!("CARGO_PKG_NAME")).init()?;

    let cfg = load_config(Some("faucet")).context("Critical: Configuration is malformed")?;

    Server::builder().config(cfg).build()?.run().await
}
