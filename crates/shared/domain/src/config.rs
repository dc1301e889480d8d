use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level faucet configuration shared across services.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FaucetConfigInner {
    pub server: ServerConfig,
    pub chain: ChainConfig,
    pub registrar: RegistrarConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct FaucetConfig {
    #[serde(flatten, default)]
    inner: Arc<FaucetConfigInner>,
}

impl Deref for FaucetConfig {
    type Target = FaucetConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for FaucetConfig {
    fn deref_mut(&mut self) -> &mut FaucetConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
}

/// TLS certificate/key paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Chain node connection configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// JSON-RPC endpoint of the trusted node or cli_wallet.
    pub node_url: String,
    /// Public-key prefix of the target network (e.g. `BTS`, `TEST`).
    pub address_prefix: String,
    /// Per-call timeout for node requests.
    pub timeout_secs: u64,
}

/// The account sponsoring registrations and its opaque wallet credentials.
///
/// Credentials are passed through to the chain client untouched; key
/// management belongs to the wallet, not the faucet.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistrarConfig {
    pub account: String,
    pub credentials: String,
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 8380, ssl: None }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            node_url: "http://127.0.0.1:8091".to_owned(),
            address_prefix: "BTS".to_owned(),
            timeout_secs: 10,
        }
    }
}
