//! # Chain client
//!
//! Everything the faucet knows about the blockchain lives behind the
//! [`ChainClient`] trait: premium-name lookups, account existence checks,
//! and submitting sponsored registrations. Two backends are provided:
//!
//! * [`RemoteNode`] — JSON-RPC 2.0 over HTTP against a trusted node/wallet.
//! * [`Emulator`] — an in-memory registry for tests and local development.

mod emulator;
mod error;
mod remote;

pub use emulator::Emulator;
pub use error::ChainError;
pub use remote::RemoteNode;

use async_trait::async_trait;
use faucet_domain::{AccountName, PublicKey};

/// The account paying for registrations, with its opaque wallet credentials.
#[derive(Debug, Clone)]
pub struct RegistrarIdentity {
    pub account: String,
    /// Passed through to the wallet untouched; the faucet never interprets it.
    pub credentials: String,
}

/// Proof that the chain accepted a registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationReceipt {
    pub transaction_id: String,
    /// Block number, when the backend reports one.
    pub block: Option<u64>,
}

/// Backend for talking to the registration ledger.
///
/// The interface is deliberately narrow: the faucet only ever needs the
/// pricing status of a name and a way to sponsor its registration.
#[async_trait]
pub trait ChainClient: Send + Sync + std::fmt::Debug {
    /// Whether the chain prices `account` as a premium name.
    async fn is_premium(&self, account: &AccountName) -> Result<bool, ChainError>;

    /// Whether `account` is already registered on chain.
    async fn account_exists(&self, account: &AccountName) -> Result<bool, ChainError>;

    /// Submit a registration sponsored by `registrar` and wait for the
    /// node's verdict.
    async fn register_account(
        &self,
        account: &AccountName,
        registrar: &RegistrarIdentity,
        key: &PublicKey,
    ) -> Result<RegistrationReceipt, ChainError>;
}
