//! In-memory chain backend for tests and local development.

use crate::{ChainClient, ChainError, RegistrarIdentity, RegistrationReceipt};
use async_trait::async_trait;
use faucet_domain::{AccountName, PublicKey};
use parking_lot::Mutex;
use std::collections::HashSet;

/// Default registrar balance, in chain core units.
const DEFAULT_BALANCE: u64 = 1_000_000;
/// Flat fee charged per sponsored registration.
const REGISTRATION_FEE: u64 = 5_000;

/// [`ChainClient`] implementation keeping the whole registry in memory.
///
/// Differences from a real node:
///
/// * The premium rule is evaluated locally via [`AccountName::is_premium`]
///   instead of consulting chain state.
/// * Receipts are deterministic (`emu-1`, `emu-2`, ...).
/// * The registrar balance is a plain counter depleted by a flat fee.
#[derive(Debug)]
pub struct Emulator {
    state: Mutex<EmulatorState>,
}

#[derive(Debug)]
struct EmulatorState {
    accounts: HashSet<String>,
    balance: u64,
    register_calls: u64,
}

impl Emulator {
    #[must_use]
    pub fn new() -> Self {
        Self::with_balance(DEFAULT_BALANCE)
    }

    /// Starts the emulator with a specific registrar balance, letting tests
    /// drive it into the out-of-funds path.
    #[must_use]
    pub fn with_balance(balance: u64) -> Self {
        Self {
            state: Mutex::new(EmulatorState {
                accounts: HashSet::new(),
                balance,
                register_calls: 0,
            }),
        }
    }

    /// Number of `register_account` calls seen, successful or not.
    #[must_use]
    pub fn register_calls(&self) -> u64 {
        self.state.lock().register_calls
    }

    /// Remaining registrar balance.
    #[must_use]
    pub fn balance(&self) -> u64 {
        self.state.lock().balance
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChainClient for Emulator {
    async fn is_premium(&self, account: &AccountName) -> Result<bool, ChainError> {
        Ok(account.is_premium())
    }

    async fn account_exists(&self, account: &AccountName) -> Result<bool, ChainError> {
        Ok(self.state.lock().accounts.contains(account.as_str()))
    }

    async fn register_account(
        &self,
        account: &AccountName,
        _registrar: &RegistrarIdentity,
        _key: &PublicKey,
    ) -> Result<RegistrationReceipt, ChainError> {
        let mut state = self.state.lock();
        state.register_calls += 1;

        if state.accounts.contains(account.as_str()) {
            return Err(ChainError::AccountExists { account: account.to_string() });
        }
        if state.balance < REGISTRATION_FEE {
            return Err(ChainError::RegistrarFunds);
        }

        state.balance -= REGISTRATION_FEE;
        state.accounts.insert(account.to_string());
        let serial = state.register_calls;

        Ok(RegistrationReceipt { transaction_id: format!("emu-{serial}"), block: Some(serial) })
    }
}
