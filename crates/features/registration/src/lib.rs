//! Registration feature slice: the faucet's single business capability.
//!
//! Flow per request: validate the query parameters against chain syntax,
//! check eligibility (premium names are refused before any chain write),
//! submit the sponsored registration, and map the outcome onto HTTP.

mod error;
mod handler;

pub use error::{RegisterError, RegistrationError};
pub use handler::router;

use faucet_chain::{ChainClient, RegistrarIdentity, RemoteNode};
use faucet_domain::config::FaucetConfig;
use faucet_domain::registry::{FeatureSlice, InitializedSlice};
use std::any::Any;
use std::sync::Arc;

/// Registration feature state shared by its handlers.
#[derive(Debug)]
pub struct Registration {
    chain: Arc<dyn ChainClient>,
    registrar: RegistrarIdentity,
    /// Public-key prefix of the target network, used for key validation.
    address_prefix: String,
}

impl Registration {
    #[must_use]
    pub fn chain(&self) -> &dyn ChainClient {
        self.chain.as_ref()
    }

    #[must_use]
    pub fn registrar(&self) -> &RegistrarIdentity {
        &self.registrar
    }

    #[must_use]
    pub fn address_prefix(&self) -> &str {
        &self.address_prefix
    }
}

impl FeatureSlice for Registration {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Initialize the registration feature against the configured remote node.
///
/// # Errors
/// Fails when the registrar account is not configured or the chain client
/// cannot be constructed.
pub fn init(config: &FaucetConfig) -> Result<InitializedSlice, RegistrationError> {
    if config.registrar.account.is_empty() {
        return Err(RegistrationError::Config {
            message: "registrar.account must be set; the faucet cannot sponsor registrations without it".into(),
        });
    }

    let chain = Arc::new(RemoteNode::new(&config.chain)?);
    let registrar = RegistrarIdentity {
        account: config.registrar.account.clone(),
        credentials: config.registrar.credentials.clone(),
    };

    tracing::info!(
        registrar = %registrar.account,
        node = %config.chain.node_url,
        "Registration slice initialized"
    );

    Ok(init_with_client(chain, registrar, config.chain.address_prefix.clone()))
}

/// Initialize the slice with an explicit chain client.
///
/// Used by tests and local setups to plug in the emulator backend.
#[must_use]
pub fn init_with_client(
    chain: Arc<dyn ChainClient>,
    registrar: RegistrarIdentity,
    address_prefix: String,
) -> InitializedSlice {
    InitializedSlice::new("registration", Registration { chain, registrar, address_prefix })
}
