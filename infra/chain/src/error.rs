use std::borrow::Cow;

/// Chain-client failure taxonomy.
///
/// The HTTP layer maps each variant onto a distinct response, so keep the
/// split between "the node said no" ([`ChainError::Rejected`] and friends)
/// and "we never got an answer" ([`ChainError::Transport`]).
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// The name is already registered on chain.
    #[error("account '{account}' already exists on chain")]
    AccountExists { account: String },

    /// The registrar cannot cover the registration fee.
    #[error("registrar balance cannot cover the registration fee")]
    RegistrarFunds,

    /// The node refused the transaction for any other reason.
    #[error("chain rejected the registration: {reason}")]
    Rejected { reason: Cow<'static, str> },

    /// Network or HTTP failure talking to the node.
    #[error("chain node unreachable: {source}")]
    Transport {
        #[from]
        source: reqwest::Error,
    },

    /// The node answered with something that is not valid JSON-RPC.
    #[error("malformed chain response: {message}")]
    Protocol { message: Cow<'static, str> },

    /// The local HTTP client could not be constructed at startup.
    #[error("chain client initialization failed: {message}")]
    Init { message: Cow<'static, str> },
}
