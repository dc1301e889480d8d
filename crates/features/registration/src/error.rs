use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use faucet_chain::ChainError;
use faucet_domain::{AccountName, KeyError, NameError};
use std::borrow::Cow;

/// Errors raised while initializing the registration slice.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("Registration config error: {message}")]
    Config { message: Cow<'static, str> },

    #[error(transparent)]
    Chain(#[from] ChainError),
}

/// Per-request failure, mapped onto the endpoint's plain-text contract.
///
/// The 201/401 bodies are fixed wire contracts; everything else reports the
/// reason as plain text under the closest matching status code.
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("{0}")]
    InvalidName(#[from] NameError),

    #[error("{0}")]
    InvalidKey(#[from] KeyError),

    #[error("{account} is a premium account, therefore it cannot be registered.")]
    Premium { account: AccountName },

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error("registration slice is not initialized")]
    State,
}

impl RegisterError {
    /// Result-mapper table: one status per failure class.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidName(_) | Self::InvalidKey(_) => StatusCode::BAD_REQUEST,
            Self::Premium { .. } => StatusCode::UNAUTHORIZED,
            Self::Chain(chain) => match chain {
                ChainError::AccountExists { .. } => StatusCode::CONFLICT,
                ChainError::RegistrarFunds => StatusCode::SERVICE_UNAVAILABLE,
                ChainError::Rejected { .. }
                | ChainError::Transport { .. }
                | ChainError::Protocol { .. } => StatusCode::BAD_GATEWAY,
                // Startup-only failure; if it ever reaches a request it is
                // a faucet bug, not a chain condition.
                ChainError::Init { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::State => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RegisterError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
