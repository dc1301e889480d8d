use crate::error::RegisterError;
use crate::Registration;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use faucet_domain::constants::{REGISTERED_BODY, REGISTRATION_TAG};
use faucet_domain::{AccountName, PublicKey};
use faucet_kernel::server::ApiState;
use serde::Deserialize;
use tracing::{info, warn};
use utoipa::IntoParams;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Query parameters of the registration endpoint.
#[derive(Debug, Deserialize, IntoParams)]
pub(crate) struct RegisterParams {
    /// Account name to register.
    account: String,
    /// Public key the new account will be controlled by.
    public_key: String,
}

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(register_handler))
}

#[utoipa::path(
    get,
    path = "/register",
    params(RegisterParams),
    responses(
        (status = CREATED, description = "Account registered", body = String),
        (status = BAD_REQUEST, description = "Invalid account name or public key", body = String),
        (status = UNAUTHORIZED, description = "Premium name, not eligible for sponsoring", body = String),
        (status = CONFLICT, description = "Account already exists", body = String),
        (status = SERVICE_UNAVAILABLE, description = "Registrar out of funds", body = String),
        (status = BAD_GATEWAY, description = "Chain node unavailable or refused", body = String),
    ),
    tag = REGISTRATION_TAG,
)]
pub(crate) async fn register_handler(
    State(state): State<ApiState>,
    Query(params): Query<RegisterParams>,
) -> Response {
    match register(&state, &params).await {
        Ok(receipt) => {
            info!(
                account = %params.account,
                tx = %receipt.transaction_id,
                "account registered"
            );
            (StatusCode::CREATED, REGISTERED_BODY).into_response()
        },
        Err(err) => {
            warn!(account = %params.account, error = %err, "registration refused");
            err.into_response()
        },
    }
}

/// Validator → eligibility checker → submitter, in that order.
///
/// Premium and already-registered names bail out before `register_account`,
/// so an ineligible request never reaches the chain as a write.
async fn register(
    state: &ApiState,
    params: &RegisterParams,
) -> Result<faucet_chain::RegistrationReceipt, RegisterError> {
    let slice =
        state.try_get_slice::<Registration>().map_err(|_| RegisterError::State)?;

    let account = AccountName::parse(params.account.as_str())?;
    let key = PublicKey::parse(&params.public_key, slice.address_prefix())?;

    if slice.chain().is_premium(&account).await? {
        return Err(RegisterError::Premium { account });
    }
    if slice.chain().account_exists(&account).await? {
        return Err(RegisterError::Chain(faucet_chain::ChainError::AccountExists {
            account: account.to_string(),
        }));
    }

    let receipt = slice.chain().register_account(&account, slice.registrar(), &key).await?;
    Ok(receipt)
}
