//! JSON-RPC 2.0 backend against a trusted node or wallet daemon.

use crate::{ChainClient, ChainError, RegistrarIdentity, RegistrationReceipt};
use async_trait::async_trait;
use faucet_domain::config::ChainConfig;
use faucet_domain::{AccountName, PublicKey};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

/// [`ChainClient`] implementation speaking JSON-RPC 2.0 over HTTP.
///
/// The node is trusted: it holds the registrar's wallet and performs the
/// actual signing. The faucet only relays validated parameters.
#[derive(Debug)]
pub struct RemoteNode {
    url: String,
    client: reqwest::Client,
    next_id: AtomicU64,
}

impl RemoteNode {
    /// Builds a client for the node configured in `cfg`.
    ///
    /// # Errors
    /// Returns [`ChainError::Init`] if the underlying HTTP client cannot
    /// be constructed (bad TLS backend, invalid timeout).
    pub fn new(cfg: &ChainConfig) -> Result<Self, ChainError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| ChainError::Init { message: e.to_string().into() })?;

        Ok(Self { url: cfg.node_url.clone(), client, next_id: AtomicU64::new(1) })
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, ChainError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let payload = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": id,
        });

        debug!(method, id, "chain rpc call");

        let response = self.client.post(&self.url).json(&payload).send().await?;
        let body: Value = response.json().await?;

        if let Some(error) = body.get("error") {
            return Err(map_rpc_error(error));
        }

        body.get("result")
            .cloned()
            .ok_or_else(|| ChainError::Protocol { message: "response carries no result".into() })
    }
}

#[async_trait]
impl ChainClient for RemoteNode {
    async fn is_premium(&self, account: &AccountName) -> Result<bool, ChainError> {
        let result = self.call("is_premium_name", json!([account.as_str()])).await?;
        result.as_bool().ok_or_else(|| ChainError::Protocol {
            message: "is_premium_name did not return a boolean".into(),
        })
    }

    async fn account_exists(&self, account: &AccountName) -> Result<bool, ChainError> {
        let result = self.call("get_account_by_name", json!([account.as_str()])).await?;
        Ok(!result.is_null())
    }

    async fn register_account(
        &self,
        account: &AccountName,
        registrar: &RegistrarIdentity,
        key: &PublicKey,
    ) -> Result<RegistrationReceipt, ChainError> {
        let result = self
            .call(
                "register_account",
                json!([
                    account.as_str(),
                    registrar.account,
                    key.as_str(),
                    registrar.credentials,
                ]),
            )
            .await?;

        parse_receipt(&result)
    }
}

/// Maps a JSON-RPC error object onto the [`ChainError`] taxonomy.
///
/// Nodes tag well-known failures in `error.data.tag`; anything untagged is a
/// generic rejection carrying the node's message.
fn map_rpc_error(error: &Value) -> ChainError {
    let message =
        error.get("message").and_then(Value::as_str).unwrap_or("unspecified node error");
    let tag = error.get("data").and_then(|d| d.get("tag")).and_then(Value::as_str);

    match tag {
        Some("account_exists") => ChainError::AccountExists {
            account: error
                .get("data")
                .and_then(|d| d.get("account"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned(),
        },
        Some("insufficient_funds") => ChainError::RegistrarFunds,
        _ if message.contains("already exists") => {
            ChainError::AccountExists { account: String::new() }
        },
        _ if message.to_ascii_lowercase().contains("insufficient") => ChainError::RegistrarFunds,
        _ => ChainError::Rejected { reason: message.to_owned().into() },
    }
}

/// Accepts both receipt shapes seen in the wild: a bare transaction id
/// string, or an object with `id` and optionally `block_num`.
fn parse_receipt(result: &Value) -> Result<RegistrationReceipt, ChainError> {
    if let Some(id) = result.as_str() {
        return Ok(RegistrationReceipt { transaction_id: id.to_owned(), block: None });
    }

    let id = result
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| ChainError::Protocol { message: "receipt carries no transaction id".into() })?;
    let block = result.get("block_num").and_then(Value::as_u64);

    Ok(RegistrationReceipt { transaction_id: id.to_owned(), block })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_tagged_errors() {
        let err = map_rpc_error(&json!({
            "code": -32000,
            "message": "assert failure",
            "data": { "tag": "account_exists", "account": "alice1" }
        }));
        assert!(matches!(err, ChainError::AccountExists { account } if account == "alice1"));

        let err = map_rpc_error(&json!({
            "code": -32000,
            "message": "assert failure",
            "data": { "tag": "insufficient_funds" }
        }));
        assert!(matches!(err, ChainError::RegistrarFunds));
    }

    #[test]
    fn maps_untagged_errors_by_message() {
        let err = map_rpc_error(&json!({ "message": "account alice1 already exists" }));
        assert!(matches!(err, ChainError::AccountExists { .. }));

        let err = map_rpc_error(&json!({ "message": "Insufficient balance" }));
        assert!(matches!(err, ChainError::RegistrarFunds));

        let err = map_rpc_error(&json!({ "message": "INSUFFICIENT FUNDS" }));
        assert!(matches!(err, ChainError::RegistrarFunds));

        let err = map_rpc_error(&json!({ "message": "missing active authority" }));
        assert!(matches!(err, ChainError::Rejected { .. }));

        // A message that merely resembles the funds wording must not be
        // classified as a balance problem.
        let err = map_rpc_error(&json!({ "message": "nsufficient is not a word" }));
        assert!(matches!(err, ChainError::Rejected { .. }));
    }

    #[test]
    fn parses_both_receipt_shapes() {
        let receipt = parse_receipt(&json!("74bf1c7a")).unwrap();
        assert_eq!(receipt.transaction_id, "74bf1c7a");
        assert_eq!(receipt.block, None);

        let receipt = parse_receipt(&json!({ "id": "74bf1c7a", "block_num": 1042 })).unwrap();
        assert_eq!(receipt.block, Some(1042));

        assert!(matches!(
            parse_receipt(&json!({ "unexpected": true })),
            Err(ChainError::Protocol { .. })
        ));
    }
}
