use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use faucet_chain::{
    ChainClient, ChainError, Emulator, RegistrarIdentity, RegistrationReceipt,
};
use faucet_domain::config::FaucetConfig;
use faucet_domain::{AccountName, PublicKey};
use faucet_kernel::server::ApiState;
use ripemd::{Digest, Ripemd160};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tower::ServiceExt;
use utoipa_axum::router::OpenApiRouter;

fn test_key(prefix: &str) -> String {
    let mut point = [0u8; 33];
    point[0] = 0x02;
    point[10] = 0x5a;
    let digest = Ripemd160::digest(point);
    let mut bytes = point.to_vec();
    bytes.extend_from_slice(&digest[..4]);
    format!("{prefix}{}", bs58::encode(bytes).into_string())
}

fn registrar() -> RegistrarIdentity {
    RegistrarIdentity { account: "faucet".to_owned(), credentials: String::new() }
}

/// Chain client whose read path always fails, as if the node were down.
#[derive(Debug, Default)]
struct UnreachableNode {
    register_calls: AtomicU64,
}

#[async_trait]
impl ChainClient for UnreachableNode {
    async fn is_premium(&self, _account: &AccountName) -> Result<bool, ChainError> {
        Err(ChainError::Protocol { message: "connection reset by node".into() })
    }

    async fn account_exists(&self, _account: &AccountName) -> Result<bool, ChainError> {
        Err(ChainError::Protocol { message: "connection reset by node".into() })
    }

    async fn register_account(
        &self,
        _account: &AccountName,
        _registrar: &RegistrarIdentity,
        _key: &PublicKey,
    ) -> Result<RegistrationReceipt, ChainError> {
        self.register_calls.fetch_add(1, Ordering::Relaxed);
        Ok(RegistrationReceipt { transaction_id: "unexpected".to_owned(), block: None })
    }
}

/// Router backed by an arbitrary chain client.
fn test_app_with(chain: Arc<dyn ChainClient>) -> axum::Router {
    let slice = faucet_registration::init_with_client(chain, registrar(), "BTS".to_owned());
    let state = ApiState::builder()
        .config(FaucetConfig::default())
        .register_slice(slice)
        .build()
        .expect("state");

    let (router, _doc) = OpenApiRouter::new()
        .merge(faucet_registration::router())
        .with_state(state)
        .split_for_parts();
    router
}

/// Router backed by an emulator chain; returns the emulator for assertions.
fn test_app(emulator: Arc<Emulator>) -> axum::Router {
    test_app_with(emulator)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .expect("request");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    (status, String::from_utf8(body.to_vec()).expect("utf8 body"))
}

#[tokio::test]
async fn non_premium_registration_returns_created_ok() {
    let emulator = Arc::new(Emulator::new());
    let app = test_app(Arc::clone(&emulator));
    let key = test_key("BTS");

    let (status, body) = get(app, &format!("/register?account=alice1&public_key={key}")).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, "OK");
    assert_eq!(emulator.register_calls(), 1);
}

#[tokio::test]
async fn premium_name_is_refused_without_chain_write() {
    let emulator = Arc::new(Emulator::new());
    let app = test_app(Arc::clone(&emulator));
    let key = test_key("BTS");

    let (status, body) = get(app, &format!("/register?account=alice&public_key={key}")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, "alice is a premium account, therefore it cannot be registered.");
    // Side-effect suppression: the submitter must never have been called.
    assert_eq!(emulator.register_calls(), 0);
}

#[tokio::test]
async fn invalid_name_is_a_bad_request() {
    let emulator = Arc::new(Emulator::new());
    let app = test_app(Arc::clone(&emulator));
    let key = test_key("BTS");

    let (status, _body) = get(app, &format!("/register?account=ab&public_key={key}")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(emulator.register_calls(), 0);
}

#[tokio::test]
async fn invalid_key_is_a_bad_request() {
    let emulator = Arc::new(Emulator::new());
    let app = test_app(Arc::clone(&emulator));
    // Key for the wrong network prefix.
    let key = test_key("TEST");

    let (status, _body) = get(app, &format!("/register?account=alice1&public_key={key}")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(emulator.register_calls(), 0);
}

#[tokio::test]
async fn duplicate_name_conflicts() {
    let emulator = Arc::new(Emulator::new());
    let key = test_key("BTS");

    let app = test_app(Arc::clone(&emulator));
    let (status, _) = get(app, &format!("/register?account=alice1&public_key={key}")).await;
    assert_eq!(status, StatusCode::CREATED);

    let app = test_app(Arc::clone(&emulator));
    let (status, _) = get(app, &format!("/register?account=alice1&public_key={key}")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    // The duplicate was caught by the existence check, not a second submit.
    assert_eq!(emulator.register_calls(), 1);
}

#[tokio::test]
async fn depleted_registrar_maps_to_service_unavailable() {
    // Balance covers nothing at all.
    let emulator = Arc::new(Emulator::with_balance(0));
    let app = test_app(Arc::clone(&emulator));
    let key = test_key("BTS");

    let (status, _) = get(app, &format!("/register?account=alice1&public_key={key}")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn eligibility_check_failure_maps_to_bad_gateway() {
    // A node failure during the premium lookup is a transport problem, not
    // a premium rejection, and must never fall through to a submit.
    let chain = Arc::new(UnreachableNode::default());
    let app = test_app_with(Arc::clone(&chain) as Arc<dyn ChainClient>);
    let key = test_key("BTS");

    let (status, body) = get(app, &format!("/register?account=alice1&public_key={key}")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_ne!(body, "alice1 is a premium account, therefore it cannot be registered.");
    assert_eq!(chain.register_calls.load(Ordering::Relaxed), 0);
}

#[tokio::test]
async fn missing_parameters_are_rejected() {
    let emulator = Arc::new(Emulator::new());
    let app = test_app(Arc::clone(&emulator));

    let (status, _) = get(app, "/register?account=alice1").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(emulator.register_calls(), 0);
}
