#![allow(dead_code)]

use axum::body::Body;
use axum::http::Request;
use axum::Router;
use mailgate::api::{create_router, AppState};
use mailgate::error::Result;
use mailgate::idempotency::IdempotencyStore;
use mailgate::sender::{EmailSender, OutboundEmail, SendReport};
use mailgate::services::SendService;
use std::sync::Arc;

mockall::mock! {
    pub Sender {}

    #[async_trait::async_trait]
    impl EmailSender for Sender {
        async fn send(&self, email: OutboundEmail) -> Result<SendReport>;
        fn name(&self) -> &'static str;
    }
}

/// Builds an orchestrator over the given mock and a fresh store.
pub fn service_with(sender: MockSender, ttl_seconds: i64) -> (SendService, Arc<IdempotencyStore>) {
    let store = Arc::new(IdempotencyStore::new(ttl_seconds));
    let service = SendService::new(Arc::new(sender), store.clone());
    (service, store)
}

/// Builds the full router; `sender` of None mirrors an unconfigured SMTP
/// transport.
pub fn router_with(api_key: &str, sender: Option<MockSender>) -> Router {
    let send_service = sender.map(|mock| {
        let store = Arc::new(IdempotencyStore::new(300));
        Arc::new(SendService::new(Arc::new(mock), store))
    });
    create_router(AppState::new(api_key.to_string(), send_service))
}

/// Builds a POST /v1/send request with a JSON body and extra headers.
pub fn post_send(body: serde_json::Value, headers: &[(&str, &str)]) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/v1/send")
        .header("content-type", "application/json");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
