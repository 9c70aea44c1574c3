//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::body::to_bytes;
use actix_web::dev::ServiceResponse;
use actix_web::web;
use serde_json::Value;

use crate::outbound::memory::InMemoryCatalogue;

use super::state::HttpState;

/// Handler state over a shared in-memory store.
pub fn state_over(store: &InMemoryCatalogue) -> web::Data<HttpState> {
    let store = Arc::new(store.clone());
    web::Data::new(HttpState::new(store.clone(), store))
}

/// Read a response body as JSON.
pub async fn json_body(response: ServiceResponse) -> Value {
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("response body is JSON")
}
