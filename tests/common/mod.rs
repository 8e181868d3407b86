//! Shared scripted transport for integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use unburden::auth::TokenStore;
use unburden::client::{ApiClient, RetryPolicy};
use unburden::transport::{HttpRequest, HttpResponse, Transport, TransportError};

/// Replays a fixed sequence of outcomes and records every request it saw.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<VecDeque<Result<HttpResponse, TransportError>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, outcome: Result<HttpResponse, TransportError>) {
        self.script.lock().unwrap().push_back(outcome);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted transport ran out of outcomes")
    }
}

pub fn ok_json(body: serde_json::Value) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse {
        status: 200,
        headers: Vec::new(),
        body: serde_json::to_vec(&body).unwrap(),
    })
}

pub fn status_with_body(status: u16, body: serde_json::Value) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse {
        status,
        headers: Vec::new(),
        body: serde_json::to_vec(&body).unwrap(),
    })
}

pub fn rate_limited(retry_after_secs: u64) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse {
        status: 429,
        headers: vec![("Retry-After".to_string(), retry_after_secs.to_string())],
        body: Vec::new(),
    })
}

pub fn connection_error() -> Result<HttpResponse, TransportError> {
    Err(TransportError("connection reset".to_string()))
}

pub fn client_over(transport: &ScriptedTransport, retry: RetryPolicy) -> ApiClient {
    let _ = env_logger::builder().is_test(true).try_init();
    ApiClient::with_transport(
        "http://api.test/api",
        TokenStore::default(),
        retry,
        Arc::new(transport.clone()),
    )
}
