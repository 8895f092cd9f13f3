use async_trait::async_trait;
use deltax::core::errors::ExchangeError;
use deltax::core::kernel::RestClient;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One request seen by the mock transport.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub endpoint: String,
    pub body: Value,
}

/// In-memory `RestClient` that records every request and replays stubbed
/// responses, so connectors can be driven without network access.
#[derive(Clone, Default)]
pub struct MockRest {
    routes: Arc<Mutex<HashMap<(String, String), Value>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockRest {
    pub fn new() -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        Self::default()
    }

    /// Stub the response for `(method, endpoint)`.
    pub fn stub(&self, method: &str, endpoint: &str, response: Value) {
        self.routes
            .lock()
            .unwrap()
            .insert((method.to_string(), endpoint.to_string()), response);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_with_method(&self, method: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.method == method)
            .collect()
    }

    pub fn count_calls_to(&self, method: &str, endpoint: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.method == method && call.endpoint == endpoint)
            .count()
    }

    fn dispatch(&self, method: &str, endpoint: &str, body: Value) -> Result<Value, ExchangeError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method: method.to_string(),
            endpoint: endpoint.to_string(),
            body,
        });

        self.routes
            .lock()
            .unwrap()
            .get(&(method.to_string(), endpoint.to_string()))
            .cloned()
            .ok_or_else(|| {
                ExchangeError::NetworkError(format!("no stub for {} {}", method, endpoint))
            })
    }

    fn typed<T: DeserializeOwned>(value: Value) -> Result<T, ExchangeError> {
        serde_json::from_value(value).map_err(|e| {
            ExchangeError::DeserializationError(format!("Failed to deserialize JSON: {}", e))
        })
    }
}

#[async_trait]
impl RestClient for MockRest {
    async fn get(
        &self,
        endpoint: &str,
        _query_params: &[(&str, &str)],
        _authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        self.dispatch("GET", endpoint, Value::Null)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        _query_params: &[(&str, &str)],
        _authenticated: bool,
    ) -> Result<T, ExchangeError> {
        self.dispatch("GET", endpoint, Value::Null).and_then(Self::typed)
    }

    async fn post(
        &self,
        endpoint: &str,
        body: &Value,
        _authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        self.dispatch("POST", endpoint, body.clone())
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &Value,
        _authenticated: bool,
    ) -> Result<T, ExchangeError> {
        self.dispatch("POST", endpoint, body.clone()).and_then(Self::typed)
    }

    async fn delete(
        &self,
        endpoint: &str,
        _query_params: &[(&str, &str)],
        _authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        self.dispatch("DELETE", endpoint, Value::Null)
    }

    async fn delete_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        _query_params: &[(&str, &str)],
        _authenticated: bool,
    ) -> Result<T, ExchangeError> {
        self.dispatch("DELETE", endpoint, Value::Null).and_then(Self::typed)
    }

    async fn signed_request(
        &self,
        method: Method,
        endpoint: &str,
        _query_params: &[(&str, &str)],
        body: &[u8],
    ) -> Result<Value, ExchangeError> {
        let body_value = serde_json::from_slice(body).unwrap_or(Value::Null);
        self.dispatch(method.as_str(), endpoint, body_value)
    }

    async fn signed_request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        _query_params: &[(&str, &str)],
        body: &[u8],
    ) -> Result<T, ExchangeError> {
        let body_value = serde_json::from_slice(body).unwrap_or(Value::Null);
        self.dispatch(method.as_str(), endpoint, body_value)
            .and_then(Self::typed)
    }
}
