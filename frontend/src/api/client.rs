use reqwest::{header::HeaderMap, Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{api::types::*, config};

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
        }
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn auth_headers() -> HeaderMap {
        use crate::utils::storage as storage_utils;

        let mut headers = HeaderMap::new();
        let token = storage_utils::access_token();
        if let Some(value) = token.and_then(|token| format!("Bearer {}", token).parse().ok()) {
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }
        headers
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn auth_headers() -> HeaderMap {
        HeaderMap::new()
    }

    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let request = builder
            .headers(Self::auth_headers())
            .build()
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;

        #[cfg(all(test, not(target_arch = "wasm32")))]
        {
            if let Some(result) = test_transport::dispatch(&request) {
                return result;
            }
        }

        self.client
            .execute(request)
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))
    }

    /// Posts one GraphQL operation and decodes its `data` member into `T`.
    pub(crate) async fn execute<V, T>(
        &self,
        operation_name: &'static str,
        query: &'static str,
        variables: V,
    ) -> Result<T, ApiError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let base_url = self.resolved_base_url().await;
        let body = GraphqlRequest {
            operation_name,
            query,
            variables,
        };
        log::debug!("graphql {} -> {}", operation_name, base_url);
        let response = self
            .send(self.http_client().post(&base_url).json(&body))
            .await?;
        Self::decode_graphql(response).await
    }

    async fn decode_graphql<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            log::warn!("API rejected the session token");
        }
        if !status.is_success() {
            let error: ApiError = response
                .json()
                .await
                .map_err(ApiClient::map_error_payload_parse_failure)?;
            return Err(error);
        }

        let envelope: GraphqlResponse<Value> = response
            .json()
            .await
            .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))?;
        match envelope.data.filter(|data| !data.is_null()) {
            Some(data) => serde_json::from_value(data).map_err(|e| {
                if envelope.errors.is_empty() {
                    ApiError::unknown(format!("Failed to parse response: {}", e))
                } else {
                    ApiError::graphql(&envelope.errors)
                }
            }),
            None => Err(ApiError::graphql(&envelope.errors)),
        }
    }

    pub(crate) fn map_error_payload_parse_failure(err: reqwest::Error) -> ApiError {
        ApiError::request_failed(format!("Failed to parse error: {}", err))
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
pub(crate) use test_transport::{register_mock, MockResponse, TestResponder};

#[cfg(all(test, not(target_arch = "wasm32")))]
mod test_transport {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex, OnceLock};

    pub trait TestResponder: Send + Sync {
        fn respond(&self, request: &reqwest::Request) -> Result<MockResponse, ApiError>;
    }

    #[derive(Debug, Clone)]
    pub struct MockResponse {
        status: u16,
        body: Value,
    }

    impl MockResponse {
        pub fn json(status: u16, body: Value) -> Self {
            Self { status, body }
        }

        fn into_response(self) -> Result<Response, ApiError> {
            let bytes = serde_json::to_vec(&self.body)
                .map_err(|e| ApiError::unknown(format!("mock body: {}", e)))?;
            let response = http::Response::builder()
                .status(self.status)
                .header("content-type", "application/json")
                .body(bytes)
                .map_err(|e| ApiError::unknown(format!("mock response: {}", e)))?;
            Ok(Response::from(response))
        }
    }

    type Registry = Mutex<HashMap<String, Arc<dyn TestResponder>>>;

    fn registry() -> &'static Registry {
        static MOCKS: OnceLock<Registry> = OnceLock::new();
        MOCKS.get_or_init(|| Mutex::new(HashMap::new()))
    }

    pub fn register_mock(base_url: String, responder: Arc<dyn TestResponder>) {
        if let Ok(mut mocks) = registry().lock() {
            mocks.insert(base_url, responder);
        }
    }

    pub(super) fn dispatch(request: &reqwest::Request) -> Option<Result<Response, ApiError>> {
        let url = request.url().as_str().to_string();
        let responder = {
            let mocks = registry().lock().ok()?;
            mocks
                .iter()
                .find(|(base, _)| url.starts_with(base.as_str()))
                .map(|(_, responder)| Arc::clone(responder))?
        };
        Some(
            responder
                .respond(request)
                .and_then(MockResponse::into_response),
        )
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Ping {
        pong: bool,
    }

    #[tokio::test]
    async fn execute_posts_operation_envelope() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/graphql").operation("Ping");
            then.status(200).json_body(json!({ "data": { "pong": true } }));
        });
        let client = ApiClient::new_with_base_url(server.url("/graphql"));

        let ping: Ping = client
            .execute("Ping", "query Ping { pong }", json!({ "id": "u1" }))
            .await
            .unwrap();
        assert!(ping.pong);
        assert_eq!(server.hits("Ping"), 1);
        assert_eq!(server.last_variables("Ping"), Some(json!({ "id": "u1" })));
    }

    #[tokio::test]
    async fn execute_maps_top_level_graphql_errors() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/graphql").operation("Ping");
            then.status(200).json_body(json!({
                "data": null,
                "errors": [{ "message": "Cannot query field \"pong\"" }]
            }));
        });
        let client = ApiClient::new_with_base_url(server.url("/graphql"));

        let err = client
            .execute::<_, Ping>("Ping", "query Ping { pong }", json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.code, "GRAPHQL_ERROR");
        assert_eq!(err.error, "Cannot query field \"pong\"");
    }

    #[tokio::test]
    async fn execute_surfaces_http_error_payloads() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/graphql").operation("Ping");
            then.status(503).json_body(json!({
                "error": "Service unavailable",
                "code": "UNAVAILABLE"
            }));
        });
        let client = ApiClient::new_with_base_url(server.url("/graphql"));

        let err = client
            .execute::<_, Ping>("Ping", "query Ping { pong }", json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.code, "UNAVAILABLE");
        assert_eq!(err.error, "Service unavailable");
    }

    #[tokio::test]
    async fn execute_reports_unmatched_operations_as_errors() {
        let server = MockServer::start_async().await;
        let client = ApiClient::new_with_base_url(server.url("/graphql"));

        let err = client
            .execute::<_, Ping>("Ping", "query Ping { pong }", json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.code, "UNKNOWN");
        assert!(err.error.contains("Ping"));
    }
}
