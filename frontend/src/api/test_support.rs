#[cfg(test)]
pub mod mock {
    use crate::api::client::{register_mock, MockResponse, TestResponder};
    use crate::api::ApiError;
    use reqwest::Method;
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    pub const POST: Method = Method::POST;

    /// In-process GraphQL endpoint. Routes match on method, path and the
    /// request's `operationName`; every matched call is recorded.
    #[derive(Clone)]
    pub struct MockServer {
        inner: Arc<Mutex<Inner>>,
        base: String,
    }

    struct Inner {
        routes: Vec<Route>,
        calls: Vec<RecordedCall>,
    }

    #[derive(Clone)]
    struct Route {
        method: Method,
        path: String,
        operation: Option<String>,
        response: MockResponse,
    }

    #[derive(Clone, Debug)]
    pub struct RecordedCall {
        pub operation: Option<String>,
        pub variables: Value,
    }

    impl MockServer {
        pub async fn start_async() -> Self {
            Self::start()
        }

        pub fn start() -> Self {
            static NEXT_ID: AtomicUsize = AtomicUsize::new(1);
            let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
            Self {
                inner: Arc::new(Mutex::new(Inner {
                    routes: Vec::new(),
                    calls: Vec::new(),
                })),
                base: format!("http://mock-{}", id),
            }
        }

        pub fn url(&self, path: &str) -> String {
            let base_url = format!("{}{}", self.base, path);
            register_mock(base_url.clone(), Arc::new(self.clone()));
            base_url
        }

        pub fn mock<F>(&self, f: F)
        where
            F: FnOnce(&mut When, &mut Then),
        {
            let mut when = When::default();
            let mut then = Then::default();
            f(&mut when, &mut then);

            let method = when.method.clone().expect("mock requires method");
            let path = when.path.clone().expect("mock requires path");
            let response = MockResponse::json(
                then.status.unwrap_or(200),
                then.body.unwrap_or_else(|| serde_json::json!({})),
            );

            let mut inner = self.inner.lock().expect("mock lock");
            inner.routes.push(Route {
                method,
                path,
                operation: when.operation,
                response,
            });
        }

        pub fn calls(&self) -> Vec<RecordedCall> {
            self.inner.lock().expect("mock lock").calls.clone()
        }

        pub fn hits(&self, operation: &str) -> usize {
            self.calls()
                .iter()
                .filter(|call| call.operation.as_deref() == Some(operation))
                .count()
        }

        pub fn last_variables(&self, operation: &str) -> Option<Value> {
            self.calls()
                .into_iter()
                .rev()
                .find(|call| call.operation.as_deref() == Some(operation))
                .map(|call| call.variables)
        }
    }

    fn request_body(request: &reqwest::Request) -> Value {
        request
            .body()
            .and_then(|body| body.as_bytes())
            .and_then(|bytes| serde_json::from_slice(bytes).ok())
            .unwrap_or(Value::Null)
    }

    impl TestResponder for MockServer {
        fn respond(&self, request: &reqwest::Request) -> Result<MockResponse, ApiError> {
            let method = request.method();
            let path = request.url().path();
            let body = request_body(request);
            let operation = body
                .get("operationName")
                .and_then(|v| v.as_str())
                .map(str::to_string);
            let mut inner = self
                .inner
                .lock()
                .map_err(|_| ApiError::unknown("mock lock"))?;

            let route = inner
                .routes
                .iter()
                .rev()
                .find(|route| {
                    route.method == *method
                        && route.path == path
                        && (route.operation.is_none() || route.operation == operation)
                })
                .cloned();

            match route {
                Some(route) => {
                    inner.calls.push(RecordedCall {
                        operation,
                        variables: body.get("variables").cloned().unwrap_or(Value::Null),
                    });
                    Ok(route.response)
                }
                None => Err(ApiError::unknown(format!(
                    "No mock for {} {} ({})",
                    method,
                    path,
                    operation.unwrap_or_else(|| "-".into())
                ))),
            }
        }
    }

    #[derive(Default)]
    pub struct When {
        method: Option<Method>,
        path: Option<String>,
        operation: Option<String>,
    }

    impl When {
        pub fn method(&mut self, method: Method) -> &mut Self {
            self.method = Some(method);
            self
        }

        pub fn path(&mut self, path: &str) -> &mut Self {
            self.path = Some(path.to_string());
            self
        }

        pub fn operation(&mut self, operation: &str) -> &mut Self {
            self.operation = Some(operation.to_string());
            self
        }
    }

    #[derive(Default)]
    pub struct Then {
        status: Option<u16>,
        body: Option<Value>,
    }

    impl Then {
        pub fn status(&mut self, status: u16) -> &mut Self {
            self.status = Some(status);
            self
        }

        pub fn json_body(&mut self, body: Value) -> &mut Self {
            self.body = Some(body);
            self
        }
    }
}
