use crate::config::Config;
use crate::models::error::{AppError, TransportError};
use crate::runtime::SharedRuntime;
use crate::services::transport::{ApiRequest, RawResponse, SharedTransport};
use futures::future::{Either, select};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

const JSON_CONTENT_TYPE: &str = "application/json";

// API CONFIGURATION
/// Immutable settings the client is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    base_url: String,
    api_key: String,
    timeout_ms: u32,
}

impl ApiConfig {
    /// Creates a builder for constructing an `ApiConfig`.
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// Joins `path` onto the base URL.
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.is_empty() {
            base.to_string()
        } else if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    fn authorization(&self) -> String {
        format!("Bearer {}", self.api_key)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfigBuilder::default().build()
    }
}

// API CONFIGURATION BUILDER
/// Builder for constructing an `ApiConfig` with custom settings.
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout_ms: Option<u32>,
}

impl ApiConfigBuilder {
    /// Sets the base URL every path is resolved against.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the bearer credential.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Builds the `ApiConfig`.
    pub fn build(self) -> ApiConfig {
        ApiConfig {
            base_url: self
                .base_url
                .unwrap_or_else(|| Config::API_BASE_PATH.to_string()),
            api_key: self.api_key.unwrap_or_else(|| Config::API_KEY.to_string()),
            timeout_ms: self.timeout_ms.unwrap_or(Config::REQUEST_TIMEOUT_MS),
        }
    }
}

// REQUEST OPTIONS
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Structured value, serialized to JSON before sending
    Json(serde_json::Value),
    /// Already-serialized text, sent verbatim
    Text(String),
}

/// Per-call overrides merged over the client defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub method: Option<Method>,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
    pub timeout_ms: Option<u32>,
}

impl RequestOptions {
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn json_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    pub fn text_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(RequestBody::Text(body.into()));
        self
    }

    pub fn timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }
}

// RESPONSE BODY
/// A successful response, parsed according to its declared content type.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(serde_json::Value),
    Text(String),
}

impl ResponseBody {
    /// Deserializes a JSON body into `T`.
    pub fn json<T: DeserializeOwned>(self) -> Result<T, AppError> {
        match self {
            ResponseBody::Json(value) => serde_json::from_value(value)
                .map_err(|e| AppError::Parse(format!("Unexpected response shape: {e}"))),
            ResponseBody::Text(_) => Err(AppError::Parse(
                "Expected a JSON response but received text".to_string(),
            )),
        }
    }

    /// Text form of the body; JSON is pretty-printed.
    pub fn into_text(self) -> Result<String, AppError> {
        match self {
            ResponseBody::Text(text) => Ok(text),
            ResponseBody::Json(value) => serde_json::to_string_pretty(&value)
                .map_err(|e| AppError::Parse(format!("Failed to format response: {e}"))),
        }
    }
}

// API CLIENT
/// Authenticated client for the admin API.
///
/// Every call carries the bearer credential, negotiates JSON, and races the
/// configured timeout. Failures are logged and returned; nothing is retried.
#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    transport: SharedTransport,
    runtime: SharedRuntime,
}

impl ApiClient {
    pub fn new(config: ApiConfig, transport: SharedTransport, runtime: SharedRuntime) -> Self {
        Self {
            config,
            transport,
            runtime,
        }
    }

    /// Returns a reference to the client's configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Sends a request to `path` (relative to the base URL).
    pub async fn request(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ResponseBody, AppError> {
        let method = options.method.clone().unwrap_or(Method::GET);
        let result = match self.build_request(path, options) {
            Ok(request) => self.dispatch(request).await,
            Err(e) => Err(e),
        };
        result.inspect_err(|e| self.log_failure(&method, path, e))
    }

    /// Sends `body` as JSON with `method`.
    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<ResponseBody, AppError> {
        let value = to_json(body).inspect_err(|e| self.log_failure(&method, path, e))?;
        let options = RequestOptions::default().method(method).json_body(value);
        self.request(path, options).await
    }

    fn log_failure(&self, method: &Method, path: &str, error: &AppError) {
        log::error!("API request failed: {method} {}: {error}", self.config.url(path));
    }

    pub async fn get(&self, path: &str) -> Result<ResponseBody, AppError> {
        self.request(path, RequestOptions::default().method(Method::GET))
            .await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ResponseBody, AppError> {
        self.send_json(Method::POST, path, body).await
    }

    /// POST without a body.
    pub async fn post_empty(&self, path: &str) -> Result<ResponseBody, AppError> {
        self.request(path, RequestOptions::default().method(Method::POST))
            .await
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ResponseBody, AppError> {
        self.send_json(Method::PUT, path, body).await
    }

    pub async fn delete(&self, path: &str) -> Result<ResponseBody, AppError> {
        self.request(path, RequestOptions::default().method(Method::DELETE))
            .await
    }

    /// GET and deserialize the JSON body into `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.get(path).await?.json()
    }

    fn build_request(&self, path: &str, options: RequestOptions) -> Result<ApiRequest, AppError> {
        let mut headers = vec![
            ("Authorization".to_string(), self.config.authorization()),
            ("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string()),
        ];
        for (name, value) in options.headers {
            headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
            headers.push((name, value));
        }

        let body = match options.body {
            Some(RequestBody::Json(value)) => Some(
                serde_json::to_string(&value)
                    .map_err(|e| AppError::Parse(format!("Failed to serialize request: {e}")))?,
            ),
            Some(RequestBody::Text(text)) => Some(text),
            None => None,
        };

        Ok(ApiRequest {
            method: options.method.unwrap_or(Method::GET),
            url: self.config.url(path),
            headers,
            body,
            timeout_ms: options.timeout_ms.unwrap_or(self.config.timeout_ms),
        })
    }

    async fn dispatch(&self, request: ApiRequest) -> Result<ResponseBody, AppError> {
        let timeout_ms = request.timeout_ms;
        let send = self.transport.send(request);
        let deadline = self.runtime.sleep(timeout_ms);

        let response = match select(send, deadline).await {
            Either::Left((result, _)) => result?,
            Either::Right(((), _)) => return Err(TransportError::Timeout(timeout_ms).into()),
        };

        Self::parse_response(response)
    }

    /// Rejects non-2xx statuses without reading the body, otherwise parses by content type.
    fn parse_response(response: RawResponse) -> Result<ResponseBody, AppError> {
        if !response.is_success() {
            return Err(AppError::Http {
                status: response.status,
                status_text: response.status_text,
            });
        }

        let is_json = response
            .content_type
            .as_deref()
            .is_some_and(|content_type| content_type.contains(JSON_CONTENT_TYPE));

        if is_json {
            serde_json::from_str(&response.body)
                .map(ResponseBody::Json)
                .map_err(|e| AppError::Parse(format!("Failed to parse response: {e}")))
        } else {
            Ok(ResponseBody::Text(response.body))
        }
    }
}

fn to_json<B: Serialize + ?Sized>(body: &B) -> Result<serde_json::Value, AppError> {
    serde_json::to_value(body)
        .map_err(|e| AppError::Parse(format!("Failed to serialize request: {e}")))
}
