use crate::models::error::{AppError, TransportError};
use futures::future::LocalBoxFuture;
use reqwest::Method;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// A fully resolved outbound request. Built per call and dropped once it resolves.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub timeout_ms: u32,
}

impl ApiRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status line, content type and unparsed body of a response.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub content_type: Option<String>,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, content_type: Option<&str>, body: impl Into<String>) -> Self {
        let status_text = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or_default()
            .to_string();

        Self {
            status,
            status_text,
            content_type: content_type.map(str::to_string),
            body: body.into(),
        }
    }

    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self::new(status, Some("application/json"), body.to_string())
    }

    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self::new(status, Some("text/plain; charset=utf-8"), body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and reports what came back.
pub trait Transport {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'_, Result<RawResponse, AppError>>;
}

pub type SharedTransport = Rc<dyn Transport>;

// REQWEST TRANSPORT
/// Transport over `reqwest` (the browser `fetch` API on wasm).
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { http })
    }

    /// Converts a reqwest error into the matching transport failure.
    fn classify_error(error: reqwest::Error, timeout_ms: u32) -> AppError {
        if error.is_timeout() {
            TransportError::Timeout(timeout_ms).into()
        } else if error.is_request() || error.is_builder() {
            TransportError::Request(error.to_string()).into()
        } else {
            TransportError::Network(error.to_string()).into()
        }
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'_, Result<RawResponse, AppError>> {
        Box::pin(async move {
            let timeout_ms = request.timeout_ms;
            let mut builder = self.http.request(request.method, &request.url);
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await.map_err(|e| Self::classify_error(e, timeout_ms))?;

            let status = response.status();
            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            let body = response.text().await.map_err(|e| Self::classify_error(e, timeout_ms))?;

            Ok(RawResponse {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                content_type,
                body,
            })
        })
    }
}

// SCRIPTED TRANSPORT
#[derive(Debug, Clone)]
enum Scripted {
    Respond(RawResponse),
    Fail(TransportError),
    Hang,
}

#[derive(Default)]
struct Script {
    queue: VecDeque<Scripted>,
    fallback: Option<RawResponse>,
    requests: Vec<ApiRequest>,
}

/// In-memory transport that replays queued outcomes and records every request.
///
/// Queued outcomes are consumed in order; once the queue is empty the fallback
/// response (if any) answers every request.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Rc<RefCell<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, response: RawResponse) -> &Self {
        self.script
            .borrow_mut()
            .queue
            .push_back(Scripted::Respond(response));
        self
    }

    pub fn push_json(&self, status: u16, body: serde_json::Value) -> &Self {
        self.push_response(RawResponse::json(status, &body))
    }

    pub fn push_failure(&self, error: TransportError) -> &Self {
        self.script.borrow_mut().queue.push_back(Scripted::Fail(error));
        self
    }

    /// Queues a request that never completes.
    pub fn push_hang(&self) -> &Self {
        self.script.borrow_mut().queue.push_back(Scripted::Hang);
        self
    }

    pub fn set_fallback(&self, response: RawResponse) -> &Self {
        self.script.borrow_mut().fallback = Some(response);
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.script.borrow().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.script.borrow().requests.len()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'_, Result<RawResponse, AppError>> {
        let outcome = {
            let mut script = self.script.borrow_mut();
            let url = request.url.clone();
            script.requests.push(request);
            script
                .queue
                .pop_front()
                .or_else(|| script.fallback.clone().map(Scripted::Respond))
                .unwrap_or_else(|| {
                    Scripted::Fail(TransportError::Network(format!(
                        "No scripted response for {url}"
                    )))
                })
        };

        match outcome {
            Scripted::Respond(response) => Box::pin(futures::future::ready(Ok(response))),
            Scripted::Fail(error) => Box::pin(futures::future::ready(Err(error.into()))),
            Scripted::Hang => Box::pin(futures::future::pending()),
        }
    }
}
