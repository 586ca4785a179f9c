use crate::models::accounts::non_blank;
use crate::models::error::AppError;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Proxy {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub proxy_type: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_working: bool,
    #[serde(default)]
    pub success_rate: Option<f64>,
    #[serde(default)]
    pub average_response_time: Option<f64>,
}

impl Proxy {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProxyPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ProxyTestResult {
    #[serde(alias = "is_working")]
    pub working: bool,
    #[serde(default, alias = "error_message")]
    pub error: Option<String>,
    #[serde(default)]
    pub response_time: Option<f64>,
    #[serde(default)]
    pub ip_address: Option<String>,
}

/// Text fields of the add/edit proxy form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProxyDraft {
    pub name: String,
    pub host: String,
    pub port: String,
    pub username: String,
    pub password: String,
    pub is_active: bool,
}

impl ProxyDraft {
    pub fn new() -> Self {
        Self {
            is_active: true,
            ..Default::default()
        }
    }

    pub fn from_proxy(proxy: &Proxy) -> Self {
        Self {
            name: proxy.name.clone().unwrap_or_default(),
            host: proxy.host.clone(),
            port: proxy.port.to_string(),
            username: proxy.username.clone().unwrap_or_default(),
            password: String::new(),
            is_active: proxy.is_active,
        }
    }

    /// Validates the form. Host and port are required; a blank password keeps the stored one.
    pub fn to_payload(&self) -> Result<ProxyPayload, AppError> {
        let host = non_blank(&self.host)
            .ok_or_else(|| AppError::Validation("A host is required".to_string()))?;
        let port = self
            .port
            .trim()
            .parse::<u16>()
            .ok()
            .filter(|port| *port > 0)
            .ok_or_else(|| AppError::Validation(format!("Invalid port: {}", self.port.trim())))?;

        Ok(ProxyPayload {
            name: non_blank(&self.name),
            host: Some(host),
            port: Some(port),
            username: non_blank(&self.username),
            password: non_blank(&self.password),
            is_active: Some(self.is_active),
        })
    }
}
