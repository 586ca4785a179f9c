use crate::models::error::AppError;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Account {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_banned: bool,
    #[serde(default, alias = "current_hour_requests")]
    pub requests_today: u64,
    #[serde(default)]
    pub success_rate: Option<f64>,
    #[serde(default)]
    pub remaining_requests: Option<u64>,
}

impl Account {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed")
    }
}

/// Body for creating or updating an account. Unset fields are omitted.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AccountPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Text fields of the add/edit account form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AccountDraft {
    pub name: String,
    pub token: String,
    pub device_id: String,
    pub player_id: String,
    pub notes: String,
    pub is_active: bool,
}

impl AccountDraft {
    pub fn new() -> Self {
        Self {
            is_active: true,
            ..Default::default()
        }
    }

    /// Prefills the form from an existing account. Credentials are never sent back
    /// by the server, so they start empty and are left untouched unless retyped.
    pub fn from_account(account: &Account) -> Self {
        Self {
            name: account.name.clone().unwrap_or_default(),
            is_active: account.is_active,
            ..Default::default()
        }
    }

    /// Body for a new account. A token is required.
    pub fn to_create_payload(&self) -> Result<AccountPayload, AppError> {
        let payload = self.to_payload();
        if payload.token.is_none() {
            return Err(AppError::Validation("A token is required".to_string()));
        }
        Ok(payload)
    }

    /// Body for an update: blank fields are left out.
    pub fn to_payload(&self) -> AccountPayload {
        AccountPayload {
            name: non_blank(&self.name),
            token: non_blank(&self.token),
            device_id: non_blank(&self.device_id),
            player_id: non_blank(&self.player_id),
            is_active: Some(self.is_active),
            notes: non_blank(&self.notes),
        }
    }
}

pub(crate) fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
