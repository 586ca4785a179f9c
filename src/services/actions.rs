//! Interactive admin operations. Each one surfaces its outcome through the
//! notification sink; failures are also returned so views can render them.

use crate::models::accounts::{Account, AccountPayload};
use crate::models::error::AppError;
use crate::models::proxies::{Proxy, ProxyPayload, ProxyTestResult};
use crate::models::search::{PhoneInfo, PhoneSearchRequest, PhoneSearchResponse};
use crate::models::sessions::{CleanupResult, ExportFile, ExportFormat};
use crate::services::api::{ApiClient, ResponseBody};
use crate::services::in_flight::InFlightRegistry;
use crate::services::notifications::Notifier;
use chrono::{NaiveDate, Utc};

pub const PHONE_SEARCH_OPERATION: &str = "phone-search";

/// Parses a day-window input such as the export range. Must be a whole number of days, at least 1.
pub fn parse_days(input: &str) -> Result<u32, AppError> {
    input
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|days| *days > 0)
        .ok_or_else(|| AppError::Validation(format!("Invalid number of days: {}", input.trim())))
}

/// Result of a single lookup that reached the server.
#[derive(Clone, Debug, PartialEq)]
pub enum PhoneSearchOutcome {
    Found(PhoneInfo),
    NotFound(String),
}

#[derive(Clone)]
pub struct AdminActions {
    client: ApiClient,
    notifier: Notifier,
    in_flight: InFlightRegistry,
}

impl AdminActions {
    pub fn new(client: ApiClient, notifier: Notifier, in_flight: InFlightRegistry) -> Self {
        Self {
            client,
            notifier,
            in_flight,
        }
    }

    // SEARCH
    /// Looks up one phone number.
    pub async fn search_phone(&self, phone: &str) -> Result<PhoneSearchOutcome, AppError> {
        let phone = phone.trim();
        if phone.is_empty() {
            let message = "Enter a phone number".to_string();
            self.notifier.warning(message.clone());
            return Err(AppError::Validation(message));
        }

        let Some(_guard) = self.in_flight.try_acquire(PHONE_SEARCH_OPERATION) else {
            let message = "A search is already in progress".to_string();
            self.notifier.warning(message.clone());
            return Err(AppError::Validation(message));
        };

        let request = PhoneSearchRequest {
            phone_number: phone.to_string(),
        };
        let result = self
            .client
            .post("/search/phone", &request)
            .await
            .and_then(ResponseBody::json::<PhoneSearchResponse>);

        match result {
            Ok(response) if response.success => {
                self.notifier.success("Search completed");
                let mut info = response.data.unwrap_or_default();
                info.phone_number.get_or_insert_with(|| phone.to_string());
                Ok(PhoneSearchOutcome::Found(info))
            }
            Ok(response) => Ok(PhoneSearchOutcome::NotFound(
                response
                    .error
                    .unwrap_or_else(|| "The number was not found".to_string()),
            )),
            Err(e) => Err(self.report("Search failed", e)),
        }
    }

    pub fn is_searching(&self) -> bool {
        self.in_flight.is_running(PHONE_SEARCH_OPERATION)
    }

    // ACCOUNTS
    pub async fn get_account(&self, id: u64) -> Result<Account, AppError> {
        self.client
            .get_json(&format!("/accounts/{id}"))
            .await
            .map_err(|e| self.report("Failed to load account", e))
    }

    pub async fn create_account(&self, payload: &AccountPayload) -> Result<Account, AppError> {
        let result = self
            .client
            .post("/accounts", payload)
            .await
            .and_then(ResponseBody::json);
        self.confirm(result, "Account created", "Failed to create account")
    }

    pub async fn update_account(
        &self,
        id: u64,
        payload: &AccountPayload,
    ) -> Result<Account, AppError> {
        let result = self
            .client
            .put(&format!("/accounts/{id}"), payload)
            .await
            .and_then(ResponseBody::json);
        self.confirm(result, "Account saved", "Failed to save account")
    }

    pub async fn delete_account(&self, id: u64) -> Result<(), AppError> {
        let result = self.client.delete(&format!("/accounts/{id}")).await.map(drop);
        self.confirm(result, "Account deleted", "Failed to delete account")
    }

    // PROXIES
    pub async fn list_proxies(&self) -> Result<Vec<Proxy>, AppError> {
        self.client
            .get_json("/proxies")
            .await
            .map_err(|e| self.report("Failed to load proxies", e))
    }

    pub async fn get_proxy(&self, id: u64) -> Result<Proxy, AppError> {
        self.client
            .get_json(&format!("/proxies/{id}"))
            .await
            .map_err(|e| self.report("Failed to load proxy", e))
    }

    pub async fn create_proxy(&self, payload: &ProxyPayload) -> Result<Proxy, AppError> {
        let result = self
            .client
            .post("/proxies", payload)
            .await
            .and_then(ResponseBody::json);
        self.confirm(result, "Proxy created", "Failed to create proxy")
    }

    pub async fn update_proxy(&self, id: u64, payload: &ProxyPayload) -> Result<Proxy, AppError> {
        let result = self
            .client
            .put(&format!("/proxies/{id}"), payload)
            .await
            .and_then(ResponseBody::json);
        self.confirm(result, "Proxy saved", "Failed to save proxy")
    }

    pub async fn delete_proxy(&self, id: u64) -> Result<(), AppError> {
        let result = self.client.delete(&format!("/proxies/{id}")).await.map(drop);
        self.confirm(result, "Proxy deleted", "Failed to delete proxy")
    }

    /// Asks the server to check a proxy. A non-working proxy is a warning, not an error.
    pub async fn test_proxy(&self, id: u64) -> Result<ProxyTestResult, AppError> {
        let result: ProxyTestResult = self
            .client
            .post_empty(&format!("/proxies/{id}/test"))
            .await
            .and_then(ResponseBody::json)
            .map_err(|e| self.report("Proxy test failed", e))?;

        if result.working {
            self.notifier.success("Proxy is working");
        } else {
            let reason = result.error.as_deref().unwrap_or("unknown error");
            self.notifier.warning(format!("Proxy is not working: {reason}"));
        }
        Ok(result)
    }

    // SESSIONS & SYSTEM
    /// Downloads the session export for the last `days` days.
    pub async fn export_sessions(
        &self,
        format: ExportFormat,
        days: u32,
    ) -> Result<ExportFile, AppError> {
        self.export_sessions_on(format, days, Utc::now().date_naive())
            .await
    }

    /// Same as [`AdminActions::export_sessions`], naming the file after `today`.
    pub async fn export_sessions_on(
        &self,
        format: ExportFormat,
        days: u32,
        today: NaiveDate,
    ) -> Result<ExportFile, AppError> {
        let path = format!("/sessions/export?format={format}&days={days}");
        let result = self
            .client
            .get(&path)
            .await
            .and_then(ResponseBody::into_text)
            .map(|contents| ExportFile {
                filename: format!("sessions_export_{}.{format}", today.format("%Y-%m-%d")),
                mime_type: format.mime_type(),
                contents,
            });
        self.confirm(result, "Data exported", "Export failed")
    }

    /// Deletes sessions older than `days` days.
    pub async fn cleanup_sessions(&self, days: u32) -> Result<CleanupResult, AppError> {
        let result: CleanupResult = self
            .client
            .delete(&format!("/sessions/cleanup?days={days}"))
            .await
            .and_then(ResponseBody::json)
            .map_err(|e| self.report("Cleanup failed", e))?;

        self.notifier
            .success(format!("Deleted {} old sessions", result.deleted_count));
        Ok(result)
    }

    pub async fn restart_system(&self) -> Result<(), AppError> {
        self.client
            .post_empty("/system/restart")
            .await
            .map_err(|e| self.report("Restart failed", e))?;

        self.notifier.info("Restart command sent");
        Ok(())
    }

    fn confirm<T>(
        &self,
        result: Result<T, AppError>,
        success: &str,
        failure: &str,
    ) -> Result<T, AppError> {
        match result {
            Ok(value) => {
                self.notifier.success(success);
                Ok(value)
            }
            Err(e) => Err(self.report(failure, e)),
        }
    }

    fn report(&self, context: &str, error: AppError) -> AppError {
        self.notifier.error(format!("{context}: {error}"));
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::error::TransportError;
    use crate::runtime::ManualRuntime;
    use crate::services::api::ApiConfig;
    use crate::services::notifications::Severity;
    use crate::services::transport::{RawResponse, ScriptedTransport};
    use futures::executor::block_on;
    use serde_json::json;
    use std::rc::Rc;

    fn actions() -> (ScriptedTransport, Notifier, AdminActions) {
        let runtime = Rc::new(ManualRuntime::new());
        let transport = ScriptedTransport::new();
        let client = ApiClient::new(
            ApiConfig::builder().base_url("/api/v1").build(),
            Rc::new(transport.clone()),
            runtime.clone(),
        );
        let notifier = Notifier::new(runtime);
        let actions = AdminActions::new(client, notifier.clone(), InFlightRegistry::new());
        (transport, notifier, actions)
    }

    fn severities(notifier: &Notifier) -> Vec<Severity> {
        notifier.visible().iter().map(|n| n.severity).collect()
    }

    #[test]
    fn test_search_not_found_has_no_success_notification() {
        let (transport, notifier, actions) = actions();
        transport.push_json(200, json!({"success": false, "error": "not found"}));

        let outcome = block_on(actions.search_phone("555")).unwrap();
        assert_eq!(outcome, PhoneSearchOutcome::NotFound("not found".to_string()));
        assert!(!severities(&notifier).contains(&Severity::Success));

        let request = &transport.requests()[0];
        assert_eq!(request.url, "/api/v1/search/phone");
        assert_eq!(request.body.as_deref(), Some(r#"{"phone_number":"555"}"#));
    }

    #[test]
    fn test_search_found() {
        let (transport, notifier, actions) = actions();
        transport.push_json(
            200,
            json!({"success": true, "data": {"name": "Ali", "carrier": "Zain", "is_spam": true}}),
        );

        let outcome = block_on(actions.search_phone(" 555 ")).unwrap();
        let PhoneSearchOutcome::Found(info) = outcome else {
            panic!("expected a result");
        };
        assert_eq!(info.name.as_deref(), Some("Ali"));
        assert_eq!(info.phone_number.as_deref(), Some("555"));
        assert!(info.is_spam);
        assert_eq!(severities(&notifier), vec![Severity::Success]);
        assert!(!actions.is_searching());
    }

    #[test]
    fn test_blank_search_is_rejected_locally() {
        let (transport, notifier, actions) = actions();
        let error = block_on(actions.search_phone("   ")).unwrap_err();

        assert!(matches!(error, AppError::Validation(_)));
        assert_eq!(transport.request_count(), 0);
        assert_eq!(severities(&notifier), vec![Severity::Warning]);
    }

    #[test]
    fn test_search_transport_failure() {
        let (transport, notifier, actions) = actions();
        transport.push_failure(TransportError::Network("offline".to_string()));

        let error = block_on(actions.search_phone("555")).unwrap_err();
        assert!(matches!(error, AppError::Transport(_)));
        let visible = notifier.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].severity, Severity::Error);
        assert!(visible[0].message.starts_with("Search failed: "));
    }

    #[test]
    fn test_delete_account_failure_reports_message() {
        let (transport, notifier, actions) = actions();
        transport.push_json(500, json!({"detail": "db down"}));

        let error = block_on(actions.delete_account(7)).unwrap_err();
        assert_eq!(error.status(), Some(500));
        assert_eq!(transport.requests()[0].method, reqwest::Method::DELETE);
        assert_eq!(transport.requests()[0].url, "/api/v1/accounts/7");
        assert_eq!(
            notifier.visible()[0].message,
            "Failed to delete account: HTTP 500: Internal Server Error"
        );
    }

    #[test]
    fn test_update_account_sends_only_set_fields() {
        let (transport, notifier, actions) = actions();
        transport.push_json(200, json!({"id": 3, "name": "main", "is_active": false}));

        let payload = AccountPayload {
            is_active: Some(false),
            ..Default::default()
        };
        let account = block_on(actions.update_account(3, &payload)).unwrap();
        assert_eq!(account.id, 3);
        assert!(!account.is_active);
        assert_eq!(
            transport.requests()[0].body.as_deref(),
            Some(r#"{"is_active":false}"#)
        );
        assert_eq!(severities(&notifier), vec![Severity::Success]);
    }

    #[test]
    fn test_proxy_not_working_is_a_warning() {
        let (transport, notifier, actions) = actions();
        transport.push_json(200, json!({"is_working": false}));

        let result = block_on(actions.test_proxy(4)).unwrap();
        assert!(!result.working);
        assert_eq!(transport.requests()[0].url, "/api/v1/proxies/4/test");
        let visible = notifier.visible();
        assert_eq!(visible[0].severity, Severity::Warning);
        assert_eq!(visible[0].message, "Proxy is not working: unknown error");
    }

    #[test]
    fn test_csv_export() {
        let (transport, notifier, actions) = actions();
        transport.push_response(RawResponse::new(200, Some("text/csv"), "id,phone\n1,555\n"));

        let today = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let file = block_on(actions.export_sessions_on(ExportFormat::Csv, 7, today)).unwrap();

        assert_eq!(file.filename, "sessions_export_2026-03-14.csv");
        assert_eq!(file.mime_type, "text/csv");
        assert_eq!(file.contents, "id,phone\n1,555\n");
        assert_eq!(
            transport.requests()[0].url,
            "/api/v1/sessions/export?format=csv&days=7"
        );
        assert_eq!(severities(&notifier), vec![Severity::Success]);
    }

    #[test]
    fn test_json_export_is_pretty_printed() {
        let (transport, _notifier, actions) = actions();
        transport.push_json(200, json!({"total_sessions": 1}));

        let today = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let file = block_on(actions.export_sessions_on(ExportFormat::Json, 30, today)).unwrap();

        assert_eq!(file.filename, "sessions_export_2026-03-14.json");
        assert_eq!(file.contents, "{\n  \"total_sessions\": 1\n}");
    }

    #[test]
    fn test_cleanup_reports_deleted_count() {
        let (transport, notifier, actions) = actions();
        transport.push_json(200, json!({"deleted_count": 42, "message": "ok"}));

        let result = block_on(actions.cleanup_sessions(30)).unwrap();
        assert_eq!(result.deleted_count, 42);
        assert_eq!(
            transport.requests()[0].url,
            "/api/v1/sessions/cleanup?days=30"
        );
        assert_eq!(notifier.visible()[0].message, "Deleted 42 old sessions");
    }

    #[test]
    fn test_restart_sends_info() {
        let (transport, notifier, actions) = actions();
        transport.push_response(RawResponse::text(200, "restarting"));

        block_on(actions.restart_system()).unwrap();
        assert_eq!(transport.requests()[0].method, reqwest::Method::POST);
        assert_eq!(transport.requests()[0].body, None);
        assert_eq!(severities(&notifier), vec![Severity::Info]);
    }

    #[test]
    fn test_parse_days() {
        assert_eq!(parse_days(" 14 "), Ok(14));
        assert!(matches!(parse_days("0"), Err(AppError::Validation(_))));
        assert!(matches!(parse_days("week"), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_get_account() {
        let (transport, notifier, actions) = actions();
        transport.push_json(200, json!({"id": 9, "name": "spare", "is_active": true}));

        let account = block_on(actions.get_account(9)).unwrap();
        assert_eq!(account.display_name(), "spare");
        assert_eq!(transport.requests()[0].method, reqwest::Method::GET);
        assert_eq!(transport.requests()[0].url, "/api/v1/accounts/9");
        assert!(notifier.visible().is_empty());
    }

    #[test]
    fn test_get_account_not_found_reports_error() {
        let (transport, notifier, actions) = actions();
        transport.push_json(404, json!({"detail": "missing"}));

        let error = block_on(actions.get_account(9)).unwrap_err();
        assert_eq!(error.status(), Some(404));
        assert_eq!(
            notifier.visible()[0].message,
            "Failed to load account: HTTP 404: Not Found"
        );
    }

    #[test]
    fn test_create_account() {
        let (transport, notifier, actions) = actions();
        transport.push_json(201, json!({"id": 11, "name": "new", "is_active": true}));

        let payload = AccountPayload {
            name: Some("new".to_string()),
            token: Some("tok".to_string()),
            is_active: Some(true),
            ..Default::default()
        };
        let account = block_on(actions.create_account(&payload)).unwrap();
        assert_eq!(account.id, 11);

        let request = &transport.requests()[0];
        assert_eq!(request.method, reqwest::Method::POST);
        assert_eq!(request.url, "/api/v1/accounts");
        assert_eq!(
            request.body.as_deref(),
            Some(r#"{"name":"new","token":"tok","is_active":true}"#)
        );
        assert_eq!(notifier.visible()[0].message, "Account created");
    }

    #[test]
    fn test_get_proxy() {
        let (transport, notifier, actions) = actions();
        transport.push_json(200, json!({"id": 2, "host": "10.0.0.2", "port": 3128}));

        let proxy = block_on(actions.get_proxy(2)).unwrap();
        assert_eq!(proxy.address(), "10.0.0.2:3128");
        assert_eq!(transport.requests()[0].method, reqwest::Method::GET);
        assert_eq!(transport.requests()[0].url, "/api/v1/proxies/2");
        assert!(notifier.visible().is_empty());
    }

    #[test]
    fn test_create_proxy() {
        let (transport, notifier, actions) = actions();
        transport.push_json(201, json!({"id": 5, "host": "proxy.local", "port": 8080}));

        let payload = ProxyPayload {
            host: Some("proxy.local".to_string()),
            port: Some(8080),
            ..Default::default()
        };
        let proxy = block_on(actions.create_proxy(&payload)).unwrap();
        assert_eq!(proxy.id, 5);

        let request = &transport.requests()[0];
        assert_eq!(request.method, reqwest::Method::POST);
        assert_eq!(request.url, "/api/v1/proxies");
        assert_eq!(
            request.body.as_deref(),
            Some(r#"{"host":"proxy.local","port":8080}"#)
        );
        assert_eq!(notifier.visible()[0].message, "Proxy created");
    }

    #[test]
    fn test_update_proxy() {
        let (transport, notifier, actions) = actions();
        transport.push_json(200, json!({"id": 5, "host": "proxy.local", "port": 8080, "is_active": false}));

        let payload = ProxyPayload {
            is_active: Some(false),
            ..Default::default()
        };
        let proxy = block_on(actions.update_proxy(5, &payload)).unwrap();
        assert!(!proxy.is_active);

        let request = &transport.requests()[0];
        assert_eq!(request.method, reqwest::Method::PUT);
        assert_eq!(request.url, "/api/v1/proxies/5");
        assert_eq!(request.body.as_deref(), Some(r#"{"is_active":false}"#));
        assert_eq!(severities(&notifier), vec![Severity::Success]);
    }

    #[test]
    fn test_update_proxy_failure() {
        let (transport, notifier, actions) = actions();
        transport.push_json(422, json!({"detail": "bad port"}));

        let error = block_on(actions.update_proxy(5, &ProxyPayload::default())).unwrap_err();
        assert_eq!(error.status(), Some(422));
        assert_eq!(
            notifier.visible()[0].message,
            "Failed to save proxy: HTTP 422: Unprocessable Entity"
        );
    }
}
