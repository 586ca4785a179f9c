#[cfg(test)]
mod tests {
    use trud_admin::hooks::DataState;
    use trud_admin::hooks::use_live_feeds::{LiveAction, LiveState};
    use trud_admin::models::{
        accounts::Account,
        error::{AppError, TransportError},
        proxies::ProxyTestResult,
        search::BulkSearchResponse,
        sessions::{RealtimeStatus, SessionStatistics},
    };
    use trud_admin::runtime::ManualRuntime;
    use trud_admin::services::AppServices;
    use trud_admin::services::api::ApiConfig;
    use trud_admin::services::bulk::parse_phone_numbers;
    use trud_admin::services::feeds::{
        ACCOUNTS_FEED, DASHBOARD_FEED, LiveUpdate, PageContext, PageRole, SESSIONS_FEED,
        feeds_for,
    };
    use trud_admin::services::transport::ScriptedTransport;
    use trud_admin::utils::format::format_success_rate;
    use serde_json::json;
    use std::rc::Rc;
    use yew::functional::Reducible;

    fn live(role: PageRole) -> PageContext {
        PageContext {
            role,
            realtime: true,
        }
    }

    // ===== Error Type Tests =====

    #[test]
    fn test_http_error_display() {
        let error = AppError::Http {
            status: 404,
            status_text: "Not Found".to_string(),
        };
        assert_eq!(error.to_string(), "HTTP 404: Not Found");
        assert_eq!(error.status(), Some(404));
    }

    #[test]
    fn test_transport_error_display() {
        let error: AppError = TransportError::Timeout(30_000).into();
        assert_eq!(error.to_string(), "Request timed out after 30000ms");
        assert!(error.is_timeout());
        assert_eq!(error.status(), None);
    }

    #[test]
    fn test_validation_error_display() {
        let error = AppError::Validation("Enter at least one phone number".to_string());
        assert_eq!(
            error.to_string(),
            "Validation error: Enter at least one phone number"
        );
    }

    // ===== Model Tests =====

    #[test]
    fn test_session_statistics_tolerate_missing_fields() {
        let stats: SessionStatistics =
            serde_json::from_value(json!({"total_sessions": 120, "success_rate": 87.5})).unwrap();
        assert_eq!(stats.total_sessions, 120);
        assert_eq!(stats.success_rate, 87.5);
        assert_eq!(stats.contacts_found, 0);
    }

    #[test]
    fn test_realtime_status_recent_successes() {
        let flat: RealtimeStatus =
            serde_json::from_value(json!({"active_sessions": 3, "successful_last_5min": 9}))
                .unwrap();
        assert_eq!(flat.recent_successes(), 9);

        let nested: RealtimeStatus = serde_json::from_value(json!({
            "active_sessions": 1,
            "recent_activity": {"last_5_minutes": 4, "successful": 2, "failed": 2}
        }))
        .unwrap();
        assert_eq!(nested.recent_successes(), 2);
    }

    #[test]
    fn test_account_accepts_hourly_counter() {
        let account: Account = serde_json::from_value(json!({
            "id": 5,
            "is_active": true,
            "current_hour_requests": 12
        }))
        .unwrap();
        assert_eq!(account.requests_today, 12);
        assert_eq!(account.display_name(), "Unnamed");
    }

    #[test]
    fn test_proxy_test_result_aliases() {
        let result: ProxyTestResult =
            serde_json::from_value(json!({"is_working": false, "error_message": "refused"}))
                .unwrap();
        assert!(!result.working);
        assert_eq!(result.error.as_deref(), Some("refused"));
    }

    #[test]
    fn test_zero_total_success_rate_renders_dash() {
        let response = BulkSearchResponse {
            total_searched: 0,
            successful_results: 0,
            failed_searches: 0,
            results: vec![],
        };
        assert_eq!(response.success_rate(), None);
        assert_eq!(format_success_rate(response.success_rate()), "-");
        assert_eq!(format_success_rate(Some(97.0)), "97.0%");
    }

    // ===== Feed Selection Tests =====

    #[test]
    fn test_feeds_per_page_role() {
        let dashboard = feeds_for(live(PageRole::Dashboard));
        assert_eq!(dashboard.len(), 1);
        assert_eq!(dashboard[0].name, DASHBOARD_FEED);
        assert_eq!(dashboard[0].interval_ms, 10_000);
        assert_eq!(dashboard[0].path, "/sessions/stats");

        let sessions = feeds_for(live(PageRole::Sessions));
        assert_eq!(sessions[0].name, SESSIONS_FEED);
        assert_eq!(sessions[0].interval_ms, 5_000);
        assert_eq!(sessions[0].path, "/sessions/realtime/status");

        let accounts = feeds_for(live(PageRole::Accounts));
        assert_eq!(accounts[0].name, ACCOUNTS_FEED);
        assert_eq!(accounts[0].interval_ms, 15_000);

        assert!(feeds_for(live(PageRole::Proxies)).is_empty());
        assert!(feeds_for(live(PageRole::Other)).is_empty());
    }

    #[test]
    fn test_parse_phone_numbers_filters_blanks() {
        assert_eq!(
            parse_phone_numbers("A\n\n B \n"),
            vec!["A".to_string(), "B".to_string()]
        );
    }

    // ===== State Tests =====

    #[test]
    fn test_data_state_accessors() {
        let loading: DataState<Vec<u32>> = DataState::Loading;
        assert!(loading.is_loading());
        assert!(loading.data().is_none());

        let loaded = DataState::Loaded(Rc::new(vec![1, 2]));
        assert_eq!(loaded.data().map(|v| v.len()), Some(2));
    }

    #[test]
    fn test_live_state_keeps_latest_per_feed() {
        let state = Rc::new(LiveState::default());
        let state = state.reduce(LiveAction::Update(LiveUpdate::Stats(SessionStatistics {
            total_sessions: 4,
            ..Default::default()
        })));
        let state = state.reduce(LiveAction::Update(LiveUpdate::Accounts(vec![])));

        assert_eq!(state.updates, 2);
        assert_eq!(state.stats.as_ref().map(|s| s.total_sessions), Some(4));
        assert_eq!(state.accounts.as_ref().map(|a| a.len()), Some(0));
        assert!(state.realtime.is_none());

        let state = state.reduce(LiveAction::Reset);
        assert_eq!(*state, LiveState::default());
    }

    // ===== Wiring Tests =====

    #[test]
    fn test_app_services_share_one_sink() {
        let runtime = Rc::new(ManualRuntime::new());
        let transport = ScriptedTransport::new();
        transport.push_json(200, json!({"success": true, "data": {"name": "Ali"}}));

        let services = AppServices::new(
            ApiConfig::default(),
            Rc::new(transport.clone()),
            runtime.clone(),
        );
        let copy = services.clone();
        assert!(services == copy);

        let outcome = futures::executor::block_on(copy.actions().search_phone("555"));
        assert!(outcome.is_ok());
        assert_eq!(services.notifier.visible().len(), 1);

        runtime.advance(3_000);
        assert!(services.notifier.visible().is_empty());
    }
}
