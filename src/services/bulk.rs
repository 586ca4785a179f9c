use crate::config::Config;
use crate::models::error::AppError;
use crate::models::search::{BulkSearchRequest, BulkSearchResponse};
use crate::services::api::ApiClient;
use crate::services::in_flight::InFlightRegistry;
use crate::services::notifications::Notifier;

pub const BULK_SEARCH_OPERATION: &str = "bulk-search";

/// Splits free-form input into phone numbers: one per line, trimmed, blanks dropped.
pub fn parse_phone_numbers(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// A validated batch of numbers, ready for one bulk request.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkJob {
    items: Vec<String>,
}

impl BulkJob {
    /// Parses `input` and rejects empty or oversized batches.
    pub fn from_input(input: &str, cap: usize) -> Result<Self, AppError> {
        let items = parse_phone_numbers(input);

        if items.is_empty() {
            return Err(AppError::Validation(
                "Enter at least one phone number".to_string(),
            ));
        }
        if items.len() > cap {
            return Err(AppError::Validation(format!(
                "At most {cap} numbers can be searched at once (got {})",
                items.len()
            )));
        }

        Ok(Self { items })
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn into_request(self) -> BulkSearchRequest {
        BulkSearchRequest {
            phone_numbers: self.items,
            max_concurrent: Config::BULK_MAX_CONCURRENT,
            delay_between_requests: Config::BULK_DELAY_SECS,
        }
    }
}

/// Drives one `POST /search/bulk` at a time and reports the outcome.
#[derive(Clone)]
pub struct BulkSubmitter {
    client: ApiClient,
    notifier: Notifier,
    in_flight: InFlightRegistry,
    cap: usize,
}

impl BulkSubmitter {
    pub fn new(client: ApiClient, notifier: Notifier, in_flight: InFlightRegistry) -> Self {
        Self {
            client,
            notifier,
            in_flight,
            cap: Config::BULK_SEARCH_CAP,
        }
    }

    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = cap;
        self
    }

    pub fn is_running(&self) -> bool {
        self.in_flight.is_running(BULK_SEARCH_OPERATION)
    }

    /// Validates `input` and submits it as a single bulk search.
    ///
    /// Invalid input and overlapping submissions are rejected with a warning
    /// before any request is made. Server or transport failures raise an
    /// error notification. The operation is released on every path.
    pub async fn submit(&self, input: &str) -> Result<BulkSearchResponse, AppError> {
        let job = BulkJob::from_input(input, self.cap).inspect_err(|e| self.warn(e))?;

        let Some(_guard) = self.in_flight.try_acquire(BULK_SEARCH_OPERATION) else {
            let error =
                AppError::Validation("A bulk search is already in progress".to_string());
            self.warn(&error);
            return Err(error);
        };

        log::info!("Submitting bulk search for {} numbers", job.len());
        let result = self.dispatch(job).await;

        match &result {
            Ok(response) => {
                self.notifier.success(format!(
                    "Searched {} numbers successfully",
                    response.total_searched
                ));
            }
            Err(e) => {
                self.notifier.error(format!("Bulk search failed: {e}"));
            }
        }

        result
    }

    async fn dispatch(&self, job: BulkJob) -> Result<BulkSearchResponse, AppError> {
        self.client
            .post("/search/bulk", &job.into_request())
            .await?
            .json()
    }

    fn warn(&self, error: &AppError) {
        let message = match error {
            AppError::Validation(message) => message.clone(),
            other => other.to_string(),
        };
        self.notifier.warning(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::error::TransportError;
    use crate::runtime::{ManualRuntime, Runtime};
    use crate::services::api::ApiConfig;
    use crate::services::notifications::Severity;
    use crate::services::transport::ScriptedTransport;
    use futures::executor::block_on;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Harness {
        runtime: Rc<ManualRuntime>,
        transport: ScriptedTransport,
        notifier: Notifier,
        submitter: BulkSubmitter,
    }

    fn harness() -> Harness {
        let runtime = Rc::new(ManualRuntime::new());
        let transport = ScriptedTransport::new();
        let client = ApiClient::new(
            ApiConfig::builder().base_url("https://admin.test/api/v1").build(),
            Rc::new(transport.clone()),
            runtime.clone(),
        );
        let notifier = Notifier::new(runtime.clone());
        let submitter = BulkSubmitter::new(client, notifier.clone(), InFlightRegistry::new());
        Harness {
            runtime,
            transport,
            notifier,
            submitter,
        }
    }

    fn numbers(count: usize) -> String {
        (0..count)
            .map(|i| format!("+96478000{i:05}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn bulk_response(total: u32, successful: u32) -> serde_json::Value {
        json!({
            "total_searched": total,
            "successful_results": successful,
            "failed_searches": total - successful,
            "results": []
        })
    }

    fn severities(notifier: &Notifier) -> Vec<Severity> {
        notifier.visible().iter().map(|n| n.severity).collect()
    }

    #[test]
    fn test_blank_lines_filtered() {
        assert_eq!(parse_phone_numbers("A\n\n B \n"), vec!["A", "B"]);
        assert_eq!(parse_phone_numbers("  \r\n\t\n"), Vec::<String>::new());
        assert_eq!(parse_phone_numbers("1\r\n2"), vec!["1", "2"]);
    }

    #[test]
    fn test_job_keeps_duplicates_and_order() {
        let job = BulkJob::from_input("555\n444\n555", 100).unwrap();
        assert_eq!(job.items(), ["555", "444", "555"]);
    }

    #[test]
    fn test_empty_input_rejected_without_request() {
        let h = harness();
        let error = block_on(h.submitter.submit("\n   \n")).unwrap_err();

        assert!(matches!(error, AppError::Validation(_)));
        assert_eq!(h.transport.request_count(), 0);
        assert_eq!(severities(&h.notifier), vec![Severity::Warning]);
    }

    #[test]
    fn test_over_cap_rejected_without_request() {
        let h = harness();
        let error = block_on(h.submitter.submit(&numbers(101))).unwrap_err();

        assert!(matches!(error, AppError::Validation(_)));
        assert_eq!(h.transport.request_count(), 0);
        assert_eq!(severities(&h.notifier), vec![Severity::Warning]);
    }

    #[test]
    fn test_at_cap_dispatches_single_request() {
        let h = harness();
        h.transport.push_json(200, bulk_response(100, 97));

        let response = block_on(h.submitter.submit(&numbers(100))).unwrap();
        assert_eq!(response.total_searched, 100);

        let requests = h.transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, reqwest::Method::POST);
        assert_eq!(requests[0].url, "https://admin.test/api/v1/search/bulk");

        let body: serde_json::Value =
            serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["phone_numbers"].as_array().unwrap().len(), 100);
        assert_eq!(body["max_concurrent"], 5);
        assert_eq!(body["delay_between_requests"], 1.0);

        assert_eq!(severities(&h.notifier), vec![Severity::Success]);
        assert!(!h.submitter.is_running());
    }

    #[test]
    fn test_server_failure_notifies_and_releases() {
        let h = harness();
        h.transport.push_json(500, json!({"detail": "boom"}));

        let error = block_on(h.submitter.submit("555")).unwrap_err();
        assert_eq!(error.status(), Some(500));
        assert_eq!(severities(&h.notifier), vec![Severity::Error]);
        assert!(h.notifier.visible()[0].message.contains("HTTP 500"));
        assert!(!h.submitter.is_running());

        h.transport.push_json(200, bulk_response(1, 1));
        assert!(block_on(h.submitter.submit("555")).is_ok());
    }

    #[test]
    fn test_overlapping_submission_rejected() {
        let h = harness();
        h.transport.push_hang();

        let first = Rc::new(RefCell::new(None));
        let slot = first.clone();
        let submitter = h.submitter.clone();
        h.runtime.spawn_local(Box::pin(async move {
            *slot.borrow_mut() = Some(submitter.submit("555").await);
        }));
        h.runtime.run_until_idle();
        assert!(h.submitter.is_running());

        let error = block_on(h.submitter.submit("444")).unwrap_err();
        assert!(matches!(error, AppError::Validation(_)));
        assert_eq!(h.transport.request_count(), 1);

        // The hung request eventually times out and releases the guard
        h.runtime.advance(u64::from(Config::REQUEST_TIMEOUT_MS));
        let outcome = first.borrow_mut().take().unwrap();
        assert_eq!(
            outcome.unwrap_err(),
            AppError::Transport(TransportError::Timeout(Config::REQUEST_TIMEOUT_MS))
        );
        assert!(!h.submitter.is_running());
    }

    #[test]
    fn test_spam_scores_do_not_sink_the_batch() {
        let h = harness();
        h.transport.push_json(
            200,
            json!({
                "total_searched": 2,
                "successful_results": 2,
                "failed_searches": 0,
                "results": [
                    {"phone_number": "1", "success": true, "data": {"is_spam": 0.87}},
                    {"phone_number": "2", "success": true, "data": {"is_spam": false}}
                ]
            }),
        );

        let response = block_on(h.submitter.submit("1\n2")).unwrap();
        assert_eq!(response.results.len(), 2);
        assert_eq!(severities(&h.notifier), vec![Severity::Success]);
    }
}
