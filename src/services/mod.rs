pub mod actions;
pub mod api;
pub mod bulk;
pub mod feeds;
pub mod in_flight;
pub mod notifications;
pub mod scheduler;
pub mod transport;

use crate::config::Config;
use crate::models::error::AppError;
use crate::runtime::{BrowserRuntime, SharedRuntime};
use actions::AdminActions;
use api::{ApiClient, ApiConfig};
use bulk::BulkSubmitter;
use in_flight::InFlightRegistry;
use notifications::Notifier;
use scheduler::PollingScheduler;
use std::rc::Rc;
use transport::{ReqwestTransport, SharedTransport};

/// Everything the views share: one client, one feed table, one notification sink.
#[derive(Clone)]
pub struct AppServices {
    pub client: ApiClient,
    pub scheduler: PollingScheduler,
    pub notifier: Notifier,
    pub in_flight: InFlightRegistry,
}

impl AppServices {
    pub fn new(config: ApiConfig, transport: SharedTransport, runtime: SharedRuntime) -> Self {
        Self {
            client: ApiClient::new(config, transport, runtime.clone()),
            scheduler: PollingScheduler::new(runtime.clone()),
            notifier: Notifier::new(runtime),
            in_flight: InFlightRegistry::new(),
        }
    }

    /// Services for the browser, talking to the API on the page's own origin.
    pub fn browser() -> Result<Self, AppError> {
        let origin = web_sys::window()
            .ok_or_else(|| AppError::Config("No window available".to_string()))?
            .location()
            .origin()
            .map_err(|_| AppError::Config("Unable to read page origin".to_string()))?;

        let config = ApiConfig::builder()
            .base_url(format!("{origin}{}", Config::API_BASE_PATH))
            .build();
        let transport = ReqwestTransport::new()?;

        Ok(Self::new(config, Rc::new(transport), Rc::new(BrowserRuntime)))
    }

    pub fn actions(&self) -> AdminActions {
        AdminActions::new(
            self.client.clone(),
            self.notifier.clone(),
            self.in_flight.clone(),
        )
    }

    pub fn bulk_submitter(&self) -> BulkSubmitter {
        BulkSubmitter::new(
            self.client.clone(),
            self.notifier.clone(),
            self.in_flight.clone(),
        )
    }
}

impl PartialEq for AppServices {
    fn eq(&self, other: &Self) -> bool {
        self.scheduler.ptr_eq(&other.scheduler) && self.notifier.ptr_eq(&other.notifier)
    }
}
