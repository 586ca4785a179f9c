use crate::config::Config;
use crate::models::accounts::Account;
use crate::models::error::AppError;
use crate::models::sessions::{RealtimeStatus, SessionStatistics};
use crate::services::api::ApiClient;
use crate::services::scheduler::PollingScheduler;
use std::rc::Rc;

pub const DASHBOARD_FEED: &str = "dashboard-stats";
pub const SESSIONS_FEED: &str = "session-stats";
pub const ACCOUNTS_FEED: &str = "account-status";

/// Which admin page is on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PageRole {
    #[default]
    Dashboard,
    Sessions,
    Accounts,
    Search,
    Proxies,
    Other,
}

impl PageRole {
    pub const NAVIGABLE: [PageRole; 5] = [
        PageRole::Dashboard,
        PageRole::Sessions,
        PageRole::Accounts,
        PageRole::Search,
        PageRole::Proxies,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            PageRole::Dashboard => "Dashboard",
            PageRole::Sessions => "Sessions",
            PageRole::Accounts => "Accounts",
            PageRole::Search => "Search",
            PageRole::Proxies => "Proxies",
            PageRole::Other => "Admin",
        }
    }
}

/// Declares what the current page wants refreshed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PageContext {
    pub role: PageRole,
    /// Live refresh enabled for this page.
    pub realtime: bool,
}

impl PageContext {
    pub fn new(role: PageRole) -> Self {
        Self {
            role,
            realtime: Config::ENABLE_AUTO_REFRESH,
        }
    }

    pub fn static_page(role: PageRole) -> Self {
        Self {
            role,
            realtime: false,
        }
    }
}

impl Default for PageContext {
    fn default() -> Self {
        Self::new(PageRole::default())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedKind {
    DashboardStats,
    SessionStatus,
    AccountStatus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeedSpec {
    pub name: &'static str,
    pub interval_ms: u32,
    pub path: &'static str,
    pub kind: FeedKind,
}

/// Feeds to run for `ctx`. Pages without live data get none.
pub fn feeds_for(ctx: PageContext) -> Vec<FeedSpec> {
    if !ctx.realtime {
        return Vec::new();
    }

    let spec = match ctx.role {
        PageRole::Dashboard => FeedSpec {
            name: DASHBOARD_FEED,
            interval_ms: Config::DASHBOARD_POLL_MS,
            path: "/sessions/stats",
            kind: FeedKind::DashboardStats,
        },
        PageRole::Sessions => FeedSpec {
            name: SESSIONS_FEED,
            interval_ms: Config::SESSIONS_POLL_MS,
            path: "/sessions/realtime/status",
            kind: FeedKind::SessionStatus,
        },
        PageRole::Accounts => FeedSpec {
            name: ACCOUNTS_FEED,
            interval_ms: Config::ACCOUNTS_POLL_MS,
            path: "/accounts",
            kind: FeedKind::AccountStatus,
        },
        PageRole::Search | PageRole::Proxies | PageRole::Other => return Vec::new(),
    };
    vec![spec]
}

/// Fresh data delivered by a feed tick.
#[derive(Clone, Debug, PartialEq)]
pub enum LiveUpdate {
    Stats(SessionStatistics),
    Realtime(RealtimeStatus),
    Accounts(Vec<Account>),
}

pub type UpdateSink = Rc<dyn Fn(LiveUpdate)>;

/// Starts every feed `ctx` asks for and returns their names.
///
/// Feeds belonging to other pages are left alone; callers switching pages
/// stop those first.
pub fn start_page_feeds(
    scheduler: &PollingScheduler,
    client: &ApiClient,
    ctx: PageContext,
    on_update: UpdateSink,
) -> Vec<&'static str> {
    let specs = feeds_for(ctx);
    for spec in &specs {
        let client = client.clone();
        let on_update = on_update.clone();
        let spec = *spec;
        scheduler.start_polling(spec.name, spec.interval_ms, move || {
            let client = client.clone();
            let on_update = on_update.clone();
            async move {
                let update = fetch(&client, spec).await?;
                on_update(update);
                Ok(())
            }
        });
    }
    specs.iter().map(|spec| spec.name).collect()
}

async fn fetch(client: &ApiClient, spec: FeedSpec) -> Result<LiveUpdate, AppError> {
    let update = match spec.kind {
        FeedKind::DashboardStats => LiveUpdate::Stats(client.get_json(spec.path).await?),
        FeedKind::SessionStatus => LiveUpdate::Realtime(client.get_json(spec.path).await?),
        FeedKind::AccountStatus => LiveUpdate::Accounts(client.get_json(spec.path).await?),
    };
    Ok(update)
}
