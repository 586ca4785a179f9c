/// Configuration constants for the application
pub struct Config;

impl Config {
    /// Base path of the admin API, resolved against the page origin at startup
    pub const API_BASE_PATH: &'static str = "/api/v1";

    /// Bearer credential attached to every request.
    /// Set `TRUD_API_KEY` at build time to override the development key.
    pub const API_KEY: &'static str = match option_env!("TRUD_API_KEY") {
        Some(key) => key,
        None => "trud-admin-key-12345",
    };

    /// Timeout applied to every API request (30 seconds)
    pub const REQUEST_TIMEOUT_MS: u32 = 30_000;

    /// Enable live feeds on pages that declare them
    pub const ENABLE_AUTO_REFRESH: bool = true;

    /// Polling interval of the dashboard statistics feed
    pub const DASHBOARD_POLL_MS: u32 = 10_000;

    /// Polling interval of the realtime session feed
    pub const SESSIONS_POLL_MS: u32 = 5_000;

    /// Polling interval of the account status feed
    pub const ACCOUNTS_POLL_MS: u32 = 15_000;

    /// Maximum number of phone numbers accepted by one bulk search
    pub const BULK_SEARCH_CAP: usize = 100;

    /// Server-side concurrency requested for bulk searches
    pub const BULK_MAX_CONCURRENT: u32 = 5;

    /// Server-side delay between bulk lookups, in seconds
    pub const BULK_DELAY_SECS: f64 = 1.0;

    /// Default export window in days
    pub const EXPORT_DAYS: u32 = 7;

    /// Sessions older than this many days are removed by cleanup
    pub const CLEANUP_DAYS: u32 = 30;

    pub const SUCCESS_DURATION_MS: u32 = 3_000;
    pub const ERROR_DURATION_MS: u32 = 7_000;
    pub const WARNING_DURATION_MS: u32 = 5_000;
    pub const INFO_DURATION_MS: u32 = 4_000;

    /// Console log level for the browser build
    pub const LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
}
