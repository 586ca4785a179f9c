pub mod account_form;
pub mod accounts_table;
pub mod bulk_search;
pub mod form;
pub mod navigation;
pub mod notifications;
pub mod phone_search;
pub mod proxies_table;
pub mod proxy_form;
pub mod realtime_panel;
pub mod stats_cards;
pub mod status;
pub mod system_tools;

pub use account_form::AccountForm;
pub use accounts_table::AccountsTable;
pub use bulk_search::BulkSearch;
pub use navigation::Navigation;
pub use notifications::NotificationHost;
pub use phone_search::PhoneSearch;
pub use proxies_table::ProxiesTable;
pub use proxy_form::ProxyForm;
pub use realtime_panel::RealtimePanel;
pub use stats_cards::StatsCards;
pub use status::Status;
pub use system_tools::SystemTools;
