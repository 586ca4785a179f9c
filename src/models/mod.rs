pub mod accounts;
pub mod error;
pub mod proxies;
pub mod search;
pub mod sessions;
