pub mod components;
pub mod config;
pub mod hooks;
pub mod logger;
pub mod models;
pub mod runtime;
pub mod services;
pub mod utils;
