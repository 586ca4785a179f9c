pub mod download;
pub mod format;
