use serde::{Deserialize, Serialize};

/// Aggregate counters shown on the dashboard cards.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionStatistics {
    pub total_sessions: u64,
    pub successful_sessions: u64,
    pub failed_sessions: u64,
    pub pending_sessions: u64,
    pub success_rate: f64,
    pub average_response_time: f64,
    pub contacts_found: u64,
    pub spam_numbers_detected: u64,
    pub unique_phone_numbers: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RecentActivity {
    pub last_5_minutes: u64,
    pub successful: u64,
    pub failed: u64,
}

/// Snapshot from `/sessions/realtime/status`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RealtimeStatus {
    pub timestamp: Option<String>,
    pub active_sessions: u64,
    pub successful_last_5min: Option<u64>,
    pub average_response_time: Option<f64>,
    pub success_rate: Option<f64>,
    pub recent_activity: Option<RecentActivity>,
    pub system_status: Option<String>,
}

impl RealtimeStatus {
    /// Successful lookups in the last five minutes, whichever shape the server used.
    pub fn recent_successes(&self) -> u64 {
        self.successful_last_5min
            .or_else(|| self.recent_activity.as_ref().map(|a| a.successful))
            .unwrap_or(0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A downloaded export, ready to be handed to the browser.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportFile {
    pub filename: String,
    pub mime_type: &'static str,
    pub contents: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CleanupResult {
    pub deleted_count: u64,
    #[serde(default)]
    pub message: Option<String>,
}
