use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PhoneSearchRequest {
    pub phone_number: String,
}

/// Caller information returned for a single number.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PhoneInfo {
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub carrier: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    /// Servers report this as a flag, a spam score or a label.
    #[serde(default, deserialize_with = "truthy")]
    pub is_spam: bool,
}

/// Reads any JSON scalar as a flag: `null`, `0`, `""`, `"false"`, `"0"` and
/// `"no"` are false, everything else is true.
fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let flag = match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(flag) => flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => {
            let text = text.trim();
            !(text.is_empty()
                || text == "0"
                || text.eq_ignore_ascii_case("false")
                || text.eq_ignore_ascii_case("no"))
        }
        Value::Array(_) | Value::Object(_) => true,
    };
    Ok(flag)
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PhoneSearchResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<PhoneInfo>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BulkSearchRequest {
    pub phone_numbers: Vec<String>,
    pub max_concurrent: u32,
    pub delay_between_requests: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BulkSearchItem {
    pub phone_number: String,
    pub success: bool,
    #[serde(default)]
    pub data: Option<PhoneInfo>,
    #[serde(default)]
    pub error: Option<String>,
    /// Seconds spent on this lookup
    #[serde(default)]
    pub response_time: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BulkSearchResponse {
    pub total_searched: u32,
    pub successful_results: u32,
    pub failed_searches: u32,
    #[serde(default)]
    pub results: Vec<BulkSearchItem>,
}

impl BulkSearchResponse {
    /// Percentage of successful lookups, `None` when nothing was searched.
    pub fn success_rate(&self) -> Option<f64> {
        if self.total_searched == 0 {
            return None;
        }
        Some(f64::from(self.successful_results) / f64::from(self.total_searched) * 100.0)
    }
}
