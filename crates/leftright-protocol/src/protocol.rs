use serde::{Deserialize, Serialize};

/// Body returned by both the read and the write ratio endpoints.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RatioResponse {
    pub count: u64,
    pub average: f64,
    pub layout: String,
}

impl RatioResponse {
    /// The answer for a layout nobody has submitted to yet.
    pub fn empty(layout: &str) -> Self {
        Self {
            count: 0,
            average: crate::DEFAULT_RATIO,
            layout: layout.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SubmitRatioRequest {
    pub ratio: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received_ratio: Option<serde_json::Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub message: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct StarsResponse {
    pub stars: u64,
}
