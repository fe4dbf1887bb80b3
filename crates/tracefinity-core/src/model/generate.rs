//! Regeneration service response.

use serde::{Deserialize, Serialize};

/// Asset locations produced by a regeneration request. URLs are opaque.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub stl_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stl_urls: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threemf_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_count: Option<u32>,
}

impl GenerateResponse {
    /// Whether the bin was too large for the bed and was split into parts.
    pub fn is_split(&self) -> bool {
        self.split_count.is_some_and(|n| n > 1)
    }
}
