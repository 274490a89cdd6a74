use serde::{Deserialize, Serialize};

/// A concrete code excerpt and location backing a finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evidence {
    pub file_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u64>,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
