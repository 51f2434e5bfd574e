//! Paged report responses shared by `/reports`, `/reports/search` and `/reports/filter`.

use serde::{Deserialize, Deserializer, Serialize};

use super::{null_as_default, Report};

/// One page of reports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportsPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub reports: Vec<Report>,
    /// Always at least 1.
    #[serde(default = "default_total_pages", deserialize_with = "total_pages")]
    pub total_pages: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

impl Default for ReportsPage {
    fn default() -> Self {
        Self {
            reports: Vec::new(),
            total_pages: default_total_pages(),
            current_page: None,
            total_count: None,
        }
    }
}

impl ReportsPage {
    pub fn new(reports: Vec<Report>, total_pages: u32) -> Self {
        Self {
            reports,
            total_pages: total_pages.max(1),
            current_page: None,
            total_count: None,
        }
    }
}

fn default_total_pages() -> u32 {
    1
}

/// Missing, null, zero or negative page counts all become 1.
fn total_pages<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?.unwrap_or(1);
    Ok(raw.clamp(1, u32::MAX as i64) as u32)
}
