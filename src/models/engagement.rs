//! Rating and pinning payloads.

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Rating state of a report for one user (`rating-status` and `toggle-rate`).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RatingStatus {
    #[serde(default, deserialize_with = "null_as_default")]
    pub rated: bool,
    /// Total ratings on the report
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: i64,
}

/// Pin state of a report for one user.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PinnedStatus {
    #[serde(default, deserialize_with = "null_as_default")]
    pub pinned: bool,
}

/// Body of `POST /pinned-reports`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinRequest {
    pub user_id: i64,
    pub report_id: i64,
}

/// Body carrying only the acting user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRef {
    pub user_id: i64,
}
