//! Stored user identity.

use serde::{Deserialize, Serialize};

/// Identity of the signed-in user as kept in local storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub user_id: i64,
    pub email: String,
}
