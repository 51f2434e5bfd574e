//! Administrator models.

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Organizational unit an administrator belongs to.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Department {
    LUMA,
    DTOP,
    AAA,
    DDS,
}

impl Department {
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::LUMA => "LUMA",
            Department::DTOP => "DTOP",
            Department::AAA => "AAA",
            Department::DDS => "DDS",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "LUMA" => Some(Department::LUMA),
            "DTOP" => Some(Department::DTOP),
            "AAA" => Some(Department::AAA),
            "DDS" => Some(Department::DDS),
            _ => None,
        }
    }
}

/// Response of `GET /me/admin`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub admin: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

/// Visibility context derived from the current user's role.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminContext {
    pub is_admin: bool,
    /// Raw department name; unknown names are kept and simply map to no restriction.
    pub department: Option<String>,
}

impl AdminContext {
    /// Non-administrator visibility.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn admin(department: impl Into<String>) -> Self {
        Self {
            is_admin: true,
            department: Some(department.into()),
        }
    }
}

impl From<AdminInfo> for AdminContext {
    fn from(info: AdminInfo) -> Self {
        if info.admin {
            Self {
                is_admin: true,
                department: info.department.filter(|d| !d.trim().is_empty()),
            }
        } else {
            Self::anonymous()
        }
    }
}
