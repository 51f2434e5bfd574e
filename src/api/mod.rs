//! Remote report API.
//!
//! The traits describe what the controllers need from the backend; [`HttpReportApi`]
//! is the reqwest implementation used in production.

mod client;

pub use client::*;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::{
    AdminInfo, PinnedStatus, RatingStatus, Report, ReportCategory, ReportStatus, ReportsPage,
    SortOrder,
};

/// Parameters shared by the list, search and filter operations.
///
/// `list` ignores `text`, `status` and `category`; `filter_list` ignores `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    pub text: Option<String>,
    pub status: Option<ReportStatus>,
    pub category: Option<ReportCategory>,
    pub page: u32,
    pub limit: u32,
    pub sort: SortOrder,
    pub city: Option<String>,
}

impl Default for ReportQuery {
    fn default() -> Self {
        Self {
            text: None,
            status: None,
            category: None,
            page: 1,
            limit: 10,
            sort: SortOrder::Desc,
            city: None,
        }
    }
}

/// Feed operations: paged listing, search, filtering and role lookup.
#[async_trait]
pub trait ReportFeedApi: Send + Sync {
    /// `GET /reports`
    async fn list(&self, query: &ReportQuery) -> Result<ReportsPage, AppError>;

    /// `GET /reports/search`
    async fn search(&self, query: &ReportQuery) -> Result<ReportsPage, AppError>;

    /// `GET /reports/filter`
    async fn filter_list(&self, query: &ReportQuery) -> Result<ReportsPage, AppError>;

    /// `GET /me/admin`
    async fn resolve_admin_status(&self, user_id: i64) -> Result<AdminInfo, AppError>;
}

/// Per-report operations used by the detail view.
#[async_trait]
pub trait EngagementApi: Send + Sync {
    async fn get_report(&self, report_id: i64) -> Result<Report, AppError>;

    async fn rating_status(&self, report_id: i64, user_id: i64) -> Result<RatingStatus, AppError>;

    /// Toggle the user's one-star rating; returns the new state.
    async fn toggle_rating(&self, report_id: i64, user_id: i64) -> Result<RatingStatus, AppError>;

    async fn pinned_status(&self, report_id: i64, user_id: i64) -> Result<PinnedStatus, AppError>;

    async fn pin_report(&self, report_id: i64, user_id: i64) -> Result<(), AppError>;

    async fn unpin_report(&self, report_id: i64, user_id: i64) -> Result<(), AppError>;
}
