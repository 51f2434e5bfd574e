//! Rating and pinning for a single opened report.
//!
//! Rating is optimistic: the local count flips immediately and is rolled back if the
//! server rejects the toggle.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use crate::api::EngagementApi;
use crate::auth::AuthContext;
use crate::db::SqliteStore;
use crate::models::Report;

/// Observable state of the detail view.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EngagementState {
    pub report: Option<Report>,
    pub rating_count: i64,
    pub is_rated: bool,
    pub is_pinned: bool,
    pub loading: bool,
    pub rating_in_flight: bool,
    pub pinning: bool,
    pub error: Option<String>,
    /// Transient message for a toast.
    pub notice: Option<String>,
}

pub struct ReportEngagement {
    api: Arc<dyn EngagementApi>,
    auth: AuthContext,
    history: Option<SqliteStore>,
    state: Mutex<EngagementState>,
}

impl ReportEngagement {
    pub fn new(api: Arc<dyn EngagementApi>, auth: AuthContext) -> Self {
        Self {
            api,
            auth,
            history: None,
            state: Mutex::new(EngagementState::default()),
        }
    }

    /// Record successfully loaded reports in the local visit history.
    pub fn with_history(mut self, store: SqliteStore) -> Self {
        self.history = Some(store);
        self
    }

    pub async fn state(&self) -> EngagementState {
        self.state.lock().await.clone()
    }

    /// Return and clear the pending notice.
    pub async fn take_notice(&self) -> Option<String> {
        self.state.lock().await.notice.take()
    }

    pub async fn load(&self, report_id: i64) {
        {
            let mut state = self.state.lock().await;
            state.loading = true;
            state.error = None;
        }

        let report = match self.api.get_report(report_id).await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!("Error loading report {}: {}", report_id, e);
                let mut state = self.state.lock().await;
                state.loading = false;
                state.error = Some(e.user_message());
                return;
            }
        };

        let mut rated = None;
        let mut pinned = None;
        if let Some(user_id) = self.auth.user_id() {
            let (rating_status, pinned_status) = tokio::join!(
                self.api.rating_status(report_id, user_id),
                self.api.pinned_status(report_id, user_id)
            );
            match rating_status {
                Ok(status) => rated = Some(status.rated),
                Err(e) => tracing::warn!("Error loading rating status for {}: {}", report_id, e),
            }
            match pinned_status {
                Ok(status) => pinned = Some(status.pinned),
                Err(e) => tracing::warn!("Error loading pinned status for {}: {}", report_id, e),
            }
        }

        if let Some(store) = &self.history {
            if let Err(e) = store.record_visit(&report).await {
                tracing::warn!("Failed to record visit to report {}: {}", report_id, e);
            }
        }

        let mut state = self.state.lock().await;
        state.rating_count = report.rating;
        state.is_rated = rated.unwrap_or(false);
        state.is_pinned = pinned.unwrap_or(false);
        state.report = Some(report);
        state.loading = false;
    }

    /// Flip the user's rating, optimistically.
    pub async fn toggle_rating(&self) {
        let Some(user_id) = self.auth.user_id() else {
            return;
        };

        let (report_id, previous_rated, previous_count) = {
            let mut state = self.state.lock().await;
            let Some(report_id) = state.report.as_ref().map(|r| r.id) else {
                return;
            };
            if state.rating_in_flight {
                return;
            }
            let previous = (state.is_rated, state.rating_count);
            state.is_rated = !previous.0;
            state.rating_count = if previous.0 {
                (previous.1 - 1).max(0)
            } else {
                previous.1 + 1
            };
            state.rating_in_flight = true;
            (report_id, previous.0, previous.1)
        };

        let result = self.api.toggle_rating(report_id, user_id).await;

        let mut state = self.state.lock().await;
        state.rating_in_flight = false;
        match result {
            Ok(status) => {
                state.is_rated = status.rated;
                state.rating_count = status.rating;
                let notice = if status.rated {
                    "Rating added"
                } else {
                    "Rating removed"
                };
                state.notice = Some(notice.to_string());
            }
            Err(e) => {
                tracing::error!("Error toggling rating on report {}: {}", report_id, e);
                state.is_rated = previous_rated;
                state.rating_count = previous_count;
                state.notice = Some(e.user_message());
            }
        }
    }

    pub async fn set_pinned(&self, pinned: bool) {
        let Some(user_id) = self.auth.user_id() else {
            return;
        };

        let report_id = {
            let mut state = self.state.lock().await;
            let Some(report_id) = state.report.as_ref().map(|r| r.id) else {
                return;
            };
            if state.pinning {
                return;
            }
            state.pinning = true;
            report_id
        };

        let result = if pinned {
            self.api.pin_report(report_id, user_id).await
        } else {
            self.api.unpin_report(report_id, user_id).await
        };

        let mut state = self.state.lock().await;
        state.pinning = false;
        match result {
            Ok(()) => {
                state.is_pinned = pinned;
                let notice = if pinned {
                    "Report pinned"
                } else {
                    "Report unpinned"
                };
                state.notice = Some(notice.to_string());
            }
            Err(e) => {
                tracing::error!("Error updating pin on report {}: {}", report_id, e);
                state.notice = Some(e.user_message());
            }
        }
    }
}
