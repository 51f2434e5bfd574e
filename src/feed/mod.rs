//! Report feed controller.
//!
//! Combines free-text search, filters, sort order, pagination and the administrator
//! visibility restriction into one fetching policy against the report API. Every
//! state transition is published as a [`FeedSnapshot`] on a watch channel.
//!
//! Each fetch carries a sequence number; a response is applied only if no newer
//! fetch was issued after it, so the last request issued wins.

mod debounce;
mod query;

pub use debounce::Debouncer;
pub use query::{FeedPath, FilterUpdate, QueryState};

use std::sync::{Arc, Weak};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{watch, Mutex};

use crate::api::ReportFeedApi;
use crate::auth::{resolve_role, AuthContext};
use crate::config::Config;
use crate::models::{AdminContext, Report};
use crate::policy::apply_admin_filter;

/// Tunables for the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedSettings {
    pub page_limit: u32,
    pub debounce: Duration,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            page_limit: 10,
            debounce: Duration::from_millis(350),
        }
    }
}

impl From<&Config> for FeedSettings {
    fn from(config: &Config) -> Self {
        Self {
            page_limit: config.page_limit,
            debounce: config.search_debounce,
        }
    }
}

/// Lifecycle of the most recent fetch.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FetchStatus {
    #[default]
    Idle,
    Fetching,
    Success,
    Error,
}

/// What the list shows when it has no rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder {
    Loading,
    Error(String),
    Empty {
        title: &'static str,
        subtitle: &'static str,
    },
}

/// Observable controller output.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedSnapshot {
    pub reports: Vec<Report>,
    /// A replacing fetch (refresh, search, filter) is in flight.
    pub loading: bool,
    pub loading_more: bool,
    pub error: Option<String>,
    pub has_more: bool,
    pub status: FetchStatus,
    pub path: FeedPath,
    pub current_page: u32,
    pub total_pages: u32,
    /// A text query or filter is active.
    pub narrowed: bool,
}

impl FeedSnapshot {
    /// Placeholder for an empty list, `None` when there are rows to show.
    pub fn placeholder(&self) -> Option<Placeholder> {
        if !self.reports.is_empty() {
            return None;
        }
        if self.loading {
            return Some(Placeholder::Loading);
        }
        if let Some(error) = &self.error {
            return Some(Placeholder::Error(error.clone()));
        }
        Some(if self.narrowed {
            Placeholder::Empty {
                title: "No results found.",
                subtitle: "Try a different keyword, status, category, or sort.",
            }
        } else {
            Placeholder::Empty {
                title: "No reports available.",
                subtitle: "Be the first to create a report!",
            }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchMode {
    Replace,
    Append,
}

struct FeedData {
    query: QueryState,
    admin: AdminContext,
    reports: Vec<Report>,
    status: FetchStatus,
    error: Option<String>,
    refreshing: bool,
    loading_more: bool,
    /// Path that produced the held list.
    path: FeedPath,
    latest_seq: u64,
}

impl FeedData {
    fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot {
            reports: self.reports.clone(),
            loading: self.refreshing,
            loading_more: self.loading_more,
            error: self.error.clone(),
            has_more: self.can_paginate() && self.query.has_more_pages(),
            status: self.status,
            path: self.path,
            current_page: self.query.current_page,
            total_pages: self.query.total_pages,
            narrowed: self.query.is_narrowed(),
        }
    }

    fn can_paginate(&self) -> bool {
        self.path.paginates() && FeedPath::for_state(&self.query).paginates()
    }
}

struct Inner {
    api: Arc<dyn ReportFeedApi>,
    auth: AuthContext,
    settings: FeedSettings,
    data: Mutex<FeedData>,
    debouncer: Debouncer,
    state_tx: watch::Sender<FeedSnapshot>,
}

/// Handle to a feed controller. Clones share the same state.
#[derive(Clone)]
pub struct FeedController {
    inner: Arc<Inner>,
}

impl FeedController {
    pub fn new(api: Arc<dyn ReportFeedApi>, auth: AuthContext, settings: FeedSettings) -> Self {
        let data = FeedData {
            query: QueryState::default(),
            admin: AdminContext::anonymous(),
            reports: Vec::new(),
            status: FetchStatus::Idle,
            error: None,
            refreshing: false,
            loading_more: false,
            path: FeedPath::List,
            latest_seq: 0,
        };
        let (state_tx, _) = watch::channel(data.snapshot());

        Self {
            inner: Arc::new(Inner {
                api,
                auth,
                settings,
                data: Mutex::new(data),
                debouncer: Debouncer::new(settings.debounce),
                state_tx,
            }),
        }
    }

    /// Receive every state transition.
    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.inner.state_tx.subscribe()
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        self.inner.state_tx.borrow().clone()
    }

    pub async fn query(&self) -> QueryState {
        self.inner.data.lock().await.query.clone()
    }

    pub async fn admin_context(&self) -> AdminContext {
        self.inner.data.lock().await.admin.clone()
    }

    /// Screen mount: resolve the user's role, then load the first page.
    pub async fn init(&self) {
        let ctx = resolve_role(self.inner.api.as_ref(), &self.inner.auth).await;
        self.set_admin_context(ctx).await;
        self.refresh().await;
    }

    /// Replace the held list using the path the current query selects.
    pub async fn refresh(&self) {
        let path = {
            let data = self.inner.data.lock().await;
            FeedPath::for_state(&data.query)
        };
        self.fetch(path, FetchMode::Replace).await;
    }

    /// Retry after an error. Same as [`refresh`](Self::refresh).
    pub async fn retry(&self) {
        self.refresh().await;
    }

    /// Fetch the next page of the unfiltered feed and append it.
    ///
    /// No-op under search or filters, on the last page, or while anything is in flight.
    pub async fn load_more(&self) {
        {
            let data = self.inner.data.lock().await;
            if !data.can_paginate() {
                tracing::debug!("load_more ignored: {:?} path does not paginate", data.path);
                return;
            }
            if !data.query.has_more_pages() || data.loading_more || data.refreshing {
                return;
            }
        }
        self.fetch(FeedPath::List, FetchMode::Append).await;
    }

    /// Record a keystroke. The search runs once input pauses for the debounce delay.
    pub async fn set_text_query(&self, text: impl Into<String>) {
        {
            let mut data = self.inner.data.lock().await;
            data.query.text_query = text.into();
            self.publish(&data);
        }

        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        self.inner
            .debouncer
            .schedule(async move {
                if let Some(inner) = weak.upgrade() {
                    FeedController { inner }.run_search().await;
                }
            })
            .await;
    }

    /// Run the text search now, skipping the remaining debounce delay.
    pub async fn search_now(&self) {
        self.inner.debouncer.cancel().await;
        self.run_search().await;
    }

    /// Apply a filter sheet selection and reload immediately.
    ///
    /// An active text query is re-run as a search with the new filters.
    pub async fn set_filters(&self, update: FilterUpdate) {
        {
            let mut data = self.inner.data.lock().await;
            data.query.apply(update);
            self.publish(&data);
        }
        // The refresh below already uses the latest text.
        self.inner.debouncer.cancel().await;
        self.refresh().await;
    }

    /// Adopt a new visibility context and re-filter the held list without fetching.
    pub async fn set_admin_context(&self, ctx: AdminContext) {
        let mut data = self.inner.data.lock().await;
        let held = std::mem::take(&mut data.reports);
        data.reports = apply_admin_filter(&ctx, held);
        data.admin = ctx;
        self.publish(&data);
    }

    async fn run_search(&self) {
        let path = {
            let data = self.inner.data.lock().await;
            FeedPath::for_search(&data.query)
        };
        self.fetch(path, FetchMode::Replace).await;
    }

    fn publish(&self, data: &FeedData) {
        self.inner.state_tx.send_replace(data.snapshot());
    }

    async fn fetch(&self, path: FeedPath, mode: FetchMode) {
        let limit = self.inner.settings.page_limit;

        let (seq, page, request) = {
            let mut data = self.inner.data.lock().await;
            data.latest_seq += 1;
            let seq = data.latest_seq;

            let page = match mode {
                FetchMode::Replace => {
                    data.error = None;
                    data.refreshing = true;
                    data.loading_more = false;
                    1
                }
                FetchMode::Append => {
                    data.loading_more = true;
                    data.query.current_page + 1
                }
            };
            data.status = FetchStatus::Fetching;
            let request = data.query.to_request(page, limit);
            self.publish(&data);
            (seq, page, request)
        };

        tracing::debug!("Fetching {:?} page {} (seq {})", path, page, seq);
        let api = self.inner.api.as_ref();
        let result = match path {
            FeedPath::Search => api.search(&request).await,
            FeedPath::Filter => api.filter_list(&request).await,
            FeedPath::List => api.list(&request).await,
        };

        let mut data = self.inner.data.lock().await;
        if seq != data.latest_seq {
            tracing::debug!(
                "Discarding stale {:?} response (seq {}, latest {})",
                path,
                seq,
                data.latest_seq
            );
            return;
        }

        match result {
            Ok(response) => {
                let visible = apply_admin_filter(&data.admin, response.reports);
                let total_pages = response.total_pages.max(1);
                match mode {
                    FetchMode::Replace => data.reports = visible,
                    FetchMode::Append => data.reports.extend(visible),
                }
                data.path = path;
                data.query.total_pages = total_pages;
                data.query.current_page = page.min(total_pages);
                data.status = FetchStatus::Success;
                data.error = None;
            }
            Err(e) => {
                let fallback = match path {
                    FeedPath::Search => "Failed to search",
                    FeedPath::Filter | FeedPath::List => "Failed to load reports",
                };
                let message = Some(e.user_message()).filter(|m| !m.trim().is_empty());
                tracing::error!("Error loading {:?} feed: {}", path, e);
                data.error = Some(message.unwrap_or_else(|| fallback.to_string()));
                data.status = FetchStatus::Error;
            }
        }
        data.refreshing = false;
        data.loading_more = false;
        self.publish(&data);
    }
}
