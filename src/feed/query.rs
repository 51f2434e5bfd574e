//! Query state and the choice of remote operation.

use serde::Serialize;

use crate::api::ReportQuery;
use crate::models::{ReportCategory, ReportStatus, SortOrder};

/// Mutable query driving the feed. Lives as long as the screen does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub text_query: String,
    pub status: Option<ReportStatus>,
    pub category: Option<ReportCategory>,
    pub sort: SortOrder,
    pub city: Option<String>,
    /// Only meaningful on the list path.
    pub current_page: u32,
    pub total_pages: u32,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            text_query: String::new(),
            status: None,
            category: None,
            sort: SortOrder::Desc,
            city: None,
            current_page: 1,
            total_pages: 1,
        }
    }
}

impl QueryState {
    /// Trimmed text query, if any.
    pub fn text(&self) -> Option<&str> {
        Some(self.text_query.trim()).filter(|t| !t.is_empty())
    }

    /// Status, category or city restriction present.
    pub fn has_filters(&self) -> bool {
        self.status.is_some() || self.category.is_some() || self.city.is_some()
    }

    /// Any search or filter active.
    pub fn is_narrowed(&self) -> bool {
        self.text().is_some() || self.has_filters()
    }

    pub fn has_more_pages(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Request parameters for `page`.
    pub fn to_request(&self, page: u32, limit: u32) -> ReportQuery {
        ReportQuery {
            text: self.text().map(str::to_string),
            status: self.status,
            category: self.category,
            page,
            limit,
            sort: self.sort,
            city: self.city.clone(),
        }
    }

    pub fn apply(&mut self, update: FilterUpdate) {
        self.status = update.status;
        self.category = update.category;
        self.sort = update.sort;
        self.city = update.city.filter(|c| !c.trim().is_empty());
    }
}

/// Filter sheet selection applied in one step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterUpdate {
    pub status: Option<ReportStatus>,
    pub category: Option<ReportCategory>,
    pub sort: SortOrder,
    pub city: Option<String>,
}

/// Remote operation backing the feed.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FeedPath {
    /// Text search, optionally narrowed by filters. First page only.
    Search,
    /// Filters without text. First page only.
    Filter,
    /// Unfiltered feed; the only path that paginates.
    #[default]
    List,
}

impl FeedPath {
    /// Path for a refresh or a filter change: search wins, then filters, then the list.
    pub fn for_state(state: &QueryState) -> Self {
        if state.text().is_some() {
            FeedPath::Search
        } else if state.has_filters() {
            FeedPath::Filter
        } else {
            FeedPath::List
        }
    }

    /// Path for a search invocation (debounce firing or submit). Filters count as
    /// search input, so only a completely empty query falls back to the list.
    pub fn for_search(state: &QueryState) -> Self {
        if state.is_narrowed() {
            FeedPath::Search
        } else {
            FeedPath::List
        }
    }

    pub fn paginates(&self) -> bool {
        matches!(self, FeedPath::List)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(text: &str, status: Option<ReportStatus>, category: Option<ReportCategory>) -> QueryState {
        QueryState {
            text_query: text.to_string(),
            status,
            category,
            ..QueryState::default()
        }
    }

    #[test]
    fn test_text_always_searches() {
        let cases = [
            state("pothole", None, None),
            state(" pothole ", Some(ReportStatus::Open), None),
            state("luz", Some(ReportStatus::Resolved), Some(ReportCategory::StreetLight)),
        ];
        for case in &cases {
            assert_eq!(FeedPath::for_state(case), FeedPath::Search);
            assert_eq!(FeedPath::for_search(case), FeedPath::Search);
        }
    }

    #[test]
    fn test_filters_without_text() {
        let filtered = state("   ", None, Some(ReportCategory::Flooding));
        assert_eq!(FeedPath::for_state(&filtered), FeedPath::Filter);
        assert_eq!(FeedPath::for_search(&filtered), FeedPath::Search);

        let by_city = QueryState {
            city: Some("Arecibo".to_string()),
            ..QueryState::default()
        };
        assert_eq!(FeedPath::for_state(&by_city), FeedPath::Filter);
    }

    #[test]
    fn test_empty_query_lists() {
        let empty = QueryState::default();
        assert_eq!(FeedPath::for_state(&empty), FeedPath::List);
        assert_eq!(FeedPath::for_search(&empty), FeedPath::List);
        assert!(FeedPath::List.paginates());
        assert!(!FeedPath::Search.paginates());
        assert!(!FeedPath::Filter.paginates());
    }

    #[test]
    fn test_apply_drops_blank_city() {
        let mut query = QueryState::default();
        query.apply(FilterUpdate {
            status: Some(ReportStatus::Denied),
            category: None,
            sort: SortOrder::Asc,
            city: Some("  ".to_string()),
        });
        assert_eq!(query.status, Some(ReportStatus::Denied));
        assert_eq!(query.sort, SortOrder::Asc);
        assert!(query.city.is_none());
        assert!(query.has_filters());
    }
}
