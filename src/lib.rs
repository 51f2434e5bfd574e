//! Civic report client
//!
//! Client-side feed of citizen issue reports: debounced search, filters, pagination,
//! administrator department visibility, per-report rating and pinning, and a local
//! SQLite store for identity and visit history.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod engagement;
pub mod errors;
pub mod feed;
pub mod models;
pub mod policy;
pub mod scoring;

pub use api::{EngagementApi, HttpReportApi, ReportFeedApi, ReportQuery};
pub use auth::{resolve_role, AuthContext, CredentialStore, MemoryCredentialStore};
pub use config::Config;
pub use engagement::{EngagementState, ReportEngagement};
pub use errors::AppError;
pub use feed::{FeedController, FeedPath, FeedSettings, FeedSnapshot, FilterUpdate, Placeholder};
