//! Identity and role resolution.
//!
//! Credentials are read once from a [`CredentialStore`] into an [`AuthContext`] that
//! is handed to the API client and the controllers.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::api::ReportFeedApi;
use crate::errors::AppError;
use crate::models::{AdminContext, Credentials};

/// Local storage for the signed-in user's identity.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn load(&self) -> Result<Option<Credentials>, AppError>;

    async fn save(&self, credentials: &Credentials) -> Result<(), AppError>;

    async fn clear(&self) -> Result<(), AppError>;
}

/// In-process credential store.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    current: RwLock<Option<Credentials>>,
}

impl MemoryCredentialStore {
    pub fn new(credentials: Option<Credentials>) -> Self {
        Self {
            current: RwLock::new(credentials),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Result<Option<Credentials>, AppError> {
        Ok(self.current.read().await.clone())
    }

    async fn save(&self, credentials: &Credentials) -> Result<(), AppError> {
        *self.current.write().await = Some(credentials.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), AppError> {
        *self.current.write().await = None;
        Ok(())
    }
}

/// Identity of the current user, or anonymous.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    credentials: Option<Credentials>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(credentials: Credentials) -> Self {
        Self {
            credentials: Some(credentials),
        }
    }

    /// Load the stored identity. Storage failures degrade to anonymous.
    pub async fn from_store(store: &dyn CredentialStore) -> Self {
        match store.load().await {
            Ok(credentials) => Self { credentials },
            Err(e) => {
                tracing::warn!("Failed to read stored credentials: {}", e);
                Self::anonymous()
            }
        }
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn user_id(&self) -> Option<i64> {
        self.credentials.as_ref().map(|c| c.user_id)
    }

    pub fn is_signed_in(&self) -> bool {
        self.credentials.is_some()
    }
}

/// Determine whether the current user is an administrator and of which department.
///
/// Never fails: without credentials no request is made, and lookup errors are logged
/// and treated as a regular user.
pub async fn resolve_role(api: &dyn ReportFeedApi, auth: &AuthContext) -> AdminContext {
    let Some(user_id) = auth.user_id() else {
        return AdminContext::anonymous();
    };

    match api.resolve_admin_status(user_id).await {
        Ok(info) => {
            let ctx = AdminContext::from(info);
            tracing::info!(
                "Resolved role for user {}: admin={} department={:?}",
                user_id,
                ctx.is_admin,
                ctx.department
            );
            ctx
        }
        Err(e) => {
            tracing::error!("Failed to load admin info for user {}: {}", user_id, e);
            AdminContext::anonymous()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ReportQuery;
    use crate::models::{AdminInfo, ReportsPage};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct RoleApi {
        calls: AtomicUsize,
        answer: Result<AdminInfo, AppError>,
    }

    #[async_trait]
    impl ReportFeedApi for RoleApi {
        async fn list(&self, _query: &ReportQuery) -> Result<ReportsPage, AppError> {
            unreachable!()
        }

        async fn search(&self, _query: &ReportQuery) -> Result<ReportsPage, AppError> {
            unreachable!()
        }

        async fn filter_list(&self, _query: &ReportQuery) -> Result<ReportsPage, AppError> {
            unreachable!()
        }

        async fn resolve_admin_status(&self, _user_id: i64) -> Result<AdminInfo, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer.clone()
        }
    }

    fn signed_in() -> AuthContext {
        AuthContext::signed_in(Credentials {
            user_id: 9,
            email: "admin@example.org".to_string(),
        })
    }

    #[tokio::test]
    async fn test_anonymous_skips_network() {
        let api = RoleApi {
            calls: AtomicUsize::new(0),
            answer: Ok(AdminInfo::default()),
        };

        let ctx = resolve_role(&api, &AuthContext::anonymous()).await;

        assert_eq!(ctx, AdminContext::anonymous());
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_admin_with_department() {
        let api = RoleApi {
            calls: AtomicUsize::new(0),
            answer: Ok(AdminInfo {
                user_id: Some(9),
                admin: true,
                department: Some("AAA".to_string()),
            }),
        };

        let ctx = resolve_role(&api, &signed_in()).await;

        assert_eq!(ctx, AdminContext::admin("AAA"));
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_lookup_failure_fails_soft() {
        let api = RoleApi {
            calls: AtomicUsize::new(0),
            answer: Err(AppError::Timeout),
        };

        let ctx = resolve_role(&api, &signed_in()).await;

        assert_eq!(ctx, AdminContext::anonymous());
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryCredentialStore::default();
        assert!(!AuthContext::from_store(&store).await.is_signed_in());

        store
            .save(&Credentials {
                user_id: 3,
                email: "a@b.c".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(AuthContext::from_store(&store).await.user_id(), Some(3));

        store.clear().await.unwrap();
        assert_eq!(AuthContext::from_store(&store).await.user_id(), None);
    }
}
