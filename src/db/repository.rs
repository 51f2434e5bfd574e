//! SQLite-backed credential store and visit history.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::auth::CredentialStore;
use crate::errors::AppError;
use crate::models::{Credentials, Report};

/// Rows kept in the visit history.
pub const MAX_VISITED_REPORTS: i64 = 50;

/// Local store for identity and visit history.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record that `report` was opened; revisits move it to the top.
    pub async fn record_visit(&self, report: &Report) -> Result<(), AppError> {
        let json = serde_json::to_string(report)?;
        let now = Utc::now().to_rfc3339();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO visited_reports (report_id, report_json, visited_at, seq)
             VALUES (?, ?, ?, (SELECT COALESCE(MAX(seq), 0) + 1 FROM visited_reports))
             ON CONFLICT(report_id) DO UPDATE SET
                report_json = excluded.report_json,
                visited_at = excluded.visited_at,
                seq = excluded.seq",
        )
        .bind(report.id)
        .bind(&json)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "DELETE FROM visited_reports WHERE report_id NOT IN (
                SELECT report_id FROM visited_reports ORDER BY seq DESC LIMIT ?
            )",
        )
        .bind(MAX_VISITED_REPORTS)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Most recently visited reports, newest first.
    pub async fn recent_visits(&self, limit: i64) -> Result<Vec<Report>, AppError> {
        let rows = sqlx::query(
            "SELECT report_json FROM visited_reports ORDER BY seq DESC LIMIT ?",
        )
        .bind(limit.clamp(0, MAX_VISITED_REPORTS))
        .fetch_all(&self.pool)
        .await?;

        let mut reports = Vec::with_capacity(rows.len());
        for row in rows {
            let json: String = row.get("report_json");
            match serde_json::from_str(&json) {
                Ok(report) => reports.push(report),
                Err(e) => tracing::warn!("Skipping unreadable visited report: {}", e),
            }
        }
        Ok(reports)
    }

    pub async fn clear_visits(&self) -> Result<(), AppError> {
        sqlx::query("DELETE FROM visited_reports")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for SqliteStore {
    async fn load(&self) -> Result<Option<Credentials>, AppError> {
        let row = sqlx::query("SELECT user_id, email FROM credentials WHERE id = 1")
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| Credentials {
            user_id: row.get("user_id"),
            email: row.get("email"),
        }))
    }

    async fn save(&self, credentials: &Credentials) -> Result<(), AppError> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO credentials (id, user_id, email, saved_at) VALUES (1, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET user_id = excluded.user_id, email = excluded.email, saved_at = excluded.saved_at",
        )
        .bind(credentials.user_id)
        .bind(&credentials.email)
        .bind(&now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), AppError> {
        sqlx::query("DELETE FROM credentials")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use tempfile::TempDir;

    async fn store() -> (SqliteStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_database(&temp_dir.path().join("client.sqlite"))
            .await
            .unwrap();
        (SqliteStore::new(pool), temp_dir)
    }

    fn report(id: i64) -> Report {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": format!("Report {}", id),
            "category": "sinkhole",
            "status": "open",
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_credentials_persist() {
        let (store, _dir) = store().await;
        assert!(store.load().await.unwrap().is_none());

        let creds = Credentials {
            user_id: 14,
            email: "luis@example.org".to_string(),
        };
        store.save(&creds).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(creds));

        let replaced = Credentials {
            user_id: 15,
            email: "maria@example.org".to_string(),
        };
        store.save(&replaced).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(replaced));

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_revisit_moves_to_top() {
        let (store, _dir) = store().await;

        store.record_visit(&report(1)).await.unwrap();
        store.record_visit(&report(2)).await.unwrap();
        store.record_visit(&report(1)).await.unwrap();

        let ids: Vec<i64> = store
            .recent_visits(10)
            .await
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_history_is_capped() {
        let (store, _dir) = store().await;

        for id in 0..(MAX_VISITED_REPORTS + 5) {
            store.record_visit(&report(id)).await.unwrap();
        }

        let visits = store.recent_visits(100).await.unwrap();
        assert_eq!(visits.len() as i64, MAX_VISITED_REPORTS);
        assert_eq!(visits[0].id, MAX_VISITED_REPORTS + 4);

        store.clear_visits().await.unwrap();
        assert!(store.recent_visits(10).await.unwrap().is_empty());
    }
}
