//! reqwest implementation of the report API.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use super::{EngagementApi, ReportFeedApi, ReportQuery};
use crate::auth::AuthContext;
use crate::config::Config;
use crate::errors::AppError;
use crate::models::{
    AdminInfo, PinRequest, PinnedStatus, RatingStatus, Report, ReportsPage, UserRef,
};

/// HTTP client for the reports backend.
#[derive(Clone)]
pub struct HttpReportApi {
    client: Client,
    base_url: String,
    auth: AuthContext,
}

impl HttpReportApi {
    /// Build a client with the configured base URL and request timeout.
    pub fn new(config: &Config, auth: AuthContext) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an image path returned by the backend.
    pub fn image_url(&self, path: Option<&str>) -> Option<String> {
        build_image_url(&self.base_url, path)
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Query pairs for a report listing; filters are only sent when requested.
    fn report_params(&self, query: &ReportQuery, text: bool, filters: bool) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if text {
            if let Some(q) = query.text.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
                params.push(("q", q.to_string()));
            }
        }
        if filters {
            if let Some(status) = query.status {
                params.push(("status", status.as_str().to_string()));
            }
            if let Some(category) = query.category {
                params.push(("category", category.as_str().to_string()));
            }
        }
        params.push(("page", query.page.max(1).to_string()));
        params.push(("limit", query.limit.to_string()));
        params.push(("sort", query.sort.as_str().to_string()));

        // Lets the backend apply its own department restriction.
        if let Some(creds) = self.auth.credentials() {
            params.push(("admin_id", creds.user_id.to_string()));
        }
        if let Some(city) = query.city.as_deref().filter(|c| !c.is_empty()) {
            params.push(("city", city.to_string()));
        }

        params
    }

    /// Send a request and decode the JSON body. `None` for 204 or an empty body.
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<Option<T>, AppError> {
        let request = builder.build()?;
        let method = request.method().clone();
        let url = request.url().clone();
        tracing::debug!("API request: {} {}", method, url);

        let response = self.client.execute(request).await?;
        let status = response.status();
        tracing::debug!("API response status: {} ({} {})", status, method, url.path());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = AppError::from_status(status, &body);
            tracing::warn!("API error ({} {}): {}", method, url.path(), err);
            return Err(err);
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    async fn get_page(&self, endpoint: &str, params: Vec<(&'static str, String)>) -> Result<ReportsPage, AppError> {
        let builder = self.client.get(self.url(endpoint)).query(&params);
        Ok(self.send::<ReportsPage>(builder).await?.unwrap_or_default())
    }

    /// Send a request whose body, if any, is not needed.
    async fn send_unit(&self, builder: RequestBuilder) -> Result<(), AppError> {
        self.send::<serde_json::Value>(builder).await.map(|_| ())
    }
}

/// Convert a backend image path into a full URL.
pub fn build_image_url(base_url: &str, path: Option<&str>) -> Option<String> {
    let path = path.map(str::trim).filter(|p| !p.is_empty())?;
    if path.starts_with("http://") || path.starts_with("https://") {
        return Some(path.to_string());
    }
    Some(format!("{}{}", base_url.trim_end_matches('/'), path))
}

#[async_trait]
impl ReportFeedApi for HttpReportApi {
    async fn list(&self, query: &ReportQuery) -> Result<ReportsPage, AppError> {
        let params = self.report_params(query, false, false);
        self.get_page("/reports", params).await
    }

    async fn search(&self, query: &ReportQuery) -> Result<ReportsPage, AppError> {
        let params = self.report_params(query, true, true);
        self.get_page("/reports/search", params).await
    }

    async fn filter_list(&self, query: &ReportQuery) -> Result<ReportsPage, AppError> {
        let params = self.report_params(query, false, true);
        self.get_page("/reports/filter", params).await
    }

    async fn resolve_admin_status(&self, user_id: i64) -> Result<AdminInfo, AppError> {
        let builder = self
            .client
            .get(self.url("/me/admin"))
            .query(&[("user_id", user_id)]);
        Ok(self.send::<AdminInfo>(builder).await?.unwrap_or_default())
    }
}

#[async_trait]
impl EngagementApi for HttpReportApi {
    async fn get_report(&self, report_id: i64) -> Result<Report, AppError> {
        let builder = self.client.get(self.url(&format!("/reports/{}", report_id)));
        self.send::<Report>(builder)
            .await?
            .ok_or_else(|| AppError::Decode(format!("Empty response for report {}", report_id)))
    }

    async fn rating_status(&self, report_id: i64, user_id: i64) -> Result<RatingStatus, AppError> {
        let builder = self
            .client
            .get(self.url(&format!("/reports/{}/rating-status", report_id)))
            .query(&[("user_id", user_id)]);
        Ok(self.send::<RatingStatus>(builder).await?.unwrap_or_default())
    }

    async fn toggle_rating(&self, report_id: i64, user_id: i64) -> Result<RatingStatus, AppError> {
        let builder = self
            .client
            .post(self.url(&format!("/reports/{}/toggle-rate", report_id)))
            .json(&UserRef { user_id });
        self.send::<RatingStatus>(builder)
            .await?
            .ok_or_else(|| AppError::Decode("Empty toggle-rate response".to_string()))
    }

    async fn pinned_status(&self, report_id: i64, user_id: i64) -> Result<PinnedStatus, AppError> {
        let builder = self
            .client
            .get(self.url(&format!("/reports/{}/pinned-status", report_id)))
            .query(&[("user_id", user_id)]);
        Ok(self.send::<PinnedStatus>(builder).await?.unwrap_or_default())
    }

    async fn pin_report(&self, report_id: i64, user_id: i64) -> Result<(), AppError> {
        let builder = self
            .client
            .post(self.url("/pinned-reports"))
            .json(&PinRequest { user_id, report_id });
        self.send_unit(builder).await
    }

    async fn unpin_report(&self, report_id: i64, user_id: i64) -> Result<(), AppError> {
        let builder = self
            .client
            .delete(self.url(&format!("/pinned-reports/{}", report_id)))
            .query(&[("user_id", user_id)]);
        self.send_unit(builder).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Credentials, ReportCategory, ReportStatus, SortOrder};

    fn api(auth: AuthContext) -> HttpReportApi {
        let config = Config {
            api_base_url: "http://localhost:5000".to_string(),
            ..Config::default()
        };
        HttpReportApi::new(&config, auth).unwrap()
    }

    #[test]
    fn test_build_image_url() {
        let base = "http://localhost:5000";
        assert_eq!(build_image_url(base, None), None);
        assert_eq!(build_image_url(base, Some("  ")), None);
        assert_eq!(
            build_image_url(base, Some("/uploads/a.jpg")).as_deref(),
            Some("http://localhost:5000/uploads/a.jpg")
        );
        assert_eq!(
            build_image_url(base, Some("https://cdn.example.org/a.jpg")).as_deref(),
            Some("https://cdn.example.org/a.jpg")
        );
    }

    #[test]
    fn test_list_params_skip_filters() {
        let api = api(AuthContext::anonymous());
        let query = ReportQuery {
            text: Some("pothole".to_string()),
            status: Some(ReportStatus::Open),
            page: 2,
            ..ReportQuery::default()
        };

        let params = api.report_params(&query, false, false);

        assert_eq!(
            params,
            vec![
                ("page", "2".to_string()),
                ("limit", "10".to_string()),
                ("sort", "desc".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_params_with_identity() {
        let api = api(AuthContext::signed_in(Credentials {
            user_id: 42,
            email: "ana@example.org".to_string(),
        }));
        let query = ReportQuery {
            text: Some("  flood ".to_string()),
            status: Some(ReportStatus::InProgress),
            category: Some(ReportCategory::Flooding),
            sort: SortOrder::Asc,
            city: Some("Ponce".to_string()),
            ..ReportQuery::default()
        };

        let params = api.report_params(&query, true, true);

        assert_eq!(
            params,
            vec![
                ("q", "flood".to_string()),
                ("status", "in_progress".to_string()),
                ("category", "flooding".to_string()),
                ("page", "1".to_string()),
                ("limit", "10".to_string()),
                ("sort", "asc".to_string()),
                ("admin_id", "42".to_string()),
                ("city", "Ponce".to_string()),
            ]
        );
    }
}
