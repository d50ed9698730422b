//! Worker service client
//!
//! Typed HTTP client for the sibling worker process that owns background
//! jobs (Shopify sync, tracking sync, cache cleanup, sheet ingestion), log
//! history, and the Shopify connection config. The ops server never talks to
//! Shopify or couriers itself; it forwards the caller's token and translates
//! non-2xx responses into the structured error shape.

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use shared::client::{
    JobActionResponse, JobId, LogEntry, LogQuery, ShopifyConfig, ShopifyConnectionStatus,
    WorkerRun, WorkerStats,
};
use shared::{AppError, AppResult, ErrorCode};

/// Typed client for the worker process
#[derive(Debug, Clone)]
pub struct WorkerClient {
    client: Client,
    base_url: String,
}

/// Translate a non-2xx worker status into an application error
fn translate_status(status: StatusCode, body: String) -> AppError {
    match status {
        StatusCode::UNAUTHORIZED => AppError::unauthorized(),
        StatusCode::FORBIDDEN => AppError::forbidden(body),
        StatusCode::NOT_FOUND => AppError::not_found(body),
        StatusCode::BAD_REQUEST => AppError::validation(body),
        StatusCode::SERVICE_UNAVAILABLE => {
            AppError::with_message(ErrorCode::WorkerUnavailable, body)
        }
        _ => AppError::with_message(
            ErrorCode::WorkerError,
            format!("Worker returned {}: {}", status.as_u16(), body),
        ),
    }
}

fn translate_transport(e: reqwest::Error) -> AppError {
    if e.is_connect() || e.is_timeout() {
        AppError::with_message(ErrorCode::WorkerUnavailable, e.to_string())
    } else {
        AppError::with_message(ErrorCode::WorkerError, e.to_string())
    }
}

impl WorkerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(translate_status(status, text));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::with_message(ErrorCode::WorkerError, e.to_string()))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .bearer_auth(token)
            .send()
            .await
            .map_err(translate_transport)?;
        Self::handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        token: &str,
        path: &str,
        body: Option<&B>,
    ) -> AppResult<T> {
        let mut request = self.client.post(self.url(path)).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(translate_transport)?;
        Self::handle_response(response).await
    }

    // ==================== Logs ====================

    pub async fn logs(&self, token: &str, q: &LogQuery) -> AppResult<Vec<LogEntry>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(ref level) = q.level {
            query.push(("level", level.clone()));
        }
        if let Some(limit) = q.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(job) = q.job {
            query.push(("job", job.to_string()));
        }
        self.get(token, "/logs", &query).await
    }

    // ==================== Job control ====================

    pub async fn worker_runs(
        &self,
        token: &str,
        job: Option<JobId>,
        limit: u32,
    ) -> AppResult<Vec<WorkerRun>> {
        let mut query = vec![("limit", limit.to_string())];
        if let Some(job) = job {
            query.push(("job", job.to_string()));
        }
        self.get(token, "/runs", &query).await
    }

    pub async fn worker_stats(&self, token: &str) -> AppResult<WorkerStats> {
        self.get(token, "/stats", &[]).await
    }

    pub async fn job_start(&self, token: &str, job: JobId) -> AppResult<JobActionResponse> {
        self.post::<_, ()>(token, &format!("/jobs/{job}/start"), None)
            .await
    }

    pub async fn job_cancel(&self, token: &str, job: JobId) -> AppResult<JobActionResponse> {
        self.post::<_, ()>(token, &format!("/jobs/{job}/cancel"), None)
            .await
    }

    pub async fn job_enable(
        &self,
        token: &str,
        job: JobId,
        enabled: bool,
    ) -> AppResult<JobActionResponse> {
        #[derive(Serialize)]
        struct EnableRequest {
            enabled: bool,
        }
        self.post(
            token,
            &format!("/jobs/{job}/enable"),
            Some(&EnableRequest { enabled }),
        )
        .await
    }

    // ==================== Shopify ====================

    pub async fn shopify_config(&self, token: &str) -> AppResult<ShopifyConfig> {
        self.get(token, "/shopify/config", &[]).await
    }

    pub async fn shopify_config_update(
        &self,
        token: &str,
        config: &ShopifyConfig,
    ) -> AppResult<ShopifyConfig> {
        self.post(token, "/shopify/config", Some(config)).await
    }

    pub async fn shopify_test_connection(&self, token: &str) -> AppResult<ShopifyConnectionStatus> {
        self.post::<_, ()>(token, "/shopify/test-connection", None)
            .await
    }

    pub async fn shopify_sync(&self, token: &str) -> AppResult<JobActionResponse> {
        self.post::<_, ()>(token, "/shopify/sync", None).await
    }
}
