//! Remote stock API client
//!
//! The backend owns users and stock history; this client only reads the
//! withdrawal history and creates users.

use async_trait::async_trait;
use reqwest::Client;
use shared::{StockHistoryRecord, StockHistoryResponse, UserCreationRequest};

use crate::config::ApiConfig;
use crate::error::{AppError, AppResult};

/// Source of withdrawal history records
#[async_trait]
pub trait HistorySource: Send + Sync {
    async fn fetch_withdraw_history(&self) -> AppResult<Vec<StockHistoryRecord>>;
}

/// Destination of new user accounts
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn create_user(&self, request: &UserCreationRequest) -> AppResult<()>;
}

/// HTTP client for the stock API
#[derive(Clone)]
pub struct StockApiClient {
    client: Client,
    base_url: String,
}

impl StockApiClient {
    /// Create a client from configuration
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl HistorySource for StockApiClient {
    /// `GET /stock-history/withdraw`
    async fn fetch_withdraw_history(&self) -> AppResult<Vec<StockHistoryRecord>> {
        let url = self.url("/stock-history/withdraw");
        tracing::debug!("Fetching withdrawal history from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| AppError::Network {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(AppError::UnexpectedStatus {
                url,
                status: response.status(),
            });
        }

        let data: StockHistoryResponse = response.json().await.map_err(|e| AppError::Decode {
            url: url.clone(),
            message: e.to_string(),
        })?;

        let records = data.into_records();
        tracing::debug!("Fetched {} history records", records.len());
        Ok(records)
    }
}

#[async_trait]
impl UserDirectory for StockApiClient {
    /// `POST /users`; any 2xx is success and the body is not read
    async fn create_user(&self, request: &UserCreationRequest) -> AppResult<()> {
        let url = self.url("/users");
        tracing::debug!(username = %request.username, role = %request.role, "Creating user");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|source| AppError::Network {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(AppError::UnexpectedStatus {
                url,
                status: response.status(),
            });
        }

        Ok(())
    }
}
