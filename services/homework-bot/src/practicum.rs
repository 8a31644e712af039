//! Client for the Practicum homework statuses API

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::io::HttpClient;
use crate::HomeworkBotError;

/// Source of homework status payloads
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait HomeworkApi: Send + Sync {
    /// Fetch statuses changed since the given unix timestamp
    async fn fetch(&self, since_timestamp: i64) -> crate::Result<Value>;
}

/// Authenticated client for the homework statuses endpoint
pub struct PracticumClient {
    endpoint: String,
    authorization: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl PracticumClient {
    pub fn new(endpoint: &str, token: &str, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created PracticumClient for {}", endpoint);

        Self {
            endpoint: endpoint.to_string(),
            authorization: format!("OAuth {}", token),
            http,
        }
    }
}

#[async_trait]
impl HomeworkApi for PracticumClient {
    async fn fetch(&self, since_timestamp: i64) -> crate::Result<Value> {
        let url = format!("{}?from_date={}", self.endpoint, since_timestamp);
        let headers = [("Authorization", self.authorization.as_str())];

        let response = self.http.get(&url, &headers).await.map_err(|e| {
            HomeworkBotError::Transport(format!("Эндпоинт {} недоступен: {}", self.endpoint, e))
        })?;

        if response.status != 200 {
            return Err(HomeworkBotError::HttpStatus {
                url: self.endpoint.clone(),
                status: response.status,
            });
        }

        serde_json::from_str(&response.body).map_err(|e| {
            HomeworkBotError::Transport(format!(
                "Ответ эндпоинта {} не является JSON: {}",
                self.endpoint, e
            ))
        })
    }
}
