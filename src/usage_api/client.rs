//! HTTP client for the services list and usage endpoints.

use super::error::FetchError;
use super::types::{ApiEnvelope, Period, Service, ServiceId, UsagePayload};
use crate::config::DashboardConfig;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

const USER_AGENT: &str = concat!("usage-dash/", env!("CARGO_PKG_VERSION"));

/// Fetch capabilities the dashboard consumes.
///
/// One call is one outbound request; implementations never retry.
#[async_trait]
pub trait UsageApi: Send + Sync {
    async fn list_services(&self) -> Result<Vec<Service>, FetchError>;

    async fn get_usage(
        &self,
        service_id: &ServiceId,
        period: Period,
    ) -> Result<UsagePayload, FetchError>;
}

/// Blocking `ureq` client run on the blocking pool so the event loop stays
/// responsive while a request is outstanding.
#[derive(Debug, Clone)]
pub struct HttpUsageApi {
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl HttpUsageApi {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
            timeout,
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(
            &config.base_url,
            config.token.clone(),
            config.request_timeout(),
        )
    }

    pub fn services_url(&self) -> String {
        format!("{}/services/list", self.base_url)
    }

    pub fn usage_url(&self, service_id: &ServiceId, period: Period) -> Result<String, FetchError> {
        if service_id.is_empty() {
            return Err(FetchError::InvalidRequest(
                "service id must not be empty".to_string(),
            ));
        }
        if !service_id
            .as_str()
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(FetchError::InvalidRequest(format!(
                "service id '{}' contains unsupported characters",
                service_id
            )));
        }
        Ok(format!(
            "{}/services/{}/usage?period={}",
            self.base_url,
            service_id,
            period.as_str()
        ))
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(self.timeout))
            .http_status_as_error(false)
            .build()
            .into();

        let mut request = agent
            .get(url)
            .header("Accept", "application/json")
            .header("User-Agent", USER_AGENT);
        if let Some(token) = &self.token {
            request = request.header("Authorization", &format!("Bearer {}", token));
        }

        let mut response = request.call().map_err(FetchError::from_ureq)?;
        let status = response.status();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| FetchError::Transport(format!("failed to read response body: {}", e)))?;

        if !status.is_success() {
            // Error bodies usually carry the same envelope with a message.
            let message = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&body)
                .ok()
                .and_then(|envelope| envelope.message);
            return Err(FetchError::Status {
                code: status.as_u16(),
                message,
            });
        }

        let envelope: ApiEnvelope<T> =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;
        envelope.into_result()
    }
}

async fn run_blocking<T, F>(task: F) -> Result<T, FetchError>
where
    F: FnOnce() -> Result<T, FetchError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| FetchError::Transport(format!("fetch task failed: {}", e)))?
}

#[async_trait]
impl UsageApi for HttpUsageApi {
    async fn list_services(&self) -> Result<Vec<Service>, FetchError> {
        let api = self.clone();
        let url = self.services_url();
        run_blocking(move || api.get_json::<Vec<Service>>(&url)).await
    }

    async fn get_usage(
        &self,
        service_id: &ServiceId,
        period: Period,
    ) -> Result<UsagePayload, FetchError> {
        let url = self.usage_url(service_id, period)?;
        let api = self.clone();
        run_blocking(move || api.get_json::<UsagePayload>(&url)).await
    }
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
