//! In-memory `UsageApi` for orchestration and headless tests.

use super::client::UsageApi;
use super::error::FetchError;
use super::types::{Period, Service, ServiceId, UsagePayload};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeCall {
    ListServices,
    Usage(ServiceId, Period),
}

/// Serves canned responses keyed by (service, period) and records every call.
#[derive(Default)]
pub struct FakeUsageApi {
    services: Mutex<Option<Result<Vec<Service>, FetchError>>>,
    usage: Mutex<HashMap<(ServiceId, Period), Result<UsagePayload, FetchError>>>,
    calls: Mutex<Vec<FakeCall>>,
}

impl FakeUsageApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_services(self, services: Vec<Service>) -> Self {
        *self.services.lock().unwrap() = Some(Ok(services));
        self
    }

    pub fn with_services_error(self, err: FetchError) -> Self {
        *self.services.lock().unwrap() = Some(Err(err));
        self
    }

    pub fn with_usage(self, id: &str, period: Period, payload: UsagePayload) -> Self {
        self.usage
            .lock()
            .unwrap()
            .insert((ServiceId::new(id), period), Ok(payload));
        self
    }

    pub fn with_usage_error(self, id: &str, period: Period, err: FetchError) -> Self {
        self.usage
            .lock()
            .unwrap()
            .insert((ServiceId::new(id), period), Err(err));
        self
    }

    pub fn calls(&self) -> Vec<FakeCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UsageApi for FakeUsageApi {
    async fn list_services(&self) -> Result<Vec<Service>, FetchError> {
        self.calls.lock().unwrap().push(FakeCall::ListServices);
        self.services
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn get_usage(
        &self,
        service_id: &ServiceId,
        period: Period,
    ) -> Result<UsagePayload, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push(FakeCall::Usage(service_id.clone(), period));
        self.usage
            .lock()
            .unwrap()
            .get(&(service_id.clone(), period))
            .cloned()
            .unwrap_or_else(|| Err(FetchError::Status { code: 404, message: None }))
    }
}
