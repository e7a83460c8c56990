use crate::usage_api::{Period, ServiceId};
use serde::Serialize;

/// The user's current choice of service and reporting window.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    service_id: Option<ServiceId>,
    period: Period,
}

impl Selection {
    pub fn new(period: Period) -> Self {
        Self {
            service_id: None,
            period,
        }
    }

    pub fn current_service(&self) -> Option<&ServiceId> {
        self.service_id.as_ref()
    }

    pub fn current_period(&self) -> Period {
        self.period
    }

    pub fn set_service(&mut self, service_id: ServiceId) {
        self.service_id = Some(service_id);
    }

    pub fn set_period(&mut self, period: Period) {
        self.period = period;
    }

    /// The key a fetch for this selection is tagged with, if a service is set.
    pub fn key(&self) -> Option<SelectionKey> {
        self.service_id.as_ref().map(|id| SelectionKey {
            service_id: id.clone(),
            period: self.period,
        })
    }
}

/// A concrete (service, period) pair that a payload belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SelectionKey {
    pub service_id: ServiceId,
    pub period: Period,
}
