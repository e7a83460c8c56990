//! Dashboard orchestration.
//!
//! `Dashboard` owns the selection, the request tracker, both chart surfaces
//! and the last rendered view. It performs no I/O: every mutation returns the
//! `FetchCommand` its owner should run, and results come back through
//! `apply`. This keeps the whole state machine testable without a terminal
//! or a network.

pub mod fetcher;
pub mod request;
pub mod selection;
pub mod surface;

pub use fetcher::{run_fetch, FetchCommand, FetchOutcome};
pub use request::{RequestToken, RequestTracker};
pub use selection::{Selection, SelectionKey};
pub use surface::ChartSurface;

use crate::aggregation::{aggregate, breakdown, Breakdown, UsageTotals};
use crate::charts::{ActivityFeed, BreakdownChart, TrendChart, TrendPoint};
use crate::usage_api::{FetchError, Period, Service, ServiceId, UsagePayload};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardPhase {
    Idle,
    LoadingServices,
    ServicesLoaded,
    LoadingUsage,
    UsageLoaded,
    Error,
}

impl DashboardPhase {
    pub fn is_loading(&self) -> bool {
        matches!(
            self,
            DashboardPhase::LoadingServices | DashboardPhase::LoadingUsage
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            DashboardPhase::Idle => "Idle",
            DashboardPhase::LoadingServices => "Loading services",
            DashboardPhase::ServicesLoaded => "Ready",
            DashboardPhase::LoadingUsage => "Loading usage",
            DashboardPhase::UsageLoaded => "Up to date",
            DashboardPhase::Error => "Error",
        }
    }
}

/// Everything shown outside the two chart surfaces for the last applied payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedView {
    pub key: SelectionKey,
    pub service_label: String,
    pub totals: UsageTotals,
    pub breakdown: Breakdown,
    pub activity: ActivityFeed,
    pub loaded_at: DateTime<Utc>,
}

/// What `apply` did with an outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum Disposition {
    ServicesLoaded { count: usize },
    NoServices,
    UsageRendered { token: RequestToken },
    Discarded { token: RequestToken },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub disposition: Disposition,
    pub next: Option<FetchCommand>,
}

/// Serializable view of the rendered dashboard, used by headless output.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub service_id: ServiceId,
    pub service_label: String,
    pub period: Period,
    pub totals: UsageTotals,
    pub trend: Vec<TrendPoint>,
    pub breakdown: Breakdown,
    pub recent_messages: ActivityFeed,
    pub loaded_at: DateTime<Utc>,
}

pub struct Dashboard {
    phase: DashboardPhase,
    services: Vec<Service>,
    services_loaded: bool,
    services_in_flight: bool,
    preferred_service: Option<ServiceId>,
    selection: Selection,
    requests: RequestTracker,
    trend: ChartSurface<TrendChart>,
    breakdown: ChartSurface<BreakdownChart>,
    view: Option<RenderedView>,
    notice: Option<String>,
    recent_limit: usize,
}

impl Dashboard {
    pub fn new(period: Period, recent_limit: usize) -> Self {
        Self {
            phase: DashboardPhase::Idle,
            services: Vec::new(),
            services_loaded: false,
            services_in_flight: false,
            preferred_service: None,
            selection: Selection::new(period),
            requests: RequestTracker::new(),
            trend: ChartSurface::new("trend"),
            breakdown: ChartSurface::new("breakdown"),
            view: None,
            notice: None,
            recent_limit,
        }
    }

    /// Service to select once the list arrives, if it is in the list.
    pub fn with_preferred_service(mut self, service_id: Option<ServiceId>) -> Self {
        self.preferred_service = service_id.filter(|id| !id.is_empty());
        self
    }

    pub fn start(&mut self) -> FetchCommand {
        self.phase = DashboardPhase::LoadingServices;
        self.services_in_flight = true;
        FetchCommand::ListServices
    }

    /// Selects `service_id` and fetches its usage. Unknown ids are ignored.
    pub fn select_service(&mut self, service_id: &ServiceId) -> Option<FetchCommand> {
        if !self.services.iter().any(|s| &s.id == service_id) {
            tracing::warn!(service_id = %service_id, "ignoring selection of unknown service");
            return None;
        }
        self.selection.set_service(service_id.clone());
        self.fetch_usage()
    }

    /// Moves the selection `delta` places through the service list, wrapping.
    pub fn select_next_service(&mut self, delta: isize) -> Option<FetchCommand> {
        if self.services.is_empty() {
            return None;
        }
        let len = self.services.len() as isize;
        let current = self
            .selection
            .current_service()
            .and_then(|id| self.services.iter().position(|s| &s.id == id))
            .unwrap_or(0) as isize;
        let index = (current + delta).rem_euclid(len) as usize;
        let id = self.services.get(index)?.id.clone();
        self.select_service(&id)
    }

    pub fn select_period(&mut self, period: Period) -> Option<FetchCommand> {
        self.selection.set_period(period);
        self.fetch_usage()
    }

    pub fn cycle_period(&mut self) -> Option<FetchCommand> {
        self.select_period(self.selection.current_period().next())
    }

    /// Re-fetches the current selection, or reloads the service list if it
    /// never loaded or came back empty.
    pub fn refresh(&mut self) -> Option<FetchCommand> {
        if !self.services_loaded || self.services.is_empty() {
            if self.services_in_flight {
                return None;
            }
            return Some(self.start());
        }
        self.fetch_usage()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn fetch_usage(&mut self) -> Option<FetchCommand> {
        let key = self.selection.key()?;
        let token = self.requests.issue(key);
        self.phase = DashboardPhase::LoadingUsage;
        Some(FetchCommand::Usage(token))
    }

    pub fn apply(&mut self, outcome: FetchOutcome) -> Applied {
        match outcome {
            FetchOutcome::Services(result) => self.apply_services(result),
            FetchOutcome::Usage { token, result } => self.apply_usage(token, result),
        }
    }

    fn apply_services(&mut self, result: Result<Vec<Service>, FetchError>) -> Applied {
        self.services_in_flight = false;
        match result {
            Ok(services) => {
                self.services_loaded = true;
                self.services = services;
                self.phase = DashboardPhase::ServicesLoaded;

                let Some(default_id) = self.default_service() else {
                    self.notice = Some("No services found for this account".to_string());
                    return Applied {
                        disposition: Disposition::NoServices,
                        next: None,
                    };
                };

                self.notice = None;
                self.selection.set_service(default_id);
                Applied {
                    disposition: Disposition::ServicesLoaded {
                        count: self.services.len(),
                    },
                    next: self.fetch_usage(),
                }
            }
            Err(err) => self.fail(format!("Failed to load services: {}", err)),
        }
    }

    /// Preferred service if listed, else the current one if still listed,
    /// else the first.
    fn default_service(&self) -> Option<ServiceId> {
        let listed = |id: &ServiceId| self.services.iter().any(|s| &s.id == id);
        self.preferred_service
            .as_ref()
            .filter(|id| listed(*id))
            .or_else(|| self.selection.current_service().filter(|id| listed(*id)))
            .cloned()
            .or_else(|| self.services.first().map(|s| s.id.clone()))
    }

    fn apply_usage(
        &mut self,
        token: RequestToken,
        result: Result<UsagePayload, FetchError>,
    ) -> Applied {
        if !self.requests.is_current(&token, self.selection.key().as_ref()) {
            tracing::debug!(
                request_id = token.id,
                latest = self.requests.last_issued(),
                "discarding stale usage response"
            );
            return Applied {
                disposition: Disposition::Discarded { token },
                next: None,
            };
        }
        self.requests.settle(&token);

        match result {
            Ok(payload) => {
                self.render(token.key.clone(), &payload);
                self.phase = DashboardPhase::UsageLoaded;
                self.notice = None;
                Applied {
                    disposition: Disposition::UsageRendered { token },
                    next: None,
                }
            }
            Err(err) => self.fail(format!("Failed to load usage data: {}", err)),
        }
    }

    fn fail(&mut self, message: String) -> Applied {
        tracing::warn!(error = %message, "fetch failed");
        self.phase = DashboardPhase::Error;
        self.notice = Some(message.clone());
        Applied {
            disposition: Disposition::Failed { message },
            next: None,
        }
    }

    /// Builds every model first, then commits them together so the three
    /// views never show different payloads.
    fn render(&mut self, key: SelectionKey, payload: &UsagePayload) {
        let mut totals = aggregate(&payload.daily_usage);
        totals.malformed_fields += payload.skipped_records;
        if totals.malformed_fields > 0 {
            tracing::warn!(
                malformed_fields = totals.malformed_fields,
                skipped_records = payload.skipped_records,
                "usage payload had missing or malformed values, treated as zero"
            );
        }
        let trend = TrendChart::from_records(&payload.daily_usage);
        let categories = breakdown(&payload.api_breakdown);
        let breakdown_chart = BreakdownChart::from_breakdown(&categories);
        let activity = ActivityFeed::from_messages(&payload.recent_messages, self.recent_limit);
        let service_label = self
            .services
            .iter()
            .find(|s| s.id == key.service_id)
            .map(Service::display_label)
            .unwrap_or_else(|| format!("Service {}", key.service_id));

        match trend {
            Some(chart) => self.trend.bind(chart),
            None => self.trend.release(),
        }
        match breakdown_chart {
            Some(chart) => self.breakdown.bind(chart),
            None => self.breakdown.release(),
        }
        self.view = Some(RenderedView {
            key,
            service_label,
            totals,
            breakdown: categories,
            activity,
            loaded_at: Utc::now(),
        });
    }

    pub fn phase(&self) -> DashboardPhase {
        self.phase
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn current_service(&self) -> Option<&Service> {
        let id = self.selection.current_service()?;
        self.services.iter().find(|s| &s.id == id)
    }

    pub fn view(&self) -> Option<&RenderedView> {
        self.view.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn trend_surface(&self) -> &ChartSurface<TrendChart> {
        &self.trend
    }

    pub fn breakdown_surface(&self) -> &ChartSurface<BreakdownChart> {
        &self.breakdown
    }

    pub fn has_pending_fetch(&self) -> bool {
        self.services_in_flight || self.requests.has_in_flight()
    }

    pub fn snapshot(&self) -> Option<DashboardSnapshot> {
        let view = self.view.as_ref()?;
        Some(DashboardSnapshot {
            service_id: view.key.service_id.clone(),
            service_label: view.service_label.clone(),
            period: view.key.period,
            totals: view.totals,
            trend: self
                .trend
                .chart()
                .map(|chart| chart.points.clone())
                .unwrap_or_default(),
            breakdown: view.breakdown.clone(),
            recent_messages: view.activity.clone(),
            loaded_at: view.loaded_at,
        })
    }
}

#[cfg(test)]
#[path = "tests/dashboard_tests.rs"]
mod tests;
