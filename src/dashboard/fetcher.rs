use super::request::RequestToken;
use crate::usage_api::{FetchError, Service, UsageApi, UsagePayload};

/// Work the dashboard asks its owner to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchCommand {
    ListServices,
    Usage(RequestToken),
}

/// Result of a `FetchCommand`, fed back into `Dashboard::apply`.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Services(Result<Vec<Service>, FetchError>),
    Usage {
        token: RequestToken,
        result: Result<UsagePayload, FetchError>,
    },
}

/// Performs one command against the backend. Exactly one request per call.
pub async fn run_fetch(api: &dyn UsageApi, command: FetchCommand) -> FetchOutcome {
    match command {
        FetchCommand::ListServices => {
            tracing::info!("fetching service list");
            FetchOutcome::Services(api.list_services().await)
        }
        FetchCommand::Usage(token) => {
            tracing::info!(
                request_id = token.id,
                service_id = %token.key.service_id,
                period = %token.key.period,
                "fetching usage"
            );
            let result = api.get_usage(&token.key.service_id, token.key.period).await;
            FetchOutcome::Usage { token, result }
        }
    }
}
