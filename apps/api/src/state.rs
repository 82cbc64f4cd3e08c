use crate::config::Config;
use crate::screening::orchestrator::Screener;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Screener wired to the configured completion service.
    pub screener: Screener,
    pub config: Config,
}
