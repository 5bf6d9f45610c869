use std::sync::Arc;

use farescout_core::orchestrator::FlightSearchOrchestrator;
use farescout_store::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub search: Arc<FlightSearchOrchestrator>,
}
