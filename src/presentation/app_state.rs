// Application state for HTTP handlers
use crate::application::pipeline::Pipeline;
use crate::application::simulation_service::SimulationService;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Pipeline,
    pub simulation_service: SimulationService,
}
