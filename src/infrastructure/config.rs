use crate::application::simulation_service::{MAX_SIMULATION_TICKS, SimulationSettings};
use crate::domain::telemetry::GeoPoint;
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub model: ModelSettings,
    pub pipeline: PipelineSettings,
    pub simulation: SimulationConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ModelSettings {
    /// Learned model JSON; unset means the heuristic classifier
    pub path: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PipelineSettings {
    /// `[lat, lon]` used when a customer sends no location
    pub default_location: [f64; 2],
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            default_location: [12.9716, 77.5946],
        }
    }
}

impl PipelineSettings {
    pub fn default_location(&self) -> GeoPoint {
        GeoPoint::new(self.default_location[0], self.default_location[1])
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SimulationConfig {
    pub ticks: u32,
    pub interval_ms: u64,
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ticks: 20,
            interval_ms: 500,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn settings(&self) -> SimulationSettings {
        SimulationSettings {
            ticks: self.ticks,
            interval: Duration::from_millis(self.interval_ms),
            seed: self.seed,
        }
    }
}

/// `config/voiceguard.toml` if present, then `VOICEGUARD__SECTION__KEY` variables
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/voiceguard").required(false))
        .add_source(
            config::Environment::with_prefix("VOICEGUARD")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = settings.try_deserialize()?;
    validate(&app_config)?;
    Ok(app_config)
}

fn validate(app_config: &AppConfig) -> anyhow::Result<()> {
    if !app_config.pipeline.default_location().is_finite() {
        anyhow::bail!("pipeline.default_location must hold two finite numbers");
    }
    if !(1..=MAX_SIMULATION_TICKS).contains(&app_config.simulation.ticks) {
        anyhow::bail!(
            "simulation.ticks must be in 1..={MAX_SIMULATION_TICKS}, got {}",
            app_config.simulation.ticks
        );
    }
    Ok(())
}
