// Simulation service - Live risk stream over jittered telemetry
use crate::application::pipeline::Pipeline;
use crate::domain::run_result::RunResult;
use crate::domain::telemetry::TelemetryReading;
use crate::domain::voice::VoiceCall;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::Serialize;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

const ENGINE_TEMP_SIGMA: f64 = 0.7;
const BATTERY_VOLTAGE_SIGMA: f64 = 0.05;
const OIL_PRESSURE_SIGMA: f64 = 0.6;
const VIBRATION_SIGMA: f64 = 0.05;
const CHANNEL_CAPACITY: usize = 100;

/// Upper bound on ticks per stream, for configured and requested runs alike
pub const MAX_SIMULATION_TICKS: u32 = 1_000;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimulationMessage {
    Tick {
        index: u32,
        risk_score: f64,
        result: Box<RunResult>,
    },
    Error {
        index: u32,
        error: &'static str,
        message: String,
    },
    Complete {
        ticks: u32,
        duration_ms: u64,
    },
}

/// Gaussian random walk over the noisy sensors
pub struct TelemetryJitter {
    rng: StdRng,
}

impl TelemetryJitter {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    pub fn step(&mut self, reading: &TelemetryReading) -> TelemetryReading {
        let mut next = reading.clone();
        next.engine_temp_c += self.noise(ENGINE_TEMP_SIGMA);
        next.battery_voltage += self.noise(BATTERY_VOLTAGE_SIGMA);
        next.oil_pressure_psi += self.noise(OIL_PRESSURE_SIGMA);
        next.vibration_g = (next.vibration_g + self.noise(VIBRATION_SIGMA)).max(0.0);
        next
    }

    fn noise(&mut self, sigma: f64) -> f64 {
        let z: f64 = self.rng.sample(StandardNormal);
        z * sigma
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SimulationSettings {
    pub ticks: u32,
    pub interval: Duration,
    pub seed: Option<u64>,
}

#[derive(Clone)]
pub struct SimulationService {
    pipeline: Pipeline,
    settings: SimulationSettings,
}

impl SimulationService {
    pub fn new(pipeline: Pipeline, settings: SimulationSettings) -> Self {
        Self { pipeline, settings }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn stream(
        &self,
        call: VoiceCall,
        reading: TelemetryReading,
        ticks: Option<u32>,
    ) -> mpsc::Receiver<SimulationMessage> {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let ticks = ticks.unwrap_or(self.settings.ticks);
        let interval = self.settings.interval;
        let mut jitter = TelemetryJitter::new(self.settings.seed);
        let pipeline = self.pipeline.clone();
        let start_time = Instant::now();

        tracing::debug!(customer_id = %call.customer_id, ticks, "Starting live simulation");

        tokio::spawn(async move {
            let mut current = reading;
            let mut completed = 0;

            for index in 0..ticks {
                current = jitter.step(&current);

                let msg = match pipeline.run_call(&call, &current) {
                    Ok(result) => SimulationMessage::Tick {
                        index,
                        risk_score: result.diagnosis.risk_score,
                        result: Box::new(result),
                    },
                    Err(e) => SimulationMessage::Error {
                        index,
                        error: e.kind(),
                        message: e.to_string(),
                    },
                };
                let failed = matches!(msg, SimulationMessage::Error { .. });

                if tx.send(msg).await.is_err() {
                    tracing::debug!("Simulation receiver dropped after {} ticks", completed);
                    return;
                }
                if failed {
                    break;
                }
                completed += 1;

                if !interval.is_zero() && index + 1 < ticks {
                    tokio::time::sleep(interval).await;
                }
            }

            let duration_ms = start_time.elapsed().as_millis() as u64;
            let complete = SimulationMessage::Complete {
                ticks: completed,
                duration_ms,
            };
            let _ = tx.send(complete).await;
        });

        rx
    }
}
