// Telemetry domain models and the normalization transforms
use serde::Serialize;

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// One raw vehicle telemetry snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryReading {
    pub engine_temp_c: f64,
    pub battery_voltage: f64,
    pub oil_pressure_psi: f64,
    pub vibration_g: f64,
    pub speed_kph: f64,
    pub odometer_km: f64,
    pub error_codes: Vec<String>,
    pub location: GeoPoint,
}

impl TelemetryReading {
    /// Named numeric sensor fields, in declaration order
    pub fn sensors(&self) -> [(&'static str, f64); 6] {
        [
            ("engine_temp_c", self.engine_temp_c),
            ("battery_voltage", self.battery_voltage),
            ("oil_pressure_psi", self.oil_pressure_psi),
            ("vibration_g", self.vibration_g),
            ("speed_kph", self.speed_kph),
            ("odometer_km", self.odometer_km),
        ]
    }
}

/// Linear map `norm = (value - origin) / span`, clamped to [0, 1].
///
/// A negative span expresses "deficit" features where a lower raw value
/// means a worse condition (battery voltage, oil pressure).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub origin: f64,
    pub span: f64,
}

impl LinearScale {
    const fn new(origin: f64, span: f64) -> Self {
        Self { origin, span }
    }

    pub fn normalize(&self, value: f64) -> f64 {
        ((value - self.origin) / self.span).clamp(0.0, 1.0)
    }

    /// Exact inverse of `normalize` inside the unclamped range
    pub fn denormalize(&self, norm: f64) -> f64 {
        self.origin + norm * self.span
    }
}

// Both directions read these; the learned model was trained on raw units,
// so changing a bound here changes what the model sees.
pub const ENGINE_TEMP_SCALE: LinearScale = LinearScale::new(70.0, 50.0);
pub const BATTERY_DROP_SCALE: LinearScale = LinearScale::new(12.5, -3.0);
pub const OIL_PRESSURE_LOW_SCALE: LinearScale = LinearScale::new(40.0, -40.0);
pub const VIBRATION_SCALE: LinearScale = LinearScale::new(0.0, 2.0);
pub const SPEED_SCALE: LinearScale = LinearScale::new(0.0, 180.0);
pub const ODOMETER_SCALE: LinearScale = LinearScale::new(0.0, 200_000.0);

/// Sensor readings rescaled to [0, 1], plus the raw error-code count
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedTelemetry {
    pub engine_temp_norm: f64,
    pub battery_drop_norm: f64,
    pub oil_pressure_low_norm: f64,
    pub vibration_norm: f64,
    pub speed_norm: f64,
    pub odometer_norm: f64,
    pub error_code_count: f64,
}

impl NormalizedTelemetry {
    pub fn from_reading(reading: &TelemetryReading) -> Self {
        Self {
            engine_temp_norm: ENGINE_TEMP_SCALE.normalize(reading.engine_temp_c),
            battery_drop_norm: BATTERY_DROP_SCALE.normalize(reading.battery_voltage),
            oil_pressure_low_norm: OIL_PRESSURE_LOW_SCALE.normalize(reading.oil_pressure_psi),
            vibration_norm: VIBRATION_SCALE.normalize(reading.vibration_g),
            speed_norm: SPEED_SCALE.normalize(reading.speed_kph),
            odometer_norm: ODOMETER_SCALE.normalize(reading.odometer_km),
            error_code_count: reading.error_codes.len() as f64,
        }
    }

    /// Approximate raw physical values, for models trained on raw units
    pub fn to_raw_features(&self) -> RawFeatureVector {
        RawFeatureVector {
            engine_temp_c: ENGINE_TEMP_SCALE.denormalize(self.engine_temp_norm),
            battery_voltage: BATTERY_DROP_SCALE.denormalize(self.battery_drop_norm),
            oil_pressure_psi: OIL_PRESSURE_LOW_SCALE.denormalize(self.oil_pressure_low_norm),
            vibration_g: VIBRATION_SCALE.denormalize(self.vibration_norm),
            speed_kph: SPEED_SCALE.denormalize(self.speed_norm),
            odometer_km: ODOMETER_SCALE.denormalize(self.odometer_norm),
            error_code_count: self.error_code_count,
        }
    }

    pub fn entries(&self) -> [(&'static str, f64); 7] {
        [
            ("engine_temp_norm", self.engine_temp_norm),
            ("battery_drop_norm", self.battery_drop_norm),
            ("oil_pressure_low_norm", self.oil_pressure_low_norm),
            ("vibration_norm", self.vibration_norm),
            ("speed_norm", self.speed_norm),
            ("odometer_norm", self.odometer_norm),
            ("error_code_count", self.error_code_count),
        ]
    }
}

/// Feature names a learned model may ask for
pub const RAW_FEATURE_NAMES: [&str; 7] = [
    "engine_temp_c",
    "battery_voltage",
    "oil_pressure_psi",
    "vibration_g",
    "speed_kph",
    "odometer_km",
    "error_code_count",
];

/// Seven raw-unit features handed to a learned model
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RawFeatureVector {
    pub engine_temp_c: f64,
    pub battery_voltage: f64,
    pub oil_pressure_psi: f64,
    pub vibration_g: f64,
    pub speed_kph: f64,
    pub odometer_km: f64,
    pub error_code_count: f64,
}

impl RawFeatureVector {
    pub fn get(&self, name: &str) -> Option<f64> {
        match name {
            "engine_temp_c" => Some(self.engine_temp_c),
            "battery_voltage" => Some(self.battery_voltage),
            "oil_pressure_psi" => Some(self.oil_pressure_psi),
            "vibration_g" => Some(self.vibration_g),
            "speed_kph" => Some(self.speed_kph),
            "odometer_km" => Some(self.odometer_km),
            "error_code_count" => Some(self.error_code_count),
            _ => None,
        }
    }
}
