// Request boundary - Untyped JSON payloads to validated pipeline inputs
use crate::domain::error::PipelineError;
use crate::domain::telemetry::{GeoPoint, TelemetryReading};
use serde_json::{Map, Value};

/// Telemetry as received on the wire, keyed by sensor name
pub type RawTelemetryMap = Map<String, Value>;

const UNKNOWN_CUSTOMER: &str = "unknown";

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: String,
    /// `None` falls back to the configured default location
    pub location: Option<GeoPoint>,
}

impl Customer {
    pub fn new(id: impl Into<String>, location: Option<GeoPoint>) -> Self {
        Self {
            id: id.into(),
            location,
        }
    }

    fn from_json(value: Option<&Value>) -> Result<Self, PipelineError> {
        let Some(value) = value.filter(|v| !v.is_null()) else {
            return Ok(Self::new(UNKNOWN_CUSTOMER, None));
        };
        let obj = value
            .as_object()
            .ok_or_else(|| PipelineError::InvalidInput("customer must be an object".to_string()))?;

        let id = match obj.get("id") {
            None | Some(Value::Null) => UNKNOWN_CUSTOMER.to_string(),
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            Some(other) => {
                return Err(PipelineError::InvalidInput(format!(
                    "customer.id must be a non-empty string, got {other}"
                )));
            }
        };

        let location = match obj.get("location") {
            None | Some(Value::Null) => None,
            Some(v) => Some(parse_location(v).map_err(|e| {
                PipelineError::InvalidInput(format!("customer.location {e}"))
            })?),
        };

        Ok(Self { id, location })
    }
}

/// A validated predict payload
#[derive(Debug, Clone, PartialEq)]
pub struct RunRequest {
    pub voice_text: String,
    pub telemetry: RawTelemetryMap,
    pub customer: Customer,
}

impl RunRequest {
    /// Shape: `{"voice_text": str, "telemetry": {...}, "customer": {"id", "location"}}`
    pub fn from_json(payload: &Value) -> Result<Self, PipelineError> {
        let obj = payload
            .as_object()
            .ok_or_else(|| PipelineError::InvalidInput("payload must be a JSON object".to_string()))?;

        let voice_text = match obj.get("voice_text") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                return Err(PipelineError::InvalidInput(format!(
                    "voice_text must be a string, got {other}"
                )));
            }
        };

        let telemetry = match obj.get("telemetry") {
            Some(Value::Object(map)) => map.clone(),
            None | Some(Value::Null) => {
                return Err(PipelineError::InvalidTelemetry(
                    "telemetry object is required".to_string(),
                ));
            }
            Some(_) => {
                return Err(PipelineError::InvalidTelemetry(
                    "telemetry must be an object".to_string(),
                ));
            }
        };

        let customer = Customer::from_json(obj.get("customer"))?;

        Ok(Self {
            voice_text,
            telemetry,
            customer,
        })
    }
}

/// `[lat, lon]` with both values finite
pub fn parse_location(value: &Value) -> Result<GeoPoint, String> {
    let pair = value
        .as_array()
        .filter(|a| a.len() == 2)
        .ok_or_else(|| format!("must be a [lat, lon] pair, got {value}"))?;
    let lat = pair[0].as_f64();
    let lon = pair[1].as_f64();
    match (lat, lon) {
        (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => Ok(GeoPoint::new(lat, lon)),
        _ => Err(format!("must hold two finite numbers, got {value}")),
    }
}

fn sensor_value(raw: &RawTelemetryMap, name: &str) -> Result<f64, PipelineError> {
    let value = match raw.get(name) {
        None | Some(Value::Null) => {
            return Err(PipelineError::InvalidTelemetry(format!("missing {name}")));
        }
        Some(Value::Number(n)) => n.as_f64(),
        // Numeric strings are accepted, matching loosely typed upstream emitters
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    match value {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(PipelineError::InvalidTelemetry(format!(
            "{name} must be a finite number, got {}",
            raw.get(name).map(Value::to_string).unwrap_or_default()
        ))),
    }
}

fn error_codes(raw: &RawTelemetryMap) -> Result<Vec<String>, PipelineError> {
    match raw.get("error_codes") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    PipelineError::InvalidTelemetry(format!(
                        "error_codes entries must be strings, got {item}"
                    ))
                })
            })
            .collect(),
        Some(other) => Err(PipelineError::InvalidTelemetry(format!(
            "error_codes must be a list, got {other}"
        ))),
    }
}

/// Builds a reading; the location defaults to where the customer is.
pub fn reading_from_raw(
    raw: &RawTelemetryMap,
    fallback_location: GeoPoint,
) -> Result<TelemetryReading, PipelineError> {
    let location = match raw.get("location") {
        None | Some(Value::Null) => fallback_location,
        Some(v) => parse_location(v)
            .map_err(|e| PipelineError::InvalidTelemetry(format!("location {e}")))?,
    };

    Ok(TelemetryReading {
        engine_temp_c: sensor_value(raw, "engine_temp_c")?,
        battery_voltage: sensor_value(raw, "battery_voltage")?,
        oil_pressure_psi: sensor_value(raw, "oil_pressure_psi")?,
        vibration_g: sensor_value(raw, "vibration_g")?,
        speed_kph: sensor_value(raw, "speed_kph")?,
        odometer_km: sensor_value(raw, "odometer_km")?,
        error_codes: error_codes(raw)?,
        location,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn telemetry() -> Value {
        json!({
            "engine_temp_c": 102.5,
            "battery_voltage": 11.9,
            "oil_pressure_psi": 28,
            "vibration_g": 0.85,
            "speed_kph": 25,
            "odometer_km": 120000,
            "error_codes": ["P0520", "P0302"],
        })
    }

    fn as_map(v: Value) -> RawTelemetryMap {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn test_parse_full_request() {
        let req = RunRequest::from_json(&json!({
            "voice_text": "engine is hot",
            "telemetry": telemetry(),
            "customer": {"id": "CUST-9", "location": [13.0, 77.6]},
        }))
        .unwrap();

        assert_eq!(req.voice_text, "engine is hot");
        assert_eq!(req.customer, Customer::new("CUST-9", Some(GeoPoint::new(13.0, 77.6))));
        assert_eq!(req.telemetry.len(), 7);
    }

    #[test]
    fn test_customer_defaults() {
        let req = RunRequest::from_json(&json!({"telemetry": telemetry()})).unwrap();
        assert_eq!(req.customer, Customer::new("unknown", None));
        assert_eq!(req.voice_text, "");
    }

    #[test]
    fn test_non_string_text_is_invalid_input() {
        let err = RunRequest::from_json(&json!({"voice_text": 42, "telemetry": telemetry()}))
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidInput(_)));

        let err = RunRequest::from_json(&json!(["not", "an", "object"])).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidInput(_)));
    }

    #[test]
    fn test_malformed_customer_is_invalid_input() {
        for customer in [
            json!("CUST-1"),
            json!({"id": 7}),
            json!({"id": "  "}),
            json!({"id": "A", "location": [1.0]}),
            json!({"id": "A", "location": ["north", 2.0]}),
        ] {
            let err = RunRequest::from_json(&json!({"telemetry": telemetry(), "customer": customer.clone()}))
                .unwrap_err();
            assert!(matches!(err, PipelineError::InvalidInput(_)), "{customer}");
        }
    }

    #[test]
    fn test_missing_telemetry_object() {
        let err = RunRequest::from_json(&json!({"voice_text": "hi"})).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidTelemetry(_)));
    }

    #[test]
    fn test_reading_from_raw() {
        let fallback = GeoPoint::new(12.9716, 77.5946);
        let reading = reading_from_raw(&as_map(telemetry()), fallback).unwrap();
        assert_eq!(reading.oil_pressure_psi, 28.0);
        assert_eq!(reading.odometer_km, 120_000.0);
        assert_eq!(reading.error_codes, vec!["P0520", "P0302"]);
        assert_eq!(reading.location, fallback);

        let mut raw = as_map(telemetry());
        raw.insert("location".to_string(), json!([19.0, 72.8]));
        raw.insert("speed_kph".to_string(), json!("33.5"));
        raw.remove("error_codes");
        let reading = reading_from_raw(&raw, fallback).unwrap();
        assert_eq!(reading.location, GeoPoint::new(19.0, 72.8));
        assert_eq!(reading.speed_kph, 33.5);
        assert!(reading.error_codes.is_empty());
    }

    #[test]
    fn test_missing_or_non_finite_sensor_is_invalid_telemetry() {
        let fallback = GeoPoint::new(0.0, 0.0);

        let mut raw = as_map(telemetry());
        raw.remove("battery_voltage");
        let err = reading_from_raw(&raw, fallback).unwrap_err();
        assert_eq!(err, PipelineError::InvalidTelemetry("missing battery_voltage".to_string()));

        for bad in [json!("NaN"), json!("inf"), json!("hot"), json!(true), json!([1])] {
            let mut raw = as_map(telemetry());
            raw.insert("engine_temp_c".to_string(), bad.clone());
            let err = reading_from_raw(&raw, fallback).unwrap_err();
            assert!(matches!(err, PipelineError::InvalidTelemetry(_)), "{bad}");
        }

        let mut raw = as_map(telemetry());
        raw.insert("error_codes".to_string(), json!(["P0301", 3]));
        assert!(reading_from_raw(&raw, fallback).is_err());
    }
}
