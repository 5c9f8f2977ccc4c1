// Service center reference data and appointment models
use super::telemetry::GeoPoint;
use serde::Serialize;

/// Kilometres per degree in the planar approximation
pub const KM_PER_DEGREE: f64 = 111.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ServiceCenter {
    pub id: &'static str,
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

impl ServiceCenter {
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}

pub const SERVICE_CENTERS: [ServiceCenter; 4] = [
    ServiceCenter { id: "BLR-01", name: "Bengaluru Central", lat: 12.9716, lon: 77.5946 },
    ServiceCenter { id: "DEL-02", name: "Delhi West", lat: 28.7041, lon: 77.1025 },
    ServiceCenter { id: "MUM-03", name: "Mumbai Andheri", lat: 19.0760, lon: 72.8777 },
    ServiceCenter { id: "CHE-04", name: "Chennai North", lat: 13.0827, lon: 80.2707 },
];

/// Planar Euclidean distance scaled by 111 km/degree.
/// Only meaningful over short distances; ETAs depend on this exact formula.
pub fn planar_distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    ((a.lat - b.lat).powi(2) + (a.lon - b.lon).powi(2)).sqrt() * KM_PER_DEGREE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Normal,
    Urgent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appointment {
    pub center_id: String,
    pub center_name: String,
    /// UTC, `%Y-%m-%dT%H:%M:%SZ`
    pub slot: String,
    pub eta_minutes: u32,
    pub priority: Priority,
}
