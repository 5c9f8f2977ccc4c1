// Scheduler - Nearest service center and appointment slot
use crate::domain::diagnosis::{IssueCategory, RiskAssessment};
use crate::domain::schedule::{Appointment, Priority, SERVICE_CENTERS, ServiceCenter, planar_distance_km};
use crate::domain::telemetry::GeoPoint;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

const URGENT_RISK_THRESHOLD: f64 = 0.7;
const URGENT_OFFSET_MINUTES: i64 = 60;
const NORMAL_OFFSET_MINUTES: i64 = 3 * 24 * 60;
const TRAVEL_SPEED_KPH: f64 = 40.0;
const SLOT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

type CenterTable = [ServiceCenter; SERVICE_CENTERS.len()];

#[derive(Clone)]
pub struct Scheduler {
    centers: &'static CenterTable,
    clock: Arc<dyn Clock>,
}

impl Scheduler {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            centers: &SERVICE_CENTERS,
            clock,
        }
    }

    /// Earliest center wins on equal distance
    pub fn nearest_center(&self, location: GeoPoint) -> (&'static ServiceCenter, f64) {
        let first = &self.centers[0];
        let seed = (first, planar_distance_km(location, first.location()));
        self.centers[1..].iter().fold(seed, |best, center| {
            let distance = planar_distance_km(location, center.location());
            if distance < best.1 { (center, distance) } else { best }
        })
    }

    pub fn schedule(&self, location: GeoPoint, risk: &RiskAssessment) -> Appointment {
        let urgent = risk.risk_score >= URGENT_RISK_THRESHOLD
            || risk.issue_category != IssueCategory::GeneralInspection;
        let (priority, offset) = if urgent {
            (Priority::Urgent, URGENT_OFFSET_MINUTES)
        } else {
            (Priority::Normal, NORMAL_OFFSET_MINUTES)
        };

        let slot = (self.clock.now() + Duration::minutes(offset))
            .format(SLOT_FORMAT)
            .to_string();

        let (center, distance_km) = self.nearest_center(location);
        Appointment {
            center_id: center.id.to_string(),
            center_name: center.name.to_string(),
            slot,
            eta_minutes: (distance_km / TRAVEL_SPEED_KPH * 60.0) as u32,
            priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::BTreeMap;

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()))
    }

    fn risk(score: f64, category: IssueCategory) -> RiskAssessment {
        RiskAssessment {
            risk_score: score,
            issue_category: category,
            signals: BTreeMap::new(),
        }
    }

    #[test]
    fn test_urgent_by_category() {
        let scheduler = Scheduler::new(clock());
        let appt = scheduler.schedule(
            GeoPoint::new(12.9716, 77.5946),
            &risk(0.2, IssueCategory::CoolingOverheat),
        );
        assert_eq!(appt.center_id, "BLR-01");
        assert_eq!(appt.center_name, "Bengaluru Central");
        assert_eq!(appt.eta_minutes, 0);
        assert_eq!(appt.priority, Priority::Urgent);
        assert_eq!(appt.slot, "2025-03-14T10:26:53Z");
    }

    #[test]
    fn test_urgent_by_score_threshold() {
        let scheduler = Scheduler::new(clock());
        let loc = GeoPoint::new(28.6, 77.2);
        assert_eq!(
            scheduler.schedule(loc, &risk(0.7, IssueCategory::GeneralInspection)).priority,
            Priority::Urgent
        );
        let normal = scheduler.schedule(loc, &risk(0.699, IssueCategory::GeneralInspection));
        assert_eq!(normal.priority, Priority::Normal);
        assert_eq!(normal.slot, "2025-03-17T09:26:53Z");
        assert_eq!(normal.center_id, "DEL-02");
    }

    #[test]
    fn test_eta_is_truncated_minutes() {
        // 0.1 degree of latitude south of Chennai North: 11.1 km at 40 km/h = 16.65 min
        let scheduler = Scheduler::new(clock());
        let appt = scheduler.schedule(
            GeoPoint::new(12.9827, 80.2707),
            &risk(0.1, IssueCategory::GeneralInspection),
        );
        assert_eq!(appt.center_id, "CHE-04");
        assert_eq!(appt.eta_minutes, 16);
    }

    #[test]
    fn test_deterministic_under_fixed_clock() {
        let scheduler = Scheduler::new(clock());
        let loc = GeoPoint::new(19.1, 72.9);
        let r = risk(0.55, IssueCategory::DrivetrainVibration);
        assert_eq!(scheduler.schedule(loc, &r), scheduler.schedule(loc, &r));
    }

    static TIED: CenterTable = [
        ServiceCenter { id: "FAR-01", name: "Far", lat: 50.0, lon: 50.0 },
        ServiceCenter { id: "TIE-A", name: "Tie A", lat: 10.0, lon: 10.0 },
        ServiceCenter { id: "TIE-B", name: "Tie B", lat: 10.0, lon: 10.0 },
        ServiceCenter { id: "FAR-02", name: "Far", lat: -50.0, lon: -50.0 },
    ];

    #[test]
    fn test_ties_go_to_first_listed_center() {
        let scheduler = Scheduler { centers: &TIED, clock: clock() };
        let (center, d) = scheduler.nearest_center(GeoPoint::new(10.0, 11.0));
        assert_eq!(center.id, "TIE-A");
        assert!((d - 111.0).abs() < 1e-9);
    }
}
