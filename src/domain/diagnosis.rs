// Diagnosis domain models
use serde::Serialize;
use std::collections::BTreeMap;

/// Coarse fault subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IssueCategory {
    #[serde(rename = "Electrical/Battery")]
    ElectricalBattery,
    #[serde(rename = "Cooling/Overheat")]
    CoolingOverheat,
    #[serde(rename = "Lubrication/Oil Pressure")]
    LubricationOilPressure,
    #[serde(rename = "Drivetrain/Mechanical Vibration")]
    DrivetrainVibration,
    #[serde(rename = "General Inspection")]
    GeneralInspection,
}

impl IssueCategory {
    pub fn label(self) -> &'static str {
        match self {
            IssueCategory::ElectricalBattery => "Electrical/Battery",
            IssueCategory::CoolingOverheat => "Cooling/Overheat",
            IssueCategory::LubricationOilPressure => "Lubrication/Oil Pressure",
            IssueCategory::DrivetrainVibration => "Drivetrain/Mechanical Vibration",
            IssueCategory::GeneralInspection => "General Inspection",
        }
    }
}

impl std::fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub risk_score: f64,
    pub issue_category: IssueCategory,
    /// Every input that fed the score, keyed by signal name
    pub signals: BTreeMap<String, f64>,
}

/// Round to `digits` decimals, deciding from the exact binary value.
/// `0.1235` is stored just below the tie, so it rounds down.
pub fn round_to(value: f64, digits: usize) -> f64 {
    format!("{value:.digits$}").parse().unwrap_or(value)
}
