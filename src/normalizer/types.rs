use serde::{Deserialize, Serialize};

/// Severity grade attached to photo-analysis results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    /// Lenient parse from provider text. Unknown grades map to `None`
    /// rather than failing the whole document.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mild" => Some(Self::Mild),
            "moderate" => Some(Self::Moderate),
            "severe" => Some(Self::Severe),
            _ => None,
        }
    }
}

/// Three-phase care outline shared by diagnoses and treatment plans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentPhases {
    pub phase1: String,
    pub phase2: String,
    pub phase3: String,
}

/// Normalized result of a symptom or photo analysis.
///
/// Invariant: every list field is present (possibly empty) after
/// normalization — downstream extraction and display never null-check.
/// `severity` and `anomaly_detected` are populated by the photo variant
/// only; the symptom variant leaves them `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnosis {
    pub condition: String,
    /// Integer percentage, clamped to 0–100.
    pub confidence: u8,
    pub description: String,
    pub severity: Option<Severity>,
    pub anomaly_detected: Option<bool>,
    pub natural_remedies: Vec<String>,
    pub foods: Vec<String>,
    pub medications: Vec<String>,
    pub exercises: Vec<String>,
    pub administration: Vec<String>,
    pub prevention: Vec<String>,
    pub warning: String,
    pub treatment_plan: Option<TreatmentPhases>,
}

/// One time-based entry of a treatment plan's daily schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub time: String,
    pub activity: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Normalized phased care plan for a condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentPlan {
    pub lifecycle_phases: TreatmentPhases,
    pub natural_remedies: Vec<String>,
    pub foods: Vec<String>,
    pub medications: Vec<String>,
    pub exercises: Vec<String>,
    pub daily_schedule: Vec<ScheduleEntry>,
    pub prevention_tips: Vec<String>,
    pub possible_causes: Vec<String>,
}

/// Normalized health-education article.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthArticle {
    pub title: String,
    pub overview: String,
    pub key_points: Vec<String>,
    pub natural_treatments: Vec<String>,
    pub evidence: String,
    pub prevention: Vec<String>,
    pub seek_help: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_parse_is_case_insensitive() {
        assert_eq!(Severity::parse("Mild"), Some(Severity::Mild));
        assert_eq!(Severity::parse(" MODERATE "), Some(Severity::Moderate));
        assert_eq!(Severity::parse("severe"), Some(Severity::Severe));
        assert_eq!(Severity::parse("critical"), None);
        assert_eq!(Severity::parse(""), None);
    }

    #[test]
    fn diagnosis_serializes_camel_case() {
        let diagnosis = Diagnosis {
            condition: "Tension headache".into(),
            confidence: 82,
            description: "Muscle-tension related head pain".into(),
            severity: Some(Severity::Mild),
            anomaly_detected: Some(false),
            natural_remedies: vec!["Rest".into()],
            foods: vec![],
            medications: vec!["Paracetamol".into()],
            exercises: vec![],
            administration: vec![],
            prevention: vec![],
            warning: "See a doctor if pain persists".into(),
            treatment_plan: None,
        };
        let json = serde_json::to_value(&diagnosis).unwrap();
        assert_eq!(json["naturalRemedies"][0], "Rest");
        assert_eq!(json["anomalyDetected"], false);
        assert_eq!(json["severity"], "mild");
    }

    #[test]
    fn schedule_entry_uses_type_on_the_wire() {
        let entry = ScheduleEntry {
            time: "08:00".into(),
            activity: "Morning medication".into(),
            kind: "medication".into(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "medication");
    }
}
