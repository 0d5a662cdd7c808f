//! Lenient decoding of provider replies.
//!
//! The provider boundary is untrusted: replies may be strict JSON, JSON
//! wrapped in markdown fences, JSON with missing or mistyped fields, or
//! arbitrary prose. This layer converges all of them into the strict record
//! types and **never errors** — an unreadable reply becomes the `RawText`
//! arm, which the service turns into deterministic fallback content.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::fallback::{DEFAULT_CONFIDENCE, GENERIC_CONDITION, GENERIC_WARNING};
use super::types::{
    Diagnosis, HealthArticle, ScheduleEntry, Severity, TreatmentPhases, TreatmentPlan,
};

/// Outcome of decoding one provider reply.
pub enum ParsedPayload<T> {
    /// The reply carried a JSON document matching the target schema.
    Structured(T),
    /// The reply was prose (or unusable JSON); the raw text is kept for
    /// the fallback path.
    RawText(String),
}

/// Decode a reply: strict parse over the whole text first, then a
/// ```json fenced block, then give up and keep the raw text.
pub fn parse_payload<T: DeserializeOwned>(response: &str) -> ParsedPayload<T> {
    if let Ok(value) = serde_json::from_str::<T>(response.trim()) {
        return ParsedPayload::Structured(value);
    }
    if let Some(block) = extract_fenced_json(response) {
        if let Ok(value) = serde_json::from_str::<T>(&block) {
            return ParsedPayload::Structured(value);
        }
    }
    ParsedPayload::RawText(response.to_string())
}

/// Extract the contents of the first ```json fence, if any.
fn extract_fenced_json(response: &str) -> Option<String> {
    let start = response.find("```json")?;
    let content_start = start + 7;
    let end = response[content_start..].find("```")?;
    Some(response[content_start..content_start + end].trim().to_string())
}

/// Parse an array leniently — items that fail to deserialize are skipped.
fn parse_array_lenient<T: DeserializeOwned>(items: Option<Vec<Value>>) -> Vec<T> {
    items
        .unwrap_or_default()
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect()
}

fn clamp_confidence(value: Option<f64>, default: u8) -> u8 {
    match value {
        Some(v) if v.is_finite() => v.round().clamp(0.0, 100.0) as u8,
        _ => default,
    }
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

// ═══════════════════════════════════════════════════════════
// Raw mirrors — everything optional, list items type-checked one by one
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawDiagnosis {
    condition: Option<String>,
    confidence: Option<f64>,
    description: Option<String>,
    severity: Option<String>,
    anomaly_detected: Option<bool>,
    natural_remedies: Option<Vec<Value>>,
    foods: Option<Vec<Value>>,
    medications: Option<Vec<Value>>,
    exercises: Option<Vec<Value>>,
    administration: Option<Vec<Value>>,
    prevention: Option<Vec<Value>>,
    warning: Option<String>,
    treatment_plan: Option<RawPhases>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawPhases {
    phase1: Option<String>,
    phase2: Option<String>,
    phase3: Option<String>,
}

impl RawPhases {
    fn into_phases(self) -> TreatmentPhases {
        TreatmentPhases {
            phase1: self.phase1.unwrap_or_default(),
            phase2: self.phase2.unwrap_or_default(),
            phase3: self.phase3.unwrap_or_default(),
        }
    }
}

impl RawDiagnosis {
    /// Converge into the strict record: every list present, confidence
    /// clamped to 0–100, blank condition replaced by the generic label.
    pub fn into_diagnosis(self) -> Diagnosis {
        Diagnosis {
            condition: non_empty_or(self.condition, GENERIC_CONDITION),
            confidence: clamp_confidence(self.confidence, DEFAULT_CONFIDENCE),
            description: self.description.unwrap_or_default(),
            severity: self.severity.as_deref().and_then(Severity::parse),
            anomaly_detected: self.anomaly_detected,
            natural_remedies: parse_array_lenient(self.natural_remedies),
            foods: parse_array_lenient(self.foods),
            medications: parse_array_lenient(self.medications),
            exercises: parse_array_lenient(self.exercises),
            administration: parse_array_lenient(self.administration),
            prevention: parse_array_lenient(self.prevention),
            warning: non_empty_or(self.warning, GENERIC_WARNING),
            treatment_plan: self.treatment_plan.map(RawPhases::into_phases),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTreatmentPlan {
    lifecycle_phases: Option<RawPhases>,
    natural_remedies: Option<Vec<Value>>,
    foods: Option<Vec<Value>>,
    medications: Option<Vec<Value>>,
    exercises: Option<Vec<Value>>,
    daily_schedule: Option<Vec<Value>>,
    prevention_tips: Option<Vec<Value>>,
    possible_causes: Option<Vec<Value>>,
}

impl RawTreatmentPlan {
    pub fn into_plan(self) -> TreatmentPlan {
        TreatmentPlan {
            lifecycle_phases: self
                .lifecycle_phases
                .map(RawPhases::into_phases)
                .unwrap_or_default(),
            natural_remedies: parse_array_lenient(self.natural_remedies),
            foods: parse_array_lenient(self.foods),
            medications: parse_array_lenient(self.medications),
            exercises: parse_array_lenient(self.exercises),
            daily_schedule: parse_array_lenient::<ScheduleEntry>(self.daily_schedule),
            prevention_tips: parse_array_lenient(self.prevention_tips),
            possible_causes: parse_array_lenient(self.possible_causes),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawHealthArticle {
    title: Option<String>,
    overview: Option<String>,
    key_points: Option<Vec<Value>>,
    natural_treatments: Option<Vec<Value>>,
    evidence: Option<String>,
    prevention: Option<Vec<Value>>,
    seek_help: Option<String>,
}

impl RawHealthArticle {
    pub fn into_article(self, topic: &str) -> HealthArticle {
        HealthArticle {
            title: non_empty_or(self.title, &format!("Understanding {topic}")),
            overview: self.overview.unwrap_or_default(),
            key_points: parse_array_lenient(self.key_points),
            natural_treatments: parse_array_lenient(self.natural_treatments),
            evidence: self.evidence.unwrap_or_default(),
            prevention: parse_array_lenient(self.prevention),
            seek_help: self.seek_help.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_json_parses_directly() {
        let reply = r#"{"condition": "Tension headache", "confidence": 85,
            "description": "Muscle tension", "naturalRemedies": ["Rest"],
            "foods": [], "medications": ["Paracetamol"],
            "administration": ["With food"], "warning": "See a doctor"}"#;
        match parse_payload::<RawDiagnosis>(reply) {
            ParsedPayload::Structured(raw) => {
                let diagnosis = raw.into_diagnosis();
                assert_eq!(diagnosis.condition, "Tension headache");
                assert_eq!(diagnosis.confidence, 85);
                assert_eq!(diagnosis.natural_remedies, vec!["Rest"]);
                assert_eq!(diagnosis.medications, vec!["Paracetamol"]);
            }
            ParsedPayload::RawText(_) => panic!("expected structured payload"),
        }
    }

    #[test]
    fn fenced_json_is_extracted() {
        let reply = "Here is the analysis:\n```json\n{\"condition\": \"Eczema\", \
            \"confidence\": 70}\n```\nTake care.";
        match parse_payload::<RawDiagnosis>(reply) {
            ParsedPayload::Structured(raw) => {
                assert_eq!(raw.into_diagnosis().condition, "Eczema");
            }
            ParsedPayload::RawText(_) => panic!("expected structured payload"),
        }
    }

    #[test]
    fn prose_becomes_raw_text() {
        let reply = "Take rest and drink water";
        match parse_payload::<RawDiagnosis>(reply) {
            ParsedPayload::RawText(text) => assert_eq!(text, reply),
            ParsedPayload::Structured(_) => panic!("expected raw text"),
        }
    }

    #[test]
    fn unclosed_fence_becomes_raw_text() {
        let reply = "```json\n{\"condition\": \"Eczema\"";
        assert!(matches!(
            parse_payload::<RawDiagnosis>(reply),
            ParsedPayload::RawText(_)
        ));
    }

    #[test]
    fn missing_fields_are_defaulted() {
        let raw: RawDiagnosis = serde_json::from_str("{}").unwrap();
        let diagnosis = raw.into_diagnosis();
        assert_eq!(diagnosis.condition, GENERIC_CONDITION);
        assert_eq!(diagnosis.confidence, DEFAULT_CONFIDENCE);
        assert_eq!(diagnosis.warning, GENERIC_WARNING);
        assert!(diagnosis.natural_remedies.is_empty());
        assert!(diagnosis.foods.is_empty());
        assert!(diagnosis.medications.is_empty());
        assert!(diagnosis.exercises.is_empty());
        assert!(diagnosis.administration.is_empty());
        assert!(diagnosis.prevention.is_empty());
        assert!(diagnosis.severity.is_none());
        assert!(diagnosis.treatment_plan.is_none());
    }

    #[test]
    fn confidence_is_rounded_and_clamped() {
        assert_eq!(clamp_confidence(Some(82.6), 75), 83);
        assert_eq!(clamp_confidence(Some(250.0), 75), 100);
        assert_eq!(clamp_confidence(Some(-4.0), 75), 0);
        assert_eq!(clamp_confidence(Some(f64::NAN), 75), 75);
        assert_eq!(clamp_confidence(None, 75), 75);
    }

    #[test]
    fn lenient_lists_skip_non_string_items() {
        let reply = r#"{"medications": ["Ibuprofen", 42, {"name": "bad"}, "Paracetamol"]}"#;
        let raw: RawDiagnosis = serde_json::from_str(reply).unwrap();
        let diagnosis = raw.into_diagnosis();
        assert_eq!(diagnosis.medications, vec!["Ibuprofen", "Paracetamol"]);
    }

    #[test]
    fn severity_string_maps_into_enum() {
        let reply = r#"{"severity": "Severe", "anomalyDetected": true}"#;
        let raw: RawDiagnosis = serde_json::from_str(reply).unwrap();
        let diagnosis = raw.into_diagnosis();
        assert_eq!(diagnosis.severity, Some(Severity::Severe));
        assert_eq!(diagnosis.anomaly_detected, Some(true));
    }

    #[test]
    fn unknown_severity_is_dropped_not_fatal() {
        let reply = r#"{"severity": "catastrophic"}"#;
        let raw: RawDiagnosis = serde_json::from_str(reply).unwrap();
        assert!(raw.into_diagnosis().severity.is_none());
    }

    #[test]
    fn treatment_plan_schedule_parses_leniently() {
        let reply = r#"{
            "lifecyclePhases": {"phase1": "Relief", "phase2": "Healing", "phase3": "Recovery"},
            "dailySchedule": [
                {"time": "08:00", "activity": "Medication", "type": "medication"},
                {"time": "12:00"},
                "not an entry"
            ],
            "preventionTips": ["Sleep well"]
        }"#;
        let raw: RawTreatmentPlan = serde_json::from_str(reply).unwrap();
        let plan = raw.into_plan();
        assert_eq!(plan.lifecycle_phases.phase1, "Relief");
        assert_eq!(plan.daily_schedule.len(), 1);
        assert_eq!(plan.daily_schedule[0].kind, "medication");
        assert_eq!(plan.prevention_tips, vec!["Sleep well"]);
        assert!(plan.possible_causes.is_empty());
    }

    #[test]
    fn article_title_falls_back_to_topic() {
        let raw: RawHealthArticle = serde_json::from_str("{}").unwrap();
        let article = raw.into_article("hypertension");
        assert_eq!(article.title, "Understanding hypertension");
        assert!(article.key_points.is_empty());
    }
}
