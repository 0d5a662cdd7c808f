//! Deterministic fallback content for unparseable provider replies.
//!
//! When a reply is prose instead of JSON, the first ~200 characters become
//! the description and the remedy/food/medication lists come from fixed
//! generic content. This is a policy, not an error: the fallback always
//! succeeds, so prompt-format drift upstream never breaks the caller.

use super::types::{
    Diagnosis, HealthArticle, ScheduleEntry, Severity, TreatmentPhases, TreatmentPlan,
};

pub const GENERIC_CONDITION: &str = "AI-Generated Diagnosis";
pub const PHOTO_CONDITION: &str = "AI-Generated Photo Diagnosis";
pub const GENERIC_WARNING: &str =
    "Consult a healthcare professional if symptoms persist or worsen.";
pub const PHOTO_WARNING: &str =
    "Seek immediate medical attention if symptoms worsen or persist.";

pub const DEFAULT_CONFIDENCE: u8 = 75;
pub const PHOTO_CONFIDENCE: u8 = 78;

/// Characters of raw reply kept as the fallback description.
const DESCRIPTION_EXCERPT_CHARS: usize = 200;

/// First `max_chars` characters of `text`, with a trailing ellipsis.
/// Operates on characters, not bytes, so multi-byte input cannot split.
fn excerpt(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Text-derived diagnosis for the symptom flow.
pub fn diagnosis_from_text(text: &str) -> Diagnosis {
    Diagnosis {
        condition: GENERIC_CONDITION.to_string(),
        confidence: DEFAULT_CONFIDENCE,
        description: excerpt(text, DESCRIPTION_EXCERPT_CHARS),
        severity: None,
        anomaly_detected: None,
        natural_remedies: strings(&[
            "Rest and adequate sleep",
            "Stay hydrated with water",
            "Apply warm or cold compress",
            "Practice stress reduction",
            "Maintain healthy diet",
        ]),
        foods: strings(&[
            "Fresh fruits and vegetables",
            "Lean proteins",
            "Whole grains",
            "Anti-inflammatory foods",
            "Plenty of fluids",
        ]),
        medications: strings(&[
            "Over-the-counter pain relievers as needed",
            "Consult pharmacist for recommendations",
            "Follow package instructions",
        ]),
        exercises: vec![],
        administration: strings(&[
            "Take medications with food",
            "Follow recommended dosages",
            "Monitor symptoms closely",
            "Seek medical attention if worsening",
        ]),
        prevention: vec![],
        warning: GENERIC_WARNING.to_string(),
        treatment_plan: None,
    }
}

/// Text-derived diagnosis for the photo flow — fills the photo-only fields.
pub fn photo_diagnosis_from_text(text: &str) -> Diagnosis {
    Diagnosis {
        condition: PHOTO_CONDITION.to_string(),
        confidence: PHOTO_CONFIDENCE,
        description: excerpt(text, DESCRIPTION_EXCERPT_CHARS),
        severity: Some(Severity::Moderate),
        anomaly_detected: Some(true),
        natural_remedies: strings(&[
            "Apply cool compresses to affected area",
            "Use natural anti-inflammatory remedies",
            "Maintain proper hygiene",
            "Get adequate rest",
            "Stay hydrated",
        ]),
        foods: strings(&[
            "Anti-inflammatory foods",
            "Fresh fruits and vegetables",
            "Lean proteins",
            "Whole grains",
            "Healthy fats",
        ]),
        medications: strings(&[
            "Over-the-counter pain relief",
            "Topical treatments",
            "Anti-inflammatory medications",
        ]),
        exercises: strings(&[
            "Gentle stretching",
            "Light walking",
            "Breathing exercises",
            "Range of motion activities",
        ]),
        administration: strings(&[
            "Take medications with food",
            "Apply treatments as directed",
            "Monitor symptoms closely",
            "Follow up with healthcare provider",
        ]),
        prevention: strings(&[
            "Maintain good hygiene",
            "Avoid known triggers",
            "Regular health checkups",
            "Healthy lifestyle habits",
        ]),
        warning: PHOTO_WARNING.to_string(),
        treatment_plan: Some(TreatmentPhases {
            phase1: "Immediate relief and symptom management (Days 1-3)".into(),
            phase2: "Active treatment and healing phase (Days 4-7)".into(),
            phase3: "Recovery and prevention phase (Week 2+)".into(),
        }),
    }
}

/// Fully canned treatment plan; the raw reply contributes nothing usable.
pub fn treatment_plan_from_text() -> TreatmentPlan {
    TreatmentPlan {
        lifecycle_phases: TreatmentPhases {
            phase1: "Immediate relief and symptom management".into(),
            phase2: "Active treatment and healing".into(),
            phase3: "Recovery and prevention".into(),
        },
        natural_remedies: strings(&[
            "Rest and adequate sleep",
            "Stress reduction techniques",
            "Natural anti-inflammatory foods",
            "Gentle exercise as tolerated",
            "Hydration therapy",
            "Herbal remedies as appropriate",
        ]),
        foods: strings(&[
            "Anti-inflammatory foods",
            "Fresh fruits and vegetables",
            "Lean proteins",
            "Whole grains",
            "Healthy fats",
            "Adequate hydration",
        ]),
        medications: strings(&[
            "Over-the-counter pain relief",
            "Anti-inflammatory medications",
            "Topical treatments",
            "Supplements as recommended",
        ]),
        exercises: strings(&[
            "Gentle stretching",
            "Light walking",
            "Breathing exercises",
            "Range of motion activities",
            "Gradual activity increase",
        ]),
        daily_schedule: vec![
            schedule("08:00", "Morning medication and breakfast", "medication"),
            schedule("12:00", "Healthy lunch and light exercise", "nutrition"),
            schedule("18:00", "Evening medication", "medication"),
            schedule("21:00", "Relaxation and preparation for sleep", "wellness"),
        ],
        prevention_tips: strings(&[
            "Maintain healthy lifestyle",
            "Regular exercise routine",
            "Stress management",
            "Adequate sleep",
        ]),
        possible_causes: strings(&[
            "Lifestyle factors",
            "Environmental triggers",
            "Genetic predisposition",
            "Previous injuries or conditions",
        ]),
    }
}

fn schedule(time: &str, activity: &str, kind: &str) -> ScheduleEntry {
    ScheduleEntry {
        time: time.to_string(),
        activity: activity.to_string(),
        kind: kind.to_string(),
    }
}

/// Text-derived article: the raw reply becomes the overview excerpt.
pub fn article_from_text(text: &str, topic: &str) -> HealthArticle {
    HealthArticle {
        title: format!("Understanding {topic}: A Comprehensive Guide"),
        overview: excerpt(text, 300),
        key_points: strings(&[
            "Understanding the condition",
            "Recognizing symptoms early",
            "Lifestyle modifications",
            "Treatment options",
            "Prevention strategies",
            "Long-term management",
        ]),
        natural_treatments: strings(&[
            "Dietary modifications",
            "Herbal remedies",
            "Physical therapy",
            "Stress management",
            "Sleep optimization",
        ]),
        evidence: "Recent research supports the effectiveness of natural treatments \
                   combined with conventional medicine."
            .into(),
        prevention: strings(&[
            "Regular health screenings",
            "Healthy diet and exercise",
            "Stress management",
            "Adequate sleep",
        ]),
        seek_help: "Seek immediate medical attention if symptoms are severe, persistent, \
                    or worsening."
            .into(),
    }
}
