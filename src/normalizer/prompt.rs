//! Prompt construction for the generative-AI providers.
//!
//! Pure string templating. User-supplied text is embedded verbatim: the
//! provider boundary is untrusted-text-in, untrusted-text-out, and the
//! parser's fallback is the defense against whatever comes back.

/// System message sent on every OpenAI chat call.
pub const SYSTEM_PROMPT: &str = "You are a medical AI assistant. Provide helpful, accurate \
     medical information while emphasizing the importance of consulting healthcare professionals.";

/// Prompt for a symptom-based diagnosis, with a strict JSON output schema.
pub fn build_symptom_prompt(
    symptoms: &str,
    body_parts: &[String],
    severity: &str,
    duration: &str,
) -> String {
    format!(
        r#"
As a medical AI assistant, analyze the following symptoms and provide a comprehensive diagnosis and treatment plan:

Symptoms: {symptoms}
Affected body parts: {body_parts}
Severity: {severity}
Duration: {duration}

Please provide a structured response with:
1. Most likely condition name
2. Confidence percentage (0-100)
3. Brief description of the condition
4. 5 natural remedies with specific instructions
5. 5 healing foods and dietary recommendations
6. 3 recommended medications (over-the-counter)
7. 4 administration instructions
8. Important warning signs to watch for

Format the response as a JSON object with the following structure:
{{
  "condition": "condition name",
  "confidence": number,
  "description": "description",
  "naturalRemedies": ["remedy1", "remedy2", ...],
  "foods": ["food1", "food2", ...],
  "medications": ["med1", "med2", ...],
  "administration": ["instruction1", "instruction2", ...],
  "warning": "warning text"
}}
"#,
        body_parts = body_parts.join(", "),
    )
}

/// Prompt for a phased treatment plan.
pub fn build_treatment_prompt(condition: &str, severity: &str) -> String {
    format!(
        r#"
Create a comprehensive treatment plan for: {condition} ({severity} severity)

Provide a detailed treatment plan with:
1. Lifecycle phases (3 phases with descriptions)
2. 6 natural remedies with specific instructions
3. 6 healing foods and dietary recommendations
4. 4 recommended medications
5. 5 recommended exercises
6. Daily schedule with 4 time-based activities
7. 4 prevention tips for future occurrences
8. Possible causes (3-4 causes)

Format as JSON:
{{
  "lifecyclePhases": {{
    "phase1": "description",
    "phase2": "description",
    "phase3": "description"
  }},
  "naturalRemedies": ["remedy1", ...],
  "foods": ["food1", ...],
  "medications": ["med1", ...],
  "exercises": ["exercise1", ...],
  "dailySchedule": [
    {{"time": "08:00", "activity": "activity", "type": "medication"}},
    ...
  ],
  "preventionTips": ["tip1", ...],
  "possibleCauses": ["cause1", ...]
}}
"#
    )
}

/// Prompt for a photo-based diagnosis.
///
/// The provider contract is text-only, so only the image's declared type
/// and body part are embedded — the pixel payload never leaves the caller.
pub fn build_photo_prompt(image_type: &str, body_part: &str) -> String {
    format!(
        r#"
As a medical AI assistant, analyze this medical image and provide a comprehensive diagnosis:

Image Type: {image_type}
Body Part: {body_part}

Please provide a structured response with:
1. Condition name and confidence percentage (0-100)
2. Brief description of findings
3. Severity level (mild, moderate, severe)
4. Whether anomaly is detected (true/false)
5. 5 natural remedies with specific instructions
6. 5 healing foods and dietary recommendations
7. 3 recommended medications with dosages
8. 4 exercises suitable for this condition
9. 4 administration instructions
10. Prevention strategies
11. Warning signs to watch for
12. Treatment plan phases

Format the response as a JSON object with the following structure:
{{
  "condition": "condition name",
  "confidence": number,
  "description": "description",
  "severity": "mild|moderate|severe",
  "anomalyDetected": boolean,
  "naturalRemedies": ["remedy1", "remedy2", ...],
  "foods": ["food1", "food2", ...],
  "medications": ["med1", "med2", ...],
  "exercises": ["exercise1", "exercise2", ...],
  "administration": ["instruction1", "instruction2", ...],
  "prevention": ["strategy1", "strategy2", ...],
  "warning": "warning text",
  "treatmentPlan": {{
    "phase1": "description",
    "phase2": "description",
    "phase3": "description"
  }}
}}
"#
    )
}

/// Prompt for a health-education article.
pub fn build_article_prompt(topic: &str) -> String {
    format!(
        r#"
Write a comprehensive health education article about: {topic}

Include:
1. Detailed overview (2-3 paragraphs)
2. 6 key points with actionable advice
3. 5 natural treatments with specific instructions
4. Scientific evidence and recent research
5. Prevention strategies
6. When to seek medical attention

Format as JSON:
{{
  "title": "article title",
  "overview": "detailed overview text",
  "keyPoints": ["point1", "point2", ...],
  "naturalTreatments": ["treatment1", ...],
  "evidence": "scientific evidence text",
  "prevention": ["strategy1", ...],
  "seekHelp": "when to seek medical attention"
}}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symptom_prompt_embeds_all_inputs() {
        let prompt = build_symptom_prompt(
            "persistent cough",
            &["chest".to_string(), "throat".to_string()],
            "moderate",
            "5 days",
        );
        assert!(prompt.contains("Symptoms: persistent cough"));
        assert!(prompt.contains("Affected body parts: chest, throat"));
        assert!(prompt.contains("Severity: moderate"));
        assert!(prompt.contains("Duration: 5 days"));
        assert!(prompt.contains("\"naturalRemedies\""));
    }

    #[test]
    fn treatment_prompt_names_condition_and_severity() {
        let prompt = build_treatment_prompt("Migraine", "severe");
        assert!(prompt.contains("treatment plan for: Migraine (severe severity)"));
        assert!(prompt.contains("\"lifecyclePhases\""));
        assert!(prompt.contains("\"dailySchedule\""));
    }

    #[test]
    fn photo_prompt_carries_only_image_metadata() {
        let prompt = build_photo_prompt("X-Ray", "left wrist");
        assert!(prompt.contains("Image Type: X-Ray"));
        assert!(prompt.contains("Body Part: left wrist"));
        assert!(prompt.contains("\"anomalyDetected\""));
        assert!(prompt.contains("\"treatmentPlan\""));
    }

    #[test]
    fn user_text_is_embedded_verbatim() {
        // No escaping at this layer: the parser absorbs whatever comes back.
        let prompt = build_symptom_prompt("fever \"and\" {chills}", &[], "mild", "1 day");
        assert!(prompt.contains("fever \"and\" {chills}"));
    }
}
