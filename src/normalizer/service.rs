//! The normalizer service: provider selection, one-shot call, convergence.
//!
//! Call shape per operation: resolve provider → one blocking request →
//! parse → converge. Provider-layer failures (no key, network, HTTP)
//! propagate to the caller; parse-layer failures are absorbed by the
//! deterministic text fallback and always produce a usable record.

use crate::config::{AiConfig, AiProvider};

use super::fallback;
use super::parser::{
    parse_payload, ParsedPayload, RawDiagnosis, RawHealthArticle, RawTreatmentPlan,
};
use super::prompt;
use super::provider::{ChatProvider, GeminiClient, OpenAiClient};
use super::types::{Diagnosis, HealthArticle, TreatmentPlan};
use super::NormalizerError;

/// Converts upstream AI replies (or their absence) into strict records.
///
/// Construct with [`Normalizer::new`] for live provider calls, or with
/// [`Normalizer::with_client`] to inject a [`ChatProvider`] (tests, or a
/// host that manages its own transport).
pub struct Normalizer {
    config: AiConfig,
    client: Option<Box<dyn ChatProvider + Send + Sync>>,
}

impl Normalizer {
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            client: None,
        }
    }

    /// Use `client` for every call instead of building one from the config.
    pub fn with_client(config: AiConfig, client: Box<dyn ChatProvider + Send + Sync>) -> Self {
        Self {
            config,
            client: Some(client),
        }
    }

    /// True iff at least one provider has a resolvable key (or a client
    /// was injected). Callers use this to choose live vs. demo mode.
    pub fn is_configured(&self) -> bool {
        self.client.is_some() || self.config.is_configured()
    }

    /// One round-trip to the selected provider.
    fn complete(&self, prompt: &str) -> Result<String, NormalizerError> {
        if let Some(client) = &self.client {
            return client.complete(prompt);
        }
        let provider = self.config.provider();
        let key = self
            .config
            .resolve_key(provider)
            .ok_or(NormalizerError::ProviderNotConfigured(provider))?;
        tracing::debug!(provider = %provider, "dispatching provider call");
        match provider {
            AiProvider::Gemini => GeminiClient::new(&key).complete(prompt),
            AiProvider::OpenAi => OpenAiClient::new(&key).complete(prompt),
        }
    }

    /// Diagnosis from free-text symptoms.
    ///
    /// `symptoms` is expected non-empty after trimming; that check belongs
    /// to the caller, which should not invoke this with nothing to analyze.
    pub fn generate_symptom_diagnosis(
        &self,
        symptoms: &str,
        body_parts: &[String],
        severity: &str,
        duration: &str,
    ) -> Result<Diagnosis, NormalizerError> {
        let prompt = prompt::build_symptom_prompt(symptoms, body_parts, severity, duration);
        let reply = self.complete(&prompt)?;
        Ok(match parse_payload::<RawDiagnosis>(&reply) {
            ParsedPayload::Structured(raw) => raw.into_diagnosis(),
            ParsedPayload::RawText(text) => {
                tracing::warn!("symptom reply was not JSON, using text fallback");
                fallback::diagnosis_from_text(&text)
            }
        })
    }

    /// Phased treatment plan for a known condition.
    pub fn generate_treatment_plan(
        &self,
        condition: &str,
        severity: &str,
    ) -> Result<TreatmentPlan, NormalizerError> {
        let prompt = prompt::build_treatment_prompt(condition, severity);
        let reply = self.complete(&prompt)?;
        Ok(match parse_payload::<RawTreatmentPlan>(&reply) {
            ParsedPayload::Structured(raw) => raw.into_plan(),
            ParsedPayload::RawText(_) => {
                tracing::warn!(condition, "treatment reply was not JSON, using canned plan");
                fallback::treatment_plan_from_text()
            }
        })
    }

    /// Diagnosis from a medical photo. The provider contract is text-only,
    /// so only the declared image type and body part reach the provider.
    pub fn analyze_photo(
        &self,
        image_data: &[u8],
        image_type: &str,
        body_part: &str,
    ) -> Result<Diagnosis, NormalizerError> {
        tracing::debug!(bytes = image_data.len(), image_type, "photo analysis requested");
        let prompt = prompt::build_photo_prompt(image_type, body_part);
        let reply = self.complete(&prompt)?;
        Ok(match parse_payload::<RawDiagnosis>(&reply) {
            ParsedPayload::Structured(raw) => raw.into_diagnosis(),
            ParsedPayload::RawText(text) => {
                tracing::warn!("photo reply was not JSON, using text fallback");
                fallback::photo_diagnosis_from_text(&text)
            }
        })
    }

    /// Health-education article on a topic.
    pub fn generate_health_article(&self, topic: &str) -> Result<HealthArticle, NormalizerError> {
        let prompt = prompt::build_article_prompt(topic);
        let reply = self.complete(&prompt)?;
        Ok(match parse_payload::<RawHealthArticle>(&reply) {
            ParsedPayload::Structured(raw) => raw.into_article(topic),
            ParsedPayload::RawText(text) => {
                tracing::warn!(topic, "article reply was not JSON, using text fallback");
                fallback::article_from_text(&text, topic)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::provider::MockChatProvider;
    use crate::normalizer::types::Severity;

    fn normalizer_with_reply(reply: &str) -> Normalizer {
        Normalizer::with_client(AiConfig::default(), Box::new(MockChatProvider::new(reply)))
    }

    #[test]
    fn structured_reply_becomes_strict_diagnosis() {
        let normalizer = normalizer_with_reply(
            r#"{"condition": "Common cold", "confidence": 88,
                "description": "Viral infection",
                "naturalRemedies": ["Rest", "Fluids"],
                "foods": ["Citrus"], "medications": ["Paracetamol"],
                "administration": ["With food"], "warning": "See a doctor if fever"}"#,
        );
        let diagnosis = normalizer
            .generate_symptom_diagnosis("runny nose", &["head".into()], "mild", "2 days")
            .unwrap();
        assert_eq!(diagnosis.condition, "Common cold");
        assert_eq!(diagnosis.confidence, 88);
        assert_eq!(diagnosis.natural_remedies, vec!["Rest", "Fluids"]);
    }

    #[test]
    fn prose_reply_falls_back_without_error() {
        let normalizer = normalizer_with_reply("Take rest and drink water");
        let diagnosis = normalizer
            .generate_symptom_diagnosis("fatigue", &[], "mild", "1 day")
            .unwrap();
        assert_eq!(diagnosis.condition, fallback::GENERIC_CONDITION);
        assert!(!diagnosis.natural_remedies.is_empty());
        assert!(diagnosis.description.starts_with("Take rest"));
    }

    #[test]
    fn every_list_is_present_on_every_path() {
        let cases = [
            r#"{"condition": "X"}"#,      // structured, lists missing
            "free text, nothing usable", // fallback
        ];
        for reply in cases {
            let normalizer = normalizer_with_reply(reply);
            let d = normalizer
                .generate_symptom_diagnosis("s", &[], "mild", "1 day")
                .unwrap();
            // Vec fields exist on both paths; fallback also fills content.
            let _ = (
                d.natural_remedies.len(),
                d.foods.len(),
                d.medications.len(),
                d.exercises.len(),
                d.administration.len(),
                d.prevention.len(),
            );
        }
    }

    #[test]
    fn photo_fallback_carries_photo_fields() {
        let normalizer = normalizer_with_reply("inflamed area visible");
        let diagnosis = normalizer
            .analyze_photo(&[0u8; 16], "photo", "left arm")
            .unwrap();
        assert_eq!(diagnosis.condition, fallback::PHOTO_CONDITION);
        assert_eq!(diagnosis.severity, Some(Severity::Moderate));
        assert_eq!(diagnosis.anomaly_detected, Some(true));
        assert!(diagnosis.treatment_plan.is_some());
    }

    #[test]
    fn provider_call_failure_propagates() {
        let normalizer = Normalizer::with_client(
            AiConfig::default(),
            Box::new(MockChatProvider::failing("connection reset")),
        );
        let err = normalizer
            .generate_symptom_diagnosis("s", &[], "mild", "1 day")
            .unwrap_err();
        assert!(err.is_call_failure());
    }

    #[test]
    fn treatment_plan_prose_falls_back_to_canned_plan() {
        let normalizer = normalizer_with_reply("just do the usual things");
        let plan = normalizer
            .generate_treatment_plan("Migraine", "moderate")
            .unwrap();
        assert_eq!(plan.natural_remedies.len(), 6);
        assert_eq!(plan.daily_schedule.len(), 4);
    }

    #[test]
    fn article_structured_reply_keeps_title() {
        let normalizer = normalizer_with_reply(
            r#"{"title": "Managing Hypertension", "overview": "o",
                "keyPoints": ["p1"], "naturalTreatments": ["t1"],
                "evidence": "e", "prevention": ["s1"], "seekHelp": "now"}"#,
        );
        let article = normalizer.generate_health_article("hypertension").unwrap();
        assert_eq!(article.title, "Managing Hypertension");
        assert_eq!(article.key_points, vec!["p1"]);
    }

    #[test]
    fn injected_client_counts_as_configured() {
        let normalizer = normalizer_with_reply("{}");
        assert!(normalizer.is_configured());
    }
}
