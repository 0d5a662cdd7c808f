//! AI provider selection and API-key resolution.
//!
//! Configuration is an explicit object handed to the normalizer at
//! construction time. Key lookup is two-tier: a session-level override
//! set on the config wins over the process environment.

use std::fmt;
use std::str::FromStr;

/// Environment variable holding the default Gemini key.
pub const GEMINI_KEY_ENV: &str = "GEMINI_API_KEY";
/// Environment variable holding the default OpenAI key.
pub const OPENAI_KEY_ENV: &str = "OPENAI_API_KEY";

/// Which upstream generative-AI service to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    Gemini,
    OpenAi,
}

impl AiProvider {
    /// Environment variable consulted when no session override is set.
    pub fn key_env(&self) -> &'static str {
        match self {
            Self::Gemini => GEMINI_KEY_ENV,
            Self::OpenAi => OPENAI_KEY_ENV,
        }
    }
}

impl fmt::Display for AiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gemini => write!(f, "gemini"),
            Self::OpenAi => write!(f, "openai"),
        }
    }
}

impl FromStr for AiProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "openai" => Ok(Self::OpenAi),
            other => Err(format!("unknown AI provider: {other}")),
        }
    }
}

/// Normalizer configuration: selected provider plus optional per-provider
/// key overrides for the current session.
#[derive(Debug, Clone, Default)]
pub struct AiConfig {
    provider: Option<AiProvider>,
    gemini_key: Option<String>,
    openai_key: Option<String>,
}

impl AiConfig {
    pub fn new(provider: AiProvider) -> Self {
        Self {
            provider: Some(provider),
            ..Self::default()
        }
    }

    /// The selected provider. Falls back to OpenAI when none was chosen.
    pub fn provider(&self) -> AiProvider {
        self.provider.unwrap_or(AiProvider::OpenAi)
    }

    /// Set a session-level Gemini key, overriding the environment.
    pub fn with_gemini_key(mut self, key: impl Into<String>) -> Self {
        self.gemini_key = Some(key.into());
        self
    }

    /// Set a session-level OpenAI key, overriding the environment.
    pub fn with_openai_key(mut self, key: impl Into<String>) -> Self {
        self.openai_key = Some(key.into());
        self
    }

    /// Resolve the API key for `provider`.
    ///
    /// Session override first, then the process environment. Empty and
    /// whitespace-only values count as absent at both tiers.
    pub fn resolve_key(&self, provider: AiProvider) -> Option<String> {
        let override_key = match provider {
            AiProvider::Gemini => self.gemini_key.as_deref(),
            AiProvider::OpenAi => self.openai_key.as_deref(),
        };
        if let Some(key) = override_key.map(str::trim).filter(|k| !k.is_empty()) {
            return Some(key.to_string());
        }
        std::env::var(provider.key_env())
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }

    /// True iff at least one provider has a resolvable key.
    pub fn is_configured(&self) -> bool {
        self.resolve_key(AiProvider::Gemini).is_some()
            || self.resolve_key(AiProvider::OpenAi).is_some()
    }
}
