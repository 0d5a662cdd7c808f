pub mod types;
pub mod prompt;
pub mod provider;
pub mod parser;
pub mod fallback;
pub mod service;
pub mod extract;

pub use types::*;
pub use prompt::*;
pub use provider::*;
pub use parser::*;
pub use service::*;
pub use extract::*;

use thiserror::Error;

use crate::config::AiProvider;

/// Failures surfaced by the normalizer.
///
/// Malformed provider *text* is never an error here — it is absorbed by the
/// text fallback. What does surface is "no key" (so the caller can show
/// setup guidance) and the call-failure class (so the caller can show a
/// transient-error message or switch to its own offline content).
#[derive(Error, Debug)]
pub enum NormalizerError {
    #[error("{0} API key not configured")]
    ProviderNotConfigured(AiProvider),

    #[error("provider request failed: {0}")]
    RequestFailed(String),

    #[error("provider returned error (status {status}): {body}")]
    ProviderStatus { status: u16, body: String },

    #[error("could not read provider response: {0}")]
    ResponseDecode(String),
}

impl NormalizerError {
    /// No API key was resolvable for the selected provider.
    pub fn is_not_configured(&self) -> bool {
        matches!(self, Self::ProviderNotConfigured(_))
    }

    /// The provider was configured but the call itself failed
    /// (network, timeout, non-2xx, unreadable envelope).
    pub fn is_call_failure(&self) -> bool {
        !self.is_not_configured()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_configured_is_distinct_from_call_failure() {
        let err = NormalizerError::ProviderNotConfigured(AiProvider::Gemini);
        assert!(err.is_not_configured());
        assert!(!err.is_call_failure());

        let err = NormalizerError::RequestFailed("timed out".into());
        assert!(!err.is_not_configured());
        assert!(err.is_call_failure());

        let err = NormalizerError::ProviderStatus {
            status: 500,
            body: "server error".into(),
        };
        assert!(err.is_call_failure());
    }

    #[test]
    fn error_display_names_the_provider() {
        let err = NormalizerError::ProviderNotConfigured(AiProvider::OpenAi);
        assert_eq!(err.to_string(), "openai API key not configured");
    }
}
