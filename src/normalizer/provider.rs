use serde::{Deserialize, Serialize};

use super::prompt::SYSTEM_PROMPT;
use super::NormalizerError;

/// Bounded timeout for one provider round-trip.
const PROVIDER_TIMEOUT_SECS: u64 = 30;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const GEMINI_MODEL: &str = "gemini-pro";

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENAI_MODEL: &str = "gpt-3.5-turbo";
const OPENAI_MAX_TOKENS: u32 = 1500;
const OPENAI_TEMPERATURE: f32 = 0.7;

/// Upstream chat-completion abstraction (allows mocking).
///
/// One prompt in, one free-text reply out. No streaming, no retry.
pub trait ChatProvider {
    fn complete(&self, prompt: &str) -> Result<String, NormalizerError>;

    fn name(&self) -> &'static str;
}

fn build_http_client() -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(PROVIDER_TIMEOUT_SECS))
        .build()
        .expect("Failed to create HTTP client")
}

fn map_transport_error(e: reqwest::Error) -> NormalizerError {
    if e.is_connect() {
        NormalizerError::RequestFailed(format!("cannot reach provider: {e}"))
    } else if e.is_timeout() {
        NormalizerError::RequestFailed(format!(
            "request timed out after {PROVIDER_TIMEOUT_SECS}s"
        ))
    } else {
        NormalizerError::RequestFailed(e.to_string())
    }
}

// ═══════════════════════════════════════════════════════════
// Gemini
// ═══════════════════════════════════════════════════════════

/// HTTP client for the Gemini generateContent endpoint.
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    client: reqwest::blocking::Client,
}

impl GeminiClient {
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, GEMINI_BASE_URL)
    }

    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client: build_http_client(),
        }
    }
}

#[derive(Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiCandidateContent,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiTextPart>,
}

#[derive(Deserialize)]
struct GeminiTextPart {
    text: String,
}

impl ChatProvider for GeminiClient {
    fn complete(&self, prompt: &str) -> Result<String, NormalizerError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, GEMINI_MODEL, self.api_key
        );
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(NormalizerError::ProviderStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GeminiResponse = response
            .json()
            .map_err(|e| NormalizerError::ResponseDecode(e.to_string()))?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| NormalizerError::ResponseDecode("no candidates in reply".into()))
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

// ═══════════════════════════════════════════════════════════
// OpenAI
// ═══════════════════════════════════════════════════════════

/// HTTP client for the OpenAI chat-completions endpoint.
pub struct OpenAiClient {
    api_key: String,
    base_url: String,
    client: reqwest::blocking::Client,
}

impl OpenAiClient {
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, OPENAI_BASE_URL)
    }

    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client: build_http_client(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatRequestMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatRequestMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl ChatProvider for OpenAiClient {
    fn complete(&self, prompt: &str) -> Result<String, NormalizerError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest {
            model: OPENAI_MODEL,
            messages: vec![
                ChatRequestMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatRequestMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: OPENAI_MAX_TOKENS,
            temperature: OPENAI_TEMPERATURE,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(NormalizerError::ProviderStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| NormalizerError::ResponseDecode(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| NormalizerError::ResponseDecode("no choices in reply".into()))
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

// ═══════════════════════════════════════════════════════════
// Mock provider for tests
// ═══════════════════════════════════════════════════════════

enum MockOutcome {
    Reply(String),
    Fail(String),
}

/// Mock chat provider — returns a configured reply or a configured failure.
pub struct MockChatProvider {
    outcome: MockOutcome,
}

impl MockChatProvider {
    /// Provider that always replies with `reply`.
    pub fn new(reply: &str) -> Self {
        Self {
            outcome: MockOutcome::Reply(reply.to_string()),
        }
    }

    /// Provider whose call always fails with a transport-style error.
    pub fn failing(reason: &str) -> Self {
        Self {
            outcome: MockOutcome::Fail(reason.to_string()),
        }
    }
}

impl ChatProvider for MockChatProvider {
    fn complete(&self, _prompt: &str) -> Result<String, NormalizerError> {
        match &self.outcome {
            MockOutcome::Reply(reply) => Ok(reply.clone()),
            MockOutcome::Fail(reason) => Err(NormalizerError::RequestFailed(reason.clone())),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
