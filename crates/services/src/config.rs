use std::env;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a highly knowledgeable AI assistant designed to help \
Canadian Nurse Practitioner students prepare for their licensing exam. Always keep in mind that this \
exam is for **Nurse Practitioners**, not Registered Nurses. Nurse Practitioners have a broader scope \
of practice, similar to family physicians, and may be Acute Care NPs, Family NPs, or Pediatric NPs. \
When providing explanations, be detailed, use clinical reasoning, and tailor answers for Nurse \
Practitioner level knowledge.";

/// Connection settings for the chat-completion endpoint.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
}

/// Tutor settings, read once at startup.
#[derive(Clone, Debug)]
pub struct TutorConfig {
    /// `None` when no API key is set; AI features are then disabled.
    pub api: Option<ApiConfig>,
    pub system_prompt: String,
    /// Most recent transcript turns sent with a chat call.
    pub history_limit: usize,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            api: None,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_owned(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl TutorConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key/value source shaped like the environment.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api = non_blank("NP_TUTOR_API_KEY").map(|api_key| ApiConfig {
            api_url: non_blank("NP_TUTOR_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into()),
            api_key,
            model: non_blank("NP_TUTOR_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
        });
        let system_prompt =
            non_blank("NP_TUTOR_SYSTEM_PROMPT").unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.into());
        let history_limit = match non_blank("NP_TUTOR_HISTORY_LIMIT") {
            None => DEFAULT_HISTORY_LIMIT,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(limit) if limit > 0 => limit,
                _ => {
                    tracing::warn!(value = %raw, "ignoring invalid NP_TUTOR_HISTORY_LIMIT");
                    DEFAULT_HISTORY_LIMIT
                }
            },
        };

        Self {
            api,
            system_prompt,
            history_limit,
        }
    }
}
