//! Model endpoint settings read from the environment.

/// Credential variable for the model endpoint.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Overrides the model id.
pub const MODEL_ENV: &str = "WEFT_MODEL";
/// Overrides the OpenAI-compatible base URL.
pub const API_BASE_ENV: &str = "WEFT_API_BASE";

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
/// Gemini's OpenAI-compatible Chat Completions base.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Everything `ChatOpenAI` needs to reach the endpoint.
///
/// A missing key is not an error here: the completion call fails instead.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelSettings {
    pub model: String,
    pub api_base: String,
    pub api_key: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: None,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl ModelSettings {
    /// Reads `GEMINI_API_KEY`, `WEFT_MODEL` and `WEFT_API_BASE`; blank values fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            model: non_empty(MODEL_ENV).unwrap_or(defaults.model),
            api_base: non_empty(API_BASE_ENV).unwrap_or(defaults.api_base),
            api_key: non_empty(API_KEY_ENV),
            ..defaults
        }
    }
}
