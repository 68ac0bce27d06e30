//! Credential settings, sourced from the environment at process start.

/// Environment variable holding the OpenAI API key.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
/// Environment variable holding the NCP Clova Studio API key.
pub const CLOVA_API_KEY_VAR: &str = "NCP_CLOVASTUDIO_API_KEY";

/// Provider credentials, one per supported provider.
///
/// Loading never fails: an absent variable becomes `None`, and the missing
/// credential only surfaces as an error when the corresponding provider is
/// actually selected.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub openai_api_key: Option<String>,
    pub clova_api_key: Option<String>,
}

impl Settings {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            openai_api_key: std::env::var(OPENAI_API_KEY_VAR).ok(),
            clova_api_key: std::env::var(CLOVA_API_KEY_VAR).ok(),
        }
    }
}
