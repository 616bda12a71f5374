//! Generation client configuration, read from the environment.

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image-preview";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Settings for [`GeminiClient`](super::GeminiClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    /// `None` leaves the app usable; every generation then fails.
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl GeminiConfig {
    /// Load from `GEMINI_API_KEY` (or `API_KEY`), `NAIL_STYLE_MODEL` and
    /// `NAIL_STYLE_API_BASE`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            api_key: non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY")),
            model: non_empty("NAIL_STYLE_MODEL").unwrap_or(defaults.model),
            api_base: non_empty("NAIL_STYLE_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
        }
    }

    /// `generateContent` endpoint for the configured model
    pub fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.api_base, self.model)
    }
}
