//! Caller-owned user settings: selected model plus per-provider keys.
//!
//! The serialized shape matches what the web front-end persists
//! (`{"selectedModelId": "...", "apiKeys": {"GOOGLE": "..."}}`), so stored
//! settings can be handed over as-is. The core never reads or writes the
//! storage itself.

use std::env;

use serde::{Deserialize, Serialize};

use crate::{
    mode::Mode,
    model::{DEFAULT_MODEL_ID, ProviderId},
    request::{Credentials, EnchantRequest},
};

/// Overrides the selected model in [`Settings::from_env`].
pub const MODEL_ENV_VAR: &str = "ENCHANTER_MODEL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub selected_model_id: String,
    #[serde(rename = "apiKeys", default)]
    pub credentials: Credentials,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            selected_model_id: DEFAULT_MODEL_ID.to_owned(),
            credentials: Credentials::default(),
        }
    }
}

impl Settings {
    /// Load settings from the process environment.
    ///
    /// See [`ProviderId::env_vars`] for the variables consulted per provider
    /// and [`MODEL_ENV_VAR`] for the model override. Missing variables are
    /// simply skipped.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`Self::from_env`] but with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();

        if let Some(model) = lookup(MODEL_ENV_VAR).filter(|m| !m.trim().is_empty()) {
            settings.selected_model_id = model.trim().to_owned();
        }

        for provider in ProviderId::ALL {
            let secret = provider
                .env_vars()
                .iter()
                .filter_map(|key| lookup(key))
                .find(|value| !value.trim().is_empty());

            if let Some(secret) = secret {
                settings.credentials.insert(provider, secret);
            }
        }

        settings
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.selected_model_id = model_id.into();
        self
    }

    /// Build a per-call request from these settings.
    pub fn request(&self, input_text: impl Into<String>, mode: Mode) -> EnchantRequest {
        EnchantRequest::new(input_text, mode, self.selected_model_id.clone())
            .with_credentials(self.credentials.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn reads_persisted_front_end_settings() {
        let raw = r#"{
            "selectedModelId": "llama-3.3-70b-versatile",
            "apiKeys": { "GROQ": "gsk_123", "OPENAI": "" }
        }"#;
        let settings: Settings = serde_json::from_str(raw).unwrap();

        assert_eq!(settings.selected_model_id, "llama-3.3-70b-versatile");
        assert_eq!(settings.credentials.get(ProviderId::Groq), Some("gsk_123"));
        assert_eq!(settings.credentials.get(ProviderId::OpenAi), None);
    }

    #[test]
    fn api_keys_may_be_omitted() {
        let settings: Settings = serde_json::from_str(r#"{"selectedModelId":"gpt-5"}"#).unwrap();
        assert_eq!(settings.credentials, Credentials::default());
    }

    #[test]
    fn loads_keys_and_model_from_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("ENCHANTER_MODEL", "gpt-5"),
            ("GOOGLE_API_KEY", "g-fallback"),
            ("OPENAI_API_KEY", "sk-1"),
            ("ANTHROPIC_API_KEY", "  "),
        ]);
        let settings = Settings::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(settings.selected_model_id, "gpt-5");
        assert_eq!(settings.credentials.get(ProviderId::Google), Some("g-fallback"));
        assert_eq!(settings.credentials.get(ProviderId::OpenAi), Some("sk-1"));
        assert_eq!(settings.credentials.get(ProviderId::Anthropic), None);
        assert_eq!(settings.credentials.get(ProviderId::Groq), None);
    }

    #[test]
    fn defaults_to_the_default_model() {
        let settings = Settings::from_lookup(|_| None);
        assert_eq!(settings.selected_model_id, DEFAULT_MODEL_ID);
    }

    #[test]
    fn request_copies_model_and_credentials() {
        let mut settings = Settings::default().with_model("gpt-5");
        settings.credentials.insert(ProviderId::OpenAi, "sk-1");

        let request = settings.request("a cat", Mode::Image);
        assert_eq!(request.model_id, "gpt-5");
        assert_eq!(request.mode, Mode::Image);
        assert_eq!(request.credentials.get(ProviderId::OpenAi), Some("sk-1"));
    }
}
