//! Per-call inputs: [`Credentials`] and [`EnchantRequest`].

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::{mode::Mode, model::ProviderId};

/// At most one opaque secret per provider.
///
/// Secrets are never inspected for shape; only emptiness is checked, and an
/// empty or whitespace-only secret counts as absent.
///
/// Deserializing skips keys that name no known provider and `null` values,
/// so settings written by other versions still load.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Credentials(BTreeMap<ProviderId, String>);

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, replacing any previous secret for `provider`.
    pub fn with(mut self, provider: ProviderId, secret: impl Into<String>) -> Self {
        self.insert(provider, secret);
        self
    }

    pub fn insert(&mut self, provider: ProviderId, secret: impl Into<String>) {
        self.0.insert(provider, secret.into());
    }

    pub fn remove(&mut self, provider: ProviderId) -> Option<String> {
        self.0.remove(&provider)
    }

    /// The usable secret for `provider`, if one was supplied.
    pub fn get(&self, provider: ProviderId) -> Option<&str> {
        self.0
            .get(&provider)
            .map(String::as_str)
            .filter(|secret| !secret.trim().is_empty())
    }

    /// Providers with a usable secret.
    pub fn providers(&self) -> impl Iterator<Item = ProviderId> + '_ {
        self.0
            .iter()
            .filter(|(_, secret)| !secret.trim().is_empty())
            .map(|(provider, _)| *provider)
    }
}

impl<'de> Deserialize<'de> for Credentials {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Option<String>>::deserialize(deserializer)?;

        Ok(raw
            .into_iter()
            .filter_map(|(key, secret)| Some((key.parse::<ProviderId>().ok()?, secret?)))
            .collect())
    }
}

// Secrets must never end up in logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.0.keys()).finish()
    }
}

impl FromIterator<(ProviderId, String)> for Credentials {
    fn from_iter<I: IntoIterator<Item = (ProviderId, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Everything the orchestrator needs for one call. Built per call and
/// dropped afterwards.
#[derive(Debug, Clone)]
pub struct EnchantRequest {
    pub input_text: String,
    pub mode: Mode,
    pub model_id: String,
    pub credentials: Credentials,
}

impl EnchantRequest {
    pub fn new(input_text: impl Into<String>, mode: Mode, model_id: impl Into<String>) -> Self {
        Self {
            input_text: input_text.into(),
            mode,
            model_id: model_id.into(),
            credentials: Credentials::default(),
        }
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_credential(mut self, provider: ProviderId, secret: impl Into<String>) -> Self {
        self.credentials.insert(provider, secret);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_secrets_count_as_absent() {
        let creds = Credentials::new()
            .with(ProviderId::OpenAi, "sk-live")
            .with(ProviderId::Groq, "   ");

        assert_eq!(creds.get(ProviderId::OpenAi), Some("sk-live"));
        assert_eq!(creds.get(ProviderId::Groq), None);
        assert_eq!(creds.get(ProviderId::Google), None);
        assert_eq!(creds.providers().collect::<Vec<_>>(), vec![ProviderId::OpenAi]);
    }

    #[test]
    fn one_secret_per_provider() {
        let creds = Credentials::new()
            .with(ProviderId::Anthropic, "first")
            .with(ProviderId::Anthropic, "second");
        assert_eq!(creds.get(ProviderId::Anthropic), Some("second"));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let creds = Credentials::new().with(ProviderId::Google, "super-secret");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("Google"));
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn unknown_providers_are_skipped_when_loading() {
        let raw = r#"{"GOOGLE": "g-key", "MISTRAL": "m-key", "groq": null, "openai": "sk"}"#;
        let creds: Credentials = serde_json::from_str(raw).unwrap();

        assert_eq!(creds.get(ProviderId::Google), Some("g-key"));
        assert_eq!(creds.get(ProviderId::OpenAi), Some("sk"));
        assert_eq!(creds.get(ProviderId::Groq), None);
        assert_eq!(
            creds.providers().collect::<Vec<_>>(),
            vec![ProviderId::Google, ProviderId::OpenAi]
        );
    }

    #[test]
    fn serializes_with_lowercase_keys() {
        let creds = Credentials::new().with(ProviderId::Anthropic, "sk-ant");
        assert_eq!(
            serde_json::to_value(&creds).unwrap(),
            serde_json::json!({"anthropic": "sk-ant"})
        );
    }
}
