//! Provider identities and the static **model registry**.
//!
//! The registry is the only place that knows which provider owns a model.
//! Nothing else in the workspace may guess the provider by looking at the
//! model id string; ask [`resolve`] instead.
//!
//! # Adding a model
//!
//! 1. Append a [`ModelDescriptor`] to `BUILTIN_MODELS`.
//! 2. If the provider is new, add a [`ProviderId`] variant. The compiler
//!    will then point at every `match` that needs an arm, including the
//!    provider crate's default adapter table.
//!
//! ```rust
//! use enchanter_core::model::{self, ProviderId};
//!
//! let gpt = model::resolve("gpt-5").unwrap();
//! assert_eq!(gpt.provider, ProviderId::OpenAi);
//! ```

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{EnchantError, Result};

/// Model used when the caller has not picked one.
pub const DEFAULT_MODEL_ID: &str = "gemini-2.5-flash";

/// Organisation / API surface hosting one or more models.
///
/// Serialized lowercase; the uppercase spelling used by older persisted
/// settings is accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    #[serde(alias = "GOOGLE")]
    Google,
    #[serde(alias = "OPENAI")]
    OpenAi,
    #[serde(alias = "ANTHROPIC")]
    Anthropic,
    #[serde(alias = "GROQ")]
    Groq,
}

impl ProviderId {
    pub const ALL: [ProviderId; 4] = [
        ProviderId::Google,
        ProviderId::OpenAi,
        ProviderId::Anthropic,
        ProviderId::Groq,
    ];

    /// Stable lowercase identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Google => "google",
            ProviderId::OpenAi => "openai",
            ProviderId::Anthropic => "anthropic",
            ProviderId::Groq => "groq",
        }
    }

    /// Human-readable vendor name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderId::Google => "Google Gemini",
            ProviderId::OpenAi => "OpenAI",
            ProviderId::Anthropic => "Anthropic",
            ProviderId::Groq => "Groq",
        }
    }

    /// Environment variables consulted by
    /// [`Settings::from_env`](crate::settings::Settings::from_env), in order.
    pub fn env_vars(&self) -> &'static [&'static str] {
        match self {
            ProviderId::Google => &["GEMINI_API_KEY", "GOOGLE_API_KEY"],
            ProviderId::OpenAi => &["OPENAI_API_KEY"],
            ProviderId::Anthropic => &["ANTHROPIC_API_KEY"],
            ProviderId::Groq => &["GROQ_API_KEY"],
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = EnchantError;

    fn from_str(s: &str) -> Result<Self> {
        ProviderId::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EnchantError::InvalidRequest(format!("unknown provider `{s}`")))
    }
}

/// Static description of one model the user can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    /// Identifier sent verbatim to the provider.
    pub id: &'static str,
    pub display_name: &'static str,
    pub provider: ProviderId,
    /// Highlights options usable on a free tier.
    pub is_free: bool,
}

const BUILTIN_MODELS: &[ModelDescriptor] = &[
    ModelDescriptor {
        id: "gemini-2.5-flash",
        display_name: "Gemini 2.5 Flash",
        provider: ProviderId::Google,
        is_free: true,
    },
    ModelDescriptor {
        id: "gemini-3-pro-preview",
        display_name: "Gemini 3 Pro Preview",
        provider: ProviderId::Google,
        is_free: false,
    },
    ModelDescriptor {
        id: "gpt-5",
        display_name: "GPT-5",
        provider: ProviderId::OpenAi,
        is_free: false,
    },
    ModelDescriptor {
        id: "claude-sonnet-4-5",
        display_name: "Claude Sonnet 4.5",
        provider: ProviderId::Anthropic,
        is_free: false,
    },
    ModelDescriptor {
        id: "llama-3.3-70b-versatile",
        display_name: "Llama 3.3 (Free via Groq)",
        provider: ProviderId::Groq,
        is_free: true,
    },
];

/// Look up `model_id` in the registry.
///
/// # Errors
///
/// * [`EnchantError::UnknownModel`] – the id is not in the catalog.
pub fn resolve(model_id: &str) -> Result<&'static ModelDescriptor> {
    BUILTIN_MODELS
        .iter()
        .find(|m| m.id == model_id)
        .ok_or_else(|| EnchantError::UnknownModel {
            model_id: model_id.to_owned(),
        })
}

/// Every registered model in catalog order.
pub fn list_all() -> &'static [ModelDescriptor] {
    BUILTIN_MODELS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_every_builtin_model_to_its_provider() {
        let providers: Vec<_> = list_all()
            .iter()
            .map(|m| (m.id, resolve(m.id).unwrap().provider))
            .collect();

        assert_eq!(
            providers,
            vec![
                ("gemini-2.5-flash", ProviderId::Google),
                ("gemini-3-pro-preview", ProviderId::Google),
                ("gpt-5", ProviderId::OpenAi),
                ("claude-sonnet-4-5", ProviderId::Anthropic),
                ("llama-3.3-70b-versatile", ProviderId::Groq),
            ]
        );
    }

    #[test]
    fn unknown_model_is_rejected() {
        let err = resolve("gpt-5-turbo-ultra").unwrap_err();
        assert!(matches!(err, EnchantError::UnknownModel { ref model_id } if model_id == "gpt-5-turbo-ultra"));
    }

    #[test]
    fn default_model_is_registered() {
        assert!(resolve(DEFAULT_MODEL_ID).is_ok());
    }

    #[test]
    fn every_provider_owns_at_least_one_model() {
        for provider in ProviderId::ALL {
            assert!(
                list_all().iter().any(|m| m.provider == provider),
                "{provider} has no model"
            );
        }
    }

    #[test]
    fn provider_ids_parse_and_deserialize_in_both_spellings() {
        assert_eq!("Groq".parse::<ProviderId>().unwrap(), ProviderId::Groq);
        assert!("mistral".parse::<ProviderId>().is_err());

        let lower: ProviderId = serde_json::from_str("\"anthropic\"").unwrap();
        let upper: ProviderId = serde_json::from_str("\"ANTHROPIC\"").unwrap();
        assert_eq!(lower, upper);
        assert_eq!(serde_json::to_string(&ProviderId::OpenAi).unwrap(), "\"openai\"");
    }
}
