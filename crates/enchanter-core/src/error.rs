//! Unified error type exposed by **`enchanter-core`**.
//!
//! Provider crates translate their wire-level failures into one of these
//! variants before handing them back to the orchestrator. The orchestrator
//! passes them through unchanged, except that it attaches the human-readable
//! model name to [`EnchantError::MissingCredential`].

use thiserror::Error;

use crate::model::ProviderId;

/// Convenient alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, EnchantError>;

#[derive(Debug, Error)]
pub enum EnchantError {
    /// The input text was empty or consisted only of whitespace.
    #[error("input text is empty")]
    EmptyInput,

    /// The requested model id is not part of the model registry.
    #[error("model `{model_id}` is not in the model registry")]
    UnknownModel { model_id: String },

    /// No credential was supplied for the provider that owns the selected
    /// model. `model_name` is filled in by the orchestrator.
    #[error("missing API key for {subject}. Please add it in settings", subject = credential_subject(provider, model_name))]
    MissingCredential {
        provider: ProviderId,
        model_name: Option<String>,
    },

    /// The provider answered with a non-success status. `message` is the
    /// provider's own error message when it sent one, else the status line.
    #[error("{name} error ({status}): {message}", name = provider.display_name())]
    Http {
        provider: ProviderId,
        status: u16,
        message: String,
    },

    /// The provider answered successfully but the body did not yield a valid
    /// canonical result.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The lookup table has no adapter registered for `provider`.
    #[error("no adapter is configured for provider `{provider}`")]
    ProviderNotConfigured { provider: ProviderId },

    /// The HTTP layer failed before a response was received (DNS, TLS,
    /// timeout, …).
    #[error("transport error: {0}")]
    Transport(Box<dyn std::error::Error + Send + Sync + 'static>),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl EnchantError {
    /// `true` when the caller should send the user to the settings screen
    /// instead of showing a generic failure.
    pub fn needs_credentials(&self) -> bool {
        matches!(self, EnchantError::MissingCredential { .. })
    }

    /// Attach a model display name to a [`EnchantError::MissingCredential`].
    /// Every other variant is returned untouched.
    pub fn with_model_name(self, name: &str) -> Self {
        match self {
            EnchantError::MissingCredential { provider, .. } => EnchantError::MissingCredential {
                provider,
                model_name: Some(name.to_owned()),
            },
            other => other,
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        EnchantError::MalformedResponse(reason.into())
    }
}

fn credential_subject<'a>(provider: &'a ProviderId, model_name: &'a Option<String>) -> &'a str {
    model_name.as_deref().unwrap_or(provider.display_name())
}
