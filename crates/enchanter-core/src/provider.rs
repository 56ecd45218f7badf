use std::{collections::HashMap, fmt, future::Future, pin::Pin, sync::Arc};

use crate::{
    canonical::EnchantResponse,
    error::{EnchantError, Result},
    model::ProviderId,
};

/// How strongly a provider can be held to the canonical output shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputContract {
    /// The request carries a response schema; the reply body *is* the
    /// object.
    SchemaConstrained,
    /// The provider offers a "JSON object" flag but no schema. The reply is
    /// parsed as one JSON document and validated.
    JsonMode,
    /// No JSON support at all. The first balanced `{…}` span in the reply
    /// that validates is used.
    Extraction,
}

/// Inputs handed to a [`ProviderAdapter`] for a single call.
#[derive(Clone, Copy)]
pub struct AdapterCall<'a> {
    pub input_text: &'a str,
    pub system_instruction: &'a str,
    pub model_id: &'a str,
    pub credential: Option<&'a str>,
}

impl<'a> AdapterCall<'a> {
    /// The credential, or [`EnchantError::MissingCredential`] if it is absent
    /// or blank. Adapters call this before touching the network.
    pub fn require_credential(&self, provider: ProviderId) -> Result<&'a str> {
        self.credential
            .filter(|secret| !secret.trim().is_empty())
            .ok_or(EnchantError::MissingCredential {
                provider,
                model_name: None,
            })
    }
}

impl fmt::Debug for AdapterCall<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterCall")
            .field("model_id", &self.model_id)
            .field("input_len", &self.input_text.len())
            .field("has_credential", &self.credential.is_some())
            .finish()
    }
}

/// An **adapter** translates between the canonical contract and one
/// provider's wire format.
///
/// The trait is intentionally minimal:
///
/// * [`Self::provider`] and [`Self::contract`] describe the adapter.
/// * [`Self::call`] performs a *single* round-trip (no retries, no
///   streaming) and returns the canonical result.
///
/// The method returns a [`Pin<Box<dyn Future>>`] so adapters stay
/// object-safe and can live in a [`ProviderTable`] without `async_trait`.
pub trait ProviderAdapter: Send + Sync {
    fn provider(&self) -> ProviderId;

    fn contract(&self) -> OutputContract;

    /// Execute one request.
    ///
    /// # Errors
    ///
    /// * [`EnchantError::MissingCredential`] – before any network call.
    /// * [`EnchantError::Http`] – the provider returned a non-success status.
    /// * [`EnchantError::MalformedResponse`] – success status, unusable body.
    /// * [`EnchantError::Transport`] – the request never got an answer.
    fn call<'a>(
        &'a self,
        call: AdapterCall<'a>,
    ) -> Pin<Box<dyn Future<Output = Result<EnchantResponse>> + Send + 'a>>;
}

/// Lookup table from provider to the adapter serving it.
///
/// Cloning is cheap; adapters are shared behind `Arc`s.
#[derive(Clone, Default)]
pub struct ProviderTable {
    adapters: HashMap<ProviderId, Arc<dyn ProviderAdapter>>,
}

impl ProviderTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `adapter` under its own [`ProviderAdapter::provider`],
    /// replacing any previous entry.
    pub fn with(mut self, adapter: impl ProviderAdapter + 'static) -> Self {
        self.insert(Arc::new(adapter));
        self
    }

    pub fn insert(&mut self, adapter: Arc<dyn ProviderAdapter>) {
        self.adapters.insert(adapter.provider(), adapter);
    }

    pub fn get(&self, provider: ProviderId) -> Result<&Arc<dyn ProviderAdapter>> {
        self.adapters
            .get(&provider)
            .ok_or(EnchantError::ProviderNotConfigured { provider })
    }

    pub fn providers(&self) -> impl Iterator<Item = ProviderId> + '_ {
        self.adapters.keys().copied()
    }
}

impl fmt::Debug for ProviderTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut providers: Vec<_> = self.providers().collect();
        providers.sort();
        f.debug_struct("ProviderTable")
            .field("providers", &providers)
            .finish()
    }
}
