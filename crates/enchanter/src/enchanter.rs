//! The **enchant orchestrator**.
//!
//! [`Enchanter`] resolves the requested model, checks the credential for
//! its provider, fetches the mode instruction and hands the call to the
//! adapter registered for that provider. It keeps no state between calls,
//! so one instance can serve any number of concurrent requests.
use std::sync::Arc;

use enchanter_core::{
    AdapterCall, EnchantError, EnchantRequest, EnchantResponse, Mode, ProviderTable, Result,
    Settings, model,
};
use enchanter_prompt::instruction_for;
use enchanter_types::EnchantedResult;
use tracing::{debug, warn};

/// Entry point for enchant calls.
///
/// Cloning is cheap; the provider table is shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Enchanter {
    providers: Arc<ProviderTable>,
}

impl Enchanter {
    /// Create an orchestrator dispatching through `providers`.
    pub fn new(providers: ProviderTable) -> Self {
        Self {
            providers: Arc::new(providers),
        }
    }

    /// Orchestrator wired to every built-in HTTP adapter.
    #[cfg(feature = "providers")]
    pub fn with_default_providers() -> Result<Self> {
        Ok(Self::new(enchanter_providers::default_http_table()?))
    }

    pub fn providers(&self) -> &ProviderTable {
        &self.providers
    }

    /// Enhance `request.input_text` with the selected model.
    ///
    /// Validation happens before any network traffic: blank input, an
    /// unknown model or a missing credential fail immediately.
    ///
    /// # Errors
    ///
    /// * [`EnchantError::EmptyInput`]
    /// * [`EnchantError::UnknownModel`]
    /// * [`EnchantError::MissingCredential`] – names the model's display name.
    /// * [`EnchantError::ProviderNotConfigured`]
    /// * anything the adapter reports, unchanged.
    pub async fn enchant(&self, request: &EnchantRequest) -> Result<EnchantResponse> {
        if request.input_text.trim().is_empty() {
            return Err(EnchantError::EmptyInput);
        }

        let model = model::resolve(&request.model_id)?;

        let Some(credential) = request.credentials.get(model.provider) else {
            return Err(EnchantError::MissingCredential {
                provider: model.provider,
                model_name: Some(model.display_name.to_owned()),
            });
        };

        let adapter = self.providers.get(model.provider)?;
        let instruction = instruction_for(request.mode);

        debug!(
            model = model.id,
            provider = %model.provider,
            mode = %request.mode,
            "dispatching enchant request"
        );

        let call = AdapterCall {
            input_text: &request.input_text,
            system_instruction: &instruction,
            model_id: model.id,
            credential: Some(credential),
        };

        adapter.call(call).await.map_err(|err| {
            warn!(model = model.id, provider = %model.provider, error = %err, "enchant call failed");
            err.with_model_name(model.display_name)
        })
    }

    /// Convenience wrapper building the request from caller-owned settings.
    pub async fn enchant_with_settings(
        &self,
        input_text: &str,
        mode: Mode,
        settings: &Settings,
    ) -> Result<EnchantResponse> {
        self.enchant(&settings.request(input_text, mode)).await
    }

    /// Like [`Self::enchant`], but wraps the result in the record a history
    /// list stores.
    pub async fn enchant_to_record(&self, request: &EnchantRequest) -> Result<EnchantedResult> {
        let response = self.enchant(request).await?;
        let model = model::resolve(&request.model_id)?;

        Ok(EnchantedResult::new(
            request.input_text.clone(),
            request.mode,
            model,
            response,
        ))
    }
}
