use chrono::{DateTime, Utc};
use enchanter_core::{EnchantResponse, Mode, ModelDescriptor};
use serde::{Deserialize, Serialize};

/// One finished enchantment: the canonical result plus the request metadata
/// a history list needs.
///
/// Serializes to the same JSON the web front-end stores (camelCase keys,
/// timestamp in epoch milliseconds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnchantedResult {
    /// The user's input, verbatim.
    pub original: String,
    pub enhanced: String,
    pub explanation: String,
    pub tags: Vec<String>,
    pub mode: Mode,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// Display name of the model that produced the result.
    pub model_used: String,
}

impl EnchantedResult {
    /// Record `response` as produced now.
    pub fn new(
        original: impl Into<String>,
        mode: Mode,
        model: &ModelDescriptor,
        response: EnchantResponse,
    ) -> Self {
        Self::at(original, mode, model, response, Utc::now())
    }

    pub fn at(
        original: impl Into<String>,
        mode: Mode,
        model: &ModelDescriptor,
        response: EnchantResponse,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            original: original.into(),
            enhanced: response.enhanced_prompt,
            explanation: response.explanation,
            tags: response.suggested_tags,
            mode,
            timestamp,
            model_used: model.display_name.to_owned(),
        }
    }

    /// The canonical part of the record.
    pub fn response(&self) -> EnchantResponse {
        EnchantResponse {
            enhanced_prompt: self.enhanced.clone(),
            explanation: self.explanation.clone(),
            suggested_tags: self.tags.clone(),
        }
    }
}
