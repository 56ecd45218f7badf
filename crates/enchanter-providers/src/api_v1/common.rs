use enchanter_core::{
    error::{EnchantError, Result},
    model::ProviderId,
};
use serde::{Deserialize, de::DeserializeOwned};

use crate::transport::HttpReply;

/// `{"error": {"message": "..."}}`, the error body shape shared by every
/// supported provider. Other fields (`type`, `code`, `status`) are ignored.
#[derive(Debug, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub message: Option<String>,
}

/// Turn a non-success reply into [`EnchantError::Http`], preferring the
/// provider's own message over the status line.
pub(crate) fn api_failure(provider: ProviderId, reply: &HttpReply) -> EnchantError {
    let message = serde_json::from_str::<ApiErrorEnvelope>(&reply.body)
        .ok()
        .and_then(|envelope| envelope.error)
        .and_then(|detail| detail.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| reply.status_line());

    EnchantError::Http {
        provider,
        status: reply.status,
        message,
    }
}

/// Check the status, then decode the success envelope.
pub(crate) fn decode_success<T: DeserializeOwned>(
    provider: ProviderId,
    reply: &HttpReply,
) -> Result<T> {
    if !reply.is_success() {
        return Err(api_failure(provider, reply));
    }

    serde_json::from_str(&reply.body).map_err(|e| {
        EnchantError::malformed(format!("unexpected {provider} response envelope: {e}"))
    })
}

pub(crate) fn encode<T: serde::Serialize>(request: &T) -> Result<serde_json::Value> {
    serde_json::to_value(request)
        .map_err(|e| EnchantError::InvalidRequest(format!("could not encode request body: {e}")))
}
