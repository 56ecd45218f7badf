use std::{future::Future, pin::Pin, sync::Arc};

use enchanter_core::{
    canonical::{self, EnchantResponse},
    error::{EnchantError, Result},
    model::ProviderId,
    provider::{AdapterCall, OutputContract, ProviderAdapter},
};
use enchanter_prompt::instruction_with_contract;
use tracing::debug;

use crate::{
    api_v1::{
        Message, MessagesRequest, MessagesResponse,
        common::{decode_success, encode},
    },
    transport::{HttpReply, HttpRequest, Transport},
};

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
pub const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

/// Extraction-tier adapter for Anthropic's Messages API.
///
/// The API has no JSON output mode, so the instruction carries a stronger
/// plaintext reminder and the reply is scanned for the first balanced JSON
/// object that validates.
pub struct AnthropicAdapter {
    transport: Arc<dyn Transport>,
    base: String,
    max_tokens: u32,
}

impl AnthropicAdapter {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base: DEFAULT_BASE_URL.to_owned(),
            max_tokens: MAX_TOKENS,
        }
    }

    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn build_request(&self, call: &AdapterCall<'_>, credential: &str) -> Result<HttpRequest> {
        let body = MessagesRequest {
            model: call.model_id.to_owned(),
            max_tokens: self.max_tokens,
            system: instruction_with_contract(call.system_instruction, self.contract())
                .into_owned(),
            messages: vec![Message::user(call.input_text)],
        };

        let url = format!("{}/messages", self.base);
        Ok(HttpRequest::new(url, encode(&body)?)
            .with_header("x-api-key", credential)
            .with_header("anthropic-version", API_VERSION))
    }

    fn parse_reply(&self, reply: &HttpReply) -> Result<EnchantResponse> {
        let response: MessagesResponse = decode_success(ProviderId::Anthropic, reply)?;

        // Thinking and tool blocks may precede the answer.
        let text = response
            .content
            .iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text.as_deref())
            .ok_or_else(|| EnchantError::malformed("reply carries no text block"))?;

        canonical::extract_canonical(text).map_err(|err| {
            if response.stop_reason.as_deref() == Some("max_tokens") {
                EnchantError::malformed(format!("{err} (reply was cut off at max_tokens)"))
            } else {
                err
            }
        })
    }
}

impl ProviderAdapter for AnthropicAdapter {
    fn provider(&self) -> ProviderId {
        ProviderId::Anthropic
    }

    fn contract(&self) -> OutputContract {
        OutputContract::Extraction
    }

    fn call<'a>(
        &'a self,
        call: AdapterCall<'a>,
    ) -> Pin<Box<dyn Future<Output = Result<EnchantResponse>> + Send + 'a>> {
        Box::pin(async move {
            let credential = call.require_credential(self.provider())?;
            let request = self.build_request(&call, credential)?;

            debug!(model = call.model_id, "sending messages request");
            let reply = self.transport.post_json(request).await?;
            debug!(status = reply.status, "received messages reply");

            self.parse_reply(&reply)
        })
    }
}
