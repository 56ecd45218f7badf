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
        ChatCompletionMessage, ChatCompletionRequest, ChatCompletionResponse, FinishReason,
        MessageRole, ResponseFormat,
        common::{decode_success, encode},
    },
    transport::{HttpReply, HttpRequest, Transport},
};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// JSON-mode adapter for OpenAI-compatible `chat/completions` endpoints.
///
/// OpenAI and Groq share the wire format, so one type serves both; the
/// constructor decides which provider (and default base URL) it stands for.
pub struct ChatCompletionsAdapter {
    provider: ProviderId,
    transport: Arc<dyn Transport>,
    base: String,
}

impl ChatCompletionsAdapter {
    pub fn openai(transport: Arc<dyn Transport>) -> Self {
        Self {
            provider: ProviderId::OpenAi,
            transport,
            base: OPENAI_BASE_URL.to_owned(),
        }
    }

    pub fn groq(transport: Arc<dyn Transport>) -> Self {
        Self {
            provider: ProviderId::Groq,
            transport,
            base: GROQ_BASE_URL.to_owned(),
        }
    }

    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    fn build_request(&self, call: &AdapterCall<'_>, credential: &str) -> Result<HttpRequest> {
        let instruction = instruction_with_contract(call.system_instruction, self.contract());

        let body = ChatCompletionRequest::new(
            call.model_id,
            vec![
                ChatCompletionMessage::new(MessageRole::System, instruction),
                ChatCompletionMessage::new(MessageRole::User, call.input_text),
            ],
        )
        .response_format(ResponseFormat::JsonObject);

        let url = format!("{}/chat/completions", self.base);
        Ok(HttpRequest::new(url, encode(&body)?)
            .with_header("authorization", format!("Bearer {credential}")))
    }

    fn parse_reply(&self, reply: &HttpReply) -> Result<EnchantResponse> {
        let response: ChatCompletionResponse = decode_success(self.provider, reply)?;

        let Some(choice) = response.choices.into_iter().next() else {
            return Err(EnchantError::malformed("response has no choices"));
        };

        match choice.message.content {
            Some(content) if !content.trim().is_empty() => {
                canonical::parse_canonical(&content).map_err(|err| {
                    if choice.finish_reason == Some(FinishReason::Length) {
                        EnchantError::malformed(format!("{err} (reply was cut off at the length limit)"))
                    } else {
                        err
                    }
                })
            }
            _ => Err(EnchantError::malformed(match choice.message.refusal {
                Some(refusal) => format!("model refused: {refusal}"),
                None => "reply has no content".to_owned(),
            })),
        }
    }
}

impl ProviderAdapter for ChatCompletionsAdapter {
    fn provider(&self) -> ProviderId {
        self.provider
    }

    fn contract(&self) -> OutputContract {
        OutputContract::JsonMode
    }

    fn call<'a>(
        &'a self,
        call: AdapterCall<'a>,
    ) -> Pin<Box<dyn Future<Output = Result<EnchantResponse>> + Send + 'a>> {
        Box::pin(async move {
            let credential = call.require_credential(self.provider)?;
            let request = self.build_request(&call, credential)?;

            debug!(provider = %self.provider, model = call.model_id, "sending chat completion request");
            let reply = self.transport.post_json(request).await?;
            debug!(provider = %self.provider, status = reply.status, "received chat completion reply");

            self.parse_reply(&reply)
        })
    }
}
