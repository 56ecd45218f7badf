use std::{future::Future, pin::Pin, sync::Arc};

use enchanter_core::{
    canonical::{self, EnchantResponse},
    error::{EnchantError, Result},
    model::ProviderId,
    provider::{AdapterCall, OutputContract, ProviderAdapter},
};
use enchanter_prompt::instruction_with_contract;
use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    api_v1::{
        Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
        common::{decode_success, encode},
    },
    transport::{HttpReply, HttpRequest, Transport},
};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Schema-constrained adapter for Google's Gemini `generateContent` API.
///
/// The request carries the canonical response schema, so the reply text is
/// parsed directly as the result without any extraction.
pub struct GeminiAdapter {
    transport: Arc<dyn Transport>,
    base: String,
    response_schema: Value,
}

impl GeminiAdapter {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base: DEFAULT_BASE_URL.to_owned(),
            response_schema: gemini_schema(&canonical::response_schema()),
        }
    }

    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    fn build_request(&self, call: &AdapterCall<'_>, credential: &str) -> Result<HttpRequest> {
        let instruction = instruction_with_contract(call.system_instruction, self.contract());

        let body = GenerateContentRequest {
            system_instruction: Content::text(None, instruction),
            contents: vec![Content::text(Some("user"), call.input_text)],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_owned(),
                response_schema: Some(self.response_schema.clone()),
            },
        };

        let url = format!("{}/models/{}:generateContent", self.base, call.model_id);
        Ok(HttpRequest::new(url, encode(&body)?).with_header("x-goog-api-key", credential))
    }

    fn parse_reply(&self, reply: &HttpReply) -> Result<EnchantResponse> {
        let response: GenerateContentResponse = decode_success(ProviderId::Google, reply)?;

        if let Some(text) = response.text() {
            return canonical::parse_canonical(&text);
        }

        let reason = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
            .map(|reason| format!("prompt was blocked ({reason})"))
            .or_else(|| {
                response
                    .candidates
                    .first()
                    .and_then(|c| c.finish_reason.as_ref())
                    .map(|reason| format!("no text in reply (finish reason {reason})"))
            })
            .unwrap_or_else(|| "empty response from Gemini".to_owned());

        Err(EnchantError::malformed(reason))
    }
}

impl ProviderAdapter for GeminiAdapter {
    fn provider(&self) -> ProviderId {
        ProviderId::Google
    }

    fn contract(&self) -> OutputContract {
        OutputContract::SchemaConstrained
    }

    fn call<'a>(
        &'a self,
        call: AdapterCall<'a>,
    ) -> Pin<Box<dyn Future<Output = Result<EnchantResponse>> + Send + 'a>> {
        Box::pin(async move {
            let credential = call.require_credential(self.provider())?;
            let request = self.build_request(&call, credential)?;

            debug!(model = call.model_id, "sending generateContent request");
            let reply = self.transport.post_json(request).await?;
            debug!(status = reply.status, "received generateContent reply");

            self.parse_reply(&reply)
        })
    }
}

/// Rewrite a JSON Schema into Gemini's OpenAPI-flavoured subset: uppercase
/// type names, and only the keywords Gemini accepts.
fn gemini_schema(schema: &Value) -> Value {
    let Value::Object(map) = schema else {
        return schema.clone();
    };

    let mut out = Map::new();
    for (key, value) in map {
        match key.as_str() {
            "type" => {
                if let Some(kind) = value.as_str() {
                    out.insert(key.clone(), Value::String(kind.to_ascii_uppercase()));
                }
            }
            "properties" => {
                if let Value::Object(props) = value {
                    let props = props
                        .iter()
                        .map(|(name, prop)| (name.clone(), gemini_schema(prop)))
                        .collect();
                    out.insert(key.clone(), Value::Object(props));
                }
            }
            "items" => {
                out.insert(key.clone(), gemini_schema(value));
            }
            "required" | "description" | "enum" | "format" => {
                out.insert(key.clone(), value.clone());
            }
            _ => {}
        }
    }

    Value::Object(out)
}
