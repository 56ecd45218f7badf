//! HTTP adapters for the Enchanter SDK.
//!
//! | Provider  | Adapter                               | Output contract      |
//! |-----------|---------------------------------------|----------------------|
//! | Google    | [`GeminiAdapter`]                     | schema-constrained   |
//! | OpenAI    | [`ChatCompletionsAdapter::openai`]    | JSON mode            |
//! | Groq      | [`ChatCompletionsAdapter::groq`]      | JSON mode            |
//! | Anthropic | [`AnthropicAdapter`]                  | brace extraction     |
//!
//! All adapters send through a shared [`Transport`]; [`ReqwestTransport`]
//! is the production implementation.
//!
//! ```rust,no_run
//! use enchanter_providers::default_http_table;
//!
//! let table = default_http_table().expect("TLS backend available");
//! ```

use std::sync::Arc;

use enchanter_core::{ProviderAdapter, ProviderId, ProviderTable, error::Result};

mod anthropic;
pub mod api_v1;
mod chat;
pub mod error;
mod gemini;
mod transport;

pub use anthropic::AnthropicAdapter;
pub use chat::ChatCompletionsAdapter;
pub use gemini::GeminiAdapter;
pub use transport::{HttpReply, HttpRequest, ReqwestTransport, Transport};

/// One adapter per provider, all sharing `transport`.
pub fn default_table(transport: Arc<dyn Transport>) -> ProviderTable {
    let mut table = ProviderTable::new();

    for provider in ProviderId::ALL {
        let adapter: Arc<dyn ProviderAdapter> = match provider {
            ProviderId::Google => Arc::new(GeminiAdapter::new(transport.clone())),
            ProviderId::OpenAi => Arc::new(ChatCompletionsAdapter::openai(transport.clone())),
            ProviderId::Anthropic => Arc::new(AnthropicAdapter::new(transport.clone())),
            ProviderId::Groq => Arc::new(ChatCompletionsAdapter::groq(transport.clone())),
        };
        table.insert(adapter);
    }

    table
}

/// [`default_table`] over a default [`ReqwestTransport`].
pub fn default_http_table() -> Result<ProviderTable> {
    Ok(default_table(Arc::new(ReqwestTransport::new()?)))
}
