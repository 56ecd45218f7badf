use enchanter_core::error::EnchantError;

/// Failures of the HTTP layer itself, before any provider answer exists.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("header `{0}` has a name or value not allowed in HTTP headers")]
    InvalidHeader(&'static str),
}

impl From<ProviderError> for EnchantError {
    fn from(value: ProviderError) -> Self {
        EnchantError::Transport(Box::new(value))
    }
}
