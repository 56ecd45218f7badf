//! # `enchanter` – The umbrella crate
//!
//! Turn a short idea plus a *mode* into a richer, model-generated prompt,
//! through whichever provider the user has a key for.
//!
//! | Crate                     | What it provides                                                       |
//! |---------------------------|------------------------------------------------------------------------|
//! | **`enchanter-core`**      | Model registry, modes, canonical result, adapter trait, errors         |
//! | **`enchanter-prompt`**    | Mode catalog and per-adapter output wording                            |
//! | **`enchanter-types`**     | `EnchantedResult`, the record history lists store                      |
//! | **`enchanter-providers`** | Gemini / OpenAI / Anthropic / Groq HTTP adapters *(feature `providers`)* |
//!
//! ## Quick example
//!
//! ```rust,no_run
//! use enchanter::{Enchanter, Mode, Settings};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let enchanter = Enchanter::with_default_providers()?;
//!     let settings = Settings::from_env();
//!
//!     let result = enchanter
//!         .enchant_with_settings("cat in space", Mode::Image, &settings)
//!         .await?;
//!
//!     println!("{}", result.enhanced_prompt);
//!     Ok(())
//! }
//! ```

mod enchanter;

pub use crate::enchanter::Enchanter;
pub use enchanter_core::*;
pub use enchanter_prompt as prompt;
pub use enchanter_types as types;

#[cfg(feature = "providers")]
pub use enchanter_providers as providers;
