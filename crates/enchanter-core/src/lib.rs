//! Provider-agnostic building blocks of the **Enchanter** SDK.
//!
//! | Module        | What it provides                                                  |
//! |---------------|-------------------------------------------------------------------|
//! | [`model`]     | Provider identities and the static model registry                 |
//! | [`mode`]      | The fixed set of enchantment modes                                 |
//! | [`canonical`] | The canonical `EnchantResponse`, its schema and strict parsing     |
//! | [`extract`]   | String-aware brace scanner for JSON embedded in free text          |
//! | [`request`]   | Per-call `EnchantRequest` and `Credentials`                        |
//! | [`settings`]  | Caller-owned settings, loadable from the environment               |
//! | [`provider`]  | The `ProviderAdapter` trait and the provider lookup table          |
//! | [`error`]     | `EnchantError` and the workspace `Result` alias                    |

pub mod canonical;
pub mod error;
pub mod extract;
pub mod mode;
pub mod model;
pub mod provider;
pub mod request;
pub mod settings;

pub use canonical::EnchantResponse;
pub use error::{EnchantError, Result};
pub use mode::Mode;
pub use model::{ModelDescriptor, ProviderId};
pub use provider::{AdapterCall, OutputContract, ProviderAdapter, ProviderTable};
pub use request::{Credentials, EnchantRequest};
pub use settings::Settings;
