mod chat_completion;
pub(crate) mod common;
mod generate_content;
mod messages;

pub use chat_completion::*;
pub use common::{ApiErrorDetail, ApiErrorEnvelope};
pub use generate_content::*;
pub use messages::*;
