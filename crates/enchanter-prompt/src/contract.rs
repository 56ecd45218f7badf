//! Output-format wording adapted to an adapter's [`OutputContract`].
//!
//! Schema-constrained providers are bound by the schema itself and get the
//! instruction unchanged. The weaker tiers get an explicit plaintext
//! reminder appended.

use std::borrow::Cow;

use enchanter_core::OutputContract;

const JSON_MODE_REMINDER: &str = " Ensure output is pure JSON.";

const EXTRACTION_REMINDER: &str = "\nReply with the JSON object only. Do not wrap it in \
markdown fences and do not add any text before or after it.";

/// `instruction` with the reminder `contract` calls for.
pub fn instruction_with_contract(instruction: &str, contract: OutputContract) -> Cow<'_, str> {
    match contract {
        OutputContract::SchemaConstrained => Cow::Borrowed(instruction),
        OutputContract::JsonMode => Cow::Owned(format!("{instruction}{JSON_MODE_REMINDER}")),
        OutputContract::Extraction => Cow::Owned(format!("{instruction}{EXTRACTION_REMINDER}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_tier_is_left_alone() {
        let text = instruction_with_contract("base", OutputContract::SchemaConstrained);
        assert!(matches!(text, Cow::Borrowed("base")));
    }

    #[test]
    fn weaker_tiers_get_a_reminder() {
        assert_eq!(
            instruction_with_contract("base", OutputContract::JsonMode),
            "base Ensure output is pure JSON."
        );
        let extraction = instruction_with_contract("base", OutputContract::Extraction);
        assert!(extraction.starts_with("base\n"));
        assert!(extraction.contains("JSON object only"));
    }
}
