//! The **canonical result** every adapter must produce, plus the helpers
//! that turn provider text into it.
//!
//! Parsing is strict: a reply is accepted only if it is a JSON object with
//! a string `enhancedPrompt`, a string `explanation` and an array of strings
//! `suggestedTags`. Anything else is [`EnchantError::MalformedResponse`];
//! a partially filled result is never returned.

use schemars::{JsonSchema, r#gen::SchemaSettings};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    error::{EnchantError, Result},
    extract,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnchantResponse {
    /// The fully optimized, detailed prompt ready for use.
    pub enhanced_prompt: String,
    /// A brief, one-sentence explanation of what was added.
    pub explanation: String,
    /// Three to five keywords describing the prompt style or topic.
    pub suggested_tags: Vec<String>,
}

impl TryFrom<Value> for EnchantResponse {
    type Error = EnchantError;

    fn try_from(value: Value) -> Result<Self> {
        let Value::Object(mut object) = value else {
            return Err(EnchantError::malformed(format!(
                "expected a JSON object, got {}",
                kind_of(&value)
            )));
        };

        Ok(Self {
            enhanced_prompt: take_string(&mut object, "enhancedPrompt")?,
            explanation: take_string(&mut object, "explanation")?,
            suggested_tags: take_string_array(&mut object, "suggestedTags")?,
        })
    }
}

fn take_string(object: &mut Map<String, Value>, field: &str) -> Result<String> {
    match object.remove(field) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(EnchantError::malformed(format!(
            "field `{field}` must be a string, got {}",
            kind_of(&other)
        ))),
        None => Err(EnchantError::malformed(format!("missing field `{field}`"))),
    }
}

fn take_string_array(object: &mut Map<String, Value>, field: &str) -> Result<Vec<String>> {
    let items = match object.remove(field) {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(EnchantError::malformed(format!(
                "field `{field}` must be an array, got {}",
                kind_of(&other)
            )));
        }
        None => return Err(EnchantError::malformed(format!("missing field `{field}`"))),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::String(s) => Ok(s),
            other => Err(EnchantError::malformed(format!(
                "`{field}[{idx}]` must be a string, got {}",
                kind_of(&other)
            ))),
        })
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parse `text` as one JSON document and validate it.
///
/// Used for schema-constrained and JSON-mode replies, where the whole text
/// is expected to be the object.
pub fn parse_canonical(text: &str) -> Result<EnchantResponse> {
    let value: Value = serde_json::from_str(text.trim())
        .map_err(|e| EnchantError::malformed(format!("reply is not valid JSON: {e}")))?;
    EnchantResponse::try_from(value)
}

/// Scan free-form `text` for balanced `{…}` spans and return the first one
/// that validates as a canonical result.
///
/// Used for providers without a JSON output mode, whose replies may carry
/// chatter before or after the object.
pub fn extract_canonical(text: &str) -> Result<EnchantResponse> {
    let mut last_error = None;

    for span in extract::balanced_object_spans(text) {
        match parse_canonical(span) {
            Ok(response) => return Ok(response),
            Err(err) => last_error = Some(err),
        }
    }

    Err(last_error
        .unwrap_or_else(|| EnchantError::malformed("reply contains no balanced JSON object")))
}

/// JSON Schema of [`EnchantResponse`], fully inlined (no `$ref`s) so it can
/// be shipped inside a single provider request.
pub fn response_schema() -> Value {
    let mut settings = SchemaSettings::draft07();
    settings.inline_subschemas = true;

    let generator = settings.into_generator();
    let root = generator.into_root_schema_for::<EnchantResponse>();

    // A `RootSchema` only holds maps, strings and bools.
    serde_json::to_value(root).unwrap_or(Value::Null)
}
