//! Builder-style helper for composing **Markdown instructions**.
//!
//! Every method takes and returns `self`, so instructions read top to
//! bottom:
//!
//! ```rust
//! use enchanter_prompt::builder::PromptBuilder;
//!
//! let md = PromptBuilder::new()
//!     .add_section_h2("Mode: Image Generation")
//!     .add_key_value("Focus", "lighting, composition")
//!     .finalize();
//!
//! assert_eq!(md, "## Mode: Image Generation\n**Focus**: lighting, composition\n");
//! ```
//!
//! Text is emitted exactly as given; the builder does no wrapping or
//! escaping.

use std::fmt::{Display, Write as _};

/// Owns a `String` buffer that grows with each chained call. Call
/// [`Self::finalize`] to take it.
pub struct PromptBuilder {
    buffer: String,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    /// Add a level-2 (`##`) heading.
    pub fn add_section_h2(mut self, line: impl Display) -> Self {
        writeln!(self.buffer, "## {line}").expect("failed to write buffer");
        self
    }

    /// Add a plain line of text and a trailing newline.
    pub fn add_line(mut self, line: impl Display) -> Self {
        writeln!(self.buffer, "{line}").expect("failed to write buffer");
        self
    }

    /// `**Key**: Value`
    pub fn add_key_value(mut self, key: impl Display, value: impl Display) -> Self {
        writeln!(self.buffer, "**{key}**: {value}").expect("failed to write buffer");
        self
    }

    /// Add `value` under `key` only when it is present.
    pub fn add_key_value_opt(self, key: impl Display, value: Option<impl Display>) -> Self {
        match value {
            Some(value) => self.add_key_value(key, value),
            None => self,
        }
    }

    /// Embed a code block fenced as `json`.
    pub fn add_text_json(self, content: impl Display) -> Self {
        self.add_line("```json").add_line(content).add_line("```")
    }

    pub fn add_blank_line(mut self) -> Self {
        self.buffer.push('\n');
        self
    }

    /// Retrieve the accumulated markdown and consume the builder.
    pub fn finalize(self) -> String {
        self.buffer
    }
}
