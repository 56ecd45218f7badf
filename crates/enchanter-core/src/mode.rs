//! The fixed set of enchantment **modes**.
//!
//! A mode only selects which instruction bias is applied to the user's
//! input; the instruction texts themselves live in `enchanter-prompt`.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{EnchantError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    #[serde(alias = "GENERAL")]
    General,
    #[serde(alias = "IMAGE")]
    Image,
    #[serde(alias = "CODING")]
    Coding,
    #[serde(alias = "WRITING")]
    Writing,
    #[serde(alias = "SOCIAL")]
    Social,
    #[serde(alias = "DESIGN")]
    Design,
}

impl Mode {
    pub const ALL: [Mode; 6] = [
        Mode::General,
        Mode::Image,
        Mode::Coding,
        Mode::Writing,
        Mode::Social,
        Mode::Design,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::General => "general",
            Mode::Image => "image",
            Mode::Coding => "coding",
            Mode::Writing => "writing",
            Mode::Social => "social",
            Mode::Design => "design",
        }
    }

    /// Short label for mode pickers.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::General => "General Assistant",
            Mode::Image => "Image Generation",
            Mode::Coding => "Coding & Tech",
            Mode::Writing => "Creative Writing",
            Mode::Social => "Viral Social",
            Mode::Design => "UI/UX Design",
        }
    }

    /// One-line description shown next to the label.
    pub fn description(&self) -> &'static str {
        match self {
            Mode::General => "Best for questions, logic, and general tasks.",
            Mode::Image => "Optimized for Midjourney, DALL-E, or Stable Diffusion.",
            Mode::Coding => "Precise technical specifications and constraints.",
            Mode::Writing => "Focus on tone, style, narrative, and persona.",
            Mode::Social => "Hooks, threads, and posts for LinkedIn/Twitter.",
            Mode::Design => "Web layouts, color palettes, and modern app aesthetics.",
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = EnchantError;

    fn from_str(s: &str) -> Result<Self> {
        Mode::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EnchantError::InvalidRequest(format!("unknown mode `{s}`")))
    }
}
