//! Suggestion generation pipeline.
//!
//! Four suggestion kinds, each with its own request schema, prompt
//! template, flow invoker, and static fallback content:
//!
//! - [`time_blocks`] -- exactly three labeled time blocks for the day
//! - [`reminders`] -- one to three contextual reminder strings
//! - [`break_rec`] -- a break recommendation triple
//! - [`memory_tips`] -- memory technique tips
//!
//! Control flow per invocation: validate input -> render prompt -> call
//! the generation service -> validate output -> return, or fall back to
//! static content on any failure. Single best-effort attempt, no retry.

pub mod break_rec;
pub mod defaults;
pub mod hub;
pub mod memory_tips;
pub mod reminders;
pub mod renderer;
pub mod schema;
pub mod templates;
pub mod time_blocks;

pub use break_rec::{suggest_break, BreakRecommendation, BreakRequest};
pub use hub::{BreakCard, SuggestionHub};
pub use memory_tips::{
    fetch_memory_tips, generate_memory_tips, MemoryTipsRequest, MemoryTipsResponse,
};
pub use reminders::{suggest_reminders, ReminderRequest, ReminderResponse};
pub use renderer::PromptEngine;
pub use time_blocks::{suggest_time_blocks, TimeBlock, TimeBlockRequest, TimeBlockResponse};

use serde::{Deserialize, Serialize};

/// Phrasing style for generated suggestions.
///
/// Selected by the caller; injected into prompts purely as template text.
/// There is no post-hoc check that the output actually matches the tone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Energetic, encouraging phrasing
    Motivational,
    /// Plain, factual phrasing (default)
    Neutral,
    /// Soft, low-pressure phrasing
    Gentle,
}

impl Default for Tone {
    fn default() -> Self {
        Tone::Neutral
    }
}

/// Accepted values for tone fields in request schemas.
pub const TONE_VALUES: &[&str] = &["motivational", "neutral", "gentle"];

impl Tone {
    /// Schema/CLI string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Motivational => "motivational",
            Tone::Neutral => "neutral",
            Tone::Gentle => "gentle",
        }
    }

    /// Parse from the schema string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "motivational" => Some(Tone::Motivational),
            "neutral" => Some(Tone::Neutral),
            "gentle" => Some(Tone::Gentle),
            _ => None,
        }
    }

    /// The instruction clause injected into prompt templates.
    pub fn instruction(&self) -> &'static str {
        match self {
            Tone::Motivational => {
                "Phrase everything in an energetic, motivational voice that celebrates progress."
            }
            Tone::Neutral => "Phrase everything in a plain, neutral voice without embellishment.",
            Tone::Gentle => {
                "Phrase everything in a gentle, low-pressure voice; never imply the user is behind."
            }
        }
    }
}

/// Where a suggestion's content came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionSource {
    /// Accepted output from the generation service
    Generated,
    /// Static default content
    Fallback,
}

/// Suggestion kind identifiers, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKind {
    TimeBlocks,
    Reminders,
    BreakRecommendation,
    MemoryTips,
}

impl SuggestionKind {
    /// Stable name used in log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionKind::TimeBlocks => "time_blocks",
            SuggestionKind::Reminders => "reminders",
            SuggestionKind::BreakRecommendation => "break_rec",
            SuggestionKind::MemoryTips => "memory_tips",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_default_is_neutral() {
        assert_eq!(Tone::default(), Tone::Neutral);
    }

    #[test]
    fn tone_parse_roundtrip() {
        for value in TONE_VALUES {
            let tone = Tone::parse(value).unwrap();
            assert_eq!(tone.as_str(), *value);
        }
        assert!(Tone::parse("sarcastic").is_none());
    }

    #[test]
    fn tone_instructions_are_distinct() {
        let clauses = [
            Tone::Motivational.instruction(),
            Tone::Neutral.instruction(),
            Tone::Gentle.instruction(),
        ];
        assert_ne!(clauses[0], clauses[1]);
        assert_ne!(clauses[1], clauses[2]);
        assert_ne!(clauses[0], clauses[2]);
    }
}
