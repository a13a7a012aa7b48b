//! Static fallback content.
//!
//! Hand-authored default content returned when the generation service
//! fails or returns non-conformant output. Fixed at compile time, never
//! mutated at runtime. The time-block fallback reasonings all carry the
//! word "general" so callers (and tests) can recognize the default path.

use super::time_blocks::TimeBlock;

/// The fixed title set every accepted time-block response must match.
pub const REQUIRED_BLOCK_TITLES: [&str; 3] = ["Morning", "Afternoon", "Evening"];

/// The static three-block default plan.
pub fn default_time_blocks() -> Vec<TimeBlock> {
    vec![
        TimeBlock {
            title: "Morning".to_string(),
            window: "09:00-11:30".to_string(),
            activity: "Deep, focused work on your most demanding task".to_string(),
        },
        TimeBlock {
            title: "Afternoon".to_string(),
            window: "13:00-16:00".to_string(),
            activity: "Meetings, collaboration, and lighter follow-ups".to_string(),
        },
        TimeBlock {
            title: "Evening".to_string(),
            window: "17:00-18:30".to_string(),
            activity: "Review the day, plan tomorrow, and wind down".to_string(),
        },
    ]
}

/// Reasoning when personalization is off and general guidance is used.
pub const TIME_BLOCKS_GENERAL_REASONING: &str =
    "Using general time-blocking guidance: demanding work in the morning, \
     collaborative work after lunch, and review in the evening.";

/// Reasoning when the generation service could not be reached.
pub const TIME_BLOCKS_SERVICE_ERROR_REASONING: &str =
    "The suggestion service could not be reached, so this is the general \
     time-blocking plan.";

/// Reasoning when the service returned a malformed or incomplete plan.
pub const TIME_BLOCKS_MALFORMED_REASONING: &str =
    "The suggestion service returned an unusable plan, so this is the general \
     time-blocking plan.";

/// The single static reminder used on fallback.
pub const DEFAULT_REMINDER: &str =
    "Take a moment to review your open tasks and pick the one that matters most right now.";

/// Reminder fallback reasoning when the service could not be reached.
pub const REMINDERS_SERVICE_ERROR_REASONING: &str =
    "The reminder service could not be reached, so here is a standing reminder instead.";

/// Reminder fallback reasoning when the output was malformed or empty.
pub const REMINDERS_MALFORMED_REASONING: &str =
    "The reminder service returned unusable output, so here is a standing reminder instead.";

/// The curated static memory-tip list.
pub fn default_memory_tips() -> Vec<String> {
    vec![
        "Turn what you want to remember into a vivid image and place it somewhere \
         along a familiar route."
            .to_string(),
        "Review new material after one day, then after three days, then after a \
         week -- spacing beats cramming."
            .to_string(),
        "Explain the idea out loud in your own words; gaps in the explanation are \
         gaps in the memory."
            .to_string(),
        "Group long sequences into chunks of three or four items before trying to \
         hold them in mind."
            .to_string(),
    ]
}

/// Reasoning attached to the curated static tip list.
pub const MEMORY_TIPS_STATIC_REASONING: &str =
    "A curated set of proven memory techniques.";

/// Memory-tip fallback reasoning when the service could not be reached.
pub const MEMORY_TIPS_SERVICE_ERROR_REASONING: &str =
    "The tip service could not be reached, so here is the curated set of techniques.";

/// Memory-tip fallback reasoning when the output was malformed or empty.
pub const MEMORY_TIPS_MALFORMED_REASONING: &str =
    "The tip service returned unusable output, so here is the curated set of techniques.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_blocks_match_required_titles() {
        let blocks = default_time_blocks();
        assert_eq!(blocks.len(), 3);
        for (block, title) in blocks.iter().zip(REQUIRED_BLOCK_TITLES) {
            assert_eq!(block.title, title);
            assert!(!block.window.is_empty());
            assert!(!block.activity.is_empty());
        }
    }

    #[test]
    fn time_block_reasonings_mention_general() {
        assert!(TIME_BLOCKS_GENERAL_REASONING.contains("general"));
        assert!(TIME_BLOCKS_SERVICE_ERROR_REASONING.contains("general"));
        assert!(TIME_BLOCKS_MALFORMED_REASONING.contains("general"));
    }

    #[test]
    fn service_and_malformed_wordings_differ() {
        assert_ne!(
            TIME_BLOCKS_SERVICE_ERROR_REASONING,
            TIME_BLOCKS_MALFORMED_REASONING
        );
        assert_ne!(
            REMINDERS_SERVICE_ERROR_REASONING,
            REMINDERS_MALFORMED_REASONING
        );
    }

    #[test]
    fn default_memory_tips_are_non_empty() {
        let tips = default_memory_tips();
        assert!(!tips.is_empty());
        assert!(tips.iter().all(|t| !t.is_empty()));
    }
}
