//! Integration tests for the suggestion flows.
//!
//! The generation service is replaced with scripted providers so every
//! success, service-error, and malformed-output path is exercised
//! deterministically.

use async_trait::async_trait;
use chrono::Utc;
use proptest::prelude::*;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use cogniwell_core::error::GenerationError;
use cogniwell_core::llm::GenerationProvider;
use cogniwell_core::suggestion::defaults::{
    default_time_blocks, DEFAULT_REMINDER, REQUIRED_BLOCK_TITLES,
};
use cogniwell_core::suggestion::{
    fetch_memory_tips, suggest_break, suggest_reminders, suggest_time_blocks, BreakCard,
    BreakRequest, ReminderRequest, SuggestionHub, TimeBlockRequest, Tone,
};
use cogniwell_core::suggestion::SuggestionSource;

/// Provider that always answers with the same JSON value.
struct StaticProvider(Value);

#[async_trait]
impl GenerationProvider for StaticProvider {
    async fn generate(
        &self,
        _prompt: &str,
        _output_schema: &Value,
    ) -> Result<Value, GenerationError> {
        Ok(self.0.clone())
    }
}

/// Provider that always fails as if the service were unreachable.
struct FailingProvider;

#[async_trait]
impl GenerationProvider for FailingProvider {
    async fn generate(
        &self,
        _prompt: &str,
        _output_schema: &Value,
    ) -> Result<Value, GenerationError> {
        Err(GenerationError::Request("connection refused".to_string()))
    }
}

/// Provider that records the rendered prompt it was given.
struct CapturingProvider {
    prompt: Mutex<Option<String>>,
    reply: Value,
}

impl CapturingProvider {
    fn new(reply: Value) -> Self {
        Self {
            prompt: Mutex::new(None),
            reply,
        }
    }

    fn seen_prompt(&self) -> String {
        self.prompt.lock().unwrap().clone().expect("no prompt seen")
    }
}

#[async_trait]
impl GenerationProvider for CapturingProvider {
    async fn generate(
        &self,
        prompt: &str,
        _output_schema: &Value,
    ) -> Result<Value, GenerationError> {
        *self.prompt.lock().unwrap() = Some(prompt.to_string());
        Ok(self.reply.clone())
    }
}

fn valid_blocks_reply() -> Value {
    json!({
        "blocks": [
            {"title": "Morning", "window": "09:00-11:30", "activity": "Write the report"},
            {"title": "Afternoon", "window": "13:00-15:30", "activity": "Reviews and email"},
            {"title": "Evening", "window": "17:00-18:00", "activity": "Plan tomorrow"},
        ],
        "reasoning": "Focus history peaks in the morning."
    })
}

fn time_block_request() -> TimeBlockRequest {
    TimeBlockRequest {
        task_type: "Focused Work".to_string(),
        focus_history: "high focus 9-11am".to_string(),
        past_task_completion_times: "Mon 10:30, Tue 09:45, Wed 10:10".to_string(),
        now: Utc::now(),
        adapt_automatically: true,
        tone: Some(Tone::Neutral),
        mood: None,
    }
}

fn reminder_request() -> ReminderRequest {
    ReminderRequest {
        task_history: "Completed 3 tasks recently.".to_string(),
        upcoming_tasks: "Water the plants; Send invoice".to_string(),
        now: Utc::now(),
        tone: Some(Tone::Neutral),
        mood: None,
    }
}

fn break_request() -> BreakRequest {
    BreakRequest {
        focus_summary: "Two long focus sessions this morning.".to_string(),
        minutes_since_break: Some("95".to_string()),
        now: Utc::now(),
        tone: Some(Tone::Neutral),
        mood: None,
    }
}

#[tokio::test]
async fn time_blocks_success_keeps_generated_plan() {
    let provider = StaticProvider(valid_blocks_reply());
    let response = suggest_time_blocks(&provider, &time_block_request()).await;

    assert_eq!(response.source, SuggestionSource::Generated);
    let titles: Vec<&str> = response.blocks.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, REQUIRED_BLOCK_TITLES);
    assert_eq!(response.blocks[0].activity, "Write the report");
}

#[tokio::test]
async fn time_blocks_service_error_returns_literal_default() {
    let response = suggest_time_blocks(&FailingProvider, &time_block_request()).await;

    assert_eq!(response.source, SuggestionSource::Fallback);
    assert_eq!(response.blocks, default_time_blocks());
    assert!(response.reasoning.contains("general"));
    assert_eq!(response.blocks.len(), 3);
}

#[tokio::test]
async fn time_blocks_never_returns_partial_set() {
    // Two blocks only: discard wholesale, never return a partially valid set.
    let two_blocks = StaticProvider(json!({
        "blocks": [
            {"title": "Morning", "window": "09:00-11:30", "activity": "Write"},
            {"title": "Afternoon", "window": "13:00-15:30", "activity": "Review"},
        ],
        "reasoning": "short day"
    }));
    let response = suggest_time_blocks(&two_blocks, &time_block_request()).await;
    assert_eq!(response.blocks, default_time_blocks());
    assert_eq!(response.source, SuggestionSource::Fallback);

    // Unrecognized title: same treatment.
    let bad_title = StaticProvider(json!({
        "blocks": [
            {"title": "Dawn", "window": "06:00-08:00", "activity": "Run"},
            {"title": "Afternoon", "window": "13:00-15:30", "activity": "Review"},
            {"title": "Evening", "window": "17:00-18:00", "activity": "Plan"},
        ],
        "reasoning": "custom"
    }));
    let response = suggest_time_blocks(&bad_title, &time_block_request()).await;
    assert_eq!(response.blocks, default_time_blocks());
    assert!(response.reasoning.contains("general"));
}

#[tokio::test]
async fn time_blocks_adapt_off_skips_the_service() {
    // Provider would answer successfully, but adapt_automatically=false
    // must short-circuit to the general default without a call.
    struct PanickingProvider;

    #[async_trait]
    impl GenerationProvider for PanickingProvider {
        async fn generate(&self, _: &str, _: &Value) -> Result<Value, GenerationError> {
            panic!("generation service must not be called");
        }
    }

    let request = TimeBlockRequest {
        task_type: "Focused Work".to_string(),
        focus_history: "high focus 9-11am".to_string(),
        past_task_completion_times: "Mon 10:30".to_string(),
        now: Utc::now(),
        adapt_automatically: false,
        tone: None,
        mood: None,
    };

    let response = suggest_time_blocks(&PanickingProvider, &request).await;
    let titles: Vec<&str> = response.blocks.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, REQUIRED_BLOCK_TITLES);
    assert!(response.reasoning.contains("general"));
    assert_eq!(response.source, SuggestionSource::Fallback);
}

#[tokio::test]
async fn time_blocks_invalid_input_falls_back_instead_of_erroring() {
    let request = TimeBlockRequest {
        task_type: String::new(), // required field empty
        focus_history: "high focus".to_string(),
        past_task_completion_times: "Mon 10:30".to_string(),
        now: Utc::now(),
        adapt_automatically: true,
        tone: None,
        mood: None,
    };

    let response = suggest_time_blocks(&StaticProvider(valid_blocks_reply()), &request).await;
    assert_eq!(response.source, SuggestionSource::Fallback);
    assert_eq!(response.blocks.len(), 3);
}

#[tokio::test]
async fn reminders_always_within_cardinality() {
    let good = StaticProvider(json!({
        "reminders": ["Water the plants before noon.", "Send the invoice today."],
        "reasoning": "Both tasks are overdue."
    }));
    let response = suggest_reminders(&good, &reminder_request()).await;
    assert_eq!(response.source, SuggestionSource::Generated);
    assert!((1..=3).contains(&response.reminders.len()));
    assert!(response.reminders.iter().all(|r| !r.is_empty()));
    assert!(!response.reasoning.is_empty());
}

#[tokio::test]
async fn reminders_malformed_output_falls_back_to_static() {
    let overfull = StaticProvider(json!({
        "reminders": ["a", "b", "c", "d"],
        "reasoning": "too many"
    }));
    let response = suggest_reminders(&overfull, &reminder_request()).await;
    assert_eq!(response.reminders, vec![DEFAULT_REMINDER.to_string()]);
    assert!(!response.reasoning.is_empty());
    assert_eq!(response.source, SuggestionSource::Fallback);
}

#[tokio::test]
async fn reminders_service_error_and_malformed_have_distinct_reasonings() {
    let service_err = suggest_reminders(&FailingProvider, &reminder_request()).await;
    let malformed = suggest_reminders(
        &StaticProvider(json!({"reminders": [], "reasoning": "x"})),
        &reminder_request(),
    )
    .await;

    assert_ne!(service_err.reasoning, malformed.reasoning);
    assert_eq!(service_err.reminders, malformed.reminders);
}

#[tokio::test]
async fn break_flow_surfaces_service_error() {
    let result = suggest_break(&FailingProvider, &break_request()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn break_flow_accepts_well_typed_triple() {
    let provider = StaticProvider(json!({
        "break_recommendation": "Walk around the block.",
        "technique": "Box breathing",
        "reasoning": "95 minutes without a break."
    }));
    let rec = suggest_break(&provider, &break_request()).await.unwrap();
    assert_eq!(rec.technique, "Box breathing");
}

#[tokio::test]
async fn mood_clause_present_only_when_mood_given() {
    let with_mood = CapturingProvider::new(valid_blocks_reply());
    let mut request = time_block_request();
    request.mood = Some("drained".to_string());
    suggest_time_blocks(&with_mood, &request).await;
    assert!(with_mood.seen_prompt().contains("drained"));

    let without_mood = CapturingProvider::new(valid_blocks_reply());
    let request = time_block_request();
    suggest_time_blocks(&without_mood, &request).await;
    assert!(!without_mood.seen_prompt().to_lowercase().contains("mood"));
}

#[tokio::test]
async fn tone_changes_exactly_one_clause_of_the_prompt() {
    let render = |tone: Tone| async move {
        let provider = CapturingProvider::new(valid_blocks_reply());
        let mut request = time_block_request();
        request.tone = Some(tone);
        suggest_time_blocks(&provider, &request).await;
        provider.seen_prompt()
    };

    let neutral = render(Tone::Neutral).await;
    let motivational = render(Tone::Motivational).await;
    let gentle = render(Tone::Gentle).await;

    assert_eq!(
        neutral,
        motivational.replace(Tone::Motivational.instruction(), Tone::Neutral.instruction())
    );
    assert_eq!(
        neutral,
        gentle.replace(Tone::Gentle.instruction(), Tone::Neutral.instruction())
    );
}

#[tokio::test]
async fn concrete_scenario_adapt_off_yields_general_blocks() {
    // Scenario: taskType "Focused Work", focus history, past completion
    // times, adaptAutomatically=false -> the three fixed-title default
    // blocks with a reasoning string indicating general guidance.
    let request = TimeBlockRequest {
        task_type: "Focused Work".to_string(),
        focus_history: "high focus 9-11am".to_string(),
        past_task_completion_times: "Mon 09:40, Tue 10:15, Thu 09:55".to_string(),
        now: Utc::now(),
        adapt_automatically: false,
        tone: None,
        mood: None,
    };

    let response = suggest_time_blocks(&FailingProvider, &request).await;
    let titles: Vec<&str> = response.blocks.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, REQUIRED_BLOCK_TITLES);
    assert!(response.reasoning.contains("general"));
}

#[tokio::test]
async fn memory_tips_fetch_is_static_and_non_empty() {
    let response = fetch_memory_tips();
    assert!(!response.tips.is_empty());
    assert!(response.tips.iter().all(|t| !t.is_empty()));
    assert_eq!(response.source, SuggestionSource::Fallback);
}

#[tokio::test]
async fn hub_refresh_all_populates_every_card() {
    let hub = SuggestionHub::new(Arc::new(FailingProvider));
    hub.refresh_all(time_block_request(), reminder_request(), break_request())
        .await;

    // Every kind resolved independently: fallbacks for the infallible
    // kinds, an error indicator for the break card.
    let blocks = hub.latest_time_blocks().unwrap();
    assert_eq!(blocks.blocks.len(), 3);
    let reminders = hub.latest_reminders().unwrap();
    assert!(!reminders.reminders.is_empty());
    assert!(matches!(hub.latest_break(), Some(BreakCard::Unavailable(_))));
    assert!(hub.latest_memory_tips().is_some());
}

proptest! {
    /// For all valid requests, the time-block flow returns exactly three
    /// blocks with the fixed titles -- success or fallback.
    #[test]
    fn time_blocks_invariant_holds_for_all_valid_requests(
        task_type in "[a-zA-Z ]{1,30}",
        focus_history in "[a-zA-Z0-9 :-]{1,60}",
        past_times in "[a-zA-Z0-9 :,]{1,60}",
        adapt in any::<bool>(),
        tone_idx in 0usize..3,
        use_failing in any::<bool>(),
    ) {
        prop_assume!(!task_type.trim().is_empty());
        prop_assume!(!focus_history.trim().is_empty());
        prop_assume!(!past_times.trim().is_empty());

        let rt = tokio::runtime::Runtime::new().unwrap();
        let tones = [Tone::Motivational, Tone::Neutral, Tone::Gentle];
        let request = TimeBlockRequest {
            task_type,
            focus_history,
            past_task_completion_times: past_times,
            now: Utc::now(),
            adapt_automatically: adapt,
            tone: Some(tones[tone_idx]),
            mood: None,
        };

        let response = rt.block_on(async {
            if use_failing {
                suggest_time_blocks(&FailingProvider, &request).await
            } else {
                suggest_time_blocks(&StaticProvider(valid_blocks_reply()), &request).await
            }
        });

        let titles: Vec<&str> = response.blocks.iter().map(|b| b.title.as_str()).collect();
        prop_assert_eq!(titles, REQUIRED_BLOCK_TITLES);
        prop_assert!(!response.reasoning.is_empty());
    }

    /// For all requests, the reminder flow stays within 1-3 non-empty
    /// reminders plus non-empty reasoning.
    #[test]
    fn reminders_invariant_holds_for_all_requests(
        history in "[a-zA-Z ]{1,40}",
        upcoming in "[a-zA-Z ;]{1,40}",
        reminder_count in 0usize..6,
    ) {
        prop_assume!(!history.trim().is_empty());
        prop_assume!(!upcoming.trim().is_empty());

        let rt = tokio::runtime::Runtime::new().unwrap();
        let reminders: Vec<String> =
            (0..reminder_count).map(|i| format!("Reminder {i}")).collect();
        let provider = StaticProvider(json!({
            "reminders": reminders,
            "reasoning": "generated"
        }));
        let request = ReminderRequest {
            task_history: history,
            upcoming_tasks: upcoming,
            now: Utc::now(),
            tone: None,
            mood: None,
        };

        let response = rt.block_on(suggest_reminders(&provider, &request));
        prop_assert!((1..=3).contains(&response.reminders.len()));
        prop_assert!(response.reminders.iter().all(|r| !r.is_empty()));
        prop_assert!(!response.reasoning.is_empty());
    }
}
