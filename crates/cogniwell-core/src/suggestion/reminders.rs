//! Contextual reminder flow.
//!
//! Produces between one and three reminder strings plus a reasoning
//! string. A generated response is accepted only if every reminder and
//! the reasoning are non-empty; anything else falls back to the single
//! standing reminder. The flow is total.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::warn;

use super::defaults::{
    DEFAULT_REMINDER, REMINDERS_MALFORMED_REASONING, REMINDERS_SERVICE_ERROR_REASONING,
};
use super::renderer::{engine, inject_tone_instruction};
use super::schema::{DefaultValue, FieldSpec, FieldType, Schema};
use super::{SuggestionKind, SuggestionSource, Tone, TONE_VALUES};
use crate::context;
use crate::error::CoreError;
use crate::llm::GenerationProvider;
use crate::store::AppState;

/// Maximum number of reminders in an accepted response.
pub const MAX_REMINDERS: usize = 3;

/// Input contract for the reminder flow.
pub static REMINDERS_SCHEMA: Schema = Schema {
    name: "reminders",
    fields: &[
        FieldSpec {
            name: "task_history",
            ty: FieldType::String,
            required: true,
            default: None,
        },
        FieldSpec {
            name: "upcoming_tasks",
            ty: FieldType::String,
            required: true,
            default: None,
        },
        FieldSpec {
            name: "now",
            ty: FieldType::String,
            required: true,
            default: None,
        },
        FieldSpec {
            name: "tone",
            ty: FieldType::Enum(TONE_VALUES),
            required: false,
            default: Some(DefaultValue::Str("neutral")),
        },
        FieldSpec {
            name: "mood",
            ty: FieldType::String,
            required: false,
            default: None,
        },
    ],
};

/// Request for contextual reminders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderRequest {
    pub task_history: String,
    pub upcoming_tasks: String,
    pub now: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
}

impl ReminderRequest {
    /// Build a request from application state using the context builders.
    pub fn from_state(state: &AppState, now: DateTime<Utc>) -> Self {
        let open = state.open_tasks();
        let upcoming_tasks = if open.is_empty() {
            "No open tasks.".to_string()
        } else {
            open.iter()
                .take(5)
                .map(|t| t.title.as_str())
                .collect::<Vec<_>>()
                .join("; ")
        };

        Self {
            task_history: context::task_history_summary(state),
            upcoming_tasks,
            now,
            tone: None,
            mood: None,
        }
    }
}

/// Response of the reminder flow: 1-3 reminders plus reasoning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderResponse {
    pub reminders: Vec<String>,
    pub reasoning: String,
    pub source: SuggestionSource,
}

fn fallback(reasoning: &str) -> ReminderResponse {
    ReminderResponse {
        reminders: vec![DEFAULT_REMINDER.to_string()],
        reasoning: reasoning.to_string(),
        source: SuggestionSource::Fallback,
    }
}

fn output_schema() -> Value {
    json!({
        "type": "object",
        "required": ["reminders", "reasoning"],
        "properties": {
            "reminders": {
                "type": "array",
                "minItems": 1,
                "maxItems": MAX_REMINDERS,
                "items": { "type": "string" }
            },
            "reasoning": { "type": "string" }
        }
    })
}

/// Apply the acceptance rule: 1-3 non-empty reminders, non-empty reasoning.
fn accept(value: Value) -> Result<(Vec<String>, String), CoreError> {
    #[derive(Deserialize)]
    struct RawResponse {
        reminders: Vec<String>,
        reasoning: String,
    }

    let raw: RawResponse = serde_json::from_value(value)?;

    if raw.reminders.is_empty() || raw.reminders.len() > MAX_REMINDERS {
        return Err(CoreError::Custom(format!(
            "expected 1-{MAX_REMINDERS} reminders, got {}",
            raw.reminders.len()
        )));
    }
    if raw.reminders.iter().any(|r| r.is_empty()) {
        return Err(CoreError::Custom("empty reminder string".to_string()));
    }
    if raw.reasoning.is_empty() {
        return Err(CoreError::Custom("empty reasoning".to_string()));
    }

    Ok((raw.reminders, raw.reasoning))
}

fn prepare_data(request: &ReminderRequest) -> Result<Map<String, Value>, CoreError> {
    let raw = serde_json::to_value(request)?;
    let mut data = super::schema::validate(&raw, &REMINDERS_SCHEMA)?;
    inject_tone_instruction(&mut data);
    Ok(data)
}

/// Run the reminder flow.
///
/// Never fails: every error path degrades to the single standing
/// reminder with a fixed reasoning string.
pub async fn suggest_reminders(
    provider: &dyn GenerationProvider,
    request: &ReminderRequest,
) -> ReminderResponse {
    let kind = SuggestionKind::Reminders.as_str();

    let data = match prepare_data(request) {
        Ok(data) => data,
        Err(e) => {
            warn!(kind, error = %e, "request failed validation");
            return fallback(REMINDERS_MALFORMED_REASONING);
        }
    };

    let prompt = match engine().reminders(&data) {
        Ok(prompt) => prompt,
        Err(e) => {
            warn!(kind, error = %e, "prompt rendering failed");
            return fallback(REMINDERS_MALFORMED_REASONING);
        }
    };

    match provider.generate(&prompt, &output_schema()).await {
        Ok(value) => match accept(value) {
            Ok((reminders, reasoning)) => ReminderResponse {
                reminders,
                reasoning,
                source: SuggestionSource::Generated,
            },
            Err(e) => {
                warn!(kind, error = %e, "output rejected");
                fallback(REMINDERS_MALFORMED_REASONING)
            }
        },
        Err(e) => {
            warn!(kind, error = %e, "generation call failed");
            fallback(REMINDERS_SERVICE_ERROR_REASONING)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_allows_one_to_three() {
        for n in 1..=3 {
            let reminders: Vec<String> = (0..n).map(|i| format!("Reminder {i}")).collect();
            let value = json!({"reminders": reminders, "reasoning": "ok"});
            let (out, _) = accept(value).unwrap();
            assert_eq!(out.len(), n);
        }
    }

    #[test]
    fn accept_rejects_empty_and_overfull_lists() {
        assert!(accept(json!({"reminders": [], "reasoning": "ok"})).is_err());
        assert!(accept(json!({
            "reminders": ["a", "b", "c", "d"],
            "reasoning": "ok"
        }))
        .is_err());
    }

    #[test]
    fn accept_rejects_empty_strings() {
        assert!(accept(json!({"reminders": ["fine", ""], "reasoning": "ok"})).is_err());
        assert!(accept(json!({"reminders": ["fine"], "reasoning": ""})).is_err());
    }

    #[test]
    fn from_state_mentions_open_tasks() {
        let mut state = AppState::default();
        state.add_task(crate::task::Task::new("Water the plants"));
        let request = ReminderRequest::from_state(&state, Utc::now());
        assert!(request.upcoming_tasks.contains("Water the plants"));
        assert!(!request.task_history.is_empty());
    }
}
