//! Task-time suggestion flow.
//!
//! Produces exactly three labeled time blocks for the day. The acceptance
//! rule is strict: a generated plan is used only if it contains exactly
//! three blocks whose titles match the fixed required set; anything else
//! falls back to the static default plan. The flow is total -- every
//! invocation terminates in a usable three-block response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::warn;

use super::defaults::{
    default_time_blocks, REQUIRED_BLOCK_TITLES, TIME_BLOCKS_GENERAL_REASONING,
    TIME_BLOCKS_MALFORMED_REASONING, TIME_BLOCKS_SERVICE_ERROR_REASONING,
};
use super::renderer::{engine, inject_tone_instruction};
use super::schema::{DefaultValue, FieldSpec, FieldType, Schema};
use super::{SuggestionKind, SuggestionSource, Tone, TONE_VALUES};
use crate::error::CoreError;
use crate::llm::GenerationProvider;
use crate::store::AppState;
use crate::{context, task::TaskType};

/// Input contract for the time-block flow.
pub static TIME_BLOCKS_SCHEMA: Schema = Schema {
    name: "time_blocks",
    fields: &[
        FieldSpec {
            name: "task_type",
            ty: FieldType::String,
            required: true,
            default: None,
        },
        FieldSpec {
            name: "focus_history",
            ty: FieldType::String,
            required: true,
            default: None,
        },
        FieldSpec {
            name: "past_task_completion_times",
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
            name: "adapt_automatically",
            ty: FieldType::Bool,
            required: false,
            default: Some(DefaultValue::Bool(true)),
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

/// Request for a three-block day plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeBlockRequest {
    pub task_type: String,
    pub focus_history: String,
    pub past_task_completion_times: String,
    pub now: DateTime<Utc>,
    pub adapt_automatically: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
}

impl TimeBlockRequest {
    /// Build a request from application state using the context builders.
    pub fn from_state(state: &AppState, task_type: TaskType, now: DateTime<Utc>) -> Self {
        Self {
            task_type: task_type.name().to_string(),
            focus_history: context::focus_pattern_summary(state),
            past_task_completion_times: context::past_completion_times(state),
            now,
            adapt_automatically: true,
            tone: None,
            mood: None,
        }
    }
}

/// One labeled time block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeBlock {
    pub title: String,
    pub window: String,
    pub activity: String,
}

/// Response of the time-block flow: always exactly three blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeBlockResponse {
    pub blocks: Vec<TimeBlock>,
    pub reasoning: String,
    pub source: SuggestionSource,
}

fn fallback(reasoning: &str) -> TimeBlockResponse {
    TimeBlockResponse {
        blocks: default_time_blocks(),
        reasoning: reasoning.to_string(),
        source: SuggestionSource::Fallback,
    }
}

/// JSON schema handed to the generation service.
fn output_schema() -> Value {
    json!({
        "type": "object",
        "required": ["blocks", "reasoning"],
        "properties": {
            "blocks": {
                "type": "array",
                "minItems": 3,
                "maxItems": 3,
                "items": {
                    "type": "object",
                    "required": ["title", "window", "activity"],
                    "properties": {
                        "title": { "type": "string", "enum": REQUIRED_BLOCK_TITLES },
                        "window": { "type": "string" },
                        "activity": { "type": "string" }
                    }
                }
            },
            "reasoning": { "type": "string" }
        }
    })
}

/// Apply the acceptance rule to raw service output.
///
/// Exactly three blocks, titles covering the required set, all strings
/// non-empty. Returns the blocks in canonical order plus the reasoning.
fn accept(value: Value) -> Result<(Vec<TimeBlock>, String), CoreError> {
    #[derive(Deserialize)]
    struct RawResponse {
        blocks: Vec<TimeBlock>,
        reasoning: String,
    }

    let raw: RawResponse = serde_json::from_value(value)?;

    if raw.blocks.len() != REQUIRED_BLOCK_TITLES.len() {
        return Err(CoreError::Custom(format!(
            "expected exactly {} blocks, got {}",
            REQUIRED_BLOCK_TITLES.len(),
            raw.blocks.len()
        )));
    }

    let mut ordered = Vec::with_capacity(REQUIRED_BLOCK_TITLES.len());
    for title in REQUIRED_BLOCK_TITLES {
        let block = raw
            .blocks
            .iter()
            .find(|b| b.title == title)
            .ok_or_else(|| CoreError::Custom(format!("missing required block '{title}'")))?;
        if block.window.is_empty() || block.activity.is_empty() {
            return Err(CoreError::Custom(format!(
                "block '{title}' has an empty field"
            )));
        }
        ordered.push(block.clone());
    }

    if raw.reasoning.is_empty() {
        return Err(CoreError::Custom("empty reasoning".to_string()));
    }

    Ok((ordered, raw.reasoning))
}

fn prepare_data(request: &TimeBlockRequest) -> Result<Map<String, Value>, CoreError> {
    let raw = serde_json::to_value(request)?;
    let mut data = super::schema::validate(&raw, &TIME_BLOCKS_SCHEMA)?;
    inject_tone_instruction(&mut data);
    Ok(data)
}

/// Run the task-time suggestion flow.
///
/// Never fails: every error path degrades to the static three-block
/// default with a reasoning string that names the general plan.
pub async fn suggest_time_blocks(
    provider: &dyn GenerationProvider,
    request: &TimeBlockRequest,
) -> TimeBlockResponse {
    let kind = SuggestionKind::TimeBlocks.as_str();

    let data = match prepare_data(request) {
        Ok(data) => data,
        Err(e) => {
            warn!(kind, error = %e, "request failed validation");
            return fallback(TIME_BLOCKS_GENERAL_REASONING);
        }
    };

    // Personalization off: the caller asked for general guidance, so no
    // external call is made at all.
    if !request.adapt_automatically {
        return fallback(TIME_BLOCKS_GENERAL_REASONING);
    }

    let prompt = match engine().time_blocks(&data) {
        Ok(prompt) => prompt,
        Err(e) => {
            warn!(kind, error = %e, "prompt rendering failed");
            return fallback(TIME_BLOCKS_GENERAL_REASONING);
        }
    };

    match provider.generate(&prompt, &output_schema()).await {
        Ok(value) => match accept(value) {
            Ok((blocks, reasoning)) => TimeBlockResponse {
                blocks,
                reasoning,
                source: SuggestionSource::Generated,
            },
            Err(e) => {
                warn!(kind, error = %e, "output rejected");
                fallback(TIME_BLOCKS_MALFORMED_REASONING)
            }
        },
        Err(e) => {
            warn!(kind, error = %e, "generation call failed");
            fallback(TIME_BLOCKS_SERVICE_ERROR_REASONING)
        }
    }
}
