//! Break recommendation flow.
//!
//! Produces a (recommendation, technique, reasoning) triple. Unlike the
//! other kinds there is no fallback synthesis: any well-typed triple from
//! the service is accepted, and on failure the typed error is surfaced to
//! the caller, who decides how to present the unavailable card.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::warn;

use super::renderer::{engine, inject_tone_instruction};
use super::schema::{DefaultValue, FieldSpec, FieldType, Schema};
use super::{SuggestionKind, Tone, TONE_VALUES};
use crate::context;
use crate::error::{CoreError, GenerationError};
use crate::llm::GenerationProvider;
use crate::store::AppState;

/// Input contract for the break flow.
pub static BREAK_SCHEMA: Schema = Schema {
    name: "break_rec",
    fields: &[
        FieldSpec {
            name: "focus_summary",
            ty: FieldType::String,
            required: true,
            default: None,
        },
        FieldSpec {
            name: "minutes_since_break",
            ty: FieldType::String,
            required: false,
            default: Some(DefaultValue::Str("unknown")),
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

/// Request for a break recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakRequest {
    pub focus_summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes_since_break: Option<String>,
    pub now: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
}

impl BreakRequest {
    /// Build a request from application state using the context builders.
    pub fn from_state(state: &AppState, now: DateTime<Utc>) -> Self {
        Self {
            focus_summary: context::focus_pattern_summary(state),
            minutes_since_break: context::minutes_since_last_completion(state, now)
                .map(|m| m.to_string()),
            now,
            tone: None,
            mood: None,
        }
    }
}

/// An accepted break recommendation triple.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakRecommendation {
    pub break_recommendation: String,
    pub technique: String,
    pub reasoning: String,
}

fn output_schema() -> Value {
    json!({
        "type": "object",
        "required": ["break_recommendation", "technique", "reasoning"],
        "properties": {
            "break_recommendation": { "type": "string" },
            "technique": { "type": "string" },
            "reasoning": { "type": "string" }
        }
    })
}

/// Apply the acceptance rule: a well-typed triple of non-empty strings.
fn accept(value: Value) -> Result<BreakRecommendation, GenerationError> {
    let rec: BreakRecommendation = serde_json::from_value(value)
        .map_err(|e| GenerationError::MalformedOutput(e.to_string()))?;

    if rec.break_recommendation.is_empty() || rec.technique.is_empty() || rec.reasoning.is_empty()
    {
        return Err(GenerationError::MalformedOutput(
            "empty field in break recommendation".to_string(),
        ));
    }
    Ok(rec)
}

fn prepare_data(request: &BreakRequest) -> Result<Map<String, Value>, CoreError> {
    let raw = serde_json::to_value(request)?;
    let mut data = super::schema::validate(&raw, &BREAK_SCHEMA)?;
    inject_tone_instruction(&mut data);
    Ok(data)
}

/// Run the break recommendation flow.
///
/// # Errors
///
/// Surfaces validation, service, and output-contract errors to the
/// caller; no static content is synthesized for this kind.
pub async fn suggest_break(
    provider: &dyn GenerationProvider,
    request: &BreakRequest,
) -> Result<BreakRecommendation, CoreError> {
    let kind = SuggestionKind::BreakRecommendation.as_str();

    let data = prepare_data(request).inspect_err(|e| {
        warn!(kind, error = %e, "request failed validation");
    })?;

    let prompt = engine().break_rec(&data).inspect_err(|e| {
        warn!(kind, error = %e, "prompt rendering failed");
    })?;

    let value = provider
        .generate(&prompt, &output_schema())
        .await
        .inspect_err(|e| {
            warn!(kind, error = %e, "generation call failed");
        })?;

    let rec = accept(value).inspect_err(|e| {
        warn!(kind, error = %e, "output rejected");
    })?;

    Ok(rec)
}
