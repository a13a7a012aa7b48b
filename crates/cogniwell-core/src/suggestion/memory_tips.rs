//! Memory tip flow.
//!
//! Two public entry points. [`fetch_memory_tips`] returns the curated
//! static list without touching the generation service -- the behavior
//! the application ships with. [`generate_memory_tips`] is the full
//! validate -> render -> generate -> accept path implied by the kind's
//! schema, kept alongside so the contract survives; it degrades to the
//! same curated list on any failure.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::warn;

use super::defaults::{
    default_memory_tips, MEMORY_TIPS_MALFORMED_REASONING, MEMORY_TIPS_SERVICE_ERROR_REASONING,
    MEMORY_TIPS_STATIC_REASONING,
};
use super::renderer::{engine, inject_tone_instruction};
use super::schema::{DefaultValue, FieldSpec, FieldType, Schema};
use super::{SuggestionKind, SuggestionSource, Tone, TONE_VALUES};
use crate::error::CoreError;
use crate::llm::GenerationProvider;
use crate::store::AppState;

/// Input contract for the memory-tip flow.
pub static MEMORY_TIPS_SCHEMA: Schema = Schema {
    name: "memory_tips",
    fields: &[
        FieldSpec {
            name: "cognitive_mode",
            ty: FieldType::String,
            required: true,
            default: None,
        },
        FieldSpec {
            name: "topic",
            ty: FieldType::String,
            required: false,
            default: None,
        },
        FieldSpec {
            name: "tone",
            ty: FieldType::Enum(TONE_VALUES),
            required: false,
            default: Some(DefaultValue::Str("neutral")),
        },
    ],
};

/// Request for memory tips.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryTipsRequest {
    pub cognitive_mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
}

impl MemoryTipsRequest {
    /// Build a request from application state.
    pub fn from_state(state: &AppState) -> Self {
        let mode = match state.user_settings.cognitive_mode {
            crate::store::CognitiveMode::Standard => "standard",
            crate::store::CognitiveMode::Calm => "calm",
            crate::store::CognitiveMode::Intensive => "intensive",
        };
        Self {
            cognitive_mode: mode.to_string(),
            topic: None,
            tone: None,
        }
    }
}

/// Response of the memory-tip flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryTipsResponse {
    pub tips: Vec<String>,
    pub reasoning: String,
    pub source: SuggestionSource,
}

fn curated(reasoning: &str) -> MemoryTipsResponse {
    MemoryTipsResponse {
        tips: default_memory_tips(),
        reasoning: reasoning.to_string(),
        source: SuggestionSource::Fallback,
    }
}

/// Return the curated static tip list. No external call is made.
pub fn fetch_memory_tips() -> MemoryTipsResponse {
    curated(MEMORY_TIPS_STATIC_REASONING)
}

fn output_schema() -> Value {
    json!({
        "type": "object",
        "required": ["tips", "reasoning"],
        "properties": {
            "tips": {
                "type": "array",
                "minItems": 1,
                "items": { "type": "string" }
            },
            "reasoning": { "type": "string" }
        }
    })
}

/// Apply the acceptance rule: a non-empty list of non-empty tips plus
/// non-empty reasoning.
fn accept(value: Value) -> Result<(Vec<String>, String), CoreError> {
    #[derive(Deserialize)]
    struct RawResponse {
        tips: Vec<String>,
        reasoning: String,
    }

    let raw: RawResponse = serde_json::from_value(value)?;
    if raw.tips.is_empty() {
        return Err(CoreError::Custom("empty tip list".to_string()));
    }
    if raw.tips.iter().any(|t| t.is_empty()) {
        return Err(CoreError::Custom("empty tip string".to_string()));
    }
    if raw.reasoning.is_empty() {
        return Err(CoreError::Custom("empty reasoning".to_string()));
    }
    Ok((raw.tips, raw.reasoning))
}

fn prepare_data(request: &MemoryTipsRequest) -> Result<Map<String, Value>, CoreError> {
    let raw = serde_json::to_value(request)?;
    let mut data = super::schema::validate(&raw, &MEMORY_TIPS_SCHEMA)?;
    inject_tone_instruction(&mut data);
    Ok(data)
}

/// Run the full memory-tip generation flow.
///
/// Never fails: every error path degrades to the curated static list.
pub async fn generate_memory_tips(
    provider: &dyn GenerationProvider,
    request: &MemoryTipsRequest,
) -> MemoryTipsResponse {
    let kind = SuggestionKind::MemoryTips.as_str();

    let data = match prepare_data(request) {
        Ok(data) => data,
        Err(e) => {
            warn!(kind, error = %e, "request failed validation");
            return curated(MEMORY_TIPS_MALFORMED_REASONING);
        }
    };

    let prompt = match engine().memory_tips(&data) {
        Ok(prompt) => prompt,
        Err(e) => {
            warn!(kind, error = %e, "prompt rendering failed");
            return curated(MEMORY_TIPS_MALFORMED_REASONING);
        }
    };

    match provider.generate(&prompt, &output_schema()).await {
        Ok(value) => match accept(value) {
            Ok((tips, reasoning)) => MemoryTipsResponse {
                tips,
                reasoning,
                source: SuggestionSource::Generated,
            },
            Err(e) => {
                warn!(kind, error = %e, "output rejected");
                curated(MEMORY_TIPS_MALFORMED_REASONING)
            }
        },
        Err(e) => {
            warn!(kind, error = %e, "generation call failed");
            curated(MEMORY_TIPS_SERVICE_ERROR_REASONING)
        }
    }
}
