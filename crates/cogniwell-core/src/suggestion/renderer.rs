//! Prompt rendering.
//!
//! A single [`PromptEngine`] registers every suggestion template once and
//! renders them with validated request data. Rendering is deterministic
//! and side-effect free: the same data always yields the same string.

use handlebars::Handlebars;
use serde_json::{Map, Value};
use std::sync::OnceLock;

use super::templates;
use super::Tone;
use crate::error::CoreError;

/// Prompt engine holding the registered suggestion templates.
pub struct PromptEngine {
    handlebars: Handlebars<'static>,
}

impl PromptEngine {
    /// Create a new engine with all templates registered.
    ///
    /// # Errors
    ///
    /// Returns an error if any template fails to parse.
    pub fn new() -> Result<Self, CoreError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);

        handlebars
            .register_template_string("time_blocks", templates::TIME_BLOCKS_TEMPLATE)
            .map_err(|e| CoreError::Custom(format!("template 'time_blocks': {e}")))?;
        handlebars
            .register_template_string("reminders", templates::REMINDERS_TEMPLATE)
            .map_err(|e| CoreError::Custom(format!("template 'reminders': {e}")))?;
        handlebars
            .register_template_string("break_rec", templates::BREAK_TEMPLATE)
            .map_err(|e| CoreError::Custom(format!("template 'break_rec': {e}")))?;
        handlebars
            .register_template_string("memory_tips", templates::MEMORY_TIPS_TEMPLATE)
            .map_err(|e| CoreError::Custom(format!("template 'memory_tips': {e}")))?;

        Ok(Self { handlebars })
    }

    /// Render a registered template with the given data.
    ///
    /// # Errors
    ///
    /// Returns an error if the template name is unknown or rendering fails.
    pub fn render(&self, template_name: &str, data: &Map<String, Value>) -> Result<String, CoreError> {
        self.handlebars
            .render(template_name, data)
            .map_err(|e| CoreError::Custom(format!("render '{template_name}': {e}")))
    }

    /// Render the time-block suggestion prompt.
    pub fn time_blocks(&self, data: &Map<String, Value>) -> Result<String, CoreError> {
        self.render("time_blocks", data)
    }

    /// Render the reminders prompt.
    pub fn reminders(&self, data: &Map<String, Value>) -> Result<String, CoreError> {
        self.render("reminders", data)
    }

    /// Render the break recommendation prompt.
    pub fn break_rec(&self, data: &Map<String, Value>) -> Result<String, CoreError> {
        self.render("break_rec", data)
    }

    /// Render the memory tips prompt.
    pub fn memory_tips(&self, data: &Map<String, Value>) -> Result<String, CoreError> {
        self.render("memory_tips", data)
    }
}

impl Default for PromptEngine {
    fn default() -> Self {
        Self::new().expect("Failed to create prompt engine")
    }
}

/// Shared engine instance; templates are static so one registration
/// serves every flow.
pub fn engine() -> &'static PromptEngine {
    static ENGINE: OnceLock<PromptEngine> = OnceLock::new();
    ENGINE.get_or_init(PromptEngine::default)
}

/// Replace the validated `tone` string with its instruction clause.
///
/// The templates reference `{{tone_instruction}}` only, so the clause is
/// the single point where tone affects the rendered prompt.
pub fn inject_tone_instruction(data: &mut Map<String, Value>) {
    let tone = data
        .get("tone")
        .and_then(|v| v.as_str())
        .and_then(Tone::parse)
        .unwrap_or_default();
    data.remove("tone");
    data.insert(
        "tone_instruction".to_string(),
        Value::String(tone.instruction().to_string()),
    );
}
