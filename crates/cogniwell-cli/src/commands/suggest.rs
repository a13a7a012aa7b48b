//! Suggestion card commands.

use chrono::Utc;
use clap::Subcommand;

use cogniwell_core::error::GenerationError;
use cogniwell_core::llm::{GenerationProvider, OpenAiClient};
use cogniwell_core::store::{Config, StateStore};
use cogniwell_core::suggestion::{
    fetch_memory_tips, generate_memory_tips, suggest_break, suggest_reminders,
    suggest_time_blocks, BreakRequest, MemoryTipsRequest, ReminderRequest, TimeBlockRequest, Tone,
};
use cogniwell_core::task::TaskType;

#[derive(Subcommand)]
pub enum SuggestAction {
    /// Suggest three time blocks for the day
    TimeBlocks {
        /// Kind of work to plan for: focused-work, shallow-work, errand
        #[arg(long, default_value = "focused-work")]
        task_type: String,
        /// Disable personalization and use general guidance
        #[arg(long)]
        no_adapt: bool,
        /// Tone override: motivational, neutral, gentle
        #[arg(long)]
        tone: Option<String>,
        /// Current mood, included in the prompt when given
        #[arg(long)]
        mood: Option<String>,
    },
    /// Suggest contextual reminders
    Reminders {
        #[arg(long)]
        tone: Option<String>,
        #[arg(long)]
        mood: Option<String>,
    },
    /// Suggest a break
    Break {
        #[arg(long)]
        tone: Option<String>,
        #[arg(long)]
        mood: Option<String>,
    },
    /// Show memory technique tips
    MemoryTips {
        /// Call the generation service instead of the curated list
        #[arg(long)]
        generate: bool,
        /// Topic to anchor generated tips to
        #[arg(long)]
        topic: Option<String>,
        #[arg(long)]
        tone: Option<String>,
    },
}

pub fn run(action: SuggestAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SuggestAction::TimeBlocks {
            task_type,
            no_adapt,
            tone,
            mood,
        } => time_blocks(&task_type, no_adapt, tone, mood),
        SuggestAction::Reminders { tone, mood } => reminders(tone, mood),
        SuggestAction::Break { tone, mood } => break_rec(tone, mood),
        SuggestAction::MemoryTips {
            generate,
            topic,
            tone,
        } => memory_tips(generate, topic, tone),
    }
}

/// Tone resolution order: command-line flag, then the configured
/// `suggestions.default_tone`.
fn resolve_tone(flag: Option<String>) -> Result<Tone, Box<dyn std::error::Error>> {
    if let Some(s) = flag {
        return Tone::parse(&s)
            .ok_or_else(|| format!("unknown tone '{s}' (motivational, neutral, gentle)").into());
    }
    Ok(Config::load_or_default().default_tone()?)
}

fn parse_task_type(s: &str) -> Result<TaskType, Box<dyn std::error::Error>> {
    match s {
        "focused-work" => Ok(TaskType::FocusedWork),
        "shallow-work" => Ok(TaskType::ShallowWork),
        "errand" => Ok(TaskType::Errand),
        other => Err(format!("unknown task type '{other}'").into()),
    }
}

/// Build the generation provider, or a stand-in whose calls fail.
///
/// A missing API key must not abort the command: the flows degrade to
/// their static fallback content, which is the whole point of the
/// fallback design.
fn provider() -> Box<dyn GenerationProvider> {
    let config = Config::load_or_default();
    match OpenAiClient::from_keyring(&config.generation) {
        Ok(client) => Box::new(client),
        Err(e) => {
            eprintln!("warning: {e}");
            Box::new(UnconfiguredProvider)
        }
    }
}

fn time_blocks(
    task_type: &str,
    no_adapt: bool,
    tone: Option<String>,
    mood: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = StateStore::open_default()?;
    let mut request =
        TimeBlockRequest::from_state(store.state(), parse_task_type(task_type)?, Utc::now());
    request.adapt_automatically = !no_adapt;
    request.tone = Some(resolve_tone(tone)?);
    request.mood = mood;

    let client = provider();
    let rt = tokio::runtime::Runtime::new()?;
    let response = rt.block_on(suggest_time_blocks(client.as_ref(), &request));

    println!("=== Today's Time Blocks ===\n");
    for block in &response.blocks {
        println!("{:<10} {}  {}", block.title, block.window, block.activity);
    }
    println!("\nWhy: {}", response.reasoning);
    Ok(())
}

fn reminders(
    tone: Option<String>,
    mood: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = StateStore::open_default()?;
    let mut request = ReminderRequest::from_state(store.state(), Utc::now());
    request.tone = Some(resolve_tone(tone)?);
    request.mood = mood;

    let client = provider();
    let rt = tokio::runtime::Runtime::new()?;
    let response = rt.block_on(suggest_reminders(client.as_ref(), &request));

    println!("=== Reminders ===\n");
    for (i, reminder) in response.reminders.iter().enumerate() {
        println!("{}. {}", i + 1, reminder);
    }
    println!("\nWhy: {}", response.reasoning);
    Ok(())
}

fn break_rec(
    tone: Option<String>,
    mood: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = StateStore::open_default()?;
    let mut request = BreakRequest::from_state(store.state(), Utc::now());
    request.tone = Some(resolve_tone(tone)?);
    request.mood = mood;

    let client = provider();
    let rt = tokio::runtime::Runtime::new()?;
    match rt.block_on(suggest_break(client.as_ref(), &request)) {
        Ok(rec) => {
            println!("=== Break Recommendation ===\n");
            println!("{}", rec.break_recommendation);
            println!("Technique: {}", rec.technique);
            println!("\nWhy: {}", rec.reasoning);
        }
        Err(e) => {
            println!("Break suggestion unavailable: {e}");
        }
    }
    Ok(())
}

fn memory_tips(
    generate: bool,
    topic: Option<String>,
    tone: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let response = if generate {
        let store = StateStore::open_default()?;
        let mut request = MemoryTipsRequest::from_state(store.state());
        request.topic = topic;
        request.tone = Some(resolve_tone(tone)?);

        let client = provider();
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(generate_memory_tips(client.as_ref(), &request))
    } else {
        fetch_memory_tips()
    };

    println!("=== Memory Tips ===\n");
    for (i, tip) in response.tips.iter().enumerate() {
        println!("{}. {}", i + 1, tip);
    }
    println!("\n{}", response.reasoning);
    Ok(())
}

/// Provider stand-in used when no API key is configured.
struct UnconfiguredProvider;

#[async_trait::async_trait]
impl GenerationProvider for UnconfiguredProvider {
    async fn generate(
        &self,
        _prompt: &str,
        _output_schema: &serde_json::Value,
    ) -> Result<serde_json::Value, GenerationError> {
        Err(GenerationError::NotConfigured(
            "no API key stored".to_string(),
        ))
    }
}
