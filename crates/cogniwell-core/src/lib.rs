//! # Cogniwell Core Library
//!
//! This library provides the core business logic for Cogniwell, a
//! personal-productivity and cognitive-wellness application. It follows a
//! CLI-first philosophy where every operation is available via a
//! standalone CLI binary, with any GUI being a thin layer over the same
//! core library.
//!
//! ## Architecture
//!
//! - **Suggestion Pipeline**: Schema-validated request/response flows
//!   around an external generation service, with static fallback content
//!   per suggestion kind
//! - **State Store**: A single JSON state document with an explicit
//!   owner and defined load/save boundaries, plus TOML-based configuration
//! - **Tasks & Workouts**: Single-user CRUD for tasks/reminders and
//!   workout logging with point accounting
//!
//! ## Key Components
//!
//! - [`SuggestionHub`]: Latest-card state with out-of-order guarding
//! - [`StateStore`]: Owner of the persisted application state
//! - [`Config`]: Application configuration management
//! - [`GenerationProvider`]: The external generation service boundary

pub mod context;
pub mod error;
pub mod llm;
pub mod store;
pub mod suggestion;
pub mod task;
pub mod workout;

pub use error::{ConfigError, CoreError, GenerationError, StoreError, ValidationError};
pub use llm::{GenerationProvider, OpenAiClient};
pub use store::{AppState, Config, StateStore};
pub use suggestion::{SuggestionHub, Tone};
pub use task::{Task, TaskState, TaskType};
pub use workout::{Intensity, WorkoutEntry};
