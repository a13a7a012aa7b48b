//! Generation service boundary.
//!
//! The suggestion flows talk to exactly one interface:
//! [`GenerationProvider`]. The production implementation is an
//! OpenAI-compatible chat-completions client; tests substitute scripted
//! providers. Each call is a single best-effort attempt -- no retry, no
//! backoff, no cancellation.

pub mod openai;

pub use openai::OpenAiClient;

use async_trait::async_trait;

use crate::error::GenerationError;

/// External prompt-execution boundary.
///
/// Implementations receive a fully rendered prompt plus the JSON schema
/// the output must satisfy, and return either a schema-conformant JSON
/// value or a [`GenerationError`]. Shape enforcement beyond basic JSON
/// parsing is the caller's job (each flow applies its own acceptance
/// rule).
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Execute the prompt and return the parsed JSON output.
    async fn generate(
        &self,
        prompt: &str,
        output_schema: &serde_json::Value,
    ) -> Result<serde_json::Value, GenerationError>;
}

/// Thin wrapper around the OS keyring for credential storage.
pub mod keyring_store {
    const SERVICE: &str = "cogniwell";

    pub fn get(key: &str) -> Result<Option<String>, Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.get_password() {
            Ok(pw) => Ok(Some(pw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn set(key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        entry.set_password(value)?;
        Ok(())
    }

    pub fn delete(key: &str) -> Result<(), Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
