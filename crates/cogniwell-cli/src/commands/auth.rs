//! Generation service credential commands.
//!
//! The API key lives in the OS keyring, never in the config file.

use clap::Subcommand;
use std::io::Write;

use cogniwell_core::llm::{keyring_store, openai::API_KEY_ENTRY};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Store the generation service API key
    SetKey {
        /// API key; prompts on stdin when omitted
        key: Option<String>,
    },
    /// Show whether a key is stored
    Status,
    /// Remove the stored key
    Clear,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AuthAction::SetKey { key } => {
            let key = match key {
                Some(key) => key,
                None => {
                    print!("API key: ");
                    std::io::stdout().flush()?;
                    let mut line = String::new();
                    std::io::stdin().read_line(&mut line)?;
                    line.trim().to_string()
                }
            };
            if key.is_empty() {
                return Err("API key is empty".into());
            }
            keyring_store::set(API_KEY_ENTRY, &key)?;
            println!("API key stored in the OS keyring.");
        }
        AuthAction::Status => match keyring_store::get(API_KEY_ENTRY)? {
            Some(_) => println!("Generation service: key stored"),
            None => println!("Generation service: no key stored"),
        },
        AuthAction::Clear => {
            keyring_store::delete(API_KEY_ENTRY)?;
            println!("API key removed.");
        }
    }
    Ok(())
}
