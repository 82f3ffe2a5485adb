//! Terminal front end for the ability engine.
//!
//! A session loads content through `talent-content`, lists the character's
//! talents and attempts whatever letter the user types, answering the engine's
//! questions on the same terminal.

mod command;
mod config;
mod prompt;
mod session;

pub use command::{Command, CommandError};
pub use config::ClientConfig;
pub use prompt::LinePrompt;
pub use session::{Content, PietyPolicy, run_session};

use std::io;

use anyhow::{Context, Result};
use talent_content::ContentFactory;

/// Runs one session on stdin/stdout.
pub fn run(config: ClientConfig) -> Result<()> {
    let factory = match &config.data_dir {
        Some(dir) => ContentFactory::new(dir),
        None => ContentFactory::bundled(),
    };
    let content = Content::load(&factory, &config.world)?;
    let mut player = factory
        .load_character(&config.character)
        .with_context(|| format!("loading character '{}'", config.character))?;

    let prompt = LinePrompt::new(io::stdin().lock(), io::stdout());
    run_session(&content, &mut player, &prompt)?;

    if config.save_on_exit {
        factory.save_character(&config.character, &player)?;
        tracing::info!(character = %config.character, "character saved");
    }
    Ok(())
}
