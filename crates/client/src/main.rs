//! Terminal entry point for trying abilities out.
//!
//! Loads a character, a location and the ability content, lists what the
//! character may use and attempts whatever letter is typed. Settings come from
//! the environment (see [`talent_client::ClientConfig`]).
//!
//! ```bash
//! TALENT_CHARACTER=ru_tengu TALENT_WORLD=silenced cargo run -p talent-client
//! ```

use anyhow::Result;
use talent_client::ClientConfig;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env();
    tracing::info!(
        character = %config.character,
        world = %config.world,
        "starting talent session"
    );

    talent_client::run(config)
}
