//! # Enchant from the command line
//!
//! Reads the selected model and API keys from the environment, then enhances
//! one idea in the requested mode.
//!
//! ```bash
//! export GEMINI_API_KEY=…              # or OPENAI_API_KEY / ANTHROPIC_API_KEY / GROQ_API_KEY
//! export ENCHANTER_MODEL=gemini-2.5-flash   # optional
//! cargo run -p enchanter --example enchant -- image "cat in space"
//! ```
//!
//! Set `RUST_LOG=enchanter=debug,enchanter_providers=debug` to watch the
//! dispatch.

use anyhow::Context as _;
use enchanter::{Enchanter, Mode, Settings, model};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let mode: Mode = match args.next() {
        Some(raw) => raw.parse()?,
        None => Mode::default(),
    };
    let input = args.collect::<Vec<_>>().join(" ");
    let input = if input.is_empty() {
        "a lighthouse at dusk".to_owned()
    } else {
        input
    };

    let settings = Settings::from_env();
    let selected = model::resolve(&settings.selected_model_id)?;
    println!("Model: {} ({})", selected.display_name, selected.provider);
    println!("Mode:  {} - {}", mode.label(), mode.description());

    let enchanter = Enchanter::with_default_providers()?;
    let record = enchanter
        .enchant_to_record(&settings.request(input, mode))
        .await
        .context("enchant failed")?;

    println!();
    println!("{}", record.enhanced);
    println!();
    println!("Why: {}", record.explanation);
    println!("Tags: {}", record.tags.join(", "));

    Ok(())
}
