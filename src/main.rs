//! `inline-scripture` - expand scripture citations in a text file.
//!
//! Usage:
//!   `cargo run -- <notes.md>`          print the expanded document as HTML
//!   `cargo run -- <notes.md> --json`   print each citation and its outcome
//!
//! Chapter files are read from `$BIBLE_VAULT/$BIBLE_ROOT` (see `.env`).

use std::env;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inline_scripture::config::Config;
use inline_scripture::constants::logging::DEFAULT_FILTER;
use inline_scripture::storage::FsStore;
use inline_scripture::Processor;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = env::args().collect();
    let Some(input) = args.get(1).filter(|a| !a.starts_with("--")) else {
        eprintln!("Usage: {} <file> [--json]", args.first().map_or("inline-scripture", String::as_str));
        std::process::exit(1);
    };
    let json = args.iter().any(|a| a == "--json");

    let config = Config::load()?;
    tracing::debug!("{} {} reading from {}", config.app_name(), config.app_version(), config.vault_path.display());

    let text = tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("Failed to read {input}"))?;

    let processor = Processor::from_config(FsStore::new(&config.vault_path), &config);
    processor.on_load();
    let (html, expansions) = processor.render_text(&text).await;
    processor.on_unload();

    if json {
        println!("{}", serde_json::to_string_pretty(&expansions)?);
    } else {
        println!("{html}");
    }

    Ok(())
}
