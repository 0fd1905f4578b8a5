//! Debug tool to print the verses parsed from one chapter file.
//!
//! Usage:
//!   `cargo run --bin dump_chapter -- <book> <chapter>`
//!   `cargo run --bin dump_chapter -- 1cor 13 --json`

use std::env;

use anyhow::{bail, Context};

use inline_scripture::bible::{normalize_book_name, parse_verses};
use inline_scripture::config::Config;
use inline_scripture::storage::{ChapterStore, FsStore};
use inline_scripture::StorageLayout;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        bail!(
            "Usage: {} <book> <chapter> [--json]",
            args.first().map_or("dump_chapter", String::as_str)
        );
    }

    let book = normalize_book_name(&args[1]);
    let chapter: u32 = args[2]
        .parse()
        .with_context(|| format!("Invalid chapter number: {}", args[2]))?;

    let config = Config::load()?;
    let path = StorageLayout::from(&config).chapter_path(&book, chapter);
    let store = FsStore::new(&config.vault_path);
    let text = store.read(&path).await?;
    let verses = parse_verses(&text);

    if args.iter().any(|a| a == "--json") {
        println!("{}", serde_json::to_string_pretty(&verses)?);
        return Ok(());
    }

    println!("=== {path} ({} verses) ===", verses.len());
    for (number, body) in verses.iter() {
        println!("{number:>3}  {}", body.replace('\n', "\n     "));
    }

    Ok(())
}
