use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use noteseek::{Note, NoteseekConfig, SearchEngine};

/// Search a JSON file of notes for the ones closest to a query.
#[derive(Debug, Parser)]
#[command(name = "noteseek", version)]
struct Cli {
    /// JSON array of `{id, title, content, embedding?}` objects.
    #[arg(long)]
    notes: PathBuf,
    /// Optional YAML config (see `noteseek::config`).
    #[arg(long, short)]
    config: Option<PathBuf>,
    /// Override `matcher.limit`.
    #[arg(long)]
    limit: Option<usize>,
    /// Override `matcher.min_similarity`.
    #[arg(long)]
    min_similarity: Option<f32>,
    /// Emit logs as JSON lines.
    #[arg(long)]
    json_logs: bool,
    query: String,
}

#[derive(Debug, Serialize)]
struct SearchHit<'a> {
    id: u64,
    title: &'a str,
    similarity: f32,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let mut cfg = match &cli.config {
        Some(path) => NoteseekConfig::from_file(path)?,
        None => NoteseekConfig::default(),
    };
    if let Some(limit) = cli.limit {
        cfg.matcher.limit = limit;
    }
    if let Some(min_similarity) = cli.min_similarity {
        cfg.matcher.min_similarity = min_similarity;
    }

    let engine = SearchEngine::from_config(&cfg)?;

    let mut notes: Vec<Note> = serde_json::from_str(&fs::read_to_string(&cli.notes)?)?;
    engine.backfill(&mut notes);
    let candidates: Vec<_> = notes.iter().map(Note::to_candidate).collect();

    let result = engine.search(&cli.query, &candidates)?;
    if result.fallback_applied {
        tracing::info!("no note met the similarity threshold; showing closest matches");
    }

    let hits: Vec<SearchHit<'_>> = result
        .iter()
        .filter_map(|hit| {
            notes.iter().find(|n| n.id == hit.id).map(|note| SearchHit {
                id: note.id,
                title: &note.title,
                similarity: hit.score,
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&hits)?);

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
