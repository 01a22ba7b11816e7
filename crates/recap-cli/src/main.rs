//! Recap CLI - Command-line interface
//!
//! Usage:
//!   recap parse <path>
//!   recap fields
//!
//! `parse` expects plain text already extracted from the source
//! document; converting PDFs or other formats to text is a separate
//! concern. The record is printed as JSON to stdout, one document per
//! invocation, so tabular serialization can happen downstream.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use recap_core::{AppConfig, CommentPolicy};
use recap_extractor::{ExtractionPipeline, KeywordIndex, ScanOptions};

#[derive(Parser)]
#[command(name = "recap")]
#[command(about = "Candidate-profile field extraction")]
#[command(version)]
struct Cli {
    /// Optional TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the 37-field record from a plain-text profile
    Parse {
        /// Path to the extracted profile text
        path: PathBuf,

        /// Comment policy when several sentences match one field
        /// (first-match or concat-all); overrides the config file
        #[arg(long)]
        policy: Option<String>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// List the schema fields and their extraction rules
    Fields,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?.with_env_override()?,
        None => AppConfig::from_env()?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.level)
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Commands::Parse {
            path,
            policy,
            pretty,
        } => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading profile text from {}", path.display()))?;

            let comment_policy = match policy {
                Some(p) => p.parse::<CommentPolicy>()?,
                None => config.pipeline.comment_policy,
            };
            debug!(?comment_policy, "running extraction");

            let pipeline =
                ExtractionPipeline::standard().with_options(ScanOptions { comment_policy });
            let record = pipeline.run(&text);

            let json = if pretty {
                serde_json::to_string_pretty(&record)?
            } else {
                serde_json::to_string(&record)?
            };
            println!("{json}");
        }
        Commands::Fields => {
            let index = KeywordIndex::standard();
            for spec in index.fields() {
                let entity = spec
                    .required_entity
                    .map(|e| format!(" [{e}]"))
                    .unwrap_or_default();
                println!(
                    "{:<20} {:<22}{} triggers: {}",
                    spec.name,
                    spec.rule.as_str(),
                    entity,
                    spec.triggers.join(", ")
                );
            }
        }
    }

    Ok(())
}
