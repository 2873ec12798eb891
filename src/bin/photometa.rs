// photometa - batch metadata extraction CLI
// Runs every registered extractor over the given image files and prints the
// resulting metadata collections.

use anyhow::{Context, Result};
use clap::Parser;
use photometa::{ExtractionManager, MissingExtractorPolicy};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "photometa", version, about = "Extract EXIF/IPTC metadata from image files")]
struct Args {
    /// Image files to process
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Print the full metadata collections as JSON
    #[arg(long)]
    json: bool,

    /// Treat a file whose media type matches no extractor as a failure
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let policy = if args.strict {
        MissingExtractorPolicy::Fail
    } else {
        MissingExtractorPolicy::ReturnPartial
    };
    let manager = ExtractionManager::new().with_policy(policy);

    let mut skipped = 0usize;
    for path in &args.paths {
        match manager.extract_from_path(path) {
            Ok(collection) => {
                if args.json {
                    let json = serde_json::to_string_pretty(&collection)
                        .context("Failed to serialize metadata collection")?;
                    println!("{json}");
                } else {
                    let domains: Vec<String> = collection
                        .iter()
                        .map(|(domain, record)| format!("{domain}({} fields)", record.len()))
                        .collect();
                    println!("{}: {}", path.display(), domains.join(", "));
                }
            }
            Err(error) => {
                eprintln!("{}: {error}", path.display());
                skipped += 1;
            }
        }
    }

    println!(
        "\nFinished extraction. {} file(s) processed, {} skipped.",
        args.paths.len() - skipped,
        skipped
    );

    Ok(())
}
