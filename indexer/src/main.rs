use anyhow::Result;
use clap::{Parser, Subcommand};
use timtin_core::persist::{load_index, read_article, save_index};
use timtin_core::{InvertedIndex, SourceArticle};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build the news article inverted index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from a directory of article JSON files
    Build {
        /// Directory containing one JSON object per article
        #[arg(long)]
        corpus: String,
        /// Output path for the index artifact
        #[arg(long, default_value = "./inverted_index.json")]
        output: String,
        /// Ignore an existing artifact and rebuild from the corpus
        #[arg(long, default_value_t = false)]
        rebuild: bool,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { corpus, output, rebuild } => {
            build_index(Path::new(&corpus), Path::new(&output), rebuild)
        }
    }
}

fn build_index(corpus: &Path, output: &Path, rebuild: bool) -> Result<()> {
    // Building is idempotent: an existing artifact is loaded, not rebuilt.
    if output.exists() && !rebuild {
        tracing::info!(path = %output.display(), "artifact exists, loading instead of rebuilding");
        load_index(output)?;
        return Ok(());
    }

    let articles = read_corpus(corpus)?;
    tracing::info!(num_articles = articles.len(), corpus = %corpus.display(), "corpus read");

    let index = InvertedIndex::build(articles);
    save_index(output, &index)?;
    Ok(())
}

/// Collect every .json file under the corpus directory, in path order so the
/// ingestion sequence (and with it ranked tie-breaking) is reproducible.
fn read_corpus(corpus: &Path) -> Result<Vec<SourceArticle>> {
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(corpus).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json") {
            files.push(path.to_path_buf());
        }
    }

    let mut articles = Vec::with_capacity(files.len());
    for file in files {
        articles.push(read_article(&file)?);
    }
    Ok(articles)
}
