use crate::index::{InvertedIndex, SourceArticle};
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Write the index artifact as pretty-printed JSON. Map entry order is
/// ingestion order, so the artifact round-trips the ordering that ranked
/// tie-breaking depends on.
pub fn save_index(path: &Path, index: &InvertedIndex) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), index)
        .with_context(|| format!("writing index to {}", path.display()))?;
    tracing::info!(path = %path.display(), "index saved");
    Ok(())
}

/// Load a previously persisted index artifact. A file that exists but does
/// not parse is a fatal ingestion failure; callers decide what a missing file
/// means (the indexer rebuilds, the server refuses to start).
pub fn load_index(path: &Path) -> Result<InvertedIndex> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut index: InvertedIndex = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing index artifact {}", path.display()))?;
    index.assign_ordinals();
    tracing::info!(
        path = %path.display(),
        num_docs = index.num_docs(),
        num_terms = index.tokens.len(),
        "index loaded"
    );
    Ok(index)
}

/// Parse one corpus file. Malformed JSON is fatal, surfaced with the file
/// name attached.
pub fn read_article(path: &Path) -> Result<SourceArticle> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing article {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn corrupt_artifact_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        let mut f = File::create(&path).unwrap();
        f.write_all(b"{ not json").unwrap();
        assert!(load_index(&path).is_err());
    }
}
