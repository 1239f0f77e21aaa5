use crate::tokenizer::tokenize;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub type DocId = String;

/// Per-document postings: ascending, 0-based positions into the tokenized
/// stream. Lists are created on first occurrence and are never empty.
pub type Postings = IndexMap<DocId, Vec<usize>>;

fn default_title() -> String {
    "Unknown Title".to_string()
}
fn default_author() -> String {
    "Unknown Author".to_string()
}
fn default_date() -> String {
    "Unknown Date".to_string()
}
fn default_category() -> String {
    "Uncategorized".to_string()
}

/// One corpus file as it arrives on disk. Only `post_id` is required;
/// everything else falls back to a placeholder.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceArticle {
    pub post_id: DocId,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_author")]
    pub author: String,
    #[serde(default = "default_date")]
    pub date: String,
    #[serde(default = "default_category")]
    pub category: String,
}

/// Stored article metadata, owned by the index. `ordinal` records ingestion
/// order; it is assigned at build/load time and never persisted, so the
/// on-disk artifact keeps exactly the published schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub content: String,
    pub author: String,
    pub date: String,
    pub category: String,
    pub word_count: usize,
    #[serde(skip)]
    pub ordinal: usize,
}

/// Term -> document -> positions, plus the article metadata map.
///
/// Built once, read-only afterwards. Both levels are insertion-ordered maps so
/// that a reload of the persisted artifact reproduces ingestion order, which
/// ranked-query tie-breaking depends on.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct InvertedIndex {
    pub tokens: IndexMap<String, Postings>,
    pub metadata: IndexMap<DocId, Article>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest articles in the given order. A `post_id` seen before is skipped,
    /// first occurrence wins.
    pub fn build(articles: Vec<SourceArticle>) -> Self {
        let mut index = Self::new();
        for article in articles {
            index.add_article(article);
        }
        tracing::info!(
            num_docs = index.metadata.len(),
            num_terms = index.tokens.len(),
            "index built"
        );
        index
    }

    fn add_article(&mut self, article: SourceArticle) {
        if self.metadata.contains_key(&article.post_id) {
            tracing::warn!(post_id = %article.post_id, "duplicate post_id, skipping");
            return;
        }
        let SourceArticle { post_id, content, title, author, date, category } = article;
        let ordinal = self.metadata.len();
        let word_count = content.split_whitespace().count();

        for (position, term) in tokenize(&content).into_iter().enumerate() {
            self.tokens
                .entry(term)
                .or_default()
                .entry(post_id.clone())
                .or_default()
                .push(position);
        }

        self.metadata.insert(
            post_id,
            Article { title, content, author, date, category, word_count, ordinal },
        );
    }

    /// Re-derive ordinals from the metadata map's entry order. Called after
    /// deserializing the persisted artifact, where `ordinal` is skipped.
    pub fn assign_ordinals(&mut self) {
        for (ordinal, article) in self.metadata.values_mut().enumerate() {
            article.ordinal = ordinal;
        }
    }

    pub fn num_docs(&self) -> usize {
        self.metadata.len()
    }

    pub fn postings(&self, term: &str) -> Option<&Postings> {
        self.tokens.get(term)
    }

    /// All document ids in ingestion order.
    pub fn doc_ids(&self) -> impl Iterator<Item = &DocId> {
        self.metadata.keys()
    }
}
