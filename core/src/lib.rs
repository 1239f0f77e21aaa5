pub mod index;
pub mod persist;
pub mod query;
pub mod tokenizer;
pub mod vector;

pub use index::{Article, DocId, InvertedIndex, Postings, SourceArticle};
pub use query::{QueryMode, QueryOutcome};
pub use vector::VectorSpaceModel;

/// Everything a query needs, built once at startup and passed by reference
/// into every call. Immutable after construction, so it can be shared across
/// concurrent queries without locking.
pub struct SearchContext {
    pub index: InvertedIndex,
    pub vsm: VectorSpaceModel,
}

impl SearchContext {
    pub fn new(index: InvertedIndex) -> Self {
        let vsm = VectorSpaceModel::compute(&index);
        Self { index, vsm }
    }
}
