use crate::index::{DocId, InvertedIndex};
use std::collections::HashMap;

/// TF-IDF vector space derived from a built index: the IDF table plus one
/// sparse weight vector per document. A pure function of the index, so it can
/// be recomputed at will.
#[derive(Debug, Default)]
pub struct VectorSpaceModel {
    /// term -> 1 + ln(N / df). Defined only for terms present in the index.
    pub idf: HashMap<String, f64>,
    /// doc_id -> term -> tf-idf weight. Absent term means weight 0.
    pub doc_vectors: HashMap<DocId, HashMap<String, f64>>,
}

impl VectorSpaceModel {
    pub fn compute(index: &InvertedIndex) -> Self {
        let n = index.num_docs() as f64;

        let mut idf: HashMap<String, f64> = HashMap::with_capacity(index.tokens.len());
        for (term, docs) in &index.tokens {
            let df = docs.len() as f64;
            idf.insert(term.clone(), 1.0 + (n / df).ln());
        }

        let mut doc_vectors: HashMap<DocId, HashMap<String, f64>> = index
            .doc_ids()
            .map(|doc_id| (doc_id.clone(), HashMap::new()))
            .collect();
        for (term, docs) in &index.tokens {
            for (doc_id, positions) in docs {
                // Sublinear tf scaling; position lists are never empty.
                let tf = 1.0 + (positions.len() as f64).ln();
                let weight = tf * idf[term];
                if let Some(vector) = doc_vectors.get_mut(doc_id) {
                    vector.insert(term.clone(), weight);
                }
            }
        }

        Self { idf, doc_vectors }
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.idf.get(term).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::SourceArticle;

    fn corpus(docs: &[(&str, &str)]) -> InvertedIndex {
        InvertedIndex::build(
            docs.iter()
                .map(|(id, content)| {
                    serde_json::from_value(serde_json::json!({
                        "post_id": id,
                        "content": content,
                    }))
                    .unwrap()
                })
                .collect::<Vec<SourceArticle>>(),
        )
    }

    #[test]
    fn idf_matches_definition() {
        let index = corpus(&[("1", "báo tin"), ("2", "báo"), ("3", "thời sự")]);
        let vsm = VectorSpaceModel::compute(&index);
        let expected = 1.0 + (3.0f64 / 2.0).ln();
        assert!((vsm.idf("báo").unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn rarer_terms_get_higher_idf() {
        let index = corpus(&[("1", "báo tin"), ("2", "báo"), ("3", "báo tin"), ("4", "xe")]);
        let vsm = VectorSpaceModel::compute(&index);
        // df(tin)=2 < df(báo)=3, so idf(tin) > idf(báo)
        assert!(vsm.idf("tin").unwrap() > vsm.idf("báo").unwrap());
    }

    #[test]
    fn repeated_terms_scale_sublinearly() {
        let index = corpus(&[("1", "tin tin tin"), ("2", "tin")]);
        let vsm = VectorSpaceModel::compute(&index);
        let idf = vsm.idf("tin").unwrap();
        let w1 = vsm.doc_vectors["1"]["tin"];
        let w2 = vsm.doc_vectors["2"]["tin"];
        assert!((w2 - idf).abs() < 1e-12);
        assert!((w1 - (1.0 + 3.0f64.ln()) * idf).abs() < 1e-12);
        assert!(w1 < 3.0 * w2);
    }
}
