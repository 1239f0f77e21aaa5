use crate::index::{DocId, InvertedIndex, Postings};
use crate::tokenizer::tokenize;
use crate::vector::VectorSpaceModel;
use crate::SearchContext;
use anyhow::{bail, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

lazy_static! {
    /// Splits a lowercased boolean query into phrase sub-queries.
    static ref SUBQUERY_SPLIT: Regex =
        Regex::new(r"\s*\b(?:and|or)\b\s*").expect("valid regex");
}

/// Which evaluation path a query was routed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    Ranked,
    Phrase,
    Boolean,
}

impl QueryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryMode::Ranked => "ranked",
            QueryMode::Phrase => "phrase",
            QueryMode::Boolean => "boolean",
        }
    }
}

#[derive(Debug)]
pub struct QueryOutcome {
    pub mode: QueryMode,
    /// Ranked mode: most relevant first. Phrase/boolean modes: matching ids
    /// ordered by ingestion ordinal, since the match itself is unordered.
    pub doc_ids: Vec<DocId>,
}

/// Route a raw query string into one of the three modes.
///
/// Double-quoted text is a phrase query; a standalone uppercase AND/OR/NOT
/// selects boolean mode (detection is case-sensitive even though boolean
/// evaluation is not); anything else is ranked retrieval. An empty query is a
/// validation error rather than a query.
pub fn run(raw: &str, ctx: &SearchContext) -> Result<QueryOutcome> {
    let query = raw.trim();
    if query.is_empty() {
        bail!("empty query");
    }

    if query.len() >= 2 && query.starts_with('"') && query.ends_with('"') {
        let matched = phrase_match(query.trim_matches('"'), &ctx.index);
        return Ok(QueryOutcome {
            mode: QueryMode::Phrase,
            doc_ids: in_ordinal_order(matched, &ctx.index),
        });
    }

    if has_boolean_operator(query) {
        let matched = evaluate_boolean(query, &ctx.index);
        return Ok(QueryOutcome {
            mode: QueryMode::Boolean,
            doc_ids: in_ordinal_order(matched, &ctx.index),
        });
    }

    Ok(QueryOutcome {
        mode: QueryMode::Ranked,
        doc_ids: rank(query, &ctx.vsm, &ctx.index),
    })
}

/// Free-text TF-IDF retrieval. Returns every document id, most relevant
/// first; ties keep ingestion order. A query with no known terms scores
/// everything 0 and therefore returns the corpus in ingestion order.
pub fn rank(query: &str, vsm: &VectorSpaceModel, index: &InvertedIndex) -> Vec<DocId> {
    let mut frequencies: HashMap<String, usize> = HashMap::new();
    for term in tokenize(query) {
        // Terms outside the corpus vocabulary cannot contribute to any score.
        if vsm.idf.contains_key(&term) {
            *frequencies.entry(term).or_insert(0) += 1;
        }
    }

    let mut query_vector: HashMap<String, f64> = HashMap::with_capacity(frequencies.len());
    for (term, freq) in frequencies {
        let tf = 1.0 + (freq as f64).ln();
        query_vector.insert(term.clone(), tf * vsm.idf[&term]);
    }

    // Dot product restricted to the query terms, over documents in ingestion
    // order so that the stable sort leaves ties in that order.
    let mut scored: Vec<(&DocId, f64)> = index
        .doc_ids()
        .map(|doc_id| {
            let vector = vsm.doc_vectors.get(doc_id);
            let score = query_vector
                .iter()
                .map(|(term, weight)| {
                    let doc_weight = vector
                        .and_then(|v| v.get(term))
                        .copied()
                        .unwrap_or(0.0);
                    weight * doc_weight
                })
                .sum();
            (doc_id, score)
        })
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    scored.into_iter().map(|(doc_id, _)| doc_id.clone()).collect()
}

/// Exact phrase match: lowercase + whitespace split only, so punctuation in
/// the phrase is significant and stopwords participate. Returns the set of
/// documents containing the words as a contiguous run.
pub fn phrase_match(text: &str, index: &InvertedIndex) -> HashSet<DocId> {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    adjacency_match(&words, index)
}

fn adjacency_match(words: &[&str], index: &InvertedIndex) -> HashSet<DocId> {
    if words.is_empty() {
        return HashSet::new();
    }

    // All-or-nothing: any word missing from the vocabulary means no match.
    let mut postings: Vec<&Postings> = Vec::with_capacity(words.len());
    for word in words {
        match index.postings(word) {
            Some(p) => postings.push(p),
            None => return HashSet::new(),
        }
    }

    let mut docs: HashSet<DocId> = postings[0].keys().cloned().collect();
    for window in postings.windows(2) {
        let (prev, current) = (window[0], window[1]);
        docs.retain(|doc_id| match (prev.get(doc_id), current.get(doc_id)) {
            (Some(prev_positions), Some(positions)) => prev_positions
                .iter()
                .any(|p| positions.binary_search(&(p + 1)).is_ok()),
            _ => false,
        });
    }
    docs
}

/// True when the raw query contains a standalone uppercase operator token.
/// Lowercase "and"/"or"/"not" do not select boolean mode, even though the
/// evaluation below splits and negates case-insensitively.
pub fn has_boolean_operator(query: &str) -> bool {
    query
        .split_whitespace()
        .any(|word| matches!(word, "AND" | "OR" | "NOT"))
}

/// Left-to-right boolean combination of phrase sub-queries, no precedence,
/// no parentheses.
pub fn evaluate_boolean(query: &str, index: &InvertedIndex) -> HashSet<DocId> {
    let lowered = query.to_lowercase();
    let subqueries: Vec<&str> = SUBQUERY_SPLIT.split(&lowered).collect();

    let mut result = match_subquery(subqueries[0], index);
    let mut cursor = 0;
    for token in lowered.split_whitespace() {
        let combine_union = match token {
            "and" => false,
            "or" => true,
            _ => continue,
        };
        cursor += 1;
        let next = subqueries
            .get(cursor)
            .map(|sub| match_subquery(sub, index))
            .unwrap_or_default();
        if combine_union {
            result.extend(next);
        } else {
            result.retain(|doc_id| next.contains(doc_id));
        }
    }
    result
}

/// Resolve one sub-query: strip leading "not" tokens, phrase-match the rest,
/// and complement against the whole corpus when the negation count is odd.
fn match_subquery(subquery: &str, index: &InvertedIndex) -> HashSet<DocId> {
    let words: Vec<&str> = subquery.split_whitespace().collect();
    let negations = words.iter().take_while(|word| **word == "not").count();
    let matched = adjacency_match(&words[negations..], index);

    if negations % 2 == 0 {
        matched
    } else {
        index
            .doc_ids()
            .filter(|doc_id| !matched.contains(*doc_id))
            .cloned()
            .collect()
    }
}

/// Order an unordered match set by ingestion ordinal for deterministic output.
fn in_ordinal_order(matched: HashSet<DocId>, index: &InvertedIndex) -> Vec<DocId> {
    index
        .doc_ids()
        .filter(|doc_id| matched.contains(*doc_id))
        .cloned()
        .collect()
}
