use serde::Deserialize;
use time::macros::format_description;
use time::{Date, Duration};
use timtin_core::{DocId, InvertedIndex};

/// Wall-clock window applied to query results before truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    #[default]
    Default,
    LastWeek,
    LastMonth,
    LastYear,
}

impl TimeRange {
    fn days(self) -> Option<i64> {
        match self {
            TimeRange::Default => None,
            TimeRange::LastWeek => Some(7),
            TimeRange::LastMonth => Some(30),
            TimeRange::LastYear => Some(365),
        }
    }
}

/// Keep documents whose `date` field's leading DD/MM/YYYY substring parses to
/// a date within the range, then truncate to `top_k`. `Default` truncates
/// without looking at dates at all. Unparseable dates are dropped from
/// range-filtered results, never fatal.
pub fn filter_articles(
    doc_ids: Vec<DocId>,
    index: &InvertedIndex,
    range: TimeRange,
    today: Date,
    top_k: usize,
) -> Vec<DocId> {
    let days = match range.days() {
        Some(days) => days,
        None => {
            let mut doc_ids = doc_ids;
            doc_ids.truncate(top_k);
            return doc_ids;
        }
    };
    let cutoff = today - Duration::days(days);

    let format = format_description!("[day]/[month]/[year]");
    let mut kept = Vec::new();
    for doc_id in doc_ids {
        let Some(article) = index.metadata.get(&doc_id) else {
            continue;
        };
        let leading = article.date.split(' ').next().unwrap_or("");
        match Date::parse(leading, &format) {
            Ok(date) if date >= cutoff => kept.push(doc_id),
            Ok(_) => {}
            Err(_) => {
                tracing::warn!(post_id = %doc_id, date = %article.date, "unparseable article date, dropping");
            }
        }
    }
    kept.truncate(top_k);
    kept
}
