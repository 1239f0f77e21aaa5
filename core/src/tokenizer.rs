use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    /// High-frequency Vietnamese function words excluded from the index.
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "một","có","ở","và","những","được","là","trên","khi","vào","bị",
            "sau","đó","này","cho","đến","từ","với","các","cũng","gì","nên",
            "thì","lại","đang","thể","hay","như","chỉ","điều","của","vì","tôi",
            "nếu","hoặc","bằng","cả","đã","vẫn","mới","nào","khiến",
            "không","nhiều","chưa","sẽ","tuy","kể","cùng",
            "nữa","mà","để","vậy","hơn",
            "bất","lúc","còn","trong","ngoài","khác","rồi","tại","bởi",
            "nơi","thường","chẳng","trước",
            "sở","thế","tính","đặc","thực","do","nhờ",
        ];
        words.iter().copied().collect()
    };
}

pub fn is_stopword(term: &str) -> bool {
    STOPWORDS.contains(term)
}

/// Normalize raw text into index terms: ellipses become spaces, everything is
/// lowercased and split on whitespace, punctuation is stripped from each unit,
/// and stopwords are dropped. Output order matches the input stream, which is
/// what position indices are built from.
///
/// Phrase and boolean matching deliberately do NOT use this function; they
/// lowercase and split only, so punctuation inside a phrase stays significant.
pub fn tokenize(text: &str) -> Vec<String> {
    let text = text.replace("...", " ");
    let mut terms = Vec::new();
    for unit in text.to_lowercase().split_whitespace() {
        let stripped: String = unit
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_')
            .collect();
        if stripped.is_empty() || is_stopword(&stripped) {
            continue;
        }
        terms.push(stripped);
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_punctuation_and_ellipsis() {
        assert_eq!(tokenize("Chạy... chạy!"), vec!["chạy", "chạy"]);
    }

    #[test]
    fn empty_input_yields_no_terms() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }
}
