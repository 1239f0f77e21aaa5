use timtin_core::persist::{load_index, save_index};
use timtin_core::query;
use timtin_core::{InvertedIndex, SearchContext, SourceArticle};

fn articles(docs: &[(&str, &str)]) -> Vec<SourceArticle> {
    docs.iter()
        .map(|(id, content)| {
            serde_json::from_value(serde_json::json!({
                "post_id": id,
                "content": content,
                "date": "02/01/2025 10:00 GMT+7",
            }))
            .unwrap()
        })
        .collect()
}

#[test]
fn reload_reproduces_order_and_rankings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.json");

    let built = InvertedIndex::build(articles(&[
        ("9", "tin tức báo chí"),
        ("2", "xe máy"),
        ("5", "tin xe"),
    ]));
    save_index(&path, &built).unwrap();
    let loaded = load_index(&path).unwrap();

    // Ingestion order survives the JSON round trip, ordinals included.
    let built_ids: Vec<_> = built.doc_ids().cloned().collect();
    let loaded_ids: Vec<_> = loaded.doc_ids().cloned().collect();
    assert_eq!(built_ids, loaded_ids);
    for (id, article) in &loaded.metadata {
        assert_eq!(article.ordinal, built.metadata.get(id).unwrap().ordinal);
    }
    assert_eq!(built.tokens, loaded.tokens);

    let before = SearchContext::new(built);
    let after = SearchContext::new(loaded);
    assert_eq!(
        query::rank("tin xe", &before.vsm, &before.index),
        query::rank("tin xe", &after.vsm, &after.index)
    );
}

#[test]
fn artifact_schema_has_no_extra_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.json");
    save_index(&path, &InvertedIndex::build(articles(&[("1", "tin tức")]))).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    // serde_json objects iterate in sorted key order here; membership is what
    // the schema contract pins down.
    let top: Vec<_> = raw.as_object().unwrap().keys().collect();
    assert_eq!(top, ["metadata", "tokens"]);
    let entry = raw["metadata"]["1"].as_object().unwrap();
    let mut fields: Vec<_> = entry.keys().map(String::as_str).collect();
    fields.sort_unstable();
    assert_eq!(
        fields,
        ["author", "category", "content", "date", "title", "word_count"]
    );
    assert_eq!(raw["tokens"]["tin"]["1"], serde_json::json!([0]));
}
