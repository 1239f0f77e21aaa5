pub mod filter;

use anyhow::{Context, Result};
use axum::extract::{Path as AxumPath, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use timtin_core::{persist, query, SearchContext};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::filter::{filter_articles, TimeRange};

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    /// Number of results to keep after filtering.
    #[serde(default = "default_k")]
    pub k: usize,
    #[serde(default)]
    pub range: TimeRange,
}

fn default_k() -> usize {
    9
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub mode: &'static str,
    pub total_hits: usize,
    pub results: Vec<ArticleSummary>,
}

#[derive(Serialize)]
pub struct ArticleSummary {
    pub post_id: String,
    pub title: String,
    pub author: String,
    pub date: String,
    pub category: String,
}

#[derive(Clone)]
pub struct AppState {
    /// Read-only after startup; shared across concurrent queries lock-free.
    pub ctx: Arc<SearchContext>,
}

pub fn build_app(index_path: &Path) -> Result<Router> {
    let index = persist::load_index(index_path)
        .with_context(|| format!("loading {} (run the indexer first)", index_path.display()))?;
    let state = AppState { ctx: Arc::new(SearchContext::new(index)) };

    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/article/:post_id", get(article_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);
    Ok(app)
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let outcome = query::run(&params.q, &state.ctx)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let today = time::OffsetDateTime::now_utc().date();
    let doc_ids =
        filter_articles(outcome.doc_ids, &state.ctx.index, params.range, today, params.k);

    let results = doc_ids
        .into_iter()
        .filter_map(|post_id| {
            state.ctx.index.metadata.get(&post_id).map(|article| ArticleSummary {
                post_id: post_id.clone(),
                title: article.title.clone(),
                author: article.author.clone(),
                date: article.date.clone(),
                category: article.category.clone(),
            })
        })
        .collect::<Vec<_>>();

    Ok(Json(SearchResponse {
        query: params.q,
        mode: outcome.mode.as_str(),
        total_hits: results.len(),
        results,
    }))
}

pub async fn article_handler(
    State(state): State<AppState>,
    AxumPath(post_id): AxumPath<String>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let article = state
        .ctx
        .index
        .metadata
        .get(&post_id)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("no article {post_id}")))?;
    Ok(Json(serde_json::json!({
        "post_id": post_id,
        "title": article.title,
        "author": article.author,
        "date": article.date,
        "category": article.category,
        "word_count": article.word_count,
        "content": article.content,
    })))
}
