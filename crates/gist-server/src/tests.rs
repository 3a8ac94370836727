use crate::routes::SalienceResponse;
use crate::*;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use gist_core::{EngineConfig, GistError, Intensity, Result, Scores};
use gist_llm::CandidateGenerator;
use gist_score::Scorer;
use gist_segment::RuleSegmenter;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Drops the last two words; fails everything when `down`.
struct TrimGenerator {
    down: bool,
}

#[async_trait]
impl CandidateGenerator for TrimGenerator {
    async fn generate(&self, text: &str, _n: usize, _intensity: Intensity) -> Result<Vec<String>> {
        if self.down {
            return Err(GistError::RetriesExhausted { attempts: 3, reason: "503 from upstream".into() });
        }
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.len() < 3 {
            return Ok(Vec::new());
        }
        Ok(vec![words[..words.len() - 2].join(" ")])
    }
}

struct AcceptAll;

struct JudgeDown;

#[async_trait]
impl Scorer for JudgeDown {
    async fn score(&self, _parent: &str, _candidate: &str) -> Result<Scores> {
        Err(GistError::RetriesExhausted { attempts: 3, reason: "503 from judge".into() })
    }
}

#[async_trait]
impl Scorer for AcceptAll {
    async fn score(&self, _parent: &str, _candidate: &str) -> Result<Scores> {
        Ok(Scores { semantic: 1.0, grammaticality: Some(1.0), paraphrase: 1.0 })
    }
}

fn test_app(down: bool) -> axum::Router {
    app_with_scorer(down, Arc::new(AcceptAll))
}

fn app_with_scorer(down: bool, scorer: Arc<dyn Scorer>) -> axum::Router {
    let engine = gist_engine::ParagraphEngine::new(
        Arc::new(RuleSegmenter::default()),
        Arc::new(TrimGenerator { down }),
        scorer,
        EngineConfig::default(),
    )
    .unwrap();
    app(engine)
}

async fn post_json(app: axum::Router, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri("/api/v1/salience")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// ========== Health ==========

#[tokio::test]
async fn test_health() {
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let resp = test_app(false).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["uptime_secs"].is_u64());
}

// ========== Salience ==========

#[tokio::test]
async fn test_salience_ok() {
    let (status, body) = post_json(
        test_app(false),
        json!({
            "title": "Brown v Green",
            "content": "The respondent Mr Brown was registered as proprietor of the land at Hill Farm. He parked his car there.",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let parsed: SalienceResponse = serde_json::from_value(body.clone()).unwrap();
    assert_eq!(parsed.export.title.as_deref(), Some("Brown v Green"));
    assert_eq!(parsed.export.max_level, 4);
    assert_eq!(parsed.export.entries.len(), 2);
    assert_eq!(parsed.export.entries[0].id, 0);
    assert_eq!(parsed.export.combined_levels.len(), 5);
    assert!(body["entries"][0].get("scores").is_none());
    assert!(body["request_id"].is_string());
    assert!(body["generated_at"].is_string());

    let first = &parsed.export.entries[0];
    let last_span = first.spans.last().unwrap();
    assert!(last_span.text.ends_with("Farm."));
    assert!(last_span.level < first.spans[0].level);
}

#[tokio::test]
async fn test_salience_k_and_diagnostics() {
    let (status, body) = post_json(
        test_app(false),
        json!({ "content": "The respondent Mr Brown was registered as proprietor of the land.", "k": 1, "diagnostics": true }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["max_level"], 1);
    assert_eq!(body["entries"][0]["depth_reached"], 1);
    assert_eq!(body["entries"][0]["termination"], "max_depth");
    assert_eq!(body["entries"][0]["scores"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_salience_empty_content_is_bad_request() {
    let (status, body) = post_json(test_app(false), json!({ "content": "  " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn test_salience_malformed_body_is_bad_request() {
    let (status, body) = post_json(test_app(false), json!({ "text": "missing content field" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn test_salience_model_down_is_bad_gateway() {
    let (status, body) = post_json(
        test_app(true),
        json!({ "content": "The respondent Mr Brown was registered as proprietor of the land." }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "model_unavailable");
}

#[tokio::test]
async fn test_salience_judge_down_is_bad_gateway() {
    let (status, body) = post_json(
        app_with_scorer(false, Arc::new(JudgeDown)),
        json!({ "content": "The respondent Mr Brown was registered as proprietor of the land." }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "model_unavailable");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let req = Request::builder().uri("/api/v1/nothing").body(Body::empty()).unwrap();
    let resp = test_app(false).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_error_mapping() {
    use crate::error::ApiError;
    assert_eq!(ApiError::from(GistError::EmptyInput).status, StatusCode::BAD_REQUEST);
    assert_eq!(ApiError::from(GistError::ServiceExhausted { sentences: 1 }).status, StatusCode::BAD_GATEWAY);
    assert_eq!(ApiError::from(GistError::Scoring("nan".into())).status, StatusCode::INTERNAL_SERVER_ERROR);
}
