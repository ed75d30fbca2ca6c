use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use shared::{router, AppState, Config};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tower::ServiceExt;

/// Nothing listens here; used when a test must not reach the summarizer
const UNUSED_UPSTREAM: &str = "http://127.0.0.1:9";

const CITY_TEXT: &str = "The city council voted on Tuesday in Boston. \
    Mayor Michelle Wu said the new budget was a difficult compromise.";

const ARTICLE_HTML: &str = r#"<html>
<head>
  <title>Regional News</title>
  <meta property="og:title" content="Flooding Hits Texas Coast">
  <meta property="article:published_time" content="2024-08-01T09:00:00Z">
</head>
<body>
  <nav><p>Subscribe for updates</p></nav>
  <article>
    <p>Heavy rain caused severe flooding along the Texas coast on Thursday.</p>
    <p>Governor Greg Abbott said emergency crews rescued dozens of residents from their homes in Houston.</p>
    <p>Officials warned that the danger was not over and urged people to stay safe.</p>
  </article>
</body>
</html>"#;

#[derive(Clone, Default)]
struct Recorded(Arc<Mutex<Vec<(Option<String>, Value)>>>);

impl Recorded {
    fn take(&self) -> Vec<(Option<String>, Value)> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A stand-in for the Cohere generate endpoint that always returns `summary`
async fn mock_cohere(summary: &'static str) -> (String, Recorded) {
    let recorded = Recorded::default();
    let seen = recorded.clone();

    let app = Router::new().route(
        "/v1/generate",
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let seen = seen.clone();
            async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                seen.0.lock().unwrap().push((auth, body));
                Json(json!({
                    "id": "gen-1",
                    "generations": [{ "id": "g-1", "text": format!("  {}\n", summary) }]
                }))
            }
        }),
    );

    (spawn(app).await, recorded)
}

async fn failing_cohere() -> String {
    let app = Router::new().route(
        "/v1/generate",
        post(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "invalid api token" })),
            )
        }),
    );
    spawn(app).await
}

async fn cohere_without_generations() -> String {
    let app = Router::new().route(
        "/v1/generate",
        post(|| async { Json(json!({ "id": "gen-1", "generations": [] })) }),
    );
    spawn(app).await
}

async fn article_site() -> String {
    let app = Router::new()
        .route("/story", get(|| async { axum::response::Html(ARTICLE_HTML) }))
        .route("/empty", get(|| async { "" }));
    spawn(app).await
}

fn app(cohere_base: &str) -> Router {
    let mut config = Config::with_api_key("test-key");
    config.cohere_base_url = cohere_base.to_string();
    config.fetch_timeout_secs = 5;
    router(Arc::new(AppState::from_config(&config).unwrap()))
}

async fn post_json(app: Router, path: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    read(app.oneshot(request).await.unwrap()).await
}

async fn read(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

const REPORT_KEYS: &[&str] = &[
    "summary",
    "polarity",
    "subjectivity",
    "keywords",
    "entities",
    "emotion",
    "language",
    "word_count",
    "readability_score",
    "toxicity_score",
];

fn assert_report_shape(body: &Value) {
    for key in REPORT_KEYS {
        assert!(body.get(*key).is_some(), "missing key {key} in {body}");
    }
    let polarity = body["polarity"].as_f64().unwrap();
    let expected_toxicity = ((-polarity).max(0.0) * 100.0).round() / 100.0;
    assert_eq!(body["toxicity_score"].as_f64().unwrap(), expected_toxicity);
    for entity in body["entities"].as_array().unwrap() {
        assert_eq!(entity.as_array().unwrap().len(), 2);
    }
}

#[tokio::test]
async fn test_health_check() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, body) = read(app(UNUSED_UPSTREAM).oneshot(request).await.unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("running"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_analyze_text() {
    let (cohere, recorded) = mock_cohere("The council approved a terrible budget.").await;
    let body = json!({ "text": CITY_TEXT }).to_string();

    let (status, report) = post_json(app(&cohere), "/analyze", &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_report_shape(&report);
    assert_eq!(report["summary"], "The council approved a terrible budget.");
    assert_eq!(report["polarity"], -1.0);
    assert_eq!(report["toxicity_score"], 1.0);
    assert_eq!(report["word_count"], 19);
    assert_eq!(report["language"], "en");

    let keywords = report["keywords"].as_array().unwrap();
    assert!(keywords.contains(&json!("city council")));
    assert!(keywords.contains(&json!("new budget")));

    let entities = report["entities"].as_array().unwrap();
    assert!(entities.contains(&json!(["Michelle Wu", "PERSON"])));
    assert!(entities.contains(&json!(["Boston", "GPE"])));
    assert!(entities.contains(&json!(["Tuesday", "DATE"])));

    let calls = recorded.take();
    assert_eq!(calls.len(), 1);
    let (auth, request) = &calls[0];
    assert_eq!(auth.as_deref(), Some("Bearer test-key"));
    assert_eq!(request["model"], "command");
    assert_eq!(request["max_tokens"], 200);
    assert_eq!(
        request["prompt"],
        format!("Summarize the following text: {}", CITY_TEXT)
    );
}

#[tokio::test]
async fn test_analyze_requires_text() {
    for body in [r#"{}"#, r#"{"text": ""}"#, r#"{"text": "   "}"#, "not json", r#"{"text": 5}"#] {
        let (status, report) = post_json(app(UNUSED_UPSTREAM), "/analyze", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(report, json!({ "error": "No text provided" }));
    }
}

#[tokio::test]
async fn test_analyze_upstream_failure_is_500() {
    let cohere = failing_cohere().await;
    let body = json!({ "text": CITY_TEXT }).to_string();

    let (status, report) = post_json(app(&cohere), "/analyze", &body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = report["error"].as_str().unwrap();
    assert!(message.contains("Cohere API error"), "{message}");
    assert!(message.contains("invalid api token"), "{message}");
}

#[tokio::test]
async fn test_analyze_url() {
    let (cohere, recorded) = mock_cohere("Heavy flooding swamped the Texas coast.").await;
    let site = article_site().await;
    let body = json!({ "url": format!("{}/story", site) }).to_string();

    let (status, report) = post_json(app(&cohere), "/analyze_url", &body).await;

    assert_eq!(status, StatusCode::OK, "{report}");
    assert_report_shape(&report);
    assert_eq!(report["title"], "Flooding Hits Texas Coast");
    assert_eq!(report["source"], site);
    assert_eq!(report["published_date"], "2024-08-01T09:00:00Z");
    assert_eq!(report["summary"], "Heavy flooding swamped the Texas coast.");
    assert_eq!(report["keywords"], json!(["heavy flooding", "texas coast"]));
    assert_eq!(report["toxicity_score"], 0.0);

    let entities = report["entities"].as_array().unwrap();
    assert!(entities.contains(&json!(["Greg Abbott", "PERSON"])));
    assert!(entities.contains(&json!(["Houston", "GPE"])));

    let calls = recorded.take();
    let prompt = calls[0].1["prompt"].as_str().unwrap();
    assert!(prompt.starts_with("Summarize the following news article:\n\nHeavy rain"));
    assert!(!prompt.contains("Subscribe"));
}

#[tokio::test]
async fn test_analyze_url_requires_url() {
    for body in [r#"{}"#, r#"{"url": ""}"#, "[1, 2]"] {
        let (status, report) = post_json(app(UNUSED_UPSTREAM), "/analyze_url", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(report, json!({ "error": "No URL provided" }));
    }
}

#[tokio::test]
async fn test_analyze_url_without_content() {
    let site = article_site().await;
    let body = json!({ "url": format!("{}/empty", site) }).to_string();

    let (status, report) = post_json(app(UNUSED_UPSTREAM), "/analyze_url", &body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(report, json!({ "error": "Failed to extract content from URL" }));
}

#[tokio::test]
async fn test_analyze_url_missing_page() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let site = spawn(Router::new().route(
        "/gone",
        get(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                StatusCode::NOT_FOUND
            }
        }),
    ))
    .await;
    let body = json!({ "url": format!("{}/gone", site) }).to_string();

    let (status, report) = post_json(app(UNUSED_UPSTREAM), "/analyze_url", &body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(report["error"].as_str().unwrap().contains("404"));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_analyze_without_generations_is_500() {
    let cohere = cohere_without_generations().await;
    let body = json!({ "text": CITY_TEXT }).to_string();

    let (status, report) = post_json(app(&cohere), "/analyze", &body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(report, json!({ "error": "Cohere API returned no generations" }));
}
