use axum::{
    response::Html,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use augur::core::config::load_config;
use augur::core::pipeline::Pipeline;

mod routes;

const DASHBOARD_HTML: &str = include_str!("../assets/dashboard.html");

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/analyze", post(routes::analyze::analyze))
        .route("/", get(|| async { Html(DASHBOARD_HTML) }))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "agora=debug,augur=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config("config.toml").expect("Failed to load config");
    let pipeline = Pipeline::new(config);
    if !pipeline.has_search() {
        tracing::warn!(
            "TAVILY_API_KEY is not set; search is disabled and analysis will rely on model knowledge only"
        );
    }

    let state = AppState {
        pipeline: Arc::new(pipeline),
    };

    let app = router(state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "8000".to_string()).parse::<u16>().unwrap_or(8000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Json;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use augur::core::config::Config;

    fn state_with(config: Config) -> AppState {
        AppState {
            pipeline: Arc::new(Pipeline::new(config)),
        }
    }

    async fn spawn_stub(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn analyze_request(topic: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "topic": topic }).to_string()))
            .unwrap()
    }

    async fn body_json(res: axum::response::Response) -> Value {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_ok_without_collaborators() {
        let app = router(state_with(Config::default()));
        let res = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn dashboard_is_served_at_root() {
        let app = router(state_with(Config::default()));
        let res = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains("<!DOCTYPE html>"));
        assert!(page.contains("/api/analyze"));
    }

    #[tokio::test]
    async fn analyze_returns_a_report_shaped_body() {
        let report = json!({
            "sentiment_score": 66,
            "sentiment_label": "正面",
            "keywords": ["a", "b"],
            "trend_data": [{ "date": "05-01", "score": 61 }],
            "report_markdown": "# 📊 报告"
        });
        let content = report.to_string();
        let stub = spawn_stub(Router::new().route(
            "/generate",
            post(move || {
                let content = content.clone();
                async move {
                    Json(json!({
                        "output": { "choices": [ { "message": { "content": content } } ] }
                    }))
                }
            }),
        ))
        .await;

        let mut config = Config::default();
        config.llm.api_url = format!("{}/generate", stub);
        config.llm.api_key = Some("sk-test".to_string());

        let app = router(state_with(config));
        let res = app.oneshot(analyze_request("新品发布")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let body = body_json(res).await;
        assert!(body["sentiment_score"].is_i64());
        assert!(body["sentiment_label"].is_string());
        assert!(body["keywords"].is_array());
        assert!(body["trend_data"].is_array());
        assert!(body["report_markdown"].is_string());
    }

    #[tokio::test]
    async fn analyze_maps_model_status_errors_to_500() {
        let stub = spawn_stub(Router::new().route(
            "/generate",
            post(|| async {
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(json!({ "code": "Throttling", "message": "quota exceeded" })),
                )
            }),
        ))
        .await;

        let mut config = Config::default();
        config.llm.api_url = format!("{}/generate", stub);
        config.llm.api_key = Some("sk-test".to_string());

        let app = router(state_with(config));
        let res = app.oneshot(analyze_request("任意话题")).await.unwrap();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        let detail = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(detail.contains("quota exceeded"));
    }
}
