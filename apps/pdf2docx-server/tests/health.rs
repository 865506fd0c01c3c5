//! GET /api/health

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;

use pdf2docx_server::config::Config;
use pdf2docx_server::convert::Pdf2DocxRunner;
use pdf2docx_server::routes;
use pdf2docx_server::state::AppState;

#[tokio::test]
async fn test_health_reports_ok() {
    let runner = Pdf2DocxRunner::new("python3", "pdf2docx");
    let app = routes::app(AppState::new(Config::default(), Arc::new(runner)));
    let server = TestServer::new(app).unwrap();

    let response = server.get("/api/health").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let runner = Pdf2DocxRunner::new("python3", "pdf2docx");
    let app = routes::app(AppState::new(Config::default(), Arc::new(runner)));
    let server = TestServer::new(app).unwrap();

    let response = server.get("/api/nope").await;

    response.assert_status(StatusCode::NOT_FOUND);
}
