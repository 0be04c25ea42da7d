pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assessment::handlers as assessment;
use crate::auth::handlers as auth;
use crate::reports::handlers as reports;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_handler))
        // Auth
        .route("/api/auth/signup", post(auth::handle_signup))
        .route("/api/auth/login", post(auth::handle_login))
        // Assessments
        .route("/api/sessions", get(assessment::handle_list_sessions))
        // Reports
        .route("/api/generate-report", post(reports::handle_generate_report))
        .route("/api/reports/:filename", get(reports::handle_download_report))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderValue, StatusCode};
    use axum_test::TestServer;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_health() {
        let server = TestServer::new(build_router(AppState::for_tests(std::env::temp_dir()))).unwrap();
        let response = server.get("/api/health").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "OK");
    }

    #[tokio::test]
    async fn test_signup_generate_download_flow() {
        let reports = tempfile::tempdir().unwrap();
        let server = TestServer::new(build_router(AppState::for_tests(reports.path()))).unwrap();

        let signup: Value = server
            .post("/api/auth/signup")
            .json(&json!({ "email": "grace@example.com", "password": "hopper1", "name": "Grace" }))
            .await
            .json();
        let token = signup["token"].as_str().unwrap().to_string();

        let login = server
            .post("/api/auth/login")
            .json(&json!({ "email": "grace@example.com", "password": "hopper1" }))
            .await;
        login.assert_status_ok();

        let generated = server
            .post("/api/generate-report")
            .add_header(
                header::AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
            )
            .json(&json!({ "session_id": "session_002" }))
            .await;
        generated.assert_status_ok();
        let body: Value = generated.json();
        let url = body["download_url"].as_str().unwrap();

        let download = server.get(url).await;
        download.assert_status_ok();
        assert!(download.as_bytes().starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let server = TestServer::new(build_router(AppState::for_tests(std::env::temp_dir()))).unwrap();
        server.get("/api/nope").await.assert_status(StatusCode::NOT_FOUND);
    }
}
