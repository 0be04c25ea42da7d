use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionEntry {
    pub session_id: String,
    pub assessment_id: String,
    /// `None` when no config exists for the record's assessment type.
    pub assessment_name: Option<String>,
}

/// GET /api/sessions
///
/// Lists the sessions a report can be generated for.
pub async fn handle_list_sessions(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Json<Vec<SessionEntry>> {
    let sessions = state
        .records
        .sessions()
        .into_iter()
        .map(|s| SessionEntry {
            assessment_name: state.configs.get(&s.assessment_id).map(|c| c.name.clone()),
            session_id: s.session_id,
            assessment_id: s.assessment_id,
        })
        .collect();
    Json(sessions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::{header, HeaderValue, StatusCode},
        routing::get,
        Router,
    };
    use axum_test::TestServer;
    use chrono::Utc;

    use crate::models::user::User;

    fn create_test_app() -> (Router, AppState) {
        let state = AppState::for_tests(std::env::temp_dir());
        let router = Router::new()
            .route("/api/sessions", get(handle_list_sessions))
            .with_state(state.clone());
        (router, state)
    }

    #[tokio::test]
    async fn test_list_sessions() {
        let (router, state) = create_test_app();
        let server = TestServer::new(router).unwrap();
        let user = User {
            id: uuid::Uuid::new_v4(),
            email: "ada@example.com".to_string(),
            password_hash: String::new(),
            name: "Ada".to_string(),
            created_at: Utc::now(),
        };
        let token = format!("Bearer {}", state.tokens.issue(&user).unwrap());

        let response = server
            .get("/api/sessions")
            .add_header(header::AUTHORIZATION, HeaderValue::from_str(&token).unwrap())
            .await;
        response.assert_status_ok();

        let sessions: Vec<SessionEntry> = response.json();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].session_id, "session_001");
        assert_eq!(sessions[0].assessment_name.as_deref(), Some("Health & Fitness Assessment"));
        assert_eq!(sessions[1].assessment_id, "as_card_01");
    }

    #[tokio::test]
    async fn test_list_sessions_requires_token() {
        let (router, _) = create_test_app();
        let server = TestServer::new(router).unwrap();
        server.get("/api/sessions").await.assert_status(StatusCode::UNAUTHORIZED);
    }
}
