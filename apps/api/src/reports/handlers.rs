//! Axum route handlers for report generation and download.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assessment::assemble_report;
use crate::auth::AuthUser;
use crate::errors::{AppError, AppJson};
use crate::reports::html::render_report_html;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateReportRequest {
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateReportResponse {
    pub message: String,
    pub session_id: String,
    pub pdf_path: String,
    pub download_url: String,
}

/// POST /api/generate-report
///
/// Assembles the report for a session, renders it to HTML and hands it to the
/// PDF renderer. The file lands in the reports directory and is served by
/// `handle_download_report`.
pub async fn handle_generate_report(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    AppJson(request): AppJson<GenerateReportRequest>,
) -> Result<Json<GenerateReportResponse>, AppError> {
    let session_id = request
        .session_id
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("session_id is required".to_string()))?;

    let report = assemble_report(&state.records, &state.configs, &session_id)?;
    let html = render_report_html(&report);

    let filename = report_filename(&session_id, Utc::now().timestamp_millis());
    let pdf_path = state.config.reports_dir.join(&filename);
    state.renderer.render(&html, &pdf_path).await?;

    info!(user_id = %claims.sub, session_id = %session_id, file = %filename, "Report generated");

    Ok(Json(GenerateReportResponse {
        message: "Report generated successfully".to_string(),
        session_id,
        pdf_path: pdf_path.display().to_string(),
        download_url: format!("/api/reports/{filename}"),
    }))
}

/// GET /api/reports/:filename
///
/// Unauthenticated. Only bare file names inside the reports directory are served.
pub async fn handle_download_report(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let not_found = || AppError::NotFound("Report not found".to_string());

    if !is_safe_filename(&filename) {
        return Err(not_found());
    }

    let bytes = match tokio::fs::read(state.config.reports_dir.join(&filename)).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
        Err(e) => return Err(AppError::Internal(e.into())),
    };

    let content_type = if filename.ends_with(".pdf") {
        "application/pdf"
    } else {
        "application/octet-stream"
    };

    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    ))
}

/// `report_<session>_<millis>.pdf`, with anything outside `[A-Za-z0-9_-]` in the
/// session id replaced so the name is always a single path component.
fn report_filename(session_id: &str, millis: i64) -> String {
    let safe: String = session_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect();
    format!("report_{safe}_{millis}.pdf")
}

fn is_safe_filename(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains("..")
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
