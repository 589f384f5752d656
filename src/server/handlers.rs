//! Tag generation API handlers.

use axum::{
    Json,
    extract::{Multipart, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse},
};
use std::sync::Arc;

use crate::layout::LayoutParams;
use crate::render::generate_tags;

use super::state::AppState;

/// GET / - Minimal upload form.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /api/layout - The active sheet geometry, for inspection.
pub async fn layout(State(state): State<Arc<AppState>>) -> Json<LayoutParams> {
    Json(state.layout)
}

/// POST /api/tags/generate - Turn an uploaded CSV into a PDF download.
///
/// Accepts multipart form data with either a `file` part (an uploaded
/// .csv) or a `data` part (CSV text pasted into the form). The first
/// present part wins.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let mut csv_text: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Multipart error: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == "file" || name == "data" {
            let bytes = field.bytes().await.map_err(|e| {
                (
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read {} field: {}", name, e),
                )
            })?;
            let text = String::from_utf8(bytes.to_vec()).map_err(|_| {
                (
                    StatusCode::BAD_REQUEST,
                    "CSV data is not valid UTF-8".to_string(),
                )
            })?;
            // Browsers submit an empty `file` part when only the
            // textarea was filled in; keep scanning past blanks.
            if !text.trim().is_empty() {
                csv_text = Some(text);
                break;
            }
        }
    }

    let csv_text = csv_text.ok_or((
        StatusCode::BAD_REQUEST,
        "No CSV data received".to_string(),
    ))?;

    // PDF generation is CPU-bound; keep it off the async workers.
    let state_for_task = state.clone();
    let pdf = tokio::task::spawn_blocking(move || {
        generate_tags(&csv_text, &state_for_task.layout, &state_for_task.ctx)
    })
    .await
    .map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Generation task failed: {}", e),
        )
    })?
    .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    println!("[server] Generated {} byte PDF", pdf.len());

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"price-tags.pdf\"".to_string(),
            ),
        ],
        pdf,
    ))
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Price Tags</title></head>
<body>
  <h1>Price Tag Generator</h1>
  <form action="/api/tags/generate" method="post" enctype="multipart/form-data">
    <p><label>CSV file: <input type="file" name="file" accept=".csv"></label></p>
    <p><label>Or paste CSV:<br><textarea name="data" rows="10" cols="80"></textarea></label></p>
    <p><button type="submit">Generate PDF</button></p>
  </form>
</body>
</html>
"#;
