use axum::extract::Multipart;
use axum::{extract::State, routing::post, Json, Router};

use crate::error::AppError;
use crate::pipeline::gpx;
use crate::routes::{read_gpx_files, TrackResponse};
use crate::state::AppState;
use crate::types::track::file_stem;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/upload", post(upload))
}

async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TrackResponse>, AppError> {
    let mut files = read_gpx_files(&mut multipart).await?;
    if files.len() > 1 {
        return Err(AppError::BadRequest(
            "Upload one file at a time; use /api/combine for several".to_string(),
        ));
    }
    let file = files
        .pop()
        .ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;

    tracing::info!("Parsing gpx file: {}", file.filename);

    let track = gpx::parse(&file.text, file_stem(&file.filename))?;
    let point_count = track.points.len();
    let file_id = state.insert(track.clone());
    let response = TrackResponse::new(file_id, &track);

    tracing::info!(
        "Uploaded file {} with ID {} ({} points, {:.2} km)",
        file.filename,
        response.file_id,
        point_count,
        response.summary.distance_km
    );

    Ok(Json(response))
}
