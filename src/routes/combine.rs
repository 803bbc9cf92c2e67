use axum::extract::Multipart;
use axum::{extract::State, routing::post, Json, Router};
use rayon::prelude::*;

use crate::error::AppError;
use crate::pipeline::{gpx, ops};
use crate::routes::{read_gpx_files, TrackResponse};
use crate::state::AppState;
use crate::types::track::{file_stem, Track};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/combine", post(combine))
}

async fn combine(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TrackResponse>, AppError> {
    let files = read_gpx_files(&mut multipart).await?;
    if files.len() < 2 {
        return Err(AppError::BadRequest(format!(
            "Combining needs at least 2 files, got {}",
            files.len()
        )));
    }

    tracing::info!("Parsing {} gpx files for combine", files.len());

    // Parse in parallel; the combine step re-derives order from start times.
    let tracks: Vec<Track> = tokio::task::spawn_blocking(move || {
        files
            .par_iter()
            .map(|file| gpx::parse(&file.text, file_stem(&file.filename)))
            .collect::<Result<Vec<_>, _>>()
    })
    .await
    .map_err(|e| AppError::Internal(format!("Parse task failed: {}", e)))??;

    let combined = ops::combine_tracks(&tracks)?;
    let file_id = state.insert(combined.clone());

    tracing::info!(
        "Combined {} tracks into {} ({} points)",
        tracks.len(),
        file_id,
        combined.points.len()
    );

    Ok(Json(TrackResponse::new(file_id, &combined)))
}
