use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::pipeline::{geo, ops};
use crate::routes::TrackResponse;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/split", post(split))
}

#[derive(Deserialize)]
struct SplitRequest {
    file_id: String,
    index: usize,
}

#[derive(Serialize)]
struct SplitResponse {
    /// Position of the split along the original track, as a share of its distance.
    split_fraction: f64,
    first: TrackResponse,
    second: TrackResponse,
}

async fn split(
    State(state): State<AppState>,
    Json(req): Json<SplitRequest>,
) -> Result<Json<SplitResponse>, AppError> {
    let track = state
        .get(&req.file_id)
        .ok_or_else(|| AppError::NotFound(req.file_id.clone()))?;

    let (first, second) = ops::split_track(&track, req.index)?;
    let split_fraction = ops::split_fraction(&geo::cumulative_distance_km(&track.points), req.index);

    tracing::info!(
        "Split {} at point {} of {} ({:.1}% of distance)",
        req.file_id,
        req.index,
        track.points.len(),
        split_fraction * 100.0
    );

    let first = TrackResponse::new(state.insert(first.clone()), &first);
    let second = TrackResponse::new(state.insert(second.clone()), &second);

    Ok(Json(SplitResponse {
        split_fraction,
        first,
        second,
    }))
}
