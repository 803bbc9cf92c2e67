use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::pipeline::{gpx, ops, series};
use crate::routes::TrackResponse;
use crate::state::AppState;
use crate::types::series::{Series, SeriesKind};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tracks/:file_id", get(describe))
        .route("/api/tracks/:file_id/series/:kind", get(chart_series))
        .route("/api/tracks/:file_id/export", get(export))
}

async fn describe(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> Result<Json<TrackResponse>, AppError> {
    let track = state
        .get(&file_id)
        .ok_or_else(|| AppError::NotFound(file_id.clone()))?;
    Ok(Json(TrackResponse::new(file_id, &track)))
}

async fn chart_series(
    State(state): State<AppState>,
    Path((file_id, kind)): Path<(String, String)>,
) -> Result<Json<Series>, AppError> {
    let kind = SeriesKind::from_str(&kind).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Invalid series: {}. Use 'elevation', 'speed', 'heartrate', 'cadence', 'power', or 'temperature'",
            kind
        ))
    })?;
    let track = state
        .get(&file_id)
        .ok_or_else(|| AppError::NotFound(file_id.clone()))?;

    Ok(Json(series::compute_series(&track.points, kind)?))
}

#[derive(Deserialize)]
struct ExportQuery {
    #[serde(default)]
    upload: bool,
}

async fn export(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let track = state
        .get(&file_id)
        .ok_or_else(|| AppError::NotFound(file_id.clone()))?;

    let xml = if query.upload {
        let offset_ms = state.config().upload_time_offset.as_millis() as i64;
        tracing::debug!("Offsetting timestamps of {} by {} ms for upload", file_id, offset_ms);
        gpx::serialize(&ops::offset_timestamps(&track, offset_ms))?
    } else {
        gpx::serialize(&track)?
    };

    tracing::info!("Exported {} ({} bytes)", file_id, xml.len());

    let disposition = format!("attachment; filename=\"{}.gpx\"", attachment_name(&track.name));
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/gpx+xml".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        xml,
    ))
}

fn attachment_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || " -_().".contains(c) { c } else { '_' })
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        "track".to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::attachment_name;

    #[test]
    fn attachment_names_are_header_safe() {
        assert_eq!(attachment_name("Morning Ride (1-2)"), "Morning Ride (1-2)");
        assert_eq!(attachment_name("a\"b/c"), "a_b_c");
        assert_eq!(attachment_name("  "), "track");
    }
}
