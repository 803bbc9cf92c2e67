pub mod combine;
pub mod convert;
pub mod health;
pub mod split;
pub mod strava;
pub mod tracks;
pub mod upload;

use axum::extract::Multipart;
use axum::Router;
use serde::Serialize;

use crate::error::AppError;
use crate::pipeline::process;
use crate::state::AppState;
use crate::types::series::SeriesKind;
use crate::types::track::{FileFormat, Track, TrackSummary};

/// All API routes, without the outer middleware stack.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(upload::router())
        .merge(tracks::router())
        .merge(split::router())
        .merge(combine::router())
        .merge(convert::router())
        .merge(strava::router())
}

#[derive(Debug, Serialize)]
pub struct TrackResponse {
    pub file_id: String,
    pub name: String,
    pub activity_type: String,
    pub summary: TrackSummary,
    pub available_channels: Vec<SeriesKind>,
}

impl TrackResponse {
    pub fn new(file_id: String, track: &Track) -> Self {
        Self {
            file_id,
            name: track.name.clone(),
            activity_type: track.activity_type.clone(),
            summary: process::compute_summary(&track.points),
            available_channels: process::available_channels(&track.points),
        }
    }
}

/// An uploaded GPX file: original file name and its text.
pub struct UploadedFile {
    pub filename: String,
    pub text: String,
}

/// Collects every `file` field of a multipart body, rejecting non-GPX uploads.
pub async fn read_gpx_files(multipart: &mut Multipart) -> Result<Vec<UploadedFile>, AppError> {
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .ok_or_else(|| AppError::BadRequest("No filename provided".to_string()))?;
        FileFormat::from_filename(&filename)
            .ok_or_else(|| AppError::BadRequest(format!("Unsupported file format: {}", filename)))?;

        let bytes = field.bytes().await.map_err(|e| {
            AppError::BadRequest(format!("Failed to read file bytes: {}", e))
        })?;
        let text = String::from_utf8(bytes.to_vec())
            .map_err(|_| AppError::BadRequest(format!("{} is not valid UTF-8", filename)))?;

        files.push(UploadedFile { filename, text });
    }

    Ok(files)
}
