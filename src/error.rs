use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Malformed track: {0}")]
    MalformedTrack(String),
}

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("GPX serialization failed: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("GPX output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error("Invalid split point {index} for a track of {len} points")]
    InvalidSplitPoint { index: usize, len: usize },
    #[error("No {0} data available in this track")]
    EmptyChannel(&'static str),
    #[error("Need at least 2 tracks to combine, got {0}")]
    NotEnoughTracks(usize),
}

#[derive(Debug, thiserror::Error)]
pub enum UnitError {
    #[error("Invalid unit: {0}")]
    InvalidUnit(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("Remote stream set is missing the required {0} channel")]
    MissingRequiredChannel(&'static str),
    #[error("Remote stream sample {index} has out of range position ({lat}, {lon})")]
    InvalidPosition { index: usize, lat: f64, lon: f64 },
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Write(#[from] WriteError),
    #[error(transparent)]
    Track(#[from] TrackError),
    #[error(transparent)]
    Unit(#[from] UnitError),
    #[error(transparent)]
    Stream(#[from] StreamError),
    #[error("Track not found: {0}")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Upstream request failed: {0}")]
    Upstream(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Parse(_)
            | AppError::Track(_)
            | AppError::Unit(_)
            | AppError::Stream(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Write(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
