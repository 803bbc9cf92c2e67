use axum::{routing::post, Json, Router};
use serde::Deserialize;

use crate::error::AppError;
use crate::pipeline::convert;
use crate::state::AppState;
use crate::types::units::{Converted, UnitPreference};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/convert", post(convert_value))
}

#[derive(Deserialize)]
struct ConvertRequest {
    value: f64,
    unit: String,
    #[serde(default)]
    preference: UnitPreference,
}

async fn convert_value(Json(req): Json<ConvertRequest>) -> Result<Json<Converted>, AppError> {
    Ok(Json(convert::convert(req.value, &req.unit, &req.preference)?))
}
