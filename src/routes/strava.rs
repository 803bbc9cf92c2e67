use axum::{
    extract::{Path, State},
    http::HeaderMap,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::{
    error::AppError,
    pipeline::streams::{track_from_streams, RemoteStreamSet},
    routes::TrackResponse,
    state::AppState,
    types::track::UNKNOWN_ACTIVITY_TYPE,
};

const STREAM_KEYS: &str = "time,distance,latlng,altitude,heartrate,cadence,watts,temp";

pub fn router() -> Router<AppState> {
    Router::new().route("/api/strava/activity/:activity_id", get(import_activity))
}

/// Builds a track from a remote activity's streams. The caller supplies an
/// already-authorized access token as a Bearer header.
async fn import_activity(
    State(state): State<AppState>,
    Path(activity_id): Path<u64>,
    headers: HeaderMap,
) -> Result<Json<TrackResponse>, AppError> {
    let access_token = bearer_token(&headers)
        .ok_or_else(|| AppError::BadRequest("Missing Strava Bearer token".to_string()))?;
    let base = &state.config().strava_api_base;
    let client = reqwest::Client::new();

    let activity = fetch_json(
        &client,
        &format!("{}/activities/{}", base, activity_id),
        &access_token,
        "activity",
    )
    .await?;
    let streams = fetch_json(
        &client,
        &format!(
            "{}/activities/{}/streams?keys={}&key_by_type=true",
            base, activity_id, STREAM_KEYS
        ),
        &access_token,
        "streams",
    )
    .await?;

    let name = activity
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("Activity");
    let activity_type = activity
        .get("sport_type")
        .or_else(|| activity.get("type"))
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_ACTIVITY_TYPE);
    let start = activity
        .get("start_date")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| AppError::Upstream("Strava activity missing start_date".to_string()))?;

    let streams = RemoteStreamSet::from_json(streams)
        .map_err(|err| AppError::Upstream(format!("Invalid Strava streams response: {}", err)))?;
    let track = track_from_streams(&streams, name, activity_type, start)?;

    let file_id = state.insert(track.clone());
    tracing::info!(
        "Imported Strava activity {} as {} ({} points)",
        activity_id,
        file_id,
        track.points.len()
    );

    Ok(Json(TrackResponse::new(file_id, &track)))
}

async fn fetch_json(
    client: &reqwest::Client,
    url: &str,
    access_token: &str,
    what: &str,
) -> Result<Value, AppError> {
    let response = client
        .get(url)
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(|err| AppError::Upstream(format!("Failed to fetch Strava {}: {}", what, err)))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::Upstream(format!(
            "Strava {} request failed ({}): {}",
            what, status, body
        )));
    }

    response
        .json()
        .await
        .map_err(|err| AppError::Upstream(format!("Invalid Strava {} response: {}", what, err)))
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("authorization")?;
    let raw = value.to_str().ok()?;
    raw.strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);
        headers.insert("authorization", "Bearer abc123 ".parse().unwrap());
        assert_eq!(bearer_token(&headers).as_deref(), Some("abc123"));
        headers.insert("authorization", "Basic xyz".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
    }
}
