use axum::{body::to_bytes, http::Request, Router};
use gpxsplice::{config::Config, pipeline::gpx, routes, state::AppState};
use serde_json::Value;
use tower::ServiceExt;

fn app() -> Router {
    let config = Config::from_env();
    let state = AppState::new(config);
    routes::router().with_state(state)
}

fn sample_gpx() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test">
  <metadata><name>Canal Run</name></metadata>
  <trk><type>Run</type><trkseg>
    <trkpt lat="51.5000" lon="-0.1200"><ele>12</ele><time>2026-03-01T07:00:00Z</time></trkpt>
    <trkpt lat="51.5010" lon="-0.1200"><ele>14</ele><time>2026-03-01T07:00:30Z</time></trkpt>
    <trkpt lat="51.5020" lon="-0.1210"><time>2026-03-01T07:01:00Z</time></trkpt>
  </trkseg></trk>
</gpx>"#
}

fn multipart_body(file_name: &str, file_body: &str, boundary: &str) -> String {
    format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n{file_body}\r\n--{boundary}--\r\n"
    )
}

async fn upload(app: &Router) -> String {
    let boundary = "X-BOUNDARY-TEST";
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/upload")
                .method("POST")
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(axum::body::Body::from(multipart_body("run.gpx", sample_gpx(), boundary)))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("upload body");
    let json: Value = serde_json::from_slice(&body).expect("upload json");
    json["file_id"].as_str().expect("file id").to_string()
}

async fn get(app: &Router, uri: &str) -> (axum::http::StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .method("GET")
                .body(axum::body::Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    (status, headers, body.to_vec())
}

#[tokio::test]
async fn describe_returns_cached_track() {
    let app = app();
    let file_id = upload(&app).await;

    let (status, _, body) = get(&app, &format!("/api/tracks/{file_id}")).await;
    assert_eq!(status, axum::http::StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(json["name"], "Canal Run");
    assert_eq!(json["activity_type"], "Run");
    assert_eq!(json["summary"]["elevation_gain_m"], 2.0);
}

#[tokio::test]
async fn unknown_track_is_not_found() {
    let (status, _, _) = get(&app(), "/api/tracks/does-not-exist").await;
    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn speed_series_has_one_value_per_point() {
    let app = app();
    let file_id = upload(&app).await;

    let (status, _, body) = get(&app, &format!("/api/tracks/{file_id}/series/speed")).await;
    assert_eq!(status, axum::http::StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(json["kind"], "speed");
    assert_eq!(json["x"].as_array().map(Vec::len), Some(3));
    assert_eq!(json["y"][0], 0.0);
    assert!(json["y"][1].as_f64().expect("speed") > 0.0);
}

#[tokio::test]
async fn series_errors() {
    let app = app();
    let file_id = upload(&app).await;

    let (status, _, _) = get(&app, &format!("/api/tracks/{file_id}/series/altitude")).await;
    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);

    let (status, _, body) = get(&app, &format!("/api/tracks/{file_id}/series/power")).await;
    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_slice(&body).expect("json");
    assert!(json["error"].as_str().expect("error").contains("power"));
}

#[tokio::test]
async fn export_round_trips_through_parser() {
    let app = app();
    let file_id = upload(&app).await;

    let (status, headers, body) = get(&app, &format!("/api/tracks/{file_id}/export")).await;
    assert_eq!(status, axum::http::StatusCode::OK);
    assert_eq!(
        headers.get("content-type").and_then(|v| v.to_str().ok()),
        Some("application/gpx+xml")
    );
    assert_eq!(
        headers.get("content-disposition").and_then(|v| v.to_str().ok()),
        Some("attachment; filename=\"Canal Run.gpx\"")
    );

    let xml = String::from_utf8(body).expect("utf8");
    let exported = gpx::parse(&xml, "unused").expect("exported gpx parses");
    let original = gpx::parse(sample_gpx(), "run").expect("sample parses");
    assert_eq!(exported, original);
}

#[tokio::test]
async fn export_for_upload_offsets_timestamps() {
    let app = app();
    let file_id = upload(&app).await;
    let offset = Config::from_env().upload_time_offset;

    let (status, _, body) = get(&app, &format!("/api/tracks/{file_id}/export?upload=true")).await;
    assert_eq!(status, axum::http::StatusCode::OK);
    let exported = gpx::parse(&String::from_utf8(body).expect("utf8"), "unused").expect("parses");
    let original = gpx::parse(sample_gpx(), "run").expect("sample parses");

    for (shifted, source) in exported.points.iter().zip(&original.points) {
        let delta = shifted.instant().expect("time") - source.instant().expect("time");
        assert_eq!(delta.num_milliseconds(), offset.as_millis() as i64);
        assert_eq!((shifted.lat, shifted.lon), (source.lat, source.lon));
    }
}
