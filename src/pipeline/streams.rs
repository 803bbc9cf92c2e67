use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::error::StreamError;
use crate::types::track::{Track, TrackPoint};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Stream<T> {
    pub data: Vec<T>,
}

/// Parallel per-sample channels of a remote activity, keyed by channel name.
/// Channels may be shorter than `latlng`; missing samples stay absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteStreamSet {
    /// Seconds since the activity start.
    pub time: Option<Stream<Option<f64>>>,
    pub distance: Option<Stream<Option<f64>>>,
    pub latlng: Option<Stream<[f64; 2]>>,
    pub altitude: Option<Stream<Option<f64>>>,
    pub heartrate: Option<Stream<Option<f64>>>,
    pub cadence: Option<Stream<Option<f64>>>,
    pub watts: Option<Stream<Option<f64>>>,
    pub temp: Option<Stream<Option<f64>>>,
}

impl RemoteStreamSet {
    /// Accepts both the keyed object form and the list form
    /// (`[{"type": "latlng", "data": [...]}, ...]`).
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        match value {
            Value::Array(streams) => {
                let keyed: serde_json::Map<String, Value> = streams
                    .into_iter()
                    .filter_map(|stream| {
                        let kind = stream.get("type")?.as_str()?.to_string();
                        Some((kind, stream))
                    })
                    .collect();
                serde_json::from_value(Value::Object(keyed))
            }
            other => serde_json::from_value(other),
        }
    }
}

/// Zips the stream set index by index into a track. Timestamps are `start` plus
/// the `time` channel offsets.
pub fn track_from_streams(
    streams: &RemoteStreamSet,
    name: &str,
    activity_type: &str,
    start: DateTime<Utc>,
) -> Result<Track, StreamError> {
    let latlng = streams
        .latlng
        .as_ref()
        .ok_or(StreamError::MissingRequiredChannel("latlng"))?;

    let points = latlng
        .data
        .iter()
        .enumerate()
        .map(|(idx, &[lat, lon])| {
            let point = TrackPoint {
                lat,
                lon,
                elevation: sample(&streams.altitude, idx),
                time: sample(&streams.time, idx)
                    .and_then(|secs| Duration::try_milliseconds((secs * 1000.0).round() as i64))
                    .and_then(|offset| start.checked_add_signed(offset))
                    .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true)),
                heart_rate: sample(&streams.heartrate, idx).and_then(to_count),
                cadence: sample(&streams.cadence, idx).and_then(to_count),
                power: sample(&streams.watts, idx),
                temperature: sample(&streams.temp, idx),
            };
            if point.has_valid_position() {
                Ok(point)
            } else {
                Err(StreamError::InvalidPosition { index: idx, lat, lon })
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Track::new(name, activity_type, points))
}

fn sample(stream: &Option<Stream<Option<f64>>>, idx: usize) -> Option<f64> {
    stream
        .as_ref()
        .and_then(|s| s.data.get(idx).copied().flatten())
        .filter(|v| v.is_finite())
}

fn to_count(value: f64) -> Option<u32> {
    if value >= 0.0 && value <= u32::MAX as f64 {
        Some(value.round() as u32)
    } else {
        None
    }
}
