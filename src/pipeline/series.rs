use crate::error::TrackError;
use crate::pipeline::geo::cumulative_distance_km;
use crate::types::series::{Series, SeriesKind};
use crate::types::track::TrackPoint;

/// Below this many seconds between samples the previous speed is repeated.
const MIN_SPEED_INTERVAL_SECS: f64 = 0.1;

pub fn channel_has_data(points: &[TrackPoint], kind: SeriesKind) -> bool {
    points.iter().any(|p| match kind {
        SeriesKind::Elevation => p.elevation.is_some(),
        SeriesKind::Speed => p.time.is_some(),
        SeriesKind::HeartRate => p.heart_rate.is_some(),
        SeriesKind::Cadence => p.cadence.is_some(),
        SeriesKind::Power => p.power.is_some(),
        SeriesKind::Temperature => p.temperature.is_some(),
    })
}

/// Chart series over cumulative distance.
///
/// Missing samples are drawn as 0 to keep the line continuous. This is a
/// charting policy only; statistics in `process` skip missing samples instead.
pub fn compute_series(points: &[TrackPoint], kind: SeriesKind) -> Result<Series, TrackError> {
    if !channel_has_data(points, kind) {
        return Err(TrackError::EmptyChannel(kind.as_str()));
    }

    let x = cumulative_distance_km(points);
    let y = match kind {
        SeriesKind::Speed => speeds_kmh(points, &x),
        SeriesKind::Elevation => points.iter().map(|p| p.elevation.unwrap_or(0.0)).collect(),
        SeriesKind::HeartRate => points
            .iter()
            .map(|p| p.heart_rate.map(f64::from).unwrap_or(0.0))
            .collect(),
        SeriesKind::Cadence => points
            .iter()
            .map(|p| p.cadence.map(f64::from).unwrap_or(0.0))
            .collect(),
        SeriesKind::Power => points.iter().map(|p| p.power.unwrap_or(0.0)).collect(),
        SeriesKind::Temperature => points.iter().map(|p| p.temperature.unwrap_or(0.0)).collect(),
    };

    Ok(Series { kind, x, y })
}

// Instantaneous speed from consecutive samples. The first point is 0; a gap that
// is too short, negative, or lacks timestamps repeats the previous value.
fn speeds_kmh(points: &[TrackPoint], cumulative_km: &[f64]) -> Vec<f64> {
    let mut speeds: Vec<f64> = Vec::with_capacity(points.len());
    for i in 0..points.len() {
        if i == 0 {
            speeds.push(0.0);
            continue;
        }
        let previous = speeds[i - 1];
        let elapsed_secs = match (points[i - 1].instant(), points[i].instant()) {
            (Some(prev), Some(curr)) => Some((curr - prev).num_milliseconds() as f64 / 1000.0),
            _ => None,
        };
        let speed = match elapsed_secs {
            Some(secs) if secs >= MIN_SPEED_INTERVAL_SECS => {
                (cumulative_km[i] - cumulative_km[i - 1]) / (secs / 3600.0)
            }
            _ => previous,
        };
        speeds.push(speed);
    }
    speeds
}
