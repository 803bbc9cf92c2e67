use crate::pipeline::geo::cumulative_distance_km;
use crate::pipeline::series::channel_has_data;
use crate::types::series::SeriesKind;
use crate::types::track::{TrackPoint, TrackSummary};

pub fn compute_summary(points: &[TrackPoint]) -> TrackSummary {
    let distance_km = cumulative_distance_km(points).last().copied().unwrap_or(0.0);

    let duration_ms = match (points.first(), points.last()) {
        (Some(first), Some(last)) => match (first.instant(), last.instant()) {
            (Some(start), Some(end)) => Some((end - start).num_milliseconds()),
            _ => None,
        },
        _ => None,
    };

    let avg_speed_kmh = duration_ms
        .filter(|ms| *ms > 0)
        .map(|ms| distance_km / (ms as f64 / 3_600_000.0));

    let mut elevation_gain_m = None;
    for pair in points.windows(2) {
        if let (Some(prev_ele), Some(curr_ele)) = (pair[0].elevation, pair[1].elevation) {
            let gain = elevation_gain_m.get_or_insert(0.0);
            if curr_ele > prev_ele {
                *gain += curr_ele - prev_ele;
            }
        }
    }
    if elevation_gain_m.is_none() && points.iter().any(|p| p.elevation.is_some()) {
        elevation_gain_m = Some(0.0);
    }

    TrackSummary {
        point_count: points.len(),
        distance_km,
        duration_ms,
        start_time: points.first().and_then(|p| p.time.clone()),
        avg_speed_kmh,
        elevation_gain_m,
        avg_heart_rate: mean(points.iter().filter_map(|p| p.heart_rate.map(f64::from))),
        max_heart_rate: points.iter().filter_map(|p| p.heart_rate).max(),
        avg_cadence: mean(points.iter().filter_map(|p| p.cadence.map(f64::from))),
        avg_power: mean(points.iter().filter_map(|p| p.power)),
        max_power: points.iter().filter_map(|p| p.power).reduce(f64::max),
    }
}

/// Series kinds for which a chart can be drawn.
pub fn available_channels(points: &[TrackPoint]) -> Vec<SeriesKind> {
    SeriesKind::ALL
        .into_iter()
        .filter(|kind| channel_has_data(points, *kind))
        .collect()
}

// Mean over present samples only; `None` when nothing was recorded.
fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, time: Option<&str>) -> TrackPoint {
        let mut p = TrackPoint::new(lat, 0.0);
        p.time = time.map(str::to_string);
        p
    }

    #[test]
    fn distance_duration_and_speed() {
        let points = vec![
            point(0.0, Some("2024-01-01T10:00:00Z")),
            point(0.5, Some("2024-01-01T10:30:00Z")),
            point(1.0, Some("2024-01-01T11:00:00Z")),
        ];
        let summary = compute_summary(&points);
        assert_eq!(summary.point_count, 3);
        assert!((summary.distance_km - 111.195).abs() < 0.01);
        assert_eq!(summary.duration_ms, Some(3_600_000));
        assert!((summary.avg_speed_kmh.unwrap() - 111.195).abs() < 0.01);
        assert_eq!(summary.start_time.as_deref(), Some("2024-01-01T10:00:00Z"));
    }

    #[test]
    fn missing_timestamps_give_no_duration_or_speed() {
        let points = vec![point(0.0, Some("2024-01-01T10:00:00Z")), point(0.1, None)];
        let summary = compute_summary(&points);
        assert_eq!(summary.duration_ms, None);
        assert_eq!(summary.avg_speed_kmh, None);

        let unparsable = vec![point(0.0, Some("soon")), point(0.1, Some("2024-01-01T10:00:00Z"))];
        let summary = compute_summary(&unparsable);
        assert_eq!(summary.duration_ms, None);
        assert_eq!(summary.start_time.as_deref(), Some("soon"));
    }

    #[test]
    fn absent_channels_average_to_none_not_zero() {
        let points = vec![point(0.0, None), point(0.1, None)];
        let summary = compute_summary(&points);
        assert_eq!(summary.avg_heart_rate, None);
        assert_eq!(summary.max_heart_rate, None);
        assert_eq!(summary.avg_cadence, None);
        assert_eq!(summary.avg_power, None);
        assert_eq!(summary.max_power, None);
        assert_eq!(summary.elevation_gain_m, None);
    }

    #[test]
    fn averages_ignore_missing_samples() {
        let mut a = point(0.0, None);
        a.heart_rate = Some(100);
        a.power = Some(200.0);
        let b = point(0.1, None);
        let mut c = point(0.2, None);
        c.heart_rate = Some(140);
        c.cadence = Some(90);
        let summary = compute_summary(&[a, b, c]);
        assert_eq!(summary.avg_heart_rate, Some(120.0));
        assert_eq!(summary.max_heart_rate, Some(140));
        assert_eq!(summary.avg_cadence, Some(90.0));
        assert_eq!(summary.avg_power, Some(200.0));
        assert_eq!(summary.max_power, Some(200.0));
    }

    #[test]
    fn elevation_gain_counts_climbs_only() {
        let elevations = [Some(100.0), Some(110.0), Some(105.0), None, Some(120.0), Some(125.0)];
        let points: Vec<TrackPoint> = elevations
            .iter()
            .enumerate()
            .map(|(i, ele)| {
                let mut p = point(i as f64 * 0.001, None);
                p.elevation = *ele;
                p
            })
            .collect();
        assert_eq!(compute_summary(&points).elevation_gain_m, Some(15.0));
    }

    #[test]
    fn single_and_empty_inputs() {
        let summary = compute_summary(&[point(1.0, Some("2024-01-01T10:00:00Z"))]);
        assert_eq!(summary.distance_km, 0.0);
        assert_eq!(summary.duration_ms, Some(0));
        assert_eq!(summary.avg_speed_kmh, None);
        assert_eq!(compute_summary(&[]).point_count, 0);
    }

    #[test]
    fn lists_available_channels() {
        let mut a = point(0.0, Some("2024-01-01T10:00:00Z"));
        a.heart_rate = Some(120);
        let channels = available_channels(&[a, point(0.1, None)]);
        assert_eq!(channels, vec![SeriesKind::Speed, SeriesKind::HeartRate]);
    }
}
