use chrono::{Duration, SecondsFormat};

use crate::error::TrackError;
use crate::types::track::{Track, TrackPoint};

/// Splits at `index` into `points[..index]` and `points[index..]`.
/// Both halves must be non-empty.
pub fn split_track(track: &Track, index: usize) -> Result<(Track, Track), TrackError> {
    let len = track.points.len();
    if index == 0 || index >= len {
        return Err(TrackError::InvalidSplitPoint { index, len });
    }

    let (head, tail) = track.points.split_at(index);
    let first = Track::new(
        format!("{} (1-2)", track.name),
        track.activity_type.clone(),
        head.to_vec(),
    );
    let second = Track::new(
        format!("{} (2-2)", track.name),
        track.activity_type.clone(),
        tail.to_vec(),
    );
    Ok((first, second))
}

/// Joins tracks into one, ordered by the timestamp of each track's first point.
///
/// Ordering is best effort: a track that is empty or whose first timestamp is
/// missing or unparsable is never moved past its neighbours, so its position
/// relative to the input order is kept. Name and activity type come from the
/// first track after ordering.
pub fn combine_tracks(tracks: &[Track]) -> Result<Track, TrackError> {
    if tracks.len() < 2 {
        return Err(TrackError::NotEnoughTracks(tracks.len()));
    }

    let mut ordered: Vec<&Track> = tracks.iter().collect();
    // Stable insertion sort that only swaps pairs whose start times are both known.
    for i in 1..ordered.len() {
        let mut j = i;
        while j > 0 {
            match (ordered[j - 1].start_instant(), ordered[j].start_instant()) {
                (Some(prev), Some(cur)) if prev > cur => {
                    ordered.swap(j - 1, j);
                    j -= 1;
                }
                _ => break,
            }
        }
    }

    let first = ordered[0];
    let points: Vec<TrackPoint> = ordered
        .iter()
        .flat_map(|track| track.points.iter().cloned())
        .collect();

    Ok(Track::new(
        format!("{} (combined)", first.name),
        first.activity_type.clone(),
        points,
    ))
}

/// Shifts every parsable timestamp by `offset_ms`. Missing timestamps stay missing;
/// unparsable ones are kept verbatim.
pub fn offset_timestamps(track: &Track, offset_ms: i64) -> Track {
    let offset = Duration::milliseconds(offset_ms);
    let points = track
        .points
        .iter()
        .map(|point| {
            let time = match point.instant().and_then(|t| t.checked_add_signed(offset)) {
                Some(shifted) => Some(shifted.to_rfc3339_opts(SecondsFormat::Millis, true)),
                None => point.time.clone(),
            };
            TrackPoint {
                time,
                ..point.clone()
            }
        })
        .collect();

    Track::new(track.name.clone(), track.activity_type.clone(), points)
}

/// Share of the total distance covered at `index`, for placing a split marker
/// on a distance axis. Zero when the track has no length.
pub fn split_fraction(cumulative_km: &[f64], index: usize) -> f64 {
    let total = cumulative_km.last().copied().unwrap_or(0.0);
    if total <= 0.0 {
        return 0.0;
    }
    let at = cumulative_km.get(index).copied().unwrap_or(total);
    at / total
}

/// Maps a 0..=1 slider position to a point index within `0..len`.
pub fn slider_index(fraction: f64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let raw = (fraction.clamp(0.0, 1.0) * len as f64).floor() as usize;
    raw.min(len - 1)
}
