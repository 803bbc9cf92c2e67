use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Activity type written when a file carries none.
pub const UNKNOWN_ACTIVITY_TYPE: &str = "Unknown";

/// One GPS sample. Optional channels stay `None` when the source lacks them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub lat: f64,
    pub lon: f64,
    pub elevation: Option<f64>,
    /// ISO-8601 instant, kept verbatim as read.
    pub time: Option<String>,
    pub heart_rate: Option<u32>,
    pub cadence: Option<u32>,
    pub power: Option<f64>,
    pub temperature: Option<f64>,
}

impl TrackPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            elevation: None,
            time: None,
            heart_rate: None,
            cadence: None,
            power: None,
            temperature: None,
        }
    }

    /// The timestamp as an instant, or `None` if absent or unparsable.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        self.time
            .as_deref()
            .and_then(|t| DateTime::parse_from_rfc3339(t.trim()).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn has_valid_position(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    pub activity_type: String,
    pub points: Vec<TrackPoint>,
}

impl Track {
    pub fn new(name: impl Into<String>, activity_type: impl Into<String>, points: Vec<TrackPoint>) -> Self {
        Self {
            name: name.into(),
            activity_type: activity_type.into(),
            points,
        }
    }

    pub fn start_instant(&self) -> Option<DateTime<Utc>> {
        self.points.first().and_then(TrackPoint::instant)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSummary {
    pub point_count: usize,
    pub distance_km: f64,
    pub duration_ms: Option<i64>,
    pub start_time: Option<String>,
    pub avg_speed_kmh: Option<f64>,
    pub elevation_gain_m: Option<f64>,
    pub avg_heart_rate: Option<f64>,
    pub max_heart_rate: Option<u32>,
    pub avg_cadence: Option<f64>,
    pub avg_power: Option<f64>,
    pub max_power: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum FileFormat {
    Gpx,
}

impl FileFormat {
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        match ext.to_lowercase().as_str() {
            "gpx" => Some(FileFormat::Gpx),
            _ => None,
        }
    }
}

/// File name without its directory or extension, used as a fallback track name.
pub fn file_stem(filename: &str) -> &str {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    match base.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instant_parses_rfc3339_and_rejects_garbage() {
        let mut p = TrackPoint::new(1.0, 2.0);
        p.time = Some("2024-03-01T10:00:00Z".to_string());
        assert!(p.instant().is_some());
        p.time = Some("yesterday".to_string());
        assert!(p.instant().is_none());
    }

    #[test]
    fn file_format_and_stem() {
        assert!(matches!(FileFormat::from_filename("ride.GPX"), Some(FileFormat::Gpx)));
        assert!(FileFormat::from_filename("ride.fit").is_none());
        assert!(FileFormat::from_filename("ride").is_none());
        assert_eq!(file_stem("some/dir/Morning Ride.gpx"), "Morning Ride");
        assert_eq!(file_stem("noext"), "noext");
    }

    #[test]
    fn position_bounds() {
        assert!(TrackPoint::new(90.0, -180.0).has_valid_position());
        assert!(!TrackPoint::new(90.5, 0.0).has_valid_position());
        assert!(!TrackPoint::new(0.0, 181.0).has_valid_position());
    }
}
