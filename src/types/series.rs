use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Elevation,
    Speed,
    #[serde(rename = "heartrate")]
    HeartRate,
    Cadence,
    Power,
    Temperature,
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 6] = [
        SeriesKind::Elevation,
        SeriesKind::Speed,
        SeriesKind::HeartRate,
        SeriesKind::Cadence,
        SeriesKind::Power,
        SeriesKind::Temperature,
    ];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "elevation" => Some(SeriesKind::Elevation),
            "speed" => Some(SeriesKind::Speed),
            "heartrate" | "heart_rate" => Some(SeriesKind::HeartRate),
            "cadence" => Some(SeriesKind::Cadence),
            "power" => Some(SeriesKind::Power),
            "temperature" => Some(SeriesKind::Temperature),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesKind::Elevation => "elevation",
            SeriesKind::Speed => "speed",
            SeriesKind::HeartRate => "heartrate",
            SeriesKind::Cadence => "cadence",
            SeriesKind::Power => "power",
            SeriesKind::Temperature => "temperature",
        }
    }
}

/// Chart data: x is cumulative distance in km, y the channel value per point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub kind: SeriesKind,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}
