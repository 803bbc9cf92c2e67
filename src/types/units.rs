use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceUnit {
    #[serde(rename = "km")]
    Km,
    #[serde(rename = "mi")]
    Mi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedUnit {
    #[serde(rename = "km/h")]
    Kmh,
    #[serde(rename = "mi/h")]
    Mph,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElevationUnit {
    #[serde(rename = "m")]
    Meters,
    #[serde(rename = "ft")]
    Feet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TempUnit {
    #[serde(rename = "°C")]
    Celsius,
    #[serde(rename = "°F")]
    Fahrenheit,
}

/// Any unit the converter knows, tagged by quantity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Distance(DistanceUnit),
    Speed(SpeedUnit),
    Elevation(ElevationUnit),
    Temperature(TempUnit),
}

impl Unit {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "km" => Some(Unit::Distance(DistanceUnit::Km)),
            "mi" => Some(Unit::Distance(DistanceUnit::Mi)),
            "km/h" => Some(Unit::Speed(SpeedUnit::Kmh)),
            "mi/h" => Some(Unit::Speed(SpeedUnit::Mph)),
            "m" => Some(Unit::Elevation(ElevationUnit::Meters)),
            "ft" => Some(Unit::Elevation(ElevationUnit::Feet)),
            "°C" => Some(Unit::Temperature(TempUnit::Celsius)),
            "°F" => Some(Unit::Temperature(TempUnit::Fahrenheit)),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Distance(DistanceUnit::Km) => "km",
            Unit::Distance(DistanceUnit::Mi) => "mi",
            Unit::Speed(SpeedUnit::Kmh) => "km/h",
            Unit::Speed(SpeedUnit::Mph) => "mi/h",
            Unit::Elevation(ElevationUnit::Meters) => "m",
            Unit::Elevation(ElevationUnit::Feet) => "ft",
            Unit::Temperature(TempUnit::Celsius) => "°C",
            Unit::Temperature(TempUnit::Fahrenheit) => "°F",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Serialize for Unit {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

/// The user's display unit per quantity kind. Supplied per call, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitPreference {
    pub distance_unit: DistanceUnit,
    pub speed_unit: SpeedUnit,
    pub elevation_unit: ElevationUnit,
    pub temp_unit: TempUnit,
}

impl Default for UnitPreference {
    fn default() -> Self {
        Self {
            distance_unit: DistanceUnit::Km,
            speed_unit: SpeedUnit::Kmh,
            elevation_unit: ElevationUnit::Meters,
            temp_unit: TempUnit::Celsius,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Converted {
    pub value: f64,
    pub unit: Unit,
}
