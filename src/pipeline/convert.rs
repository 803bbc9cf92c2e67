use crate::error::UnitError;
use crate::types::units::{
    Converted, DistanceUnit, ElevationUnit, SpeedUnit, TempUnit, Unit, UnitPreference,
};

const KM_PER_MILE: f64 = 1.609;
const FEET_PER_METER: f64 = 3.281;

/// Converts `value` given in the unit named by `from` into the preferred unit of the same kind.
pub fn convert(value: f64, from: &str, preference: &UnitPreference) -> Result<Converted, UnitError> {
    let unit = Unit::from_symbol(from).ok_or_else(|| UnitError::InvalidUnit(from.to_string()))?;
    Ok(convert_unit(value, unit, preference))
}

pub fn convert_unit(value: f64, from: Unit, preference: &UnitPreference) -> Converted {
    match from {
        Unit::Distance(from) => Converted {
            value: convert_distance(value, from, preference.distance_unit),
            unit: Unit::Distance(preference.distance_unit),
        },
        Unit::Speed(from) => Converted {
            value: convert_speed(value, from, preference.speed_unit),
            unit: Unit::Speed(preference.speed_unit),
        },
        Unit::Elevation(from) => Converted {
            value: convert_elevation(value, from, preference.elevation_unit),
            unit: Unit::Elevation(preference.elevation_unit),
        },
        Unit::Temperature(from) => Converted {
            value: convert_temp(value, from, preference.temp_unit),
            unit: Unit::Temperature(preference.temp_unit),
        },
    }
}

fn convert_distance(value: f64, from: DistanceUnit, to: DistanceUnit) -> f64 {
    match (from, to) {
        (DistanceUnit::Km, DistanceUnit::Mi) => value / KM_PER_MILE,
        (DistanceUnit::Mi, DistanceUnit::Km) => value * KM_PER_MILE,
        _ => value,
    }
}

fn convert_speed(value: f64, from: SpeedUnit, to: SpeedUnit) -> f64 {
    match (from, to) {
        (SpeedUnit::Kmh, SpeedUnit::Mph) => value / KM_PER_MILE,
        (SpeedUnit::Mph, SpeedUnit::Kmh) => value * KM_PER_MILE,
        _ => value,
    }
}

fn convert_elevation(value: f64, from: ElevationUnit, to: ElevationUnit) -> f64 {
    match (from, to) {
        (ElevationUnit::Meters, ElevationUnit::Feet) => value * FEET_PER_METER,
        (ElevationUnit::Feet, ElevationUnit::Meters) => value / FEET_PER_METER,
        _ => value,
    }
}

fn convert_temp(value: f64, from: TempUnit, to: TempUnit) -> f64 {
    match (from, to) {
        (TempUnit::Celsius, TempUnit::Fahrenheit) => value * 9.0 / 5.0 + 32.0,
        (TempUnit::Fahrenheit, TempUnit::Celsius) => (value - 32.0) * 5.0 / 9.0,
        _ => value,
    }
}
