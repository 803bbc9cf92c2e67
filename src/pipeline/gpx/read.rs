use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::ParseError;
use crate::types::track::{Track, TrackPoint, UNKNOWN_ACTIVITY_TYPE};

/// Parses GPX text into a single flat track. All `<trkseg>`s are concatenated in
/// document order. `fallback_name` is used when there is no `<metadata><name>`.
pub fn parse(text: &str, fallback_name: &str) -> Result<Track, ParseError> {
    let mut reader = Reader::from_reader(text.as_bytes());
    reader.trim_text(true);

    let mut points = Vec::new();
    let mut stack: Vec<String> = Vec::new();
    let mut current_point: Option<TrackPoint> = None;
    let mut metadata_name: Option<String> = None;
    let mut activity_type: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = local_name(&e)?;
                if name == "trkpt" {
                    current_point = Some(read_position(&e, points.len())?);
                }
                stack.push(name);
            }
            Ok(Event::Empty(e)) => {
                if local_name(&e)? == "trkpt" {
                    points.push(read_position(&e, points.len())?);
                }
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| ParseError::MalformedTrack(e.to_string()))?;
                apply_text(&text, &stack, &mut current_point, &mut metadata_name, &mut activity_type);
            }
            Ok(Event::CData(e)) => {
                let text = std::str::from_utf8(&e)
                    .map_err(|e| ParseError::MalformedTrack(e.to_string()))?;
                apply_text(text.trim(), &stack, &mut current_point, &mut metadata_name, &mut activity_type);
            }
            Ok(Event::End(e)) => {
                if e.local_name().as_ref() == b"trkpt" {
                    if let Some(point) = current_point.take() {
                        points.push(point);
                    }
                }
                stack.pop();
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::MalformedTrack(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    if points.is_empty() {
        return Err(ParseError::MalformedTrack("no track points found".to_string()));
    }

    Ok(Track {
        name: metadata_name.unwrap_or_else(|| fallback_name.to_string()),
        activity_type: activity_type.unwrap_or_else(|| UNKNOWN_ACTIVITY_TYPE.to_string()),
        points,
    })
}

// Routes element text to the field named by the enclosing element.
fn apply_text(
    text: &str,
    stack: &[String],
    current_point: &mut Option<TrackPoint>,
    metadata_name: &mut Option<String>,
    activity_type: &mut Option<String>,
) {
    let element = stack.last().map(String::as_str).unwrap_or("");
    let parent = stack
        .len()
        .checked_sub(2)
        .and_then(|i| stack.get(i))
        .map(String::as_str)
        .unwrap_or("");

    if let Some(point) = current_point.as_mut() {
        match element {
            "ele" => point.elevation = text.parse().ok(),
            "time" => point.time = Some(text.to_string()),
            "power" => point.power = text.parse().ok(),
            "hr" => point.heart_rate = parse_count(text),
            "cad" => point.cadence = parse_count(text),
            "atemp" => point.temperature = text.parse().ok(),
            _ => {}
        }
    } else {
        match (parent, element) {
            ("metadata", "name") => *metadata_name = Some(text.to_string()),
            ("trk", "type") => *activity_type = Some(text.to_string()),
            _ => {}
        }
    }
}

fn local_name(e: &BytesStart<'_>) -> Result<String, ParseError> {
    std::str::from_utf8(e.local_name().as_ref())
        .map(str::to_string)
        .map_err(|e| ParseError::MalformedTrack(e.to_string()))
}

fn read_position(e: &BytesStart<'_>, index: usize) -> Result<TrackPoint, ParseError> {
    let mut lat = None;
    let mut lon = None;

    for attr in e.attributes() {
        let attr = attr.map_err(|e| ParseError::MalformedTrack(e.to_string()))?;
        let value = attr
            .unescape_value()
            .map_err(|e| ParseError::MalformedTrack(e.to_string()))?;
        match attr.key.local_name().as_ref() {
            b"lat" => lat = Some(parse_coordinate(&value, "lat", index)?),
            b"lon" => lon = Some(parse_coordinate(&value, "lon", index)?),
            _ => {}
        }
    }

    let lat = lat.ok_or_else(|| missing("lat", index))?;
    let lon = lon.ok_or_else(|| missing("lon", index))?;
    let point = TrackPoint::new(lat, lon);
    if !point.has_valid_position() {
        return Err(ParseError::MalformedTrack(format!(
            "track point {} has out of range position ({}, {})",
            index, lat, lon
        )));
    }
    Ok(point)
}

fn parse_coordinate(value: &str, attr: &str, index: usize) -> Result<f64, ParseError> {
    value.trim().parse::<f64>().map_err(|_| {
        ParseError::MalformedTrack(format!(
            "track point {} has non-numeric {} {:?}",
            index, attr, value
        ))
    })
}

fn missing(attr: &str, index: usize) -> ParseError {
    ParseError::MalformedTrack(format!("track point {} is missing {}", index, attr))
}

// Some devices write integer channels as "142.0".
fn parse_count(text: &str) -> Option<u32> {
    text.parse::<u32>().ok().or_else(|| {
        text.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0 && *v <= u32::MAX as f64)
            .map(|v| v.round() as u32)
    })
}
