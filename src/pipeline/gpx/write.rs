use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::WriteError;
use crate::types::track::{Track, TrackPoint, UNKNOWN_ACTIVITY_TYPE};

const CREATOR: &str = "GPXSplice with Barometer";
const GPX_NS: &str = "http://www.topografix.com/GPX/1/1";
const TPX_NS: &str = "http://www.garmin.com/xmlschemas/TrackPointExtension/v1";
const GPXX_NS: &str = "http://www.garmin.com/xmlschemas/GpxExtensions/v3";
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str = "http://www.topografix.com/GPX/1/1 http://www.topografix.com/GPX/1/1/gpx.xsd \
http://www.garmin.com/xmlschemas/GpxExtensions/v3 http://www.garmin.com/xmlschemas/GpxExtensionsv3.xsd \
http://www.garmin.com/xmlschemas/TrackPointExtension/v1 http://www.garmin.com/xmlschemas/TrackPointExtensionv1.xsd";

type XmlWriter = Writer<Vec<u8>>;

/// Serializes a track as a GPX 1.1 document with one `<trk>` and one `<trkseg>`.
pub fn serialize(track: &Track) -> Result<String, WriteError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("gpx").with_attributes([
        ("creator", CREATOR),
        ("xmlns:xsi", XSI_NS),
        ("xsi:schemaLocation", SCHEMA_LOCATION),
        ("version", "1.1"),
        ("xmlns", GPX_NS),
        ("xmlns:gpxtpx", TPX_NS),
        ("xmlns:gpxx", GPXX_NS),
    ])))?;

    open(&mut writer, "metadata")?;
    text_element(&mut writer, "name", &track.name)?;
    close(&mut writer, "metadata")?;

    let activity_type = if track.activity_type.is_empty() {
        UNKNOWN_ACTIVITY_TYPE
    } else {
        track.activity_type.as_str()
    };

    open(&mut writer, "trk")?;
    text_element(&mut writer, "name", &track.name)?;
    text_element(&mut writer, "type", activity_type)?;
    open(&mut writer, "trkseg")?;
    for point in &track.points {
        write_point(&mut writer, point)?;
    }
    close(&mut writer, "trkseg")?;
    close(&mut writer, "trk")?;
    close(&mut writer, "gpx")?;

    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_point(writer: &mut XmlWriter, point: &TrackPoint) -> Result<(), WriteError> {
    let lat = point.lat.to_string();
    let lon = point.lon.to_string();
    writer.write_event(Event::Start(
        BytesStart::new("trkpt").with_attributes([("lat", lat.as_str()), ("lon", lon.as_str())]),
    ))?;

    if let Some(ele) = point.elevation {
        text_element(writer, "ele", &ele.to_string())?;
    }
    if let Some(time) = &point.time {
        text_element(writer, "time", time)?;
    }

    let has_tpx = point.temperature.is_some() || point.heart_rate.is_some() || point.cadence.is_some();
    if point.power.is_some() || has_tpx {
        open(writer, "extensions")?;
        if let Some(power) = point.power {
            text_element(writer, "power", &power.to_string())?;
        }
        if has_tpx {
            // TrackPointExtension/v1 sequence order: atemp, hr, cad.
            open(writer, "gpxtpx:TrackPointExtension")?;
            if let Some(temp) = point.temperature {
                text_element(writer, "gpxtpx:atemp", &temp.to_string())?;
            }
            if let Some(hr) = point.heart_rate {
                text_element(writer, "gpxtpx:hr", &hr.to_string())?;
            }
            if let Some(cad) = point.cadence {
                text_element(writer, "gpxtpx:cad", &cad.to_string())?;
            }
            close(writer, "gpxtpx:TrackPointExtension")?;
        }
        close(writer, "extensions")?;
    }

    close(writer, "trkpt")
}

fn open(writer: &mut XmlWriter, tag: &str) -> Result<(), WriteError> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    Ok(())
}

fn close(writer: &mut XmlWriter, tag: &str) -> Result<(), WriteError> {
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn text_element(writer: &mut XmlWriter, tag: &str, text: &str) -> Result<(), WriteError> {
    open(writer, tag)?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    close(writer, tag)
}
