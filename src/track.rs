use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{Error, Malformed};
use crate::gpx;
use crate::units::Meters;

/// Elevations further than this from sea level are treated as garbage.
pub const MAX_ELEVATION: Meters = Meters(100_000.);

/// One recorded fix, with its text fields parsed and checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPoint {
    pub lat: f64,
    pub lon: f64,
    /// Zero when the point has no `<ele>`.
    pub ele: Meters,
    /// `None` when the point has no `<time>` or it could not be read.
    pub time: Option<DateTime<Utc>>,
}

impl TrackPoint {
    pub fn new(gpx: &gpx::Point<'_>) -> Result<Self, Error> {
        let lat = coordinate("latitude", &gpx.latitude, 90.)?;
        let lon = coordinate("longitude", &gpx.longitude, 180.)?;
        // `<ele/>` and `<ele></ele>` count as no elevation at all.
        let ele = match gpx.elevation.as_deref().filter(|text| !text.trim().is_empty()) {
            Some(text) => {
                let ele = text.parse::<Meters>().map_err(|source| Malformed::Number {
                    field: "elevation",
                    value: text.to_owned(),
                    source,
                })?;
                if !ele.0.is_finite() || ele.0.abs() > MAX_ELEVATION.0 {
                    return Err(Malformed::OutOfRange { field: "elevation", value: ele.0 }.into());
                }
                ele
            }
            None => Meters(0.),
        };
        let time = gpx.time.as_deref().and_then(parse_time);
        Ok(Self { lat, lon, ele, time })
    }
}

fn coordinate(field: &'static str, text: &str, limit: f64) -> Result<f64, Error> {
    let value: f64 = text.trim().parse().map_err(|source| Malformed::Number {
        field,
        value: text.to_owned(),
        source,
    })?;
    // "NaN" and "inf" parse fine as f64, and would poison every sum downstream.
    if !value.is_finite() || value.abs() > limit {
        return Err(Malformed::OutOfRange { field, value }.into());
    }
    Ok(value)
}

/// Read an RFC 3339 timestamp. Timestamps with no zone designator are taken to be UTC, since
/// enough recorders leave it off.
pub fn parse_time(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    DateTime::parse_from_rfc3339(text)
        .map(|t| t.with_timezone(&Utc))
        .or_else(|e| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|t| t.and_utc())
                .map_err(|_| e) // keep the RFC 3339 error, it is the more useful one
        })
        .map_err(|e| log::warn!("ignoring unreadable timestamp {:?}: {}", text, e))
        .ok()
}

/// All points of the given tracks in document order, ignoring track and segment boundaries.
pub fn flatten(tracks: &[gpx::Track<'_>]) -> Result<Vec<TrackPoint>, Error> {
    let mut points = vec![];
    let mut segments = 0;
    for track in tracks {
        for seg in &track.segments {
            segments += 1;
            for point in &seg.points {
                points.push(TrackPoint::new(point)?);
            }
        }
    }
    log::debug!(
        "flattened {} tracks, {} segments into {} points",
        tracks.len(),
        segments,
        points.len(),
    );
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    fn point<'a>(
        lat: &'a str,
        lon: &'a str,
        ele: Option<&'a str>,
        time: Option<&'a str>,
    ) -> gpx::Point<'a> {
        gpx::Point {
            latitude: Cow::Borrowed(lat),
            longitude: Cow::Borrowed(lon),
            elevation: ele.map(Cow::Borrowed),
            time: time.map(Cow::Borrowed),
        }
    }

    #[test]
    fn full_point() {
        let p = TrackPoint::new(&point("46.5", "-7.25", Some("1500.5"), Some("2024-06-01T08:00:00Z")))
            .unwrap();
        assert_eq!(p.lat, 46.5);
        assert_eq!(p.lon, -7.25);
        assert_eq!(p.ele, Meters(1500.5));
        assert_eq!(p.time, parse_time("2024-06-01T10:00:00+02:00"));
        assert!(p.time.is_some());
    }

    #[test]
    fn missing_elevation_and_time() {
        let p = TrackPoint::new(&point("0", "0", None, None)).unwrap();
        assert_eq!(p.ele, Meters(0.));
        assert_eq!(p.time, None);
    }

    #[test]
    fn empty_elevation_is_zero() {
        for text in &["", "  \n"] {
            let p = TrackPoint::new(&point("0", "0", Some(*text), None)).unwrap();
            assert_eq!(p.ele, Meters(0.));
        }
        let p = TrackPoint::new(&point("0", "0", Some("-420.5"), None)).unwrap();
        assert_eq!(p.ele, Meters(-420.5));
    }

    #[test]
    fn unreadable_time_is_dropped() {
        let p = TrackPoint::new(&point("0", "0", None, Some("yesterday"))).unwrap();
        assert_eq!(p.time, None);
    }

    #[test]
    fn time_without_zone_is_utc() {
        assert_eq!(
            parse_time("2024-06-01T08:00:00"),
            parse_time("2024-06-01T08:00:00Z"),
        );
        assert_eq!(
            parse_time("2024-06-01T08:00:00.250"),
            parse_time("2024-06-01T08:00:00.250Z"),
        );
    }

    #[test]
    fn bad_numbers() {
        assert!(matches!(
            TrackPoint::new(&point("north", "0", None, None)),
            Err(Error::MalformedInput(Malformed::Number { field: "latitude", .. }))
        ));
        assert!(matches!(
            TrackPoint::new(&point("0", "0", Some("tall"), None)),
            Err(Error::MalformedInput(Malformed::Number { field: "elevation", .. }))
        ));
        assert!(matches!(
            TrackPoint::new(&point("NaN", "0", None, None)),
            Err(Error::MalformedInput(Malformed::OutOfRange { field: "latitude", .. }))
        ));
        assert!(matches!(
            TrackPoint::new(&point("0", "180.5", None, None)),
            Err(Error::MalformedInput(Malformed::OutOfRange { field: "longitude", .. }))
        ));
        assert!(matches!(
            TrackPoint::new(&point("0", "0", Some("inf"), None)),
            Err(Error::MalformedInput(Malformed::OutOfRange { field: "elevation", .. }))
        ));
        assert!(matches!(
            TrackPoint::new(&point("0", "0", Some("1e308"), None)),
            Err(Error::MalformedInput(Malformed::OutOfRange { field: "elevation", .. }))
        ));
        assert!(matches!(
            TrackPoint::new(&point("0", "0", Some("-100001"), None)),
            Err(Error::MalformedInput(Malformed::OutOfRange { field: "elevation", .. }))
        ));
    }

    #[test]
    fn flatten_keeps_document_order() {
        let doc = gpx::parse(
            r#"<gpx>
              <trk><trkseg><trkpt lat="1" lon="0"/></trkseg><trkseg><trkpt lat="2" lon="0"/></trkseg></trk>
              <trk/>
              <trk><trkseg><trkpt lat="3" lon="0"/><trkpt lat="-4" lon="0"/></trkseg></trk>
            </gpx>"#,
        )
        .unwrap();
        let lats: Vec<f64> = flatten(&doc.tracks).unwrap().iter().map(|p| p.lat).collect();
        assert_eq!(lats, vec![1., 2., 3., -4.]);
    }
}
