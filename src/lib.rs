//! Trip statistics from GPX recordings: distance, total ascent, elapsed time and a rough calorie
//! estimate.
//!
//! ```
//! let stats = trailstat::analyze(r#"<gpx><trk><trkseg>
//!     <trkpt lat="0" lon="0"><time>2024-06-01T08:00:00Z</time></trkpt>
//!     <trkpt lat="1" lon="0"><time>2024-06-01T20:00:00Z</time></trkpt>
//! </trkseg></trk></gpx>"#).unwrap();
//! assert_eq!(stats.distance_km, 111.19);
//! assert_eq!(stats.duration_minutes, 720);
//! ```

use serde::Serialize;

pub mod error;
pub mod gpx;
pub mod stats;
pub mod track;
pub mod units;

pub use crate::error::{Error, Malformed};
pub use crate::stats::TripStatistics;
pub use crate::track::TrackPoint;

/// Statistics for a whole GPX document, with all of its tracks run together in document order.
///
/// Fails only if the text is not XML, or not GPX. A document with no usable track data yields
/// all zeros.
pub fn analyze(text: &str) -> Result<TripStatistics, Error> {
    let doc = gpx::parse(text)?;
    let points = track::flatten(&doc.tracks)?;
    Ok(TripStatistics::from_points(&points))
}

/// Like [`analyze`], for an uploaded file that has not been decoded yet.
pub fn analyze_bytes(bytes: &[u8]) -> Result<TripStatistics, Error> {
    let text = std::str::from_utf8(bytes).map_err(Malformed::Utf8)?;
    analyze(text)
}

/// Statistics for one track on its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackSummary {
    /// The track's name, or the document's name if the track has none.
    pub name: Option<String>,
    pub segments: usize,
    pub points: usize,
    pub stats: TripStatistics,
}

/// Per-track breakdown of a GPX document. Unlike [`analyze`], no distance is counted between the
/// end of one track and the start of the next.
pub fn analyze_tracks(text: &str) -> Result<Vec<TrackSummary>, Error> {
    let doc = gpx::parse(text)?;
    doc.tracks
        .iter()
        .map(|trk| -> Result<TrackSummary, Error> {
            let points = track::flatten(std::slice::from_ref(trk))?;
            Ok(TrackSummary {
                name: trk.name.as_deref().or_else(|| doc.name()).map(str::to_owned),
                segments: trk.segments.len(),
                points: points.len(),
                stats: TripStatistics::from_points(&points),
            })
        })
        .collect()
}
