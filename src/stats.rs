use serde::Serialize;

use crate::track::TrackPoint;
use crate::units::{Kilometers, Meters};

/// Mean earth radius.
pub const EARTH_RADIUS: Meters = Meters(6_371_000.);

/// Calorie estimate: kilocalories per kilometer walked on the flat...
pub const KCAL_PER_KM: f64 = 60.;

/// ...plus about one kilocalorie per meter climbed.
pub const KCAL_PER_METER_CLIMBED: f64 = 1.;

/// Aggregate statistics for a trip.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct TripStatistics {
    /// Rounded to two decimals.
    pub distance_km: f64,
    /// Total ascent, in whole meters.
    pub elevation_gain: u64,
    pub duration_minutes: u64,
    pub calories_burned: u64,
}

impl TripStatistics {
    /// Compute all statistics over one ordered run of points.
    ///
    /// Consecutive points are paired regardless of which track or segment they came from, so a
    /// gap between segments counts as a straight-line step. Fewer than two points gives all zeros.
    pub fn from_points(points: &[TrackPoint]) -> Self {
        if points.len() < 2 {
            return Self::default();
        }

        let distance_km = round_to_hundredths(Kilometers::from(total_distance(points)).0);
        let elevation_gain = elevation_gain(points).0.round() as u64;
        let duration_minutes = duration_minutes(&points[0], &points[points.len() - 1]);
        let calories_burned = calories(distance_km, elevation_gain, duration_minutes);

        Self {
            distance_km,
            elevation_gain,
            duration_minutes,
            calories_burned,
        }
    }
}

/// Great-circle (haversine) distance between two points.
///
/// The Earth is not a sphere, but the error is far smaller than what GPS noise and ignoring
/// terrain already introduce.
pub fn distance(a: &TrackPoint, b: &TrackPoint) -> Meters {
    const P: f64 = std::f64::consts::PI / 180.;
    let h = 0.5 - ((b.lat - a.lat) * P).cos() / 2.
        + (a.lat * P).cos() * (b.lat * P).cos() * (1. - ((b.lon - a.lon) * P).cos()) / 2.;
    // Rounding can push h a hair outside [0, 1] for antipodal or identical points.
    Meters(2. * EARTH_RADIUS.0 * h.clamp(0., 1.).sqrt().asin())
}

pub fn total_distance(points: &[TrackPoint]) -> Meters {
    Meters(points.windows(2).map(|w| distance(&w[0], &w[1]).0).sum())
}

/// Sum of every climb between consecutive points. Descents are ignored, and no smoothing is
/// applied, so noisy elevation data will inflate this.
pub fn elevation_gain(points: &[TrackPoint]) -> Meters {
    Meters(
        points
            .windows(2)
            .filter(|w| w[1].ele > w[0].ele)
            .map(|w| w[1].ele.0 - w[0].ele.0)
            .sum(),
    )
}

/// Wall-clock span from `first` to `last`, to the nearest minute.
///
/// Zero if either end has no timestamp, or if `last` is earlier than `first`.
pub fn duration_minutes(first: &TrackPoint, last: &TrackPoint) -> u64 {
    match (first.time, last.time) {
        (Some(start), Some(end)) => {
            let minutes = (end - start).num_milliseconds() as f64 / 60_000.;
            minutes.round().max(0.) as u64
        }
        _ => 0,
    }
}

/// Rough calorie estimate for a hike. This is a rule of thumb (see [`KCAL_PER_KM`] and
/// [`KCAL_PER_METER_CLIMBED`]), not a physiological model; it only aims for the right order of
/// magnitude. A trip that took no time burned nothing, however far it claims to have gone.
pub fn calories(distance_km: f64, elevation_gain: u64, duration_minutes: u64) -> u64 {
    if duration_minutes == 0 {
        return 0;
    }
    (distance_km * KCAL_PER_KM + elevation_gain as f64 * KCAL_PER_METER_CLIMBED).round() as u64
}

fn round_to_hundredths(x: f64) -> f64 {
    (x * 100.).round() / 100.
}
