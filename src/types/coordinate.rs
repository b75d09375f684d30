use crate::error::{Error, Result};
use crate::utils::fixed_point::format_fixed_point;
use std::fmt;

/// Scale factor between degrees and the raw fixed-point representation
///
/// `degrees = raw / COORDINATE_PRECISION`, i.e. six decimal places, which is
/// roughly 11 cm at the equator.
pub const COORDINATE_PRECISION: i32 = 1_000_000;

/// Mean earth radius in meters used by both distance metrics
pub const EARTH_RADIUS_M: f64 = 6_372_797.560_856;

const RAD: f64 = 0.017_453_292_519_943_295_769_236_907_684_886;

const UNSET: i32 = i32::MIN;

const MAX_LAT: i32 = 90 * COORDINATE_PRECISION;
const MAX_LON: i32 = 180 * COORDINATE_PRECISION;

/// A geographic point stored as scaled integers
///
/// Both fields hold degrees multiplied by [`COORDINATE_PRECISION`]. A
/// default-constructed coordinate is *unset*: both fields carry
/// `i32::MIN`, which is distinct from the valid point at (0, 0).
///
/// Construction never rejects out-of-range values. Use [`is_set()`] and
/// [`is_valid()`] before relying on a coordinate having a geographic meaning.
///
/// [`is_set()`]: FixedPointCoordinate::is_set
/// [`is_valid()`]: FixedPointCoordinate::is_valid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedPointCoordinate {
    pub lat: i32,
    pub lon: i32,
}

impl FixedPointCoordinate {
    /// Create a coordinate from raw fixed-point values
    ///
    /// In debug builds, values whose magnitude does not fit into 30 bits are
    /// reported as a warning. The coordinate is created either way.
    pub fn new(lat: i32, lon: i32) -> Self {
        if cfg!(debug_assertions) {
            report_broken("lat", lat);
            report_broken("lon", lon);
        }

        Self { lat, lon }
    }

    /// Create a coordinate from floating-point degrees
    ///
    /// Degrees are rounded to the nearest representable fixed-point value.
    /// Fails with [`Error::UnrepresentableDegrees`] for non-finite input and
    /// for values that do not fit into the raw `i32` range or would collide
    /// with the unset sentinel.
    pub fn from_degrees(lat: f64, lon: f64) -> Result<Self> {
        match (scale_degrees(lat), scale_degrees(lon)) {
            (Some(lat), Some(lon)) => Ok(Self::new(lat, lon)),
            _ => Err(Error::UnrepresentableDegrees { lat, lon }),
        }
    }

    /// Latitude in degrees
    pub fn lat_degrees(&self) -> f64 {
        f64::from(self.lat) / f64::from(COORDINATE_PRECISION)
    }

    /// Longitude in degrees
    pub fn lon_degrees(&self) -> f64 {
        f64::from(self.lon) / f64::from(COORDINATE_PRECISION)
    }

    /// Put the coordinate back into the unset state
    pub fn reset(&mut self) {
        self.lat = UNSET;
        self.lon = UNSET;
    }

    /// `true` if neither field holds the unset sentinel
    pub fn is_set(&self) -> bool {
        self.lat != UNSET && self.lon != UNSET
    }

    /// `true` if latitude is within ±90° and longitude within ±180°
    ///
    /// Boundaries are inclusive. This does not check [`is_set()`], although
    /// the sentinel is out of range and therefore never valid.
    ///
    /// [`is_set()`]: FixedPointCoordinate::is_set
    pub fn is_valid(&self) -> bool {
        (-MAX_LAT..=MAX_LAT).contains(&self.lat) && (-MAX_LON..=MAX_LON).contains(&self.lon)
    }

    /// Great-circle distance in meters between two raw positions
    ///
    /// Uses the haversine formula, which stays accurate for arbitrarily large
    /// separations. Fails with [`Error::UnsetCoordinate`] if any of the four
    /// values is the unset sentinel.
    pub fn approximate_distance_raw(lat1: i32, lon1: i32, lat2: i32, lon2: i32) -> Result<f64> {
        if [lat1, lon1, lat2, lon2].contains(&UNSET) {
            return Err(Error::UnsetCoordinate);
        }

        let precision = f64::from(COORDINATE_PRECISION);
        let lat1 = f64::from(lat1) / precision * RAD;
        let lon1 = f64::from(lon1) / precision * RAD;
        let lat2 = f64::from(lat2) / precision * RAD;
        let lon2 = f64::from(lon2) / precision * RAD;

        let d_lon = lon1 - lon2;
        let d_lat = lat1 - lat2;

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        Ok(EARTH_RADIUS_M * c)
    }

    /// Great-circle distance in meters between two coordinates
    ///
    /// See [`approximate_distance_raw()`](Self::approximate_distance_raw).
    pub fn approximate_distance(c1: &Self, c2: &Self) -> Result<f64> {
        Self::approximate_distance_raw(c1.lat, c1.lon, c2.lat, c2.lon)
    }

    /// Planar distance in meters, suitable for short separations only
    ///
    /// Projects both points onto a local tangent plane, scaling longitude by
    /// the cosine of the mean latitude. Cheaper than
    /// [`approximate_distance()`](Self::approximate_distance) but the error
    /// grows quickly with distance.
    pub fn approximate_euclidean_distance(c1: &Self, c2: &Self) -> Result<f64> {
        if !c1.is_set() || !c2.is_set() {
            return Err(Error::UnsetCoordinate);
        }

        let lat1 = c1.lat_degrees() * RAD;
        let lon1 = c1.lon_degrees() * RAD;
        let lat2 = c2.lat_degrees() * RAD;
        let lon2 = c2.lon_degrees() * RAD;

        let x = (lon2 - lon1) * ((lat1 + lat2) / 2.0).cos();
        let y = lat2 - lat1;

        Ok(x.hypot(y) * EARTH_RADIUS_M)
    }

    /// Render as `"lon,lat"` with six fractional digits per value
    pub fn to_lon_lat_string(&self) -> String {
        format!("{},{}", format_fixed_point(self.lon), format_fixed_point(self.lat))
    }

    /// Render as `"lat,lon"` with six fractional digits per value
    pub fn to_lat_lon_string(&self) -> String {
        format!("{},{}", format_fixed_point(self.lat), format_fixed_point(self.lon))
    }
}

impl Default for FixedPointCoordinate {
    /// The unset coordinate
    fn default() -> Self {
        Self {
            lat: UNSET,
            lon: UNSET,
        }
    }
}

/// Coarse `(lat,lon)` rendering in whole degrees, for debugging only
impl fmt::Display for FixedPointCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{})",
            self.lat / COORDINATE_PRECISION,
            self.lon / COORDINATE_PRECISION
        )
    }
}

fn scale_degrees(degrees: f64) -> Option<i32> {
    let scaled = (degrees * f64::from(COORDINATE_PRECISION)).round();
    let representable = f64::from(UNSET) < scaled && scaled <= f64::from(i32::MAX);
    representable.then_some(scaled as i32)
}

fn report_broken(axis: &str, value: i32) {
    if value.unsigned_abs() >> 30 != 0 {
        tracing::warn!(
            target: "geo_locality::coordinate",
            "broken {axis}: {value}, bits: {value:032b}"
        );
    }
}
