use crate::models::BoundingBox;

/// Earth's radius in statute miles
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Padding (in degrees) added to every bounding box edge so that points lying
/// exactly on the search radius are not lost to floating point rounding.
const BBOX_PADDING_DEG: f64 = 1e-9;

/// Calculate the Haversine distance between two points in miles
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Great-circle distance in statute miles. Always non-negative, symmetric in
/// its two points, and exactly `0.0` for identical points. Out-of-range
/// degrees are not rejected.
#[inline]
pub fn haversine_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair outside [0, 1] for antipodal points
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Calculate a bounding box around a center point
///
/// This is much cheaper than Haversine and is used as a pre-filter. Unlike the
/// flat "69 miles per degree" approximation, the longitude span is derived from
/// the great-circle geometry so the box always contains every point whose
/// Haversine distance is within `radius_miles`.
///
/// Boxes that reach a pole or cross the antimeridian span every longitude.
pub fn calculate_bounding_box(lat: f64, lon: f64, radius_miles: f64) -> BoundingBox {
    let angular = radius_miles / EARTH_RADIUS_MILES;
    let lat_delta = angular.to_degrees();

    let min_lat = lat - lat_delta - BBOX_PADDING_DEG;
    let max_lat = lat + lat_delta + BBOX_PADDING_DEG;

    if min_lat <= -90.0 || max_lat >= 90.0 || angular >= std::f64::consts::FRAC_PI_2 {
        return BoundingBox {
            min_lat: min_lat.max(-90.0),
            max_lat: max_lat.min(90.0),
            min_lon: -180.0,
            max_lon: 180.0,
        };
    }

    let ratio = angular.sin() / lat.to_radians().cos();
    if ratio.is_nan() || ratio >= 1.0 {
        return BoundingBox {
            min_lat,
            max_lat,
            min_lon: -180.0,
            max_lon: 180.0,
        };
    }

    let lon_delta = ratio.asin().to_degrees();
    let min_lon = lon - lon_delta - BBOX_PADDING_DEG;
    let max_lon = lon + lon_delta + BBOX_PADDING_DEG;

    if min_lon < -180.0 || max_lon > 180.0 {
        // Crosses the antimeridian
        return BoundingBox {
            min_lat,
            max_lat,
            min_lon: -180.0,
            max_lon: 180.0,
        };
    }

    BoundingBox {
        min_lat,
        max_lat,
        min_lon,
        max_lon,
    }
}

/// Check if a point is within a bounding box (edges inclusive)
#[inline]
pub fn is_within_bounding_box(lat: f64, lon: f64, bbox: &BoundingBox) -> bool {
    lat >= bbox.min_lat && lat <= bbox.max_lat && lon >= bbox.min_lon && lon <= bbox.max_lon
}
