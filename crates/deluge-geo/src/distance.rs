//! Single-axis great-circle distances.

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in km between two latitudes on one meridian.
///
/// Arguments are in degrees. The result is symmetric and never negative.
///
/// # Examples
///
/// ```
/// use deluge_geo::lat_distance;
///
/// // One degree of latitude is about 111.2 km.
/// let d = lat_distance(10.0, 11.0);
/// assert!((d - 111.19).abs() < 0.01);
/// ```
pub fn lat_distance(lat1: f64, lat2: f64) -> f64 {
    arc_km(lat1, lat2)
}

/// Haversine distance in km between two longitudes, measured along the
/// equator.
///
/// Scale by `cos(latitude)` for distances along another parallel; see
/// [`GeoExtent::width_km`](crate::GeoExtent::width_km).
pub fn lon_distance(lon1: f64, lon2: f64) -> f64 {
    arc_km(lon1, lon2)
}

fn arc_km(a_deg: f64, b_deg: f64) -> f64 {
    let delta = b_deg.to_radians() - a_deg.to_radians();
    let h = (delta / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}
