use std::f64::consts::PI;

/// Coefficient to translate from degrees to radians
pub const DEGREE_RAD: f64 = PI / 180.0;

/// Earth radius in kilometers
pub const EARTH_R: f64 = 6371.0;

use super::point::Location;

/// Calculates haversine great-circle distance between two locations
///
/// # Returns
///
/// Distance in kilometers, or 0 if either location is absent
pub fn distance_km(a: Option<&Location>, b: Option<&Location>) -> f64 {
    let (Some(a), Some(b)) = (a, b) else {
        return 0.0;
    };

    let d_lat = (b.latitude - a.latitude) * DEGREE_RAD;
    let d_lon = (b.longitude - a.longitude) * DEGREE_RAD;
    let h = (d_lat / 2.0).sin() * (d_lat / 2.0).sin()
        + (a.latitude * DEGREE_RAD).cos()
            * (b.latitude * DEGREE_RAD).cos()
            * (d_lon / 2.0).sin()
            * (d_lon / 2.0).sin();
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_R * c
}

/// Converts the distance between two locations into screen pixels
///
/// # Arguments
///
/// * `meters_per_pixel` - Ground resolution of the current viewport
pub fn pixel_distance(a: &Location, b: &Location, meters_per_pixel: f64) -> f64 {
    distance_km(Some(a), Some(b)) * 1000.0 / meters_per_pixel
}
