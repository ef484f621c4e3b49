//! Input points and the coordinates derived from them

/// Point is one input record handed to the clusterer by the caller
///
/// Latitude or longitude may be missing for malformed input; such a point
/// has no [`Location`] and never takes part in a clustering pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Point<T> {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Opaque caller data, carried to the marker of the cluster it seeds
    pub payload: Option<T>,
}

/// PointList is a collection of Points
pub type PointList<T> = Vec<Point<T>>;

/// Location is a resolved geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// PixelPoint is a position in viewport pixels, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl<T> Point<T> {
    /// Creates a well-formed point without payload
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            payload: None,
        }
    }

    /// Creates a well-formed point carrying `payload`
    pub fn with_payload(latitude: f64, longitude: f64, payload: T) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            payload: Some(payload),
        }
    }

    /// Resolves the point's location
    ///
    /// # Returns
    ///
    /// `None` if latitude or longitude is missing
    pub fn location(&self) -> Option<Location> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Location::new(latitude, longitude)),
            _ => None,
        }
    }

    /// Great-circle distance to `other` in kilometers, 0 if either point is malformed
    pub fn distance_km(&self, other: &Point<T>) -> f64 {
        super::distance::distance_km(self.location().as_ref(), other.location().as_ref())
    }
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Checks if this location is south-west of or equal to another location
    /// (a <= b)
    pub fn less_eq(&self, b: &Location) -> bool {
        self.latitude <= b.latitude && self.longitude <= b.longitude
    }

    /// Checks if this location is north-east of or equal to another location
    /// (a >= b)
    pub fn greater_eq(&self, b: &Location) -> bool {
        self.latitude >= b.latitude && self.longitude >= b.longitude
    }
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this point moved by `(dx, dy)` pixels
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}
