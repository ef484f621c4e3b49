use super::point::Location;

/// GeoRect is an axis-aligned geographic rectangle in degrees
///
/// The rectangle does not wrap around the antimeridian; expanded bounds may
/// carry longitudes outside `[-180, 180]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoRect {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl GeoRect {
    /// Builds a rectangle from two opposite corners, in any order
    pub fn from_corners(a: Location, b: Location) -> Self {
        Self {
            north: a.latitude.max(b.latitude),
            south: a.latitude.min(b.latitude),
            east: a.longitude.max(b.longitude),
            west: a.longitude.min(b.longitude),
        }
    }

    /// Builds a zero-area rectangle around a single location
    pub fn from_location(location: Location) -> Self {
        Self::from_corners(location, location)
    }

    pub fn northwest(&self) -> Location {
        Location::new(self.north, self.west)
    }

    pub fn northeast(&self) -> Location {
        Location::new(self.north, self.east)
    }

    pub fn southeast(&self) -> Location {
        Location::new(self.south, self.east)
    }

    pub fn southwest(&self) -> Location {
        Location::new(self.south, self.west)
    }

    /// Checks if `location` lies inside the rectangle, edges included
    pub fn contains(&self, location: &Location) -> bool {
        location.greater_eq(&self.southwest()) && location.less_eq(&self.northeast())
    }

    /// Returns the outline as a closed ring of corners: NW, NE, SE, SW
    pub fn outline(&self) -> [Location; 4] {
        [
            self.northwest(),
            self.northeast(),
            self.southeast(),
            self.southwest(),
        ]
    }
}
