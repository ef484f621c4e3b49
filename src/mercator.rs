//! Web Mercator viewport with 256 px tiles
//!
//! A self-contained [`ViewportProvider`] for hosts without a map widget: the
//! command line tool clusters against it, and it is handy in tests.

use std::f64::consts::PI;
use std::sync::mpsc::{self, Receiver, Sender};

use tracing::trace;

use crate::cluster::{GeoRect, Location, PixelPoint, ViewportChanged, ViewportProvider};

pub const TILE_SIZE: f64 = 256.0;

/// Latitude limit of the square Web Mercator world
pub const LATITUDE_MAX: f64 = 85.051_128_779_806_59;

/// Equatorial radius used by Web Mercator, meters
const EARTH_RADIUS_M: f64 = 6_378_137.0;

pub const MIN_ZOOM_LEVEL: u8 = 1;
pub const MAX_ZOOM_LEVEL: u8 = 21;

/// Size of the world in pixels at `zoom`
pub fn map_size(zoom: u8) -> f64 {
    TILE_SIZE * 2f64.powi(i32::from(zoom))
}

/// Projects a location to world pixel coordinates at `zoom`
pub fn location_to_world(location: &Location, zoom: u8) -> PixelPoint {
    let size = map_size(zoom);
    let x = (location.longitude + 180.0) / 360.0 * size;
    let sin_latitude = location
        .latitude
        .clamp(-LATITUDE_MAX, LATITUDE_MAX)
        .to_radians()
        .sin();
    let y = (0.5 - ((1.0 + sin_latitude) / (1.0 - sin_latitude)).ln() / (4.0 * PI)) * size;
    PixelPoint::new(x, y)
}

/// Inverse of [`location_to_world`]
///
/// # Returns
///
/// `None` if `world` lies above or below the map
pub fn world_to_location(world: &PixelPoint, zoom: u8) -> Option<Location> {
    let size = map_size(zoom);
    if !(0.0..=size).contains(&world.y) {
        return None;
    }
    let longitude = world.x / size * 360.0 - 180.0;
    let n = PI * (1.0 - 2.0 * world.y / size);
    let latitude = n.sinh().atan().to_degrees();
    Some(Location::new(latitude, longitude))
}

/// MercatorViewport is a rectangular window onto a Web Mercator map
///
/// Longitudes are not wrapped, so a window crossing the antimeridian reports
/// bounds beyond ±180°.
#[derive(Debug)]
pub struct MercatorViewport {
    center: Location,
    zoom: u8,
    width: f64,
    height: f64,
    subscribers: Vec<Sender<ViewportChanged>>,
}

impl MercatorViewport {
    /// Creates a viewport of `width` x `height` pixels
    pub fn new(center: Location, zoom: u8, width: f64, height: f64) -> Self {
        Self {
            center: Self::clamp_center(center),
            zoom: zoom.clamp(MIN_ZOOM_LEVEL, MAX_ZOOM_LEVEL),
            width,
            height,
            subscribers: Vec::new(),
        }
    }

    pub fn center(&self) -> Location {
        self.center
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Changes the window size; a zero-sized window is not ready
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.notify();
    }

    fn clamp_center(center: Location) -> Location {
        Location::new(
            center.latitude.clamp(-LATITUDE_MAX, LATITUDE_MAX),
            center.longitude,
        )
    }

    /// World pixel of the window's top-left corner
    fn origin(&self) -> PixelPoint {
        location_to_world(&self.center, self.zoom).offset(-self.width / 2.0, -self.height / 2.0)
    }

    /// Location at a window pixel, with y pinned to the map's edges
    fn clamped_location(&self, pixel: &PixelPoint) -> Location {
        let origin = self.origin();
        let size = map_size(self.zoom);
        let world = PixelPoint::new(origin.x + pixel.x, (origin.y + pixel.y).clamp(0.0, size));
        // y is inside the map after clamping
        world_to_location(&world, self.zoom).unwrap_or(self.center)
    }

    fn notify(&mut self) {
        let change = ViewportChanged { zoom: self.zoom };
        self.subscribers.retain(|tx| tx.send(change).is_ok());
        trace!(
            zoom = self.zoom,
            subscribers = self.subscribers.len(),
            "Viewport change sent"
        );
    }
}

impl ViewportProvider for MercatorViewport {
    fn is_ready(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    fn zoom(&self) -> u8 {
        self.zoom
    }

    fn bounds(&self) -> GeoRect {
        GeoRect::from_corners(
            self.clamped_location(&PixelPoint::new(0.0, 0.0)),
            self.clamped_location(&PixelPoint::new(self.width, self.height)),
        )
    }

    fn meters_per_pixel(&self) -> f64 {
        let circumference = 2.0 * PI * EARTH_RADIUS_M * self.center.latitude.to_radians().cos();
        circumference / map_size(self.zoom)
    }

    fn project_to_pixel(&self, location: &Location) -> Option<PixelPoint> {
        if !self.is_ready() {
            return None;
        }
        let origin = self.origin();
        let world = location_to_world(location, self.zoom);
        Some(PixelPoint::new(world.x - origin.x, world.y - origin.y))
    }

    fn project_to_location(&self, pixel: &PixelPoint) -> Option<Location> {
        if !self.is_ready() {
            return None;
        }
        let origin = self.origin();
        world_to_location(&origin.offset(pixel.x, pixel.y), self.zoom)
    }

    fn set_view(&mut self, center: Location, zoom: u8) {
        self.center = Self::clamp_center(center);
        self.zoom = zoom.clamp(MIN_ZOOM_LEVEL, MAX_ZOOM_LEVEL);
        self.notify();
    }

    fn subscribe(&mut self) -> Receiver<ViewportChanged> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }
}
