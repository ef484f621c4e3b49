//! Map viewport contract consumed by the clustering engine

use std::sync::mpsc::Receiver;

use super::bounds::GeoRect;
use super::config::ClustererConfig;
use super::point::{Location, PixelPoint};

/// Zoom level at or below which the viewport admission rule is off
pub const MIN_ZOOM: u8 = 2;

/// Notification sent by a viewport once a pan or zoom has settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportChanged {
    pub zoom: u8,
}

/// ViewportProvider is the interactive map the clusters are drawn on
pub trait ViewportProvider {
    /// Whether the map is initialized and can answer queries
    fn is_ready(&self) -> bool {
        true
    }

    fn zoom(&self) -> u8;

    /// Currently visible geographic bounds
    fn bounds(&self) -> GeoRect;

    /// Ground resolution at the current zoom
    fn meters_per_pixel(&self) -> f64;

    fn project_to_pixel(&self, location: &Location) -> Option<PixelPoint>;

    fn project_to_location(&self, pixel: &PixelPoint) -> Option<Location>;

    /// Re-centers the map and changes zoom
    fn set_view(&mut self, center: Location, zoom: u8);

    /// Registers for change notifications, fired after each settled pan or zoom
    fn subscribe(&mut self) -> Receiver<ViewportChanged>;
}

/// Grows `bounds` by a pixel margin on every side
///
/// The margin is `grid_size * grid_factor` pixels, or `grid_size / 2` when the
/// factor is 0. If either corner cannot be projected the bounds are returned
/// unchanged.
pub fn expanded_bounds<V: ViewportProvider + ?Sized>(
    viewport: &V,
    bounds: GeoRect,
    grid_size: f64,
    grid_factor: f64,
) -> GeoRect {
    let size = if grid_factor != 0.0 {
        grid_size * grid_factor
    } else {
        grid_size / 2.0
    };

    let (Some(nw), Some(se)) = (
        viewport.project_to_pixel(&bounds.northwest()),
        viewport.project_to_pixel(&bounds.southeast()),
    ) else {
        return bounds;
    };

    match (
        viewport.project_to_location(&nw.offset(-size, -size)),
        viewport.project_to_location(&se.offset(size, size)),
    ) {
        (Some(nw), Some(se)) => GeoRect::from_corners(nw, se),
        _ => bounds,
    }
}

/// ViewportSnapshot is the viewport state one recompute pass works against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSnapshot {
    pub zoom: u8,
    /// Visible bounds grown by the admission margin
    pub bounds: GeoRect,
    pub meters_per_pixel: f64,
}

impl ViewportSnapshot {
    /// Captures the current viewport state
    ///
    /// # Returns
    ///
    /// `None` if the viewport is not ready
    pub fn capture<V: ViewportProvider + ?Sized, T>(
        viewport: &V,
        config: &ClustererConfig<T>,
    ) -> Option<Self> {
        if !viewport.is_ready() {
            return None;
        }

        Some(Self {
            zoom: viewport.zoom(),
            bounds: expanded_bounds(
                viewport,
                viewport.bounds(),
                config.grid_size,
                config.extend_map_bounds_by,
            ),
            meters_per_pixel: viewport.meters_per_pixel(),
        })
    }

    /// Viewport admission rule: above [`MIN_ZOOM`] only locations inside the
    /// expanded bounds take part in a pass
    pub fn admits(&self, location: &Location) -> bool {
        self.admits_everything() || self.bounds.contains(location)
    }

    /// Checks if admission is off for this pass
    pub fn admits_everything(&self) -> bool {
        self.zoom <= MIN_ZOOM
    }
}
