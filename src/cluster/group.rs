use super::bounds::GeoRect;
use super::config::ClustererConfig;
use super::point::{Location, PixelPoint};
use super::render::{Marker, StyleClass};
use super::viewport::{ViewportProvider, expanded_bounds};

/// Zoom levels added when the viewport zooms into a cluster
pub const ZOOM_STEP: u8 = 2;

/// Cluster is a group of points rendered behind a single marker
///
/// The center is the first member and never moves; the bounding region is
/// computed once from it and gates every later admission.
#[derive(Debug, Clone)]
pub struct Cluster<T> {
    /// Indices of member points in the input list, in admission order
    member_ids: Vec<usize>,
    locations: Vec<Location>,
    center: Location,
    payload: Option<T>,
    bounds: GeoRect,
    click_to_zoom: bool,
}

impl<T> Cluster<T> {
    /// Seeds a new cluster with its first member
    ///
    /// The bounding region is the center grown by half the grid size in
    /// pixels on every side.
    ///
    /// # Arguments
    ///
    /// * `id` - Index of the seeding point in the input list
    /// * `location` - Location of the seeding point, becomes the center
    /// * `payload` - Payload of the seeding point
    /// * `click_to_zoom` - Whether the pass allows zooming into this cluster
    pub fn new<V: ViewportProvider + ?Sized>(
        id: usize,
        location: Location,
        payload: Option<T>,
        viewport: &V,
        grid_size: f64,
        click_to_zoom: bool,
    ) -> Self {
        let bounds = expanded_bounds(viewport, GeoRect::from_location(location), grid_size, 0.0);
        Self {
            member_ids: vec![id],
            locations: vec![location],
            center: location,
            payload,
            bounds,
            click_to_zoom,
        }
    }

    /// Adds a member point
    ///
    /// # Returns
    ///
    /// `false` if the point with this index is already a member
    pub fn add(&mut self, id: usize, location: Location) -> bool {
        if self.member_ids.contains(&id) {
            return false;
        }
        self.member_ids.push(id);
        self.locations.push(location);
        true
    }

    /// Adds a member point that has no location
    ///
    /// The region and center stay as they are.
    pub fn add_unlocated(&mut self, id: usize) -> bool {
        if self.member_ids.contains(&id) {
            return false;
        }
        self.member_ids.push(id);
        true
    }

    /// Checks if `location` lies inside the cluster's bounding region
    pub fn contains_within_borders(&self, location: &Location) -> bool {
        self.bounds.contains(location)
    }

    pub fn len(&self) -> usize {
        self.member_ids.len()
    }

    /// Always `false`: a cluster is seeded with one member
    pub fn is_empty(&self) -> bool {
        self.member_ids.is_empty()
    }

    pub fn is_aggregate(&self) -> bool {
        self.len() > 1
    }

    pub fn style_class(&self) -> StyleClass {
        if self.is_aggregate() {
            StyleClass::Aggregate
        } else {
            StyleClass::Single
        }
    }

    pub fn center(&self) -> Location {
        self.center
    }

    pub fn bounds(&self) -> &GeoRect {
        &self.bounds
    }

    pub fn member_ids(&self) -> &[usize] {
        &self.member_ids
    }

    /// Locations of the members that have one
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Payload of the first member
    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    pub fn click_to_zoom(&self) -> bool {
        self.click_to_zoom
    }

    /// Re-centers the viewport on this cluster and zooms in by [`ZOOM_STEP`]
    ///
    /// # Returns
    ///
    /// The new zoom level, capped at `max_zoom`
    pub fn activate_zoom<V: ViewportProvider + ?Sized>(
        &self,
        viewport: &mut V,
        max_zoom: u8,
    ) -> u8 {
        let zoom = viewport.zoom().saturating_add(ZOOM_STEP).min(max_zoom);
        viewport.set_view(self.center, zoom);
        zoom
    }
}

impl<T: Clone> Cluster<T> {
    /// Builds the representative marker before decoration
    pub fn marker(&self, cluster_index: usize, config: &ClustererConfig<T>) -> Marker<T> {
        let type_name = match self.style_class() {
            StyleClass::Single => config.pin_type_name.clone(),
            StyleClass::Aggregate => config.cluster_type_name.clone(),
        };

        Marker {
            cluster_index,
            location: self.center,
            type_name,
            width: config.pin_size,
            height: config.pin_size,
            text_offset: PixelPoint::new(0.0, 2.0),
            text: None,
            payload: self.payload.clone(),
            click_to_zoom: self.click_to_zoom,
        }
    }
}
