//! Marker renderer contract and the values handed across it

use super::point::{Location, PixelPoint};

/// Style class of a representative marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleClass {
    /// Cluster with a single member
    Single,
    /// Cluster with more than one member
    Aggregate,
}

/// RGBA color, each channel 0..=255
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

/// Style of an outline shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    pub fill: Rgba,
    pub stroke: Rgba,
    pub stroke_thickness: f64,
}

impl ShapeStyle {
    /// Style used to draw cluster bounding regions in debug mode
    pub fn debug_outline() -> Self {
        let color = Rgba(100, 100, 0, 100);
        Self {
            fill: color,
            stroke: color,
            stroke_thickness: 1.0,
        }
    }
}

/// Marker is the representative pin of one cluster
///
/// Built fresh for every pass; the cluster decoration hook may rewrite any
/// field before the marker reaches the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker<T> {
    /// Index of the cluster in the pass that produced this marker
    pub cluster_index: usize,
    pub location: Location,
    pub type_name: String,
    pub width: u32,
    pub height: u32,
    pub text_offset: PixelPoint,
    pub text: Option<String>,
    pub payload: Option<T>,
    /// Whether selecting the marker zooms into the cluster
    pub click_to_zoom: bool,
}

/// MarkerRenderer draws markers and shapes on the map surface
pub trait MarkerRenderer<T> {
    /// Removes every marker and shape placed so far
    fn clear_all(&mut self);

    fn place(&mut self, marker: &Marker<T>, style: StyleClass);

    /// Draws a closed outline; only used in debug mode
    fn place_shape(&mut self, outline: &[Location; 4], style: &ShapeStyle);
}

/// MarkerLayer is an in-memory renderer that keeps what was placed on it
#[derive(Debug, Clone)]
pub struct MarkerLayer<T> {
    pub markers: Vec<(Marker<T>, StyleClass)>,
    pub shapes: Vec<([Location; 4], ShapeStyle)>,
    /// Number of times the layer was cleared
    pub clears: usize,
}

impl<T> MarkerLayer<T> {
    pub fn new() -> Self {
        Self {
            markers: Vec::new(),
            shapes: Vec::new(),
            clears: 0,
        }
    }
}

impl<T> Default for MarkerLayer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> MarkerRenderer<T> for MarkerLayer<T> {
    fn clear_all(&mut self) {
        self.markers.clear();
        self.shapes.clear();
        self.clears += 1;
    }

    fn place(&mut self, marker: &Marker<T>, style: StyleClass) {
        self.markers.push((marker.clone(), style));
    }

    fn place_shape(&mut self, outline: &[Location; 4], style: &ShapeStyle) {
        self.shapes.push((*outline, *style));
    }
}
