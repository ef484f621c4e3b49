//! Package cluster implements viewport-driven greedy clustering of (lat, lon) pins
pub mod bounds;
pub mod config;
pub mod distance;
pub mod engine;
pub mod group;
pub mod point;
pub mod render;
pub mod viewport;


pub use bounds::GeoRect;
pub use config::{ClusterHook, ClusterOptions, ClustererConfig};
pub use distance::{DEGREE_RAD, EARTH_R, distance_km, pixel_distance};
pub use engine::{ClusterEngine, Selection, cluster_points};
pub use group::{Cluster, ZOOM_STEP};
pub use point::{Location, PixelPoint, Point, PointList};
pub use render::{Marker, MarkerLayer, MarkerRenderer, Rgba, ShapeStyle, StyleClass};
pub use viewport::{
    MIN_ZOOM, ViewportChanged, ViewportProvider, ViewportSnapshot, expanded_bounds,
};
