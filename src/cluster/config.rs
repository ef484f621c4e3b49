//! Per-engine tunables and the partial option set used to override them

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Deserializer};

use super::group::Cluster;
use super::render::Marker;

/// Decoration hook called with each cluster's marker right before it is placed
///
/// The hook may rewrite the marker; it only sees the cluster by shared reference
/// so membership cannot change.
pub type ClusterHook<T> = Rc<dyn Fn(&mut Marker<T>, &Cluster<T>)>;

/// Clusterer configuration owned by one engine
#[derive(Clone)]
pub struct ClustererConfig<T> {
    /// Logs pass timing and draws cluster bounding regions
    pub debug: bool,
    /// Width and height of a representative marker in pixels
    pub pin_size: u32,
    /// Grid-size multiplier for the admission margin around the viewport;
    /// 0 falls back to half the grid size
    pub extend_map_bounds_by: f64,
    /// Base unit in pixels for the admission margin and cluster regions
    pub grid_size: f64,
    /// Zoom level from which every point stands alone
    pub max_zoom: u8,
    pub click_to_zoom: bool,
    /// Style type name for single-point markers
    pub pin_type_name: String,
    /// Style type name for aggregate markers
    pub cluster_type_name: String,
    pub on_cluster_to_map: Option<ClusterHook<T>>,
}

impl<T> Default for ClustererConfig<T> {
    fn default() -> Self {
        Self {
            debug: false,
            pin_size: 16,
            extend_map_bounds_by: 2.0,
            grid_size: 60.0,
            max_zoom: 16,
            click_to_zoom: true,
            pin_type_name: "pin_clusterer pin".to_string(),
            cluster_type_name: "pin_clusterer cluster".to_string(),
            on_cluster_to_map: None,
        }
    }
}

impl<T> fmt::Debug for ClustererConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClustererConfig")
            .field("debug", &self.debug)
            .field("pin_size", &self.pin_size)
            .field("extend_map_bounds_by", &self.extend_map_bounds_by)
            .field("grid_size", &self.grid_size)
            .field("max_zoom", &self.max_zoom)
            .field("click_to_zoom", &self.click_to_zoom)
            .field("pin_type_name", &self.pin_type_name)
            .field("cluster_type_name", &self.cluster_type_name)
            .field("on_cluster_to_map", &self.on_cluster_to_map.is_some())
            .finish()
    }
}

impl<T> ClustererConfig<T> {
    /// Overrides every setting present in `options`, leaving the rest untouched
    pub fn merge(&mut self, options: ClusterOptions<T>) {
        if let Some(debug) = options.debug {
            self.debug = debug;
        }
        if let Some(pin_size) = options.pin_size {
            self.pin_size = pin_size;
        }
        if let Some(factor) = options.extend_map_bounds_by {
            self.extend_map_bounds_by = factor;
        }
        if let Some(grid_size) = options.grid_size {
            self.grid_size = grid_size;
        }
        if let Some(max_zoom) = options.max_zoom {
            self.max_zoom = max_zoom;
        }
        if let Some(click_to_zoom) = options.click_to_zoom {
            self.click_to_zoom = click_to_zoom;
        }
        if let Some(name) = options.pin_type_name {
            self.pin_type_name = name;
        }
        if let Some(name) = options.cluster_type_name {
            self.cluster_type_name = name;
        }
        if let Some(hook) = options.on_cluster_to_map {
            self.on_cluster_to_map = hook;
        }
    }
}

/// ClusterOptions is a partial configuration; `None` means "keep current value"
///
/// Deserializes from camelCase JSON keys. Keys that name no setting are ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct ClusterOptions<T> {
    pub debug: Option<bool>,
    pub pin_size: Option<u32>,
    pub extend_map_bounds_by: Option<f64>,
    pub grid_size: Option<f64>,
    pub max_zoom: Option<u8>,
    pub click_to_zoom: Option<bool>,
    pub pin_type_name: Option<String>,
    pub cluster_type_name: Option<String>,
    /// `Some(None)` removes a previously installed hook; in JSON only `null`
    /// is accepted and it removes the hook
    #[serde(default, deserialize_with = "null_clears_hook")]
    pub on_cluster_to_map: Option<Option<ClusterHook<T>>>,
}

/// A hook cannot be written as JSON, so the key only takes `null`
fn null_clears_hook<'de, D, T>(
    deserializer: D,
) -> Result<Option<Option<ClusterHook<T>>>, D::Error>
where
    D: Deserializer<'de>,
{
    <()>::deserialize(deserializer)?;
    Ok(Some(None))
}

impl<T> Default for ClusterOptions<T> {
    fn default() -> Self {
        Self {
            debug: None,
            pin_size: None,
            extend_map_bounds_by: None,
            grid_size: None,
            max_zoom: None,
            click_to_zoom: None,
            pin_type_name: None,
            cluster_type_name: None,
            on_cluster_to_map: None,
        }
    }
}

impl<T> ClusterOptions<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    pub fn pin_size(mut self, pin_size: u32) -> Self {
        self.pin_size = Some(pin_size);
        self
    }

    pub fn extend_map_bounds_by(mut self, factor: f64) -> Self {
        self.extend_map_bounds_by = Some(factor);
        self
    }

    pub fn grid_size(mut self, grid_size: f64) -> Self {
        self.grid_size = Some(grid_size);
        self
    }

    pub fn max_zoom(mut self, max_zoom: u8) -> Self {
        self.max_zoom = Some(max_zoom);
        self
    }

    pub fn click_to_zoom(mut self, click_to_zoom: bool) -> Self {
        self.click_to_zoom = Some(click_to_zoom);
        self
    }

    pub fn pin_type_name(mut self, name: impl Into<String>) -> Self {
        self.pin_type_name = Some(name.into());
        self
    }

    pub fn cluster_type_name(mut self, name: impl Into<String>) -> Self {
        self.cluster_type_name = Some(name.into());
        self
    }

    /// Installs a decoration hook, replacing any previous one
    pub fn on_cluster_to_map<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Marker<T>, &Cluster<T>) + 'static,
    {
        self.on_cluster_to_map = Some(Some(Rc::new(hook)));
        self
    }

    /// Removes the decoration hook
    pub fn clear_cluster_hook(mut self) -> Self {
        self.on_cluster_to_map = Some(None);
        self
    }
}
