use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Instant;

use bitvec::prelude::*;
use tracing::{debug, info, warn};

use super::config::{ClusterOptions, ClustererConfig};
use super::distance::pixel_distance;
use super::group::Cluster;
use super::point::{Location, Point, PointList};
use super::render::{MarkerRenderer, ShapeStyle};
use super::viewport::{ViewportChanged, ViewportProvider, ViewportSnapshot};
use crate::error::{ClusterError, Result};

// Greedy clustering pass:
//
// recompute(P)
//    snapshot viewport (zoom, bounds + margin, meters per pixel)
//    clear map
//    for each point p in P, in input order
//       if zoom > MIN_ZOOM and p is outside the expanded bounds
//          skip p
//       if p has no location
//          add p to the first cluster (hold it until one exists)
//       if zoom >= maxZoom
//          create a new cluster seeded with p
//       else
//          C = cluster whose center is nearest to p in pixels (first wins on ties)
//          if C exists and p is inside C's bounding region
//             add p to C
//          else
//             create a new cluster seeded with p
//    decorate and place one marker per cluster, in creation order

/// Lifecycle of the engine's viewport subscription
enum EngineState {
    Uninitialized,
    Subscribed(Receiver<ViewportChanged>),
}

/// Outcome of selecting a cluster's marker
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection {
    /// The viewport zoomed into the cluster
    Zoomed { center: Location, zoom: u8 },
    /// Selection is left to the caller; carries the cluster index
    Delegated(usize),
}

/// ClusterEngine re-clusters a point set every time the viewport changes
///
/// Holds the latest pass's clusters until the next pass replaces them.
pub struct ClusterEngine<T, V, R> {
    viewport: V,
    renderer: R,
    config: ClustererConfig<T>,
    points: Option<PointList<T>>,
    state: EngineState,
    clusters: Vec<Cluster<T>>,
    admitted: BitVec,
}

impl<T, V, R> ClusterEngine<T, V, R>
where
    T: Clone,
    V: ViewportProvider,
    R: MarkerRenderer<T>,
{
    pub fn new(viewport: V, renderer: R) -> Self {
        Self::with_config(viewport, renderer, ClustererConfig::default())
    }

    pub fn with_config(viewport: V, renderer: R, config: ClustererConfig<T>) -> Self {
        Self {
            viewport,
            renderer,
            config,
            points: None,
            state: EngineState::Uninitialized,
            clusters: Vec::new(),
            admitted: BitVec::new(),
        }
    }

    /// Merges `options` into the configuration; takes effect on the next pass
    pub fn configure(&mut self, options: ClusterOptions<T>) {
        self.config.merge(options);
    }

    /// Merges options given as a camelCase JSON object
    ///
    /// Unknown keys are ignored. A known key with a value of the wrong type
    /// rejects the whole object and leaves the configuration untouched.
    pub fn configure_json(&mut self, json: &str) -> Result<()> {
        let options: ClusterOptions<T> = serde_json::from_str(json)?;
        self.configure(options);
        Ok(())
    }

    /// Replaces the working point set
    ///
    /// `None` keeps the previously stored set; with no stored set it is a
    /// no-op. The first call on a ready viewport runs one pass right away and
    /// subscribes to viewport changes; later calls only store the points.
    pub fn set_points(&mut self, points: Option<PointList<T>>) {
        match points {
            Some(points) => self.points = Some(points),
            None if self.points.is_none() => return,
            None => {}
        }

        if matches!(self.state, EngineState::Subscribed(_)) {
            return;
        }

        if !self.viewport.is_ready() {
            debug!("Viewport not ready, deferring subscription");
            return;
        }

        self.recompute();
        self.state = EngineState::Subscribed(self.viewport.subscribe());
    }

    /// Runs a full clustering pass and hands the result to the renderer
    ///
    /// # Returns
    ///
    /// `false` if no pass ran because there is no point set or the viewport
    /// is not ready
    pub fn recompute(&mut self) -> bool {
        let Some(points) = self.points.as_deref() else {
            return false;
        };

        let config = self.config.clone();
        let Some(snapshot) = ViewportSnapshot::capture(&self.viewport, &config) else {
            debug!("Viewport not ready, skipping recompute");
            return false;
        };
        let started = config.debug.then(Instant::now);

        self.renderer.clear_all();
        let (clusters, admitted) = cluster_points(points, &self.viewport, &snapshot, &config);
        render_clusters(&clusters, &config, &mut self.renderer);

        if let Some(started) = started {
            info!(
                elapsed_us = started.elapsed().as_micros() as u64,
                zoom = snapshot.zoom,
                points = points.len(),
                admitted = admitted.count_ones(),
                clusters = clusters.len(),
                "Recompute pass finished"
            );
        }

        self.clusters = clusters;
        self.admitted = admitted;
        true
    }

    /// Drains pending viewport notifications, running one pass for each
    ///
    /// # Returns
    ///
    /// Number of passes run
    pub fn process_viewport_events(&mut self) -> usize {
        let mut passes = 0;
        loop {
            let event = match &self.state {
                EngineState::Uninitialized => break,
                EngineState::Subscribed(events) => events.try_recv(),
            };

            match event {
                Ok(change) => {
                    debug!(zoom = change.zoom, "Viewport changed");
                    if self.recompute() {
                        passes += 1;
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("Viewport subscription closed");
                    self.state = EngineState::Uninitialized;
                    break;
                }
            }
        }
        passes
    }

    /// Handles a click on the marker of the `index`-th cluster of the latest pass
    ///
    /// Multi-point clusters with click-to-zoom on zoom the viewport in; every
    /// other selection is delegated to the caller.
    pub fn select_cluster(&mut self, index: usize) -> Result<Selection> {
        let cluster = self
            .clusters
            .get(index)
            .ok_or(ClusterError::UnknownCluster(index))?;

        if cluster.click_to_zoom() && cluster.is_aggregate() {
            let zoom = cluster.activate_zoom(&mut self.viewport, self.config.max_zoom);
            return Ok(Selection::Zoomed {
                center: cluster.center(),
                zoom,
            });
        }

        Ok(Selection::Delegated(index))
    }

    pub fn config(&self) -> &ClustererConfig<T> {
        &self.config
    }

    pub fn points(&self) -> Option<&[Point<T>]> {
        self.points.as_deref()
    }

    /// Clusters of the latest pass, in creation order
    pub fn clusters(&self) -> &[Cluster<T>] {
        &self.clusters
    }

    /// Checks if the point at `id` passed admission in the latest pass
    pub fn is_admitted(&self, id: usize) -> bool {
        self.admitted.get(id).is_some_and(|bit| *bit)
    }

    pub fn is_subscribed(&self) -> bool {
        matches!(self.state, EngineState::Subscribed(_))
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

/// Greedily assigns points to clusters for one viewport snapshot
///
/// # Returns
///
/// A tuple `(clusters, admitted)` where:
/// - `clusters` are the clusters in creation order
/// - `admitted` marks which input points took part in the pass
pub fn cluster_points<T, V>(
    points: &[Point<T>],
    viewport: &V,
    snapshot: &ViewportSnapshot,
    config: &ClustererConfig<T>,
) -> (Vec<Cluster<T>>, BitVec)
where
    T: Clone,
    V: ViewportProvider + ?Sized,
{
    let mut clusters: Vec<Cluster<T>> = Vec::new();
    let mut admitted = bitvec![0; points.len()];

    // No merging at max zoom, and nothing left to zoom into
    let at_max_zoom = snapshot.zoom >= config.max_zoom;
    let click_to_zoom = config.click_to_zoom && !at_max_zoom;

    // Unlocated points waiting for the first cluster of the pass
    let mut unlocated: Vec<usize> = Vec::new();

    for (id, point) in points.iter().enumerate() {
        let Some(location) = point.location() else {
            // Zero distance to every center, so the first cluster wins the tie
            if snapshot.admits_everything() && !at_max_zoom {
                match clusters.first_mut() {
                    Some(first) => {
                        first.add_unlocated(id);
                        admitted.set(id, true);
                    }
                    None => unlocated.push(id),
                }
            }
            continue;
        };
        if !snapshot.admits(&location) {
            continue;
        }
        admitted.set(id, true);

        if !at_max_zoom
            && let Some(nearest) = nearest_cluster(&clusters, &location, snapshot.meters_per_pixel)
            && clusters[nearest].contains_within_borders(&location)
        {
            clusters[nearest].add(id, location);
            continue;
        }

        clusters.push(Cluster::new(
            id,
            location,
            point.payload.clone(),
            viewport,
            config.grid_size,
            click_to_zoom,
        ));

        if clusters.len() == 1 {
            for held in unlocated.drain(..) {
                clusters[0].add_unlocated(held);
                admitted.set(held, true);
            }
        }
    }

    (clusters, admitted)
}

/// Finds the cluster whose center is nearest to `location` in pixels
///
/// Ties go to the cluster created first.
fn nearest_cluster<T>(
    clusters: &[Cluster<T>],
    location: &Location,
    meters_per_pixel: f64,
) -> Option<usize> {
    let mut nearest = None;
    let mut distance = f64::INFINITY;

    for (i, cluster) in clusters.iter().enumerate() {
        let d = pixel_distance(&cluster.center(), location, meters_per_pixel);
        if d < distance {
            distance = d;
            nearest = Some(i);
        }
    }

    nearest
}

/// Decorates and places one marker per cluster, plus bounding outlines in debug mode
fn render_clusters<T, R>(clusters: &[Cluster<T>], config: &ClustererConfig<T>, renderer: &mut R)
where
    T: Clone,
    R: MarkerRenderer<T> + ?Sized,
{
    let outline_style = ShapeStyle::debug_outline();

    for (index, cluster) in clusters.iter().enumerate() {
        let mut marker = cluster.marker(index, config);
        if let Some(hook) = &config.on_cluster_to_map {
            hook(&mut marker, cluster);
        }
        renderer.place(&marker, cluster.style_class());

        if config.debug {
            renderer.place_shape(&cluster.bounds().outline(), &outline_style);
        }
    }
}
