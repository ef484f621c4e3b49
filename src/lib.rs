//! Greedy pin clustering for interactive maps
//!
//! Groups geographic points into clusters for the visible viewport and
//! re-clusters whenever the viewport changes, so dense point sets render as
//! aggregated markers instead of overlapping pins.

pub mod cluster;
pub mod error;
pub mod mercator;

#[cfg(test)]
mod mercator_test;

pub use cluster::{ClusterEngine, ClusterOptions, ClustererConfig, Location, Point};
pub use error::{ClusterError, Result};
pub use mercator::MercatorViewport;
