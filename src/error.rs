//! Error types for the clusterer's outer surfaces
//!
//! A recompute pass itself never fails; these errors come from option
//! parsing, cluster selection and the command line tool's I/O.

use std::path::PathBuf;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, ClusterError>;

#[derive(Debug, thiserror::Error)]
pub enum ClusterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid cluster options: {0}")]
    Options(#[from] serde_json::Error),

    #[error("No cluster at index {0} in the current pass")]
    UnknownCluster(usize),

    #[error("Viewport unavailable: {0}")]
    ViewportUnavailable(String),

    #[error("No points found in {0:?}")]
    NoPoints(PathBuf),
}
