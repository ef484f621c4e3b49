//! Pin clustering tool
//!
//! Reads geographic points from a CSV file, clusters them for a simulated
//! Web Mercator viewport, and writes one row per representative marker.

use clap::Parser;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::FmtSubscriber;

use rust_pin_clusterer::cluster::{
    Cluster, ClusterEngine, ClusterOptions, Location, MarkerLayer, Point, PointList,
    ViewportProvider,
};
use rust_pin_clusterer::{ClusterError, MercatorViewport, Result};


#[derive(Parser)]
#[command(name = "rust_pin_clusterer")]
#[command(about = "Greedy pin clustering for a map viewport", long_about = None)]
struct Args {
    /// Input CSV file with latitude,longitude[,label] columns
    #[arg(short, long, default_value = "points.csv")]
    input: PathBuf,

    /// Output CSV file with one row per marker (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Viewport zoom level
    #[arg(short, long, default_value_t = 12)]
    zoom: u8,

    /// Viewport center latitude (default: first point)
    #[arg(long, allow_negative_numbers = true)]
    center_lat: Option<f64>,

    /// Viewport center longitude (default: first point)
    #[arg(long, allow_negative_numbers = true)]
    center_lon: Option<f64>,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 1024.0)]
    width: f64,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 768.0)]
    height: f64,

    /// Cluster grid size in pixels
    #[arg(short, long)]
    grid_size: Option<f64>,

    /// Zoom level from which points are no longer clustered
    #[arg(short, long)]
    max_zoom: Option<u8>,

    /// Extra clusterer options as a JSON object, e.g. '{"extendMapBoundsBy": 1}'
    #[arg(long)]
    options: Option<String>,

    /// Enable pass timing and bounding-region output
    #[arg(short, long)]
    debug: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(match args.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        })
        .with_writer(io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Error installing logger: {}", e);
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let points = read_points(&args.input)?;
    if points.is_empty() {
        return Err(ClusterError::NoPoints(args.input.clone()));
    }
    info!("Read {} points from {:?}", points.len(), args.input);

    let center = viewport_center(&points, args.center_lat, args.center_lon);
    let viewport = MercatorViewport::new(center, args.zoom, args.width, args.height);
    if !viewport.is_ready() {
        return Err(ClusterError::ViewportUnavailable(format!(
            "{}x{} px",
            args.width, args.height
        )));
    }

    let mut engine: ClusterEngine<String, _, _> =
        ClusterEngine::new(viewport, MarkerLayer::new());
    if let Some(json) = &args.options {
        engine.configure_json(json)?;
    }
    let mut options = ClusterOptions::new();
    if args.debug {
        options = options.debug(true);
    }
    if let Some(grid_size) = args.grid_size {
        options = options.grid_size(grid_size);
    }
    if let Some(max_zoom) = args.max_zoom {
        options = options.max_zoom(max_zoom);
    }
    engine.configure(options);
    debug!(config = ?engine.config(), "Clusterer configured");

    engine.set_points(Some(points));

    let layer = engine.renderer();
    info!(
        "Placed {} markers, {} bounding regions",
        layer.markers.len(),
        layer.shapes.len()
    );

    match &args.output {
        None => write_markers(io::stdout().lock(), layer, engine.clusters())?,
        Some(output_file) => {
            write_markers(File::create(output_file)?, layer, engine.clusters())?;
            info!("Markers written to {:?}", output_file);
        }
    }

    Ok(())
}

/// Picks the viewport center: explicit coordinates win, then the first
/// well-formed point, then (0, 0)
fn viewport_center(
    points: &PointList<String>,
    center_lat: Option<f64>,
    center_lon: Option<f64>,
) -> Location {
    let first = points.iter().find_map(Point::location);
    Location::new(
        center_lat
            .or(first.map(|l| l.latitude))
            .unwrap_or_default(),
        center_lon
            .or(first.map(|l| l.longitude))
            .unwrap_or_default(),
    )
}

/// Reads points from a CSV file
///
/// Expected format: `latitude,longitude[,label]` (header row is optional)
///
/// Rows with an unparsable coordinate are kept as unlocated points; they
/// only take part in passes at or below the minimum admission zoom.
fn read_points(filename: &PathBuf) -> Result<PointList<String>> {
    let file = File::open(filename)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut records = Vec::new();
    for result in reader.records() {
        records.push(result?);
    }

    // Determine if first row is header
    let has_header = records
        .first()
        .and_then(|r| r.get(0))
        .is_some_and(|field| field.trim().parse::<f64>().is_err());
    let start_idx = if has_header { 1 } else { 0 };

    let points = records
        .iter()
        .skip(start_idx)
        .filter(|record| record.len() >= 2)
        .map(|record| Point {
            latitude: record.get(0).and_then(|s| s.trim().parse().ok()),
            longitude: record.get(1).and_then(|s| s.trim().parse().ok()),
            payload: record
                .get(2)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        })
        .collect();

    Ok(points)
}

/// Writes one CSV row per placed marker
///
/// Format: `latitude,longitude,style,members,label`
fn write_markers<W: Write>(
    out: W,
    layer: &MarkerLayer<String>,
    clusters: &[Cluster<String>],
) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(out);
    writer.write_record(["latitude", "longitude", "style", "members", "label"])?;

    for (marker, _) in &layer.markers {
        let members = clusters
            .get(marker.cluster_index)
            .map_or(0, Cluster::len);
        writer.write_record([
            marker.location.latitude.to_string(),
            marker.location.longitude.to_string(),
            marker.type_name.clone(),
            members.to_string(),
            marker.payload.clone().unwrap_or_default(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
