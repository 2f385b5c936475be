use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{LevelFilter, debug, info};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use kmlcentroid::config::FileConfig;
use kmlcentroid::geometry::{Centroid, polygon_centroid};
use kmlcentroid::kml::{locate_polygon, parse_document};
use kmlcentroid::output::{render_crosshair_icon, write_point_placemark};

/// Compute the planar centroid of the first polygon in a KML file
///
/// Prints the centroid as a single `lon,lat` line, the same order the
/// coordinates carry inside the KML itself. With --marker, also writes a
/// companion KML file with a crosshair placemark at the centroid.
///
/// Examples:
///   # Print the centroid of the first polygon in field.kml
///   kmlcentroid field.kml
///
///   # Also drop a marker placemark next to the input
///   kmlcentroid field.kml --marker
///
///   # Marker with explicit output and icon paths
///   kmlcentroid field.kml -m -o marked.kml --icon cross.svg
#[derive(Parser, Debug)]
#[command(name = "kmlcentroid")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input KML file (prompted for interactively if omitted)
    input: Option<PathBuf>,

    /// Path to config file (optional, auto-searches kmlcentroid.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write a marker KML file with a placemark at the centroid
    #[arg(short = 'm', long)]
    marker: bool,

    /// Marker KML output path (defaults to <input-stem>_centroid.kml)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Marker icon path (defaults to <input-stem>_crosshair.svg)
    #[arg(long)]
    icon: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() {
    if let Err(e) = run() {
        // Every failure class collapses into one user-facing line
        eprintln!("Error processing file: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let file_config = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            Some(toml::from_str(&contents).context("Failed to parse config file")?)
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load()
    };

    let marker = args.marker || file_config.as_ref().map(|c| c.marker).unwrap_or(false);
    let verbose = args.verbose || file_config.as_ref().map(|c| c.verbose).unwrap_or(false);
    let output = args
        .output
        .clone()
        .or_else(|| file_config.as_ref().and_then(|c| c.output.clone()));
    let icon = args
        .icon
        .clone()
        .or_else(|| file_config.as_ref().and_then(|c| c.icon.clone()));

    init_logger(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    })?;

    let input = match args.input {
        Some(path) => path,
        None => prompt_for_input()?,
    };

    let contents = std::fs::read_to_string(&input)
        .with_context(|| format!("Failed to read KML file: {}", input.display()))?;

    let document = parse_document(&contents)?;
    let located = locate_polygon(&document)?;
    debug!(
        "first polygon '{}' has {} vertices",
        located.name,
        located.ring.len()
    );

    let centroid = polygon_centroid(&located.ring);
    if centroid.degenerate {
        info!("polygon is degenerate; centroid is the vertex mean");
    }

    if marker {
        let output_path = output.unwrap_or_else(|| sibling_path(&input, "_centroid.kml"));
        let icon_path = icon.unwrap_or_else(|| sibling_path(&input, "_crosshair.svg"));

        render_crosshair_icon(&icon_path)?;

        let description = if located.name.is_empty() {
            "centroid".to_string()
        } else {
            format!("{} centroid", located.name)
        };
        write_point_placemark(
            &output_path,
            "Centroid",
            &description,
            centroid.y,
            centroid.x,
            &icon_path,
        )?;
    }

    // Printed last: no partial output when the marker writes fail
    println!("{}", centroid_line(&centroid));

    Ok(())
}

/// The output contract: `lon,lat` on a single line
fn centroid_line(centroid: &Centroid) -> String {
    format!("{},{}", centroid.x, centroid.y)
}

/// `<stem><suffix>` next to the input file
fn sibling_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "map".to_string());
    input.with_file_name(format!("{stem}{suffix}"))
}

fn prompt_for_input() -> Result<PathBuf> {
    print!("Path to KML file: ");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Failed to read input path")?;

    let trimmed = line.trim();
    if trimmed.is_empty() {
        bail!("No input file provided");
    }
    Ok(PathBuf::from(trimmed))
}

fn init_logger(level: LevelFilter) -> Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| out.finish(format_args!("[{}] {}", record.level(), message)))
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .context("Failed to install logger")?;
    Ok(())
}
