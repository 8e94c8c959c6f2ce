//! Command-line interface: batch extraction, file inspection,
//! and format listing.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;

use dashgps::export::{export_csv, export_geojson, export_gpx, export_kml};
use dashgps::{extract_telemetry, get_parser, TelemetryError, TelemetryTrack, PARSERS};

#[derive(Parser)]
#[command(name = "dashgps")]
#[command(about = "Extract GPS and sensor telemetry from dashcam videos", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract GPS data from video files
    Extract {
        /// Input video file(s)
        #[arg(required = true)]
        input: Vec<PathBuf>,

        /// Output file path (single file mode)
        #[arg(short, long, conflicts_with = "output_dir")]
        output: Option<PathBuf>,

        /// Output directory (batch mode)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "gpx")]
        format: ExportFormat,

        /// Drop samples without a valid fix before export
        #[arg(long)]
        skip_invalid: bool,
    },
    /// Show information about a video file
    Info {
        /// Input video file
        input: PathBuf,
    },
    /// List supported formats
    Formats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    Gpx,
    Geojson,
    Kml,
    Csv,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Gpx => "gpx",
            ExportFormat::Geojson => "geojson",
            ExportFormat::Kml => "kml",
            ExportFormat::Csv => "csv",
        }
    }

    fn describe(self) -> &'static str {
        match self {
            ExportFormat::Gpx => "GPS Exchange Format (Strava, Garmin, etc.)",
            ExportFormat::Geojson => "GeoJSON (Leaflet, Mapbox, PostGIS)",
            ExportFormat::Kml => "Keyhole Markup Language (Google Earth)",
            ExportFormat::Csv => "Comma-Separated Values (spreadsheets)",
        }
    }

    fn export(self, track: &TelemetryTrack, path: &Path) -> Result<(), TelemetryError> {
        match self {
            ExportFormat::Gpx => export_gpx(track, path),
            ExportFormat::Geojson => export_geojson(track, path),
            ExportFormat::Kml => export_kml(track, path),
            ExportFormat::Csv => export_csv(track, path),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Extract {
            input,
            output,
            output_dir,
            format,
            skip_invalid,
        } => extract(
            &input,
            output.as_deref(),
            output_dir.as_deref(),
            format,
            skip_invalid,
        ),
        Commands::Info { input } => info(&input),
        Commands::Formats => formats(),
    }
}

fn init_logging(verbose: bool) {
    let default = match verbose {
        true => "debug",
        false => "info",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

/// Extracts every input file, reporting per-file errors and continuing
/// with the rest of the batch. Parses are independent, so the batch runs
/// in parallel.
fn extract(
    inputs: &[PathBuf],
    output: Option<&Path>,
    output_dir: Option<&Path>,
    format: ExportFormat,
    skip_invalid: bool,
) -> ExitCode {
    let succeeded: usize = inputs
        .par_iter()
        .map(
            |input| match process_file(input, output, output_dir, format, skip_invalid) {
                Ok(()) => 1,
                Err(err) => {
                    eprintln!("Error processing {}: {err}", input.display());
                    0
                }
            },
        )
        .sum();

    match succeeded == 0 && !inputs.is_empty() {
        true => ExitCode::FAILURE,
        false => ExitCode::SUCCESS,
    }
}

fn process_file(
    input: &Path,
    output: Option<&Path>,
    output_dir: Option<&Path>,
    format: ExportFormat,
    skip_invalid: bool,
) -> Result<(), TelemetryError> {
    log::debug!("processing {}", input.display());

    let mut track = extract_telemetry(input)?;
    if skip_invalid {
        track = track.filter_valid();
    }

    log::info!("{}: {} samples", input.display(), track.len());
    if let Some(duration) = track.duration() {
        log::debug!(
            "{}: duration {:.1} s",
            input.display(),
            duration.as_seconds_f64()
        );
    }

    let out_path = match (output, output_dir) {
        (Some(path), _) => path.to_owned(),
        (None, Some(dir)) => dir
            .join(input.file_stem().unwrap_or_default())
            .with_extension(format.extension()),
        (None, None) => input.with_extension(format.extension()),
    };

    format.export(&track, &out_path)?;
    log::info!("exported {}", out_path.display());
    Ok(())
}

fn info(input: &Path) -> ExitCode {
    let size = match std::fs::metadata(input) {
        Ok(meta) => meta.len(),
        Err(err) => {
            eprintln!("Error: {}: {err}", input.display());
            return ExitCode::FAILURE;
        }
    };

    println!("File: {}", input.display());
    println!("Size: {size} bytes");
    println!();

    let parser = match get_parser(input) {
        Ok(parser) => parser,
        Err(_) => {
            println!("Format: unknown (not supported)");
            return ExitCode::FAILURE;
        }
    };

    println!("Format: {}", parser.name());
    println!("Supported formats: {}", parser.formats().join(", "));
    println!();

    let track = match parser.parse(input) {
        Ok(track) => track,
        Err(err) => {
            eprintln!("Error parsing: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("GPS samples: {}", track.len());

    if let Some(duration) = track.duration() {
        let seconds = duration.whole_seconds();
        println!("Duration: {}m {}s", seconds / 60, seconds % 60);
    }

    if let Some((min_lat, min_lon, max_lat, max_lon)) = track.bounds() {
        println!("Bounds:");
        println!("  Lat: {min_lat:.6} to {max_lat:.6}");
        println!("  Lon: {min_lon:.6} to {max_lon:.6}");
    }

    if let (Some(first), Some(last)) = (track.first(), track.last()) {
        println!(
            "First sample: {:.6}, {:.6}",
            first.latitude, first.longitude
        );
        println!("Last sample: {:.6}, {:.6}", last.latitude, last.longitude);
        if let Some(timestamp) = first.timestamp {
            println!("Start time: {timestamp}");
        }
        if let Some(timestamp) = last.timestamp {
            println!("End time: {timestamp}");
        }
    }

    ExitCode::SUCCESS
}

fn formats() -> ExitCode {
    println!("Supported input formats:");
    println!("{}", "-".repeat(40));
    for parser in PARSERS {
        println!("  {}", parser.name());
        for format in parser.formats() {
            println!("    - {format}");
        }
    }
    println!();

    println!("Supported export formats:");
    println!("{}", "-".repeat(40));
    for format in ExportFormat::value_variants() {
        println!("  {}: {}", format.extension(), format.describe());
    }

    ExitCode::SUCCESS
}
