use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::{LevelFilter, Log, Metadata, Record};
use nalgebra::Point2;
use punch_grid::digitize::{digitize, full_frame_boundary};
use punch_grid::export::{grid_to_text, write_bmp, write_png, write_text};
use punch_grid::{Boundary, DetectParams};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Png,
    Bmp,
}

/// Digitize a photographed punched card into a boolean cell grid.
#[derive(Parser, Debug)]
#[command(name = "punch-grid", version, about)]
struct Cli {
    /// Input photograph (any format the `image` crate decodes).
    image: PathBuf,

    /// Expected number of grid columns.
    #[arg(long)]
    cols: usize,

    /// Expected number of grid rows.
    #[arg(long)]
    rows: usize,

    /// Card corners as eight comma-separated numbers
    /// `x0,y0,x1,y1,x2,y2,x3,y3` in TL,TR,BR,BL order.
    /// Defaults to the full image rectangle.
    #[arg(long)]
    corners: Option<String>,

    /// Foreground threshold offset below the local mean, 0..=100.
    #[arg(long, default_value_t = 30.0)]
    sensitivity: f32,

    /// Local-mean window radius in grid cells, 1..=20.
    #[arg(long, default_value_t = 5.0)]
    neighborhood_radius: f32,

    /// Expected punch area as a percentage of one cell, 5..=100.
    #[arg(long, default_value_t = 50.0)]
    blob_size_percent: f32,

    /// Rectified samples per grid cell.
    #[arg(long, default_value_t = 10)]
    samples_per_cell: usize,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Output file. Text defaults to stdout; png and bmp require a path.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Log pipeline stage details to stderr.
    #[arg(long, short)]
    verbose: bool,
}

/// Bare stderr logger for the CLI. The filter lives in `log::max_level`,
/// set once from `--verbose`; pipeline stages use the `log` macros and
/// need nothing more here.
struct CliLogger;

impl Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("punch-grid: {}", record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: CliLogger = CliLogger;

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn parse_corners(spec: &str) -> Result<Boundary, String> {
    let values: Result<Vec<f64>, _> = spec.split(',').map(|v| v.trim().parse::<f64>()).collect();
    let values = values.map_err(|e| format!("bad corner value: {e}"))?;
    if values.len() != 8 {
        return Err(format!("expected 8 corner values, got {}", values.len()));
    }
    let corners = [
        Point2::new(values[0], values[1]),
        Point2::new(values[2], values[3]),
        Point2::new(values[4], values[5]),
        Point2::new(values[6], values[7]),
    ];
    Ok(Boundary::from_corners(corners))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let img = image::ImageReader::open(&cli.image)?.decode()?;
    let boundary = match &cli.corners {
        Some(spec) => parse_corners(spec)?,
        None => full_frame_boundary(img.width(), img.height()),
    };

    let params = DetectParams {
        sensitivity: cli.sensitivity,
        neighborhood_radius: cli.neighborhood_radius,
        blob_size_percent: cli.blob_size_percent,
        samples_per_cell: cli.samples_per_cell,
        ..DetectParams::default()
    };

    let detection = digitize(&img, &boundary, cli.cols, cli.rows, &params)?;
    log::debug!(
        "{} punches in {} blobs",
        detection.grid.punched_count(),
        detection.blobs.len()
    );

    match (cli.format, &cli.output) {
        (Format::Text, Some(path)) => {
            let mut out = BufWriter::new(File::create(path)?);
            write_text(&detection.grid, &mut out)?;
            out.flush()?;
        }
        (Format::Text, None) => {
            io::stdout().write_all(grid_to_text(&detection.grid)?.as_bytes())?;
        }
        (Format::Png, Some(path)) => {
            let out = BufWriter::new(File::create(path)?);
            write_png(&detection.grid, out)?;
        }
        (Format::Bmp, Some(path)) => {
            let mut out = BufWriter::new(File::create(path)?);
            write_bmp(&detection.grid, &mut out)?;
            out.flush()?;
        }
        (Format::Png | Format::Bmp, None) => {
            return Err("--output is required for png and bmp formats".into());
        }
    }

    Ok(())
}
