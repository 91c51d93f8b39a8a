//! subpix - sub-pixel raster translation in the Fourier domain
//!
//! Reads a single-band raster, shifts it by a possibly fractional number of
//! pixels and writes the cropped result, streaming block by block with an
//! optional worker pool.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use subpix_core::Size;
use subpix_io::IoError;
use subpix_ops::{Decomposition, ShiftTranslator};
use subpix_stream::{ShiftStreamer, StreamError};

/// Exit code for command-line usage errors.
const EXIT_USAGE: u8 = 1;
/// Exit code for raster I/O failures.
const EXIT_IO: u8 = 2;
/// Exit code for processing failures.
const EXIT_PROCESSING: u8 = 3;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DecompositionArg {
    /// Feed blocks straight to the spectral kernel.
    Regular,
    /// Periodic-plus-smooth split ahead of the spectral kernel.
    PeriodicSmooth,
}

impl From<DecompositionArg> for Decomposition {
    fn from(arg: DecompositionArg) -> Self {
        match arg {
            DecompositionArg::Regular => Decomposition::Regular,
            DecompositionArg::PeriodicSmooth => Decomposition::PeriodicSmooth,
        }
    }
}

#[derive(Parser)]
#[command(name = "subpix")]
#[command(version, about = "Sub-pixel raster translation in the Fourier domain")]
#[command(long_about = "
Translates a single-band raster by a fractional number of pixels using a
phase ramp in the Fourier domain, streaming the raster in overlapping
blocks.

Examples:
  subpix -i input.spxr -o output.spxr --row-shift 50.72 --col-shift -3.25
  subpix -i input.spxr -o output.spxr --row-shift 10 --col-shift 10 \\
         --block-size 512x512 --parallel-workers 8 \\
         --decomposition periodic-smooth
")]
struct Cli {
    /// Input raster path
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Output raster path
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// Translation along rows, in pixels (fractional and negative allowed)
    #[arg(long, allow_negative_numbers = true)]
    row_shift: f64,

    /// Translation along columns, in pixels (fractional and negative allowed)
    #[arg(long, allow_negative_numbers = true)]
    col_shift: f64,

    /// Stream block size as ROWSxCOLS (a single value means square blocks)
    #[arg(long, default_value = "256x256")]
    block_size: String,

    /// Number of parallel workers computing block translations
    #[arg(long, default_value_t = 1)]
    parallel_workers: usize,

    /// Image decomposition applied ahead of the spectral shift
    #[arg(long, value_enum, default_value_t = DecompositionArg::Regular)]
    decomposition: DecompositionArg,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_block_size(input: &str) -> Result<Size, String> {
    let parse_extent = |raw: &str| -> Result<usize, String> {
        raw.trim()
            .parse::<usize>()
            .map_err(|_| format!("invalid block extent '{raw}'"))
    };
    let size = match input.split_once(['x', 'X']) {
        Some((rows, cols)) => Size::new(parse_extent(rows)?, parse_extent(cols)?),
        None => {
            let side = parse_extent(input)?;
            Size::new(side, side)
        }
    };
    if size.is_empty() {
        return Err(format!("block size '{input}' has a zero extent"));
    }
    Ok(size)
}

fn usage_error(message: &str) -> ExitCode {
    eprintln!("error: {message}");
    ExitCode::from(EXIT_USAGE)
}

fn run(cli: &Cli, block_size: Size) -> Result<(), StreamError> {
    let translator = ShiftTranslator::new(
        cli.decomposition.into(),
        cli.row_shift,
        cli.col_shift,
    );

    let mut streamer = ShiftStreamer::new(
        &cli.input,
        &cli.output,
        block_size,
        cli.row_shift,
        cli.col_shift,
        cli.parallel_workers,
    )?;
    streamer.stream(&translator)?;

    info!(
        input = %cli.input.display(),
        output = %cli.output.display(),
        "translation finished"
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // clap renders its own help/version output
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(EXIT_USAGE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(cli.verbose);

    if !cli.row_shift.is_finite() || !cli.col_shift.is_finite() {
        return usage_error("shifts must be finite");
    }
    if cli.parallel_workers == 0 {
        return usage_error("--parallel-workers must be at least 1");
    }
    let block_size = match parse_block_size(&cli.block_size) {
        Ok(size) => size,
        Err(message) => return usage_error(&message),
    };

    match run(&cli, block_size) {
        Ok(()) => ExitCode::SUCCESS,
        Err(StreamError::Io(IoError::InvalidBlockSize(message))) => {
            error!(%message, "invalid block size");
            ExitCode::from(EXIT_USAGE)
        }
        Err(err @ StreamError::Io(_)) => {
            error!(%err, "raster I/O failed");
            ExitCode::from(EXIT_IO)
        }
        Err(err) => {
            error!(%err, "translation failed");
            ExitCode::from(EXIT_PROCESSING)
        }
    }
}
