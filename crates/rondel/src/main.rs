//! rondel: command-line circle detector for still images.
//!
//! Reads an image file, runs the detection pipeline, and prints the
//! number of circles found. With the optional `show` argument the
//! annotated image (blue contours, red circles) is displayed in a
//! native window until a key is pressed or the window is closed.
//!
//! # Usage
//!
//! ```text
//! rondel <file_path> [show]
//! ```
//!
//! Exit codes: 0 on success (including zero circles found), 1 for
//! usage errors, 2 when the image cannot be read or decoded.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rondel_pipeline::{DetectorConfig, grayscale, overlay};

mod viewer;

/// Exit code for usage errors (missing or malformed arguments).
const USAGE_EXIT: u8 = 1;

/// Exit code for unreadable or undecodable image files.
const IO_EXIT: u8 = 2;

/// Detect circular shapes in a still image.
///
/// Prints the number of circles found. With `show`, also displays the
/// annotated image in a window.
#[derive(Parser)]
#[command(name = "rondel", version)]
struct Cli {
    /// Path to the input image (PNG, JPEG, BMP, WebP).
    image_path: Option<PathBuf>,

    /// Pass `show` to display the annotated result in a window.
    mode: Option<String>,

    /// Output the detection result as JSON instead of a summary line.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version print and succeed; anything else is
            // a usage error.
            if matches!(
                e.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ) {
                print!("{e}");
                return ExitCode::SUCCESS;
            }
            eprintln!("{e}");
            return ExitCode::from(USAGE_EXIT);
        }
    };

    let Some(image_path) = cli.image_path else {
        eprintln!("Usage: rondel <file_path> [show]");
        return ExitCode::from(USAGE_EXIT);
    };

    // Anything other than `show` in the second position is ignored and
    // the run proceeds without a window.
    let show = match cli.mode.as_deref() {
        Some("show") => true,
        None => false,
        Some(other) => {
            eprintln!("Ignoring unrecognized argument '{other}'");
            false
        }
    };

    let image_bytes = match std::fs::read(&image_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error reading {}: {e}", image_path.display());
            return ExitCode::from(IO_EXIT);
        }
    };

    // Decode once so the original pixels are still around for the
    // result overlay.
    let original = match grayscale::decode(&image_bytes) {
        Ok(img) => img,
        Err(e) => {
            eprintln!("Error decoding {}: {e}", image_path.display());
            return ExitCode::from(IO_EXIT);
        }
    };

    let detection = rondel_pipeline::detect_in(&original, &DetectorConfig::default());

    if cli.json {
        match serde_json::to_string_pretty(&detection) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing detection result: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("Found {} circles", detection.count());
    }

    if show {
        let mut annotated = original;
        overlay::annotate(&mut annotated, &detection);
        let title = format!("rondel - {}", image_path.display());
        if let Err(e) = viewer::show(&title, &annotated) {
            eprintln!("Error displaying window: {e}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
