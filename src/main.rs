use clap::{Parser, Subcommand};
use pixbatch::batch::{self, BatchConfig, BatchRequest};
use pixbatch::imaging::RustCodec;
use pixbatch::types::{OperationSpec, ResizeAxis, TargetFormat};
use pixbatch::{naming, output};
use std::path::PathBuf;
use std::sync::{Arc, mpsc};

#[derive(Parser)]
#[command(name = "pixbatch")]
#[command(version)]
#[command(about = "Batch image compressor, converter, and resizer")]
#[command(long_about = "\
Batch image compressor, converter, and resizer

Applies one operation to every input and writes the results as
<basename>_edited files in the output directory. Inputs may be image
files or directories (searched recursively); anything without a
supported extension (jpg, jpeg, png, webp, tif, tiff, bmp, gif) is
skipped. Source files are never modified.

Examples:

  pixbatch compress --quality 5 vacation/
  pixbatch convert --to webp logo.png banner.jpg
  pixbatch resize --width 800 exports/ --output-dir thumbs

A failed file never stops the rest of the batch; the run ends with a
summary listing every failure and its reason.")]
struct Cli {
    /// Directory for transformed images (created if absent)
    #[arg(long, default_value = "edited", global = true)]
    output_dir: PathBuf,

    /// Worker threads (defaults to available cores)
    #[arg(long, global = true)]
    threads: Option<usize>,

    /// Print the final summary as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Re-encode images at a chosen quality, keeping their format
    Compress {
        /// Quality level from 1 (smallest files) to 10 (best quality)
        #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(u8).range(1..=10))]
        quality: u8,

        /// Image files or directories to process
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
    /// Convert images to another format
    Convert {
        /// Target format: jpeg, png, webp, tiff, bmp, or gif
        #[arg(long = "to")]
        to: TargetFormat,

        /// Image files or directories to process
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
    /// Scale images proportionally from one axis
    Resize {
        /// New width in pixels (height follows the aspect ratio)
        #[arg(long)]
        width: Option<u32>,

        /// New height in pixels (width follows the aspect ratio)
        #[arg(long)]
        height: Option<u32>,

        /// Image files or directories to process
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (operation, inputs) = match cli.command {
        Command::Compress { quality, inputs } => (
            OperationSpec::Compress {
                quality_level: quality,
            },
            inputs,
        ),
        Command::Convert { to, inputs } => (OperationSpec::Reformat { target: to }, inputs),
        Command::Resize {
            width,
            height,
            inputs,
        } => {
            let operation = match (width, height) {
                (Some(value), None) => OperationSpec::Resize {
                    axis: ResizeAxis::Width,
                    value,
                },
                (None, Some(value)) => OperationSpec::Resize {
                    axis: ResizeAxis::Height,
                    value,
                },
                _ => return Err("specify exactly one of --width or --height".into()),
            };
            (operation, inputs)
        }
    };

    let paths = resolve_inputs(&inputs);
    if paths.is_empty() {
        return Err("no supported image files among the inputs".into());
    }

    let request = BatchRequest {
        paths,
        operation,
        output_dir: cli.output_dir,
    };
    let config = BatchConfig {
        threads: cli.threads,
    };

    let (tx, rx) = mpsc::channel();
    let quiet = cli.json;
    let printer = std::thread::spawn(move || {
        for update in rx {
            if !quiet {
                println!("{}", output::format_progress(&update));
            }
        }
    });

    let handle = batch::start_batch(request, &config, Arc::new(RustCodec::new()), Some(tx))?;
    let summary = handle.wait();
    printer.join().unwrap();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        output::print_summary(&summary);
    }

    if summary.error_count > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Expand directories and filter everything down to the supported
/// extension set. Unsupported files are skipped with a notice, matching
/// how inputs are resolved before a batch ever starts.
fn resolve_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for input in inputs {
        if input.is_dir() {
            for entry in walkdir::WalkDir::new(input).sort_by_file_name() {
                match entry {
                    Ok(entry) if entry.file_type().is_file() => {
                        let path = entry.into_path();
                        if naming::is_supported_image(&path) {
                            paths.push(path);
                        }
                    }
                    Ok(_) => {}
                    Err(err) => eprintln!("skipping unreadable entry: {err}"),
                }
            }
        } else if naming::is_supported_image(input) {
            paths.push(input.clone());
        } else {
            eprintln!("skipping {} (unsupported file type)", input.display());
        }
    }
    paths
}
