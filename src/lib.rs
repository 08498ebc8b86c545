//! Croppan: crop, scale and pan through a sequence of still images.
//!
//! Given a handful of crop "waypoints" anchored at particular images of a
//! sequence, croppan works out a crop for every image in between, so that
//! the cropped images played back-to-back look like a smooth camera pan
//! and zoom.
//!
//! # Modules
//!
//! - [`crop`]: Crop spec grammar, crop boxes and their resolution against image sizes
//! - [`pan`]: Pan waypoints, their loading from JSON/YAML, and expansion into frames
//! - [`render`]: Cropping, resizing and saving the expanded frames
//! - [`error`]: Error types for croppan operations

pub mod crop;
pub mod error;
pub mod pan;
pub mod render;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::filter::LevelFilter;

pub use error::CroppanError;

use pan::{expand_pans, load_pans, PanSpec};
use render::{OutputFormat, OutputNaming, RenderOptions};

/// Help text for the `--pan` option.
const PAN_HELP: &str = "A file containing pan spec JSON (or YAML, for .yaml/.yml files), \
or the JSON text itself. Repeatable; waypoints are used in the order given.

The JSON format is a single object or a list of objects:
    {\"image0\": filename,
     \"crop0\": cropspec,     null to continue from the previous crop
     \"image1\": filename,    defaults to image0
     \"crop1\": cropspec,     defaults to crop0
     \"n\": integer}          repeat count, defaults to 1

A cropspec is a string \"x1,y1,x2,y2\". Values prefixed with R+ or R- (or just
+ or -) are relative to the image origin or its far edges; R0 means 0 for
x1/y1 and the full width/height for x2/y2; S<n> gives x2/y2 as a size added
to x1/y1. For example \"R+10,R+10,R-10,R-10\" takes 10 pixels off every edge.
Relative values are resolved once, against the size of their own image.";

/// The croppan CLI application.
#[derive(Parser)]
#[command(name = "croppan")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase logging verbosity (-v for progress, -vv for every frame).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Crop (and optionally resize) every image along the pan and save the results.
    Pan(PanArgs),
    /// Print the crop chosen for every frame without touching any image.
    Expand(ExpandArgs),
}

/// Pan specs and the image sequence they apply to.
#[derive(clap::Args)]
struct SequenceArgs {
    #[arg(long = "pan", value_name = "SPEC", help = "Pan spec file or JSON text", long_help = PAN_HELP)]
    pans: Vec<String>,

    /// Image files, in playback order.
    filenames: Vec<PathBuf>,
}

/// Arguments for the pan subcommand.
#[derive(clap::Args)]
struct PanArgs {
    #[command(flatten)]
    sequence: SequenceArgs,

    /// Resize every cropped frame to WIDTH,HEIGHT.
    #[arg(long, value_parser = parse_size, value_name = "WIDTH,HEIGHT")]
    size: Option<(u32, u32)>,

    /// Value of the {prefix} placeholder in output names.
    #[arg(long, default_value = render::DEFAULT_PREFIX)]
    outprefix: String,

    /// Output name template; placeholders: {prefix} {name} {stem} {ext} {seq}.
    #[arg(long, env = "CROPPAN_OUTNAMING", default_value = render::DEFAULT_TEMPLATE)]
    outnaming: String,

    /// Output image type.
    #[arg(long, value_enum, default_value_t = OutputType::Jpeg)]
    outtype: OutputType,

    /// Write output images here instead of next to their sources.
    #[arg(long)]
    outdir: Option<PathBuf>,
}

/// Arguments for the expand subcommand.
#[derive(clap::Args)]
struct ExpandArgs {
    #[command(flatten)]
    sequence: SequenceArgs,

    /// Output format for the frame list ('text' or 'json').
    #[arg(long, value_enum, default_value_t = ListFormat::Text)]
    output: ListFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputType {
    Jpeg,
    Png,
}

impl From<OutputType> for OutputFormat {
    fn from(value: OutputType) -> Self {
        match value {
            OutputType::Jpeg => OutputFormat::Jpeg,
            OutputType::Png => OutputFormat::Png,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ListFormat {
    Text,
    Json,
}

/// Run the croppan CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), CroppanError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Pan(args)) => run_pan(args),
        Some(Commands::Expand(args)) => run_expand(args),
        None => {
            println!("croppan {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Crop, scale and pan through a sequence of images.");
            println!();
            println!("Run 'croppan --help' for usage information.");
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Loads every pan source, in order, into one waypoint list.
fn load_all_pans(sources: &[String]) -> Result<Vec<PanSpec>, CroppanError> {
    let mut pans = Vec::new();
    for source in sources {
        pans.extend(load_pans(source)?);
    }
    debug!(count = pans.len(), "loaded pan specs");
    Ok(pans)
}

fn image_names(filenames: &[PathBuf]) -> Vec<String> {
    filenames
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect()
}

/// Execute the pan subcommand.
fn run_pan(args: PanArgs) -> Result<(), CroppanError> {
    if args.sequence.filenames.is_empty() {
        info!("no images given, nothing to do");
        return Ok(());
    }

    let pans = load_all_pans(&args.sequence.pans)?;
    let images = image_names(&args.sequence.filenames);
    let opts = RenderOptions {
        size: args.size,
        naming: OutputNaming {
            template: args.outnaming,
            prefix: args.outprefix,
            out_dir: args.outdir,
        },
        format: args.outtype.into(),
    };

    for (seq, frame) in expand_pans(&images, pans)?.enumerate() {
        let frame = frame?;
        if seq % 250 == 0 {
            info!(seq, image = frame.image, crop = %frame.crop, "cropping");
        } else {
            debug!(seq, image = frame.image, crop = %frame.crop, "cropping");
        }
        render::render_frame(&frame, seq, &opts)?;
    }
    Ok(())
}

/// Execute the expand subcommand.
fn run_expand(args: ExpandArgs) -> Result<(), CroppanError> {
    if args.sequence.filenames.is_empty() {
        info!("no images given, nothing to do");
        return Ok(());
    }

    let pans = load_all_pans(&args.sequence.pans)?;
    let images = image_names(&args.sequence.filenames);
    let frames = expand_pans(&images, pans)?.collect::<Result<Vec<_>, _>>()?;

    match args.output {
        ListFormat::Json => {
            let json = serde_json::to_string_pretty(&frames).map_err(std::io::Error::from)?;
            println!("{json}");
        }
        ListFormat::Text => {
            for (seq, frame) in frames.iter().enumerate() {
                println!("{seq:05} {} {}", frame.image, frame.crop);
            }
        }
    }
    Ok(())
}

/// Parses a `WIDTH,HEIGHT` pair.
fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let fields: Vec<&str> = s.split(',').map(str::trim).collect();
    let [width, height] = fields.as_slice() else {
        return Err(format!("expected WIDTH,HEIGHT, got '{s}'"));
    };
    let parse = |v: &str| {
        v.parse::<u32>()
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| format!("'{v}' is not a positive integer"))
    };
    Ok((parse(*width)?, parse(*height)?))
}
