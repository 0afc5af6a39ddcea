use clap::{Parser, Subcommand};
use idphoto::config::{self, StudioConfig};
use idphoto::export::{EditSession, SINGLE_FILE_NAME, sheet_file_name};
use idphoto::imaging::{
    self, Brightness, EncodedImage, ImageSource, OverlayPlacement, Point, Raster, Viewport,
};
use idphoto::output;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Framing flags shared by `crop` and `export`.
#[derive(clap::Args, Clone)]
struct CropArgs {
    /// Horizontal pan in viewport pixels (positive moves the image right)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    offset_x: f64,

    /// Vertical pan in viewport pixels (positive moves the image down)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    offset_y: f64,

    /// Zoom on top of the cover fit (1.0 = image just fills the frame)
    #[arg(long, default_value_t = 1.0)]
    zoom: f64,

    /// Width of the crop frame the offsets refer to [default: viewport.width]
    #[arg(long)]
    container_width: Option<f64>,

    /// Height of the crop frame the offsets refer to [default: viewport.height]
    #[arg(long)]
    container_height: Option<f64>,
}

impl CropArgs {
    /// The viewport these flags describe. Container overrides must keep the
    /// output's aspect ratio.
    fn viewport(&self, config: &StudioConfig) -> Result<Viewport, config::ConfigError> {
        let defaults = config.default_viewport();
        let container = config.sized_viewport(
            self.container_width.unwrap_or(defaults.container_width),
            self.container_height.unwrap_or(defaults.container_height),
        )?;
        Ok(container
            .with_zoom(self.zoom)
            .with_offset(Point::new(self.offset_x, self.offset_y)))
    }
}

/// Adjustment flags shared by `compose` and `export`.
#[derive(clap::Args, Clone)]
struct ComposeArgs {
    /// Brightness in percent (100 = unchanged)
    #[arg(long, default_value_t = 100.0)]
    brightness: f64,

    /// Garment overlay: a catalog id (see `overlays`) or an image path/URL
    #[arg(long)]
    overlay: Option<String>,

    /// Overlay width relative to the photo width
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Horizontal overlay shift, percent of photo width
    #[arg(long = "x", default_value_t = 0.0, allow_negative_numbers = true)]
    x: f64,

    /// Vertical overlay shift, percent of photo height (positive moves down)
    #[arg(long = "y", default_value_t = 0.0, allow_negative_numbers = true)]
    y: f64,
}

/// Where a single artifact goes.
#[derive(clap::Args, Clone)]
struct TargetArgs {
    /// Output JPEG file
    #[arg(short, long, required_unless_present = "data_url")]
    output: Option<PathBuf>,

    /// Print a `data:image/jpeg;base64,...` URL to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    data_url: bool,
}

#[derive(Parser)]
#[command(name = "idphoto")]
#[command(about = "Crop, dress and tile 3x4 cm ID photos")]
#[command(long_about = "\
Crop, dress and tile 3x4 cm ID photos

Sources can be file paths, http(s) URLs, or data URLs. Framing is given in
crop-frame units (300x400 by default): --offset-x/--offset-y pan the image,
--zoom scales it on top of the cover fit.

Typical flow:

  idphoto export portrait.jpg --out-dir out --zoom 1.2 --offset-y 15 \\
      --overlay real-suit-navy --y 5 --brightness 110

  out/
  ├── photo-3x4-single.jpg         # 708x944 final photo
  └── photo-3x4-sheet-8.jpg        # 15x10 cm sheet, 8 copies at 300 dpi

Set RUST_LOG (e.g. RUST_LOG=idphoto=debug) for detailed logs.
Run 'idphoto gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Log pipeline decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Frame a source image into a fixed-resolution base photo
    Crop {
        /// Source image (path, URL or data URL)
        source: String,
        #[command(flatten)]
        crop: CropArgs,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Apply brightness and an optional garment overlay to a base photo
    Compose {
        /// Base photo (path, URL or data URL)
        base: String,
        #[command(flatten)]
        compose: ComposeArgs,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Tile a finished photo onto a print sheet
    Sheet {
        /// Finished photo (path, URL or data URL)
        photo: String,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Run the full pipeline: crop → compose → single photo + sheet
    Export {
        /// Source image (path, URL or data URL)
        source: String,
        /// Directory the JPEG files are written to
        #[arg(long)]
        out_dir: PathBuf,
        /// Only write the single photo
        #[arg(long)]
        no_sheet: bool,
        #[command(flatten)]
        crop: CropArgs,
        #[command(flatten)]
        compose: ComposeArgs,
    },
    /// List the garment overlay catalog
    Overlays {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            Ok(())
        }
        command => {
            let config = config::load_config(&cli.config_dir)?;
            run(command, &config)
        }
    }
}

fn run(command: Command, config: &StudioConfig) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Crop {
            source,
            crop,
            target,
        } => {
            let raster = imaging::load(&ImageSource::parse(&source))?;
            let viewport = crop.viewport(config)?;
            let cropped = imaging::crop_to_output(
                &raster,
                &viewport,
                config.output.width,
                config.output.height,
            )?;
            let encoded = imaging::encode(&cropped, config.quality())?;
            if let Some(path) = deliver(&encoded, &target)? {
                output::print_crop(&source, &viewport, &encoded, &path);
            }
        }
        Command::Compose {
            base,
            compose,
            target,
        } => {
            let raster = imaging::load(&ImageSource::parse(&base))?;
            let (session, overlay_name) = build_session(raster, &compose, config)?;
            let encoded = session.export_single(config.quality())?;
            if let Some(path) = deliver(&encoded, &target)? {
                let overlay = overlay_summary(&session, overlay_name.as_deref());
                output::print_compose(&base, session.brightness(), overlay, &encoded, &path);
            }
        }
        Command::Sheet { photo, target } => {
            let raster = imaging::load(&ImageSource::parse(&photo))?;
            let spec = config.sheet.to_sheet_spec();
            let layout = imaging::sheet_layout(&spec)?;
            let sheet = imaging::tile(&raster, &spec)?;
            let encoded = imaging::encode(&sheet, config.quality())?;
            if let Some(path) = deliver(&encoded, &target)? {
                output::print_sheet(&layout, &encoded, &path);
            }
        }
        Command::Export {
            source,
            out_dir,
            no_sheet,
            crop,
            compose,
        } => {
            let raster = imaging::load(&ImageSource::parse(&source))?;
            let viewport = crop.viewport(config)?;
            let base = imaging::crop_to_output(
                &raster,
                &viewport,
                config.output.width,
                config.output.height,
            )?;
            let (session, _) = build_session(base, &compose, config)?;

            std::fs::create_dir_all(&out_dir)?;
            let single = session.export_single(config.quality())?;
            let single_path = out_dir.join(SINGLE_FILE_NAME);
            write_file(&single, &single_path)?;

            if no_sheet {
                output::print_export((&single, &single_path), None);
            } else {
                let spec = config.sheet.to_sheet_spec();
                let layout = imaging::sheet_layout(&spec)?;
                let sheet = session.export_sheet(&spec, config.quality())?;
                let sheet_path = out_dir.join(sheet_file_name(spec.copies()));
                write_file(&sheet, &sheet_path)?;
                let sheet = Some((&layout, &sheet, sheet_path.as_path()));
                output::print_export((&single, &single_path), sheet);
            }
        }
        Command::Overlays { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&config.overlays)?);
            } else {
                output::print_overlays(&config.overlays);
            }
        }
        Command::GenConfig => print!("{}", config::stock_config_toml()),
    }

    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Start an edit session from `base` with the compose flags applied.
///
/// Returns the session and the display name of the overlay, if any.
fn build_session(
    base: Raster,
    args: &ComposeArgs,
    config: &StudioConfig,
) -> Result<(EditSession, Option<String>), Box<dyn std::error::Error>> {
    let session = EditSession::new(base).with_brightness(Brightness::new(args.brightness));
    let Some(reference) = args.overlay.as_deref() else {
        return Ok((session, None));
    };

    let (name, src) = match config.find_overlay(reference) {
        Some(entry) => (entry.name.clone(), entry.src.as_str()),
        None => (reference.to_string(), reference),
    };
    info!(overlay = %name, src, "Loading overlay");
    let overlay = imaging::load(&ImageSource::parse(src))?;
    let placement = OverlayPlacement::new(args.scale, args.x, args.y);
    Ok((session.with_overlay(overlay, placement), Some(name)))
}

fn overlay_summary<'a>(
    session: &'a EditSession,
    name: Option<&'a str>,
) -> Option<(&'a str, &'a OverlayPlacement)> {
    match (name, session.overlay()) {
        (Some(name), Some(chosen)) => Some((name, &chosen.placement)),
        _ => None,
    }
}

/// Write the artifact, or print it as a data URL.
///
/// Returns the path written, or `None` when the data URL went to stdout.
fn deliver(
    image: &EncodedImage,
    target: &TargetArgs,
) -> Result<Option<PathBuf>, Box<dyn std::error::Error>> {
    if target.data_url {
        println!("{}", image.to_data_url());
        return Ok(None);
    }
    match &target.output {
        Some(path) => {
            write_file(image, path)?;
            Ok(Some(path.clone()))
        }
        None => Err("either --output or --data-url is required".into()),
    }
}

fn write_file(image: &EncodedImage, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, &image.bytes)?;
    info!(path = %path.display(), bytes = image.bytes.len(), "Wrote JPEG");
    Ok(())
}
