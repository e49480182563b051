use clap::{Parser, Subcommand};
use img2docx::compose::{self, ComposeError};
use img2docx::config::{self, ComposeConfig};
use img2docx::imaging::{FitMode, RustBackend};
use img2docx::types::{ProgressSink, ProgressState};
use img2docx::{output, scan};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Flags that override config values for a single run.
#[derive(clap::Args, Clone)]
struct Overrides {
    /// Only bind files with this extension (case-insensitive)
    #[arg(long)]
    extension: Option<String>,

    /// Name of the document written into the folder
    #[arg(long)]
    output_name: Option<String>,

    /// Shrink images until both sides fit the page
    #[arg(long)]
    contain: bool,

    /// Fail instead of replacing an existing document
    #[arg(long)]
    no_overwrite: bool,
}

#[derive(Parser)]
#[command(name = "img2docx")]
#[command(about = "Bind a folder of images into one Word document")]
#[command(long_about = "\
Bind a folder of images into one Word document

Every matching image in the folder (not its subfolders) becomes one picture
in the document, scaled to fit an 8 x 10.5 inch area and ordered by the
EXIF capture time. Images without a capture time come first, in directory
order.

The document is written as png_image_document.docx inside the folder,
replacing any previous one.

Run 'img2docx gen-config' to print a documented img2docx.toml.")]
#[command(version)]
struct Cli {
    /// Config file (default: img2docx.toml in the image folder)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// No progress bar
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the document from a folder of images
    Convert {
        /// Folder containing the images
        dir: PathBuf,
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Show the page order without writing anything
    Scan {
        /// Folder containing the images
        dir: PathBuf,
        /// Print the ordered entries as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Print a stock img2docx.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Convert { dir, overrides } => {
            let config = resolve_config(&dir, cli.config.as_deref(), &overrides)?;
            let backend = RustBackend::new();
            let mut bar = BarProgress::new(cli.quiet);
            let result = compose::convert_directory(&dir, &config, &backend, &mut bar);
            bar.finish();
            match result {
                Ok(report) => output::print_conversion_report(&report),
                Err(e) => return Err(failure_message(&e).into()),
            }
        }
        Command::Scan {
            dir,
            json,
            overrides,
        } => {
            let config = resolve_config(&dir, cli.config.as_deref(), &overrides)?;
            let entries = scan::scan(&dir, &config.input.extension, &RustBackend::new())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                output::print_scan_output(&entries);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Stock defaults ← config file ← CLI flags.
fn resolve_config(
    dir: &Path,
    explicit: Option<&Path>,
    overrides: &Overrides,
) -> Result<ComposeConfig, config::ConfigError> {
    let mut config = match explicit {
        Some(file) => {
            if !file.is_file() {
                return Err(config::ConfigError::Validation(format!(
                    "config file not found: {}",
                    file.display()
                )));
            }
            config::load_config_file(file)?
        }
        None => config::load_config(dir)?,
    };

    if let Some(ext) = &overrides.extension {
        config.input.extension = ext.trim_start_matches('.').to_string();
    }
    if let Some(name) = &overrides.output_name {
        config.output.filename = name.clone();
    }
    if overrides.contain {
        config.page.fit = FitMode::Contain;
    }
    if overrides.no_overwrite {
        config.output.overwrite = false;
    }
    config.validate()?;
    Ok(config)
}

fn failure_message(err: &ComposeError) -> String {
    match err {
        ComposeError::Image { path, .. } => {
            format!("{err}\nNo document was written; fix or remove {} and retry.", path.display())
        }
        _ => err.to_string(),
    }
}

/// Progress sink drawing a percent bar on stderr.
struct BarProgress {
    bar: ProgressBar,
    state: ProgressState,
}

impl BarProgress {
    fn new(quiet: bool) -> Self {
        let bar = ProgressBar::new(100);
        if quiet {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        bar.set_style(
            ProgressStyle::with_template("{prefix:.bold}  [{bar:40.green/238}] {pos:>3}%")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▉▊▋▌▍▎▏  "),
        );
        bar.set_prefix("Binding");
        Self {
            bar,
            state: ProgressState::new(),
        }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressSink for BarProgress {
    fn report(&mut self, percent: f64) {
        self.state.report(percent);
        self.bar.set_position(self.state.value().round() as u64);
    }
}
