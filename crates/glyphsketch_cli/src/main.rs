//! glyphsketch CLI
//!
//! Render generative letterforms to PNG, record them as GIF, or dump the
//! letter layout as JSON.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use glyphsketch_app::{parse_seed, write_gif, write_png, Alignment, Config, Session};

#[derive(Parser)]
#[command(name = "glyphsketch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generative typography renderer", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./glyphsketch.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one frame to a PNG
    Render {
        #[command(flatten)]
        sketch: SketchArgs,

        /// Output path
        #[arg(short, long, default_value = "sketch.png")]
        output: PathBuf,
    },

    /// Record redraws with auto-refresh on into a looping GIF
    Animate {
        #[command(flatten)]
        sketch: SketchArgs,

        /// Output path
        #[arg(short, long, default_value = "sketch.gif")]
        output: PathBuf,

        /// Frames to tick (defaults to the config's export.frames)
        #[arg(short, long)]
        frames: Option<u64>,
    },

    /// Print the letter layout as JSON
    Layout {
        #[command(flatten)]
        sketch: SketchArgs,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
}

/// Overrides applied on top of the config file
#[derive(Args)]
struct SketchArgs {
    /// Text to draw; use "\n" for line breaks
    #[arg(short, long)]
    text: Option<String>,

    /// Random seed; anything that is not a number uses 12345
    #[arg(short, long)]
    seed: Option<String>,

    /// Letter color as hex
    #[arg(long)]
    color: Option<String>,

    /// Font size in pixels
    #[arg(long)]
    font_size: Option<f32>,

    /// Line alignment (left, center, right)
    #[arg(long)]
    align: Option<String>,

    /// Assign each letter a random font from the config's font list
    #[arg(long)]
    random_fonts: bool,

    /// Use the dense diagonal texture for style 3
    #[arg(long)]
    dense_diagonal: bool,

    /// Background image (repeatable); replaces the config's list
    #[arg(short, long = "background")]
    backgrounds: Vec<String>,
}

impl SketchArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(text) = &self.text {
            config.render.text = text.replace("\\n", "\n");
        }
        if let Some(seed) = &self.seed {
            config.render.seed = parse_seed(seed);
        }
        if let Some(color) = &self.color {
            config.render.color = color.clone();
        }
        if let Some(size) = self.font_size {
            config.layout.font_size = size;
        }
        if let Some(align) = &self.align {
            config.layout.alignment = Alignment::parse_lenient(align);
        }
        if self.random_fonts {
            config.render.random_fonts = true;
        }
        if self.dense_diagonal {
            config.styles.dense_diagonal_for_style3 = true;
        }
        if !self.backgrounds.is_empty() {
            config.backgrounds.paths = self.backgrounds.clone();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Render { sketch, output } => cmd_render(config, &sketch, &output),
        Commands::Animate {
            sketch,
            output,
            frames,
        } => cmd_animate(config, &sketch, &output, frames),
        Commands::Layout { sketch, pretty } => cmd_layout(config, &sketch, pretty),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => {
            let cwd = std::env::current_dir()?;
            Config::load_from_dir(&cwd).context("Failed to load glyphsketch.toml")
        }
    }
}

fn open_session(mut config: Config, sketch: &SketchArgs) -> Result<Session> {
    sketch.apply(&mut config);
    let mut session = Session::from_config(&config).context("Failed to start session")?;
    session.wait_for_backgrounds();
    Ok(session)
}

fn cmd_render(config: Config, sketch: &SketchArgs, output: &Path) -> Result<()> {
    let mut session = open_session(config, sketch)?;
    session
        .tick()
        .context("Nothing was drawn on the first frame")?;

    write_png(&session.snapshot(), output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("{}", session.status());
    Ok(())
}

fn cmd_animate(
    config: Config,
    sketch: &SketchArgs,
    output: &Path,
    frames: Option<u64>,
) -> Result<()> {
    let total = frames.unwrap_or(config.export.frames);
    let delay = config
        .export
        .frame_delay_ms(config.render.refresh_interval);

    let mut session = open_session(config, sketch)?;
    session.set_auto_refresh(true);

    info!("Recording {} frames", total);
    let mut recorded = Vec::new();
    for _ in 0..total {
        if let Some(frame) = session.tick() {
            tracing::debug!("Captured frame {}", frame);
            recorded.push(session.snapshot());
        }
    }

    write_gif(&recorded, output, delay)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("{}", session.status());
    Ok(())
}

fn cmd_layout(config: Config, sketch: &SketchArgs, pretty: bool) -> Result<()> {
    let mut session = open_session(config, sketch)?;
    session.tick();

    let json = if pretty {
        serde_json::to_string_pretty(session.descriptors())?
    } else {
        serde_json::to_string(session.descriptors())?
    };
    println!("{}", json);
    info!("{}", session.status().replace('\n', " / "));
    Ok(())
}
