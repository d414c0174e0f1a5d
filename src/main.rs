//! ASCII Torus - a rotating, shaded torus rendered in the terminal
//!
//! Controls:
//! - Space: Pause/resume the rotation
//! - Q, Escape or Ctrl-C: Quit
//!
//! Usage:
//!   ascii_torus                       - Run interactive mode
//!   ascii_torus dump --frames 10      - Render frames to ./debug/frame_XXX.txt files

use anyhow::Context;
use ascii_torus::{app, config, App, AppConfig, TerminalDisplay};
use clap::{Parser, Subcommand, ValueEnum};
use log::{error, info};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Parser)]
#[command(name = "ascii_torus")]
#[command(version)]
#[command(about = "Rotating shaded torus rendered as ASCII art")]
struct Cli {
    /// Optional YAML file overriding the built-in render constants
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Set logging level (trace, debug, info, warn, error)
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Rotation rate around X in rad/s
    #[arg(long, global = true)]
    spin_x: Option<f32>,

    /// Rotation rate around Y in rad/s
    #[arg(long, global = true)]
    spin_y: Option<f32>,

    /// Delay between frames in milliseconds
    #[arg(long, global = true)]
    frame_delay_ms: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Animate the torus in the terminal (default)
    Run,

    /// Render frames to text files without touching the terminal
    Dump {
        /// Number of frames to render
        #[arg(short, long, default_value_t = 10)]
        frames: u32,
        /// Output directory
        #[arg(short, long, default_value = "debug")]
        out: PathBuf,
        /// Virtual terminal width
        #[arg(long, default_value_t = 120)]
        cols: u16,
        /// Virtual terminal height
        #[arg(long, default_value_t = 40)]
        rows: u16,
        /// Simulated seconds between frames
        #[arg(long, default_value_t = 0.05)]
        step: f32,
    },
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let default_level = cli
        .log_level
        .map(|l| l.to_string())
        .unwrap_or_else(|| "warn".to_string());

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));
    if let Some(level) = cli.log_level {
        builder.parse_filters(&level.to_string());
    }
    if let Some(path) = &cli.log_file {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.format_timestamp_micros().init();
    Ok(())
}

fn build_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => config::load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AppConfig::default(),
    };

    if let Some(spin_x) = cli.spin_x {
        config.animation.spin_x = spin_x;
    }
    if let Some(spin_y) = cli.spin_y {
        config.animation.spin_y = spin_y;
    }
    if let Some(delay) = cli.frame_delay_ms {
        config.animation.frame_delay_ms = delay;
    }
    Ok(config)
}

fn run_interactive(config: AppConfig) -> anyhow::Result<()> {
    let mut app = App::new(config).context("Invalid configuration")?;
    let mut terminal = TerminalDisplay::new().context("Failed to initialize terminal")?;
    let result = app.run(&mut terminal);
    // Restore the terminal before anything is printed
    drop(terminal);
    result.context("Render loop failed")?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = build_config(&cli)?;
    info!("configuration: {:?}", config);

    let result = match &cli.command {
        None | Some(Commands::Run) => run_interactive(config),
        Some(Commands::Dump {
            frames,
            out,
            cols,
            rows,
            step,
        }) => app::dump_frames(
            config,
            *cols,
            *rows,
            *frames,
            Duration::from_secs_f32(step.max(0.0)),
            out,
        )
        .map(|written| println!("Wrote {} frames to {}", written.len(), out.display()))
        .context("Failed to dump frames"),
    };

    if let Err(e) = &result {
        error!("{:#}", e);
    }
    result
}
