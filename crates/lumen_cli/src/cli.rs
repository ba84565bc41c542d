use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lumen_renderer::RenderConfig;
use std::path::PathBuf;

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Render a scene of spheres with a multithreaded path tracer
#[derive(Debug, Parser)]
#[command(name = "lumen")]
#[command(about = "A recursive Monte Carlo path tracer")]
pub struct Args {
    /// JSON render configuration (camera, image size, quality)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// JSON scene description; the built-in demo scene is used when omitted
    #[arg(short, long)]
    pub scene: Option<PathBuf>,

    /// Output file (.ppm for text, .png and friends via the image crate), or - for stdout
    #[arg(short, long, default_value = "-")]
    pub output: String,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Number of samples per pixel
    #[arg(long, short = 'n')]
    pub samples: Option<u32>,

    /// Maximum bounce depth
    #[arg(long)]
    pub depth: Option<u32>,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Worker thread count (defaults to one per hardware thread)
    #[arg(long, short = 'j')]
    pub threads: Option<usize>,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Apply command line overrides on top of a base configuration.
    pub fn apply_overrides(&self, mut config: RenderConfig) -> RenderConfig {
        if let Some(width) = self.width {
            config.image_width = width;
        }
        if let Some(samples) = self.samples {
            config.samples_per_pixel = samples;
        }
        if let Some(depth) = self.depth {
            config.max_depth = depth;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.threads.is_some() {
            config.threads = self.threads;
        }
        config
    }
}
