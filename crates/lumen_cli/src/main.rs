mod cli;
mod scene;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Args;
use log::LevelFilter;
use lumen_renderer::{render, RenderConfig};
use scene::{demo_config, demo_scene, SceneDesc};
use std::io::{self, BufWriter};
use std::time::Instant;

/// Seed for the demo scene layout when no render seed is given
const DEMO_LAYOUT_SEED: u64 = 0x5EED;

fn load_config(args: &Args) -> Result<RenderConfig> {
    let base = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None if args.scene.is_none() => demo_config(),
        None => RenderConfig::default(),
    };
    Ok(args.apply_overrides(base))
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::from(args.log_level))
        .init();

    let config = load_config(&args)?;

    let start = Instant::now();
    let world = match &args.scene {
        Some(path) => SceneDesc::load(path)
            .and_then(|desc| desc.build())
            .with_context(|| format!("loading scene {}", path.display()))?,
        None => demo_scene(config.seed.unwrap_or(DEMO_LAYOUT_SEED)),
    };
    log::info!("Scene with {} objects built in {:?}", world.len(), start.elapsed());

    let start = Instant::now();
    let frame = render(&config, &world).context("rendering")?;
    log::info!("Rendered in {:?}", start.elapsed());

    if args.output == "-" {
        let stdout = io::stdout();
        let mut writer = BufWriter::new(stdout.lock());
        frame.write_ppm(&mut writer).context("writing image to stdout")?;
    } else {
        frame
            .save(&args.output)
            .with_context(|| format!("saving {}", args.output))?;
    }

    Ok(())
}
