use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use levelgen::{Algorithm, GenerationConfig, GridMap, Pos, compute_visibility, generate};
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Ascii,
    Json,
}

#[derive(Parser)]
#[command(author, version, about = "Generate a tile level and print it", long_about = None)]
struct Args {
    /// TOML generation config; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Layout algorithm: rooms, bsp, cellular or city
    #[arg(short, long)]
    algorithm: Option<Algorithm>,
    #[arg(short, long)]
    seed: Option<u64>,
    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Ascii)]
    format: OutputFormat,
    /// Compute field of view from the spawn point with this radius
    #[arg(long)]
    fov: Option<u32>,
}

impl Args {
    fn apply_overrides(&self, config: &mut GenerationConfig) {
        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => GenerationConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => GenerationConfig::default(),
    };
    args.apply_overrides(&mut config);

    let mut map = generate(&config).context("Level generation rejected the config")?;
    if let Some(radius) = args.fov {
        let spawn = map.spawn;
        compute_visibility(&mut map, spawn, radius);
    }

    let output = match args.format {
        OutputFormat::Ascii if args.fov.is_some() => render_visible(&map),
        OutputFormat::Ascii => map.render_ascii(),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&map).context("Failed to serialize level")?
        }
    };
    print!("{output}");
    info!(seed = map.seed, fingerprint = map.fingerprint(), "done");
    Ok(())
}

/// ASCII dump limited to the cells currently in view.
fn render_visible(map: &GridMap) -> String {
    let mut text = String::with_capacity((map.width + 1) * map.height);
    for y in 0..map.height {
        for x in 0..map.width {
            let pos = Pos { y: y as i32, x: x as i32 };
            let glyph = if pos == map.spawn {
                '@'
            } else if map.is_visible(pos) {
                map.tile_at(pos).glyph()
            } else {
                ' '
            };
            text.push(glyph);
        }
        text.push('\n');
    }
    text
}
