use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use courtyard::{CourtyardGame, SceneConfig, Variant};
use stage2d::Engine;

#[derive(Parser, Debug)]
#[command(name = "courtyard")]
#[command(about = "Top-down movement demo with walls, camera follow and a collectable trophy", long_about = None)]
struct Args {
    /// Feature set to run
    #[arg(long, value_enum, default_value = "trophy")]
    variant: Variant,

    /// Scene config file (JSON); overrides --variant
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the selected scene config to FILE and exit
    #[arg(long, value_name = "FILE")]
    dump_config: Option<PathBuf>,

    /// Directory holding the sprite images
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Window width in logical pixels
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Window height in logical pixels
    #[arg(long, default_value = "720")]
    height: u32,

    /// Present without waiting for vertical sync
    #[arg(long)]
    no_vsync: bool,
}

fn main() -> Result<()> {
    // Keep GPU backends quiet unless RUST_LOG asks for them.
    let default = "info,wgpu_hal=off,wgpu_core=off,wgpu=off,naga=off";
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp_secs()
        .try_init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::preset(args.variant),
    };

    if let Some(path) = &args.dump_config {
        config
            .save(path)
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!("Wrote {:?} config to {}", config.variant, path.display());
        return Ok(());
    }

    let engine = Engine::new()
        .with_title(format!("Courtyard ({:?})", config.variant))
        .with_size(args.width, args.height)
        .with_vsync(!args.no_vsync);
    let game = CourtyardGame::new(config, args.assets)?;
    engine.run(game)
}
