use env_logger::Env;
use phong_scene::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("wgpu_hal", log::LevelFilter::Warn)
        .filter_module("wgpu_core", log::LevelFilter::Warn)
        .init();

    let config = AppConfig::from_env();
    log::info!("Loading textures from {}", config.asset_dir.display());
    run(config)
}
