use anyhow::Result;
use multimesh::{editor::scene_path_from_args, AppConfig, MultiMeshApp};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::default();
    let scene_file = scene_path_from_args(std::env::args().skip(1), config.scene_file.clone());
    log::info!("scene file: {}", scene_file.display());

    MultiMeshApp::with_config(config.with_scene_file(scene_file))?.run()
}
