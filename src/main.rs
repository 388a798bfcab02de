use orbitsim::{Preset, Scene, SceneConfig};
use orbitsim::run_2d;

use anyhow::{Context, Result};
use bevy::app::AppExit;
use clap::Parser;

use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(about = "Interactive earth/moon/spaceship gravity sandbox")]
struct Args {
    /// Scene file; looked up under `scenarios/` when not found as given
    #[arg(short, long, conflicts_with = "preset")]
    file: Option<PathBuf>,

    /// Built-in scene
    #[arg(short, long, value_enum, default_value = "telemetry")]
    preset: Preset,

    /// Viewport width in pixels, used to lay out presets
    #[arg(long, default_value_t = 1920.0)]
    width: f64,

    /// Viewport height in pixels, used to lay out presets
    #[arg(long, default_value_t = 1080.0)]
    height: f64,

    /// Override the force applied per arrow-key press
    #[arg(long)]
    thrust: Option<f64>,
}

// load here to keep main clean
fn load_scene_config(args: &Args) -> Result<SceneConfig> {
    let Some(file) = &args.file else {
        return Ok(SceneConfig::preset(args.preset, args.width, args.height));
    };

    let path = if file.exists() {
        file.clone()
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file)
    };
    SceneConfig::from_yaml_file(&path).with_context(|| format!("failed to load scene {}", path.display()))
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let mut scene_cfg = load_scene_config(&args)?;
    if let Some(thrust) = args.thrust {
        scene_cfg.parameters.thrust_magnitude = thrust;
    }

    let scene = Scene::build(scene_cfg).context("invalid scene")?;

    Ok(match run_2d(scene) {
        AppExit::Success => ExitCode::SUCCESS,
        AppExit::Error(code) => ExitCode::from(code.get()),
    })
}
