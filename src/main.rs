use glam::Vec2;
use log::{error, info};
use swingset::{Assembly, Config, Scene};

const SWING_JSON: &str = include_str!("../config/swing.json");
const STICKMAN_JSON: &str = include_str!("../config/stickman.json");

const SWING_ANCHOR: Vec2 = Vec2::new(400.0, 50.0);
const STICKMAN_FOOT: Vec2 = Vec2::new(100.0, 500.0);
const SECONDS: u64 = 5;

fn embedded_config() -> swingset::Result<Config> {
    Ok(Config {
        swing: serde_json::from_str(SWING_JSON)?,
        stickman: serde_json::from_str(STICKMAN_JSON)?,
        scene: Default::default(),
    })
}

fn run() -> swingset::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(dir) => {
            info!("loading configuration from {dir}");
            Config::load_dir(dir)?
        }
        None => embedded_config()?,
    };

    let mut scene = Scene::new(config.scene);
    let swing = scene.add_swing(&config.swing, SWING_ANCHOR)?;
    let stickman = scene.add_stickman(&config.stickman, STICKMAN_FOOT)?;

    let fps = u64::from(config.scene.fps.max(1));
    for frame in 0..SECONDS * fps {
        scene.tick()?;
        if frame % fps != fps - 1 {
            continue;
        }
        if let (Some(swing), Some(stickman)) = (scene.swing(swing), scene.stickman(stickman)) {
            info!(
                "t={}s seat={} head={} ({} segments)",
                (frame + 1) / fps,
                swing.seat().position(scene.world())?,
                stickman.head().position(scene.world())?,
                swing.segment_count() + stickman.segment_count()
            );
        }
    }

    let world = scene.into_world();
    info!("done, {} bodies left", swingset::SimulationWorld::body_count(&world));
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        error!("{err}");
        std::process::exit(1);
    }
}
