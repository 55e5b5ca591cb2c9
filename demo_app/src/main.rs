//! Fleet demo application
//!
//! Builds a carrier object with escort objects and a spinning turret, runs a
//! handful of frames, then destroys one escort wing and shows the deferred
//! reclamation at the end of the frame.
//!
//! Usage: `fleet_demo [config.toml|config.ron]`

use scene_core::foundation::logging;
use scene_core::foundation::math::format_vec2;
use scene_core::prelude::*;
use thiserror::Error;

const FRAMES: u64 = 5;

/// Demo-level errors
#[derive(Error, Debug)]
enum DemoError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}

/// Turret behaviour: accumulates how far it should turn each frame
#[derive(Debug, Default)]
struct Spinner {
    degrees_per_frame: f32,
    pending_turn: f32,
}

impl Component for Spinner {
    fn update(&mut self) {
        self.pending_turn += self.degrees_per_frame;
    }
}

struct Fleet {
    carrier: ObjectId,
    turret: ComponentId,
    escorts: Vec<ObjectId>,
}

fn build_fleet(scene: &mut Scene) -> Result<Fleet, DemoError> {
    let carrier = scene.spawn_object_with_root();
    scene.set_object_local_position(carrier, Vec2::new(0.0, 0.0))?;

    let carrier_root = scene.root(carrier)?.ok_or(SceneError::MissingRoot(carrier))?;
    let turret = scene.construct_scene_component(carrier, Spinner { degrees_per_frame: 15.0, ..Default::default() })?;
    scene.attach_component(turret, carrier_root)?;
    scene.set_local_position(turret, Vec2::new(0.0, 3.0))?;

    let mut escorts = Vec::new();
    for (index, offset) in [-8.0_f32, 8.0].into_iter().enumerate() {
        let escort = scene.spawn_object_with_root();
        scene.attach_object(escort, carrier)?;
        scene.set_object_local_position(escort, Vec2::new(offset, -4.0))?;

        let wingman = scene.spawn_object_with_root();
        scene.attach_object(wingman, escort)?;
        scene.set_object_local_position(wingman, Vec2::new(offset * 0.5, -2.0))?;

        log::info!("Escort {} spawned with one wingman", index);
        escorts.push(escort);
    }

    Ok(Fleet { carrier, turret, escorts })
}

fn apply_turret_spin(scene: &mut Scene, turret: ComponentId) -> Result<(), DemoError> {
    let turn = scene
        .component_mut::<Spinner>(turret)
        .map_or(0.0, |spinner| std::mem::take(&mut spinner.pending_turn));
    scene.add_rotation(turret, turn)?;
    Ok(())
}

fn run(config: &RuntimeConfig) -> Result<(), DemoError> {
    let mut world = World::with_config(config);
    let fleet = build_fleet(world.scene_mut())?;

    for frame in 0..FRAMES {
        world.scene_mut().add_object_position(fleet.carrier, Vec2::new(1.0, 0.5))?;
        let updated = world.update();
        apply_turret_spin(world.scene_mut(), fleet.turret)?;

        let scene = world.scene();
        let turret_facing = rotate_vector(scene.world_rotation(fleet.turret)?, &Vec2::new(0.0, 1.0));
        log::info!(
            "Frame {}: {} object(s) updated, turret at {} facing {}",
            frame,
            updated,
            format_vec2(&scene.world_position(fleet.turret)?),
            format_vec2(&turret_facing),
        );

        if frame == 2 {
            let queued = world.destroy_object(fleet.escorts[0])?;
            log::info!("Destroyed escort wing, {} object(s) queued", queued);
        }

        let reclaimed = world.end_frame();
        if reclaimed > 0 {
            log::info!("Reclaimed {} object(s) at end of frame {}", reclaimed, frame);
        }
    }

    let scene = world.scene();
    log::info!(
        "Finished after {} frame(s): {} object(s), {} component(s), surviving escort at {}",
        world.frame_count(),
        scene.object_count(),
        scene.component_count(),
        format_vec2(&scene.object_world_position(fleet.escorts[1])?),
    );
    Ok(())
}

fn load_config() -> Result<RuntimeConfig, DemoError> {
    Ok(match std::env::args().nth(1) {
        Some(path) => RuntimeConfig::load_from_file(&path)?,
        None => RuntimeConfig::default(),
    })
}

fn main() {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Fleet demo failed: {}", e);
            std::process::exit(1);
        }
    };

    logging::init_with_filter(&config.log_filter);
    log::info!("Starting fleet demo");

    if let Err(e) = run(&config) {
        log::error!("Fleet demo failed: {}", e);
        std::process::exit(1);
    }
}
