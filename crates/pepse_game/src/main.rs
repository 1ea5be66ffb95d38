//! Pepse world driver -- headless walk through the generated world.
//!
//! Usage: `pepse_game [world_config.json] [walkthrough.json]`
//!
//! Loads the world configuration (defaults when omitted), picks the seed from
//! the config or at random, then replays a scripted walk through a
//! fixed-timestep clock. Each tick steps the avatar, resolves fruit pickup,
//! counts fruit respawn timers down and lets the window manager shift the
//! world. A summary of the run is logged at the end; `RUST_LOG=debug` shows
//! every shift.

mod avatar;
mod walkthrough;

use std::path::Path;

use glam::Vec2;
use pepse_core::energy::EnergyConfig;
use pepse_core::input::InputState;
use pepse_core::time::TickClock;
use pepse_core::{
    load_world_config_from_path, Entity, EntityTag, Layer, SceneRegistry, SceneSink, Shift,
    WorldConfig, WorldWindowManager,
};

use avatar::Avatar;
use walkthrough::{load_walkthrough_from_path, Walkthrough};

#[derive(Debug, Clone, Copy, PartialEq)]
struct RunSummary {
    seed: i64,
    ticks: u64,
    right_shifts: u32,
    left_shifts: u32,
    jumps: u32,
    fruit_eaten: u32,
    fruit_respawned: u32,
    final_x: f32,
    final_energy: f32,
    left_edge: f32,
    right_edge: f32,
    live_entities: usize,
}

fn run(config: &WorldConfig, seed: i64, walk: &Walkthrough) -> RunSummary {
    let mut manager = WorldWindowManager::new(config, seed);
    let mut scene = SceneRegistry::new();

    // Scenery lives outside the chunk tags and is never evicted.
    let sky_id = manager.next_entity_id();
    scene.add(
        Entity::new(
            sky_id,
            EntityTag::Sky,
            Vec2::ZERO,
            Vec2::new(config.window_width, config.window_height),
        ),
        Layer::Background,
    );
    manager.init(&mut scene);

    let mut avatar = Avatar::spawn(config, manager.terrain(), EnergyConfig::default());
    let mut clock = TickClock::new(walk.frame_dt);
    let mut input = InputState::new();
    let mut summary = RunSummary {
        seed,
        ticks: 0,
        right_shifts: 0,
        left_shifts: 0,
        jumps: 0,
        fruit_eaten: 0,
        fruit_respawned: 0,
        final_x: 0.0,
        final_energy: 0.0,
        left_edge: 0.0,
        right_edge: 0.0,
        live_entities: 0,
    };

    for keys in walk.expanded_keys() {
        clock.begin_frame(walk.frame_dt);
        while clock.should_tick() {
            input.set_held(&keys);
            let outcome = avatar.step(&input, clock.fixed_dt, manager.terrain());
            if outcome.jumped {
                summary.jumps += 1;
            }

            if let Some(id) = scene.eat_fruit_at(avatar.center(), config.cycle_length) {
                avatar.energy.gain(config.fruit_energy);
                summary.fruit_eaten += 1;
                log::debug!(
                    "Ate fruit {:?}, energy now {:.1}",
                    id,
                    avatar.energy.current()
                );
            }
            summary.fruit_respawned += scene.advance_fruit(clock.fixed_dt) as u32;

            match manager.tick(&avatar, &mut scene) {
                Some(Shift::Right) => summary.right_shifts += 1,
                Some(Shift::Left) => summary.left_shifts += 1,
                None => {}
            }
        }
    }

    summary.ticks = clock.tick_count;
    summary.final_x = avatar.top_left.x;
    summary.final_energy = avatar.energy.current();
    summary.left_edge = manager.window().left_edge();
    summary.right_edge = manager.window().right_edge();
    summary.live_entities = scene.len();
    summary
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 3 {
        return Err(format!(
            "Usage: {} [world_config.json] [walkthrough.json]",
            args.first().map(String::as_str).unwrap_or("pepse_game")
        ));
    }

    let config = match args.get(1) {
        Some(path) => load_world_config_from_path(Path::new(path))?,
        None => WorldConfig::default(),
    };
    let walk = match args.get(2) {
        Some(path) => load_walkthrough_from_path(Path::new(path))?,
        None => Walkthrough::default_tour(),
    };
    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!(
        "Pepse world starting: seed {}, viewport {}x{}, cell {}",
        seed,
        config.window_width,
        config.window_height,
        config.cell_size
    );

    let summary = run(&config, seed, &walk);
    log::info!(
        "Walk finished after {} ticks: {} right / {} left shifts, window [{}, {}], {} live entities",
        summary.ticks,
        summary.right_shifts,
        summary.left_shifts,
        summary.left_edge,
        summary.right_edge,
        summary.live_entities
    );
    log::info!(
        "Avatar at x={:.1} with {:.1} energy; {} jumps, {} fruit eaten, {} regrown",
        summary.final_x,
        summary.final_energy,
        summary.jumps,
        summary.fruit_eaten,
        summary.fruit_respawned
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tour_shifts_both_ways() {
        let summary = run(&WorldConfig::default(), 42, &Walkthrough::default_tour());
        assert!(summary.right_shifts > 0, "{summary:?}");
        assert!(summary.left_shifts > 0, "{summary:?}");
        assert!(summary.jumps > 0, "{summary:?}");
        assert!(summary.final_x < 0.0, "tour ends left of the spawn point");
        assert_eq!(summary.right_edge - summary.left_edge, 1280.0 + 2.0 * 640.0);
        assert!(summary.left_edge <= summary.final_x && summary.final_x <= summary.right_edge);
    }

    #[test]
    fn same_seed_same_run() {
        let walk = Walkthrough::default_tour();
        let a = run(&WorldConfig::default(), 7, &walk);
        let b = run(&WorldConfig::default(), 7, &walk);
        assert_eq!(a, b);
    }

    #[test]
    fn standing_still_never_shifts() {
        let walk = Walkthrough {
            frame_dt: 1.0 / 60.0,
            frames: vec![walkthrough::WalkFrame {
                move_x: 0.0,
                jump: false,
                repeat: 120,
            }],
        };
        let summary = run(&WorldConfig::default(), 3, &walk);
        assert_eq!(summary.ticks, 120);
        assert_eq!(summary.right_shifts + summary.left_shifts, 0);
        assert_eq!(summary.final_energy, 100.0);
        assert_eq!(summary.left_edge, -640.0);
    }
}
