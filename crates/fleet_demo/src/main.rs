//! Fleet demo
//!
//! Spawns a fleet of wandering ships into a large world and runs the
//! collision world headless for a fixed number of frames.
//!
//! Usage: `fleet_demo [config.toml|config.ron]`

mod config;
mod ships;

use std::error::Error;

use collision_engine::debug::CollisionDebugVisualizer;
use collision_engine::foundation::logging;
use collision_engine::foundation::math::Vec2;
use collision_engine::physics::{Collidable, CollisionWorld};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use ships::{Ship, ShipClass};

/// Frames between progress reports
const REPORT_INTERVAL: u32 = 60;

fn main() -> Result<(), Box<dyn Error>> {
    logging::init_with_default_filter("info");

    let config = config::load_or_default(std::env::args().nth(1).as_deref());
    let mut world: CollisionWorld<Ship> = CollisionWorld::new(config.world.clone())?;

    let extent = Vec2::new(config.world.world_width, config.world.world_height);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let fleet = std::iter::repeat(ShipClass::Basic)
        .take(config.basic_ships)
        .chain(std::iter::repeat(ShipClass::Dreadnaught).take(config.dreadnaughts));

    for class in fleet {
        let position = Vec2::new(rng.gen_range(0.0..extent.x), rng.gen_range(0.0..extent.y));
        world.spawn(Ship::new(class, position, extent, rng.gen()));
    }
    log::info!(
        "Spawned {} basic ships and {} dreadnaughts",
        config.basic_ships, config.dreadnaughts
    );

    let mut total_contacts = 0usize;
    for frame in 1..=config.frames {
        let contacts = world.step(config.delta_time).len();
        total_contacts += contacts;
        if frame % REPORT_INTERVAL == 0 {
            log::info!("Frame {}: {} contacts resolved", frame, contacts);
        }
    }

    if log::log_enabled!(log::Level::Debug) {
        for (key, ship) in world.iter().filter(|(_, s)| s.class() == ShipClass::Dreadnaught) {
            log::debug!("{:?} at {:?} heading for {:?}", key, ship.body().position(), ship.goal());
        }
        let mut visualizer = CollisionDebugVisualizer::new();
        visualizer.add_world(&world);
        log::debug!("Final frame produces {} debug lines", visualizer.lines().len());
    }

    let reaped = world.reap_dead().len();
    let dreadnaughts = world
        .iter()
        .filter(|(_, ship)| ship.class() == ShipClass::Dreadnaught)
        .count();
    log::info!(
        "Simulated {} frames: {} contacts total, {} ships remain ({} dreadnaughts), {} reaped",
        config.frames,
        total_contacts,
        world.len(),
        dreadnaughts,
        reaped
    );

    Ok(())
}
