use anyhow::{anyhow, Result};
use asteroids_core::{AsteroidsGame, GameConfig};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::controllers::create_controller;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeMetrics {
    pub controller_id: String,
    pub seed: u64,
    pub max_ticks: u64,
    pub ticks_run: u64,
    pub missiles_fired: u64,
    pub asteroids_destroyed: u64,
    pub asteroids_split: u64,
    pub ship_deaths: u64,
    pub faults: u64,
    pub final_asteroids: usize,
    pub final_missiles: usize,
}

/// Run one headless episode: build the game with `seed`, bind the named
/// controller, and tick to the limit, folding the per-tick events into
/// metrics. `config.max_ticks`, when set, caps the episode further.
pub fn run_episode(
    controller_id: &str,
    base_config: &GameConfig,
    seed: u64,
    max_ticks: u64,
) -> Result<EpisodeMetrics> {
    if max_ticks == 0 {
        return Err(anyhow!("max_ticks must be > 0"));
    }

    let controller = create_controller(controller_id, seed)
        .ok_or_else(|| anyhow!("unknown controller '{controller_id}'"))?;

    let mut config = base_config.clone();
    config.rng_seed = seed;
    let limit = config.max_ticks.map_or(max_ticks, |cap| cap.min(max_ticks));

    let mut game = AsteroidsGame::new(config, controller)?;
    let mut metrics = EpisodeMetrics {
        controller_id: controller_id.to_string(),
        seed,
        max_ticks: limit,
        ticks_run: 0,
        missiles_fired: 0,
        asteroids_destroyed: 0,
        asteroids_split: 0,
        ship_deaths: 0,
        faults: 0,
        final_asteroids: 0,
        final_missiles: 0,
    };

    for _ in 0..limit {
        let events = game.tick();
        metrics.ticks_run += 1;
        metrics.missiles_fired += u64::from(events.missile_fired);
        metrics.asteroids_destroyed += u64::from(events.asteroids_destroyed);
        metrics.asteroids_split += u64::from(events.asteroids_split);
        metrics.ship_deaths += u64::from(events.ship_destroyed);
        metrics.faults += u64::from(events.faults);
    }

    metrics.final_asteroids = game.asteroids().len();
    metrics.final_missiles = game.missiles().len();

    debug!(
        "episode done: controller={} seed={seed:#x} ticks={} destroyed={} faults={}",
        metrics.controller_id, metrics.ticks_run, metrics.asteroids_destroyed, metrics.faults
    );

    Ok(metrics)
}
