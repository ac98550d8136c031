use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use asteroids_core::GameConfig;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::runner::{run_episode, EpisodeMetrics};

pub struct BenchmarkConfig {
    pub controller_id: String,
    pub seeds: Vec<u64>,
    pub max_ticks: u64,
    pub out_dir: PathBuf,
    /// Parallel jobs; `None` uses every core.
    pub jobs: Option<usize>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub generated_unix_s: u64,
    pub controller_id: String,
    pub max_ticks: u64,
    pub seed_count: usize,
    pub avg_ticks: f64,
    pub avg_asteroids_destroyed: f64,
    pub total_ship_deaths: u64,
    pub total_faults: u64,
    pub runs: Vec<EpisodeMetrics>,
}

/// Independent episodes across the seed list, fanned out with rayon, then
/// aggregated and written to `<out_dir>/summary.json`.
pub fn run_benchmark(config: BenchmarkConfig, game_config: &GameConfig) -> Result<BenchmarkReport> {
    if config.seeds.is_empty() {
        return Err(anyhow!("benchmark requires at least one seed"));
    }

    fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("failed creating {}", config.out_dir.display()))?;

    let run_one = |seed: &u64| -> Result<EpisodeMetrics> {
        run_episode(&config.controller_id, game_config, *seed, config.max_ticks)
            .with_context(|| format!("benchmark run failed for seed={seed:#x}"))
    };

    let results: Vec<Result<EpisodeMetrics>> = if let Some(jobs) = config.jobs {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("failed to build rayon threadpool")?;
        pool.install(|| config.seeds.par_iter().map(run_one).collect())
    } else {
        config.seeds.par_iter().map(run_one).collect()
    };

    let mut runs = Vec::with_capacity(results.len());
    for result in results {
        runs.push(result?);
    }

    let count = runs.len();
    let sum_ticks: u64 = runs.iter().map(|run| run.ticks_run).sum();
    let sum_destroyed: u64 = runs.iter().map(|run| run.asteroids_destroyed).sum();
    let total_ship_deaths: u64 = runs.iter().map(|run| run.ship_deaths).sum();
    let total_faults: u64 = runs.iter().map(|run| run.faults).sum();

    let report = BenchmarkReport {
        generated_unix_s: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0),
        controller_id: config.controller_id.clone(),
        max_ticks: config.max_ticks,
        seed_count: count,
        avg_ticks: sum_ticks as f64 / count as f64,
        avg_asteroids_destroyed: sum_destroyed as f64 / count as f64,
        total_ship_deaths,
        total_faults,
        runs,
    };

    let summary_path = config.out_dir.join("summary.json");
    let serialized =
        serde_json::to_string_pretty(&report).context("failed serializing benchmark report")?;
    fs::write(&summary_path, serialized)
        .with_context(|| format!("failed writing {}", summary_path.display()))?;

    Ok(report)
}
