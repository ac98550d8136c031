use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use asteroids_core::GameConfig;
use asteroids_runner::benchmark::{run_benchmark, BenchmarkConfig};
use asteroids_runner::controllers::describe_controllers;
use asteroids_runner::runner::run_episode;

#[derive(Parser)]
#[command(
    name = "asteroids-runner",
    about = "Headless episode harness for the asteroids simulation"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a single episode and print its metrics as JSON
    Run {
        /// Game seed (decimal, or hex with an 0x prefix)
        #[arg(long, default_value = "0xDEADBEEF")]
        seed: String,

        /// Ticks to simulate
        #[arg(long, default_value = "3600")]
        ticks: u64,

        /// Controller id, or a script spec like "script:t,t,l,f"
        #[arg(long, default_value = "inert")]
        controller: String,

        /// Game configuration file (JSON); defaults apply where absent
        #[arg(long)]
        config: Option<PathBuf>,

        /// Also write the metrics JSON here
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Benchmark one controller across consecutive seeds
    Bench {
        /// Number of seeds
        #[arg(long, default_value = "8")]
        seed_count: usize,

        /// First seed; the rest increment from it
        #[arg(long, default_value = "0xDEADBEEF")]
        base_seed: String,

        /// Ticks per episode
        #[arg(long, default_value = "3600")]
        ticks: u64,

        /// Controller id
        #[arg(long, default_value = "inert")]
        controller: String,

        /// Game configuration file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory for summary.json
        #[arg(long, default_value = "bench-output")]
        out_dir: PathBuf,

        /// Parallel jobs (default: all cores)
        #[arg(long)]
        jobs: Option<usize>,
    },

    /// List the available controllers
    Controllers,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            seed,
            ticks,
            controller,
            config,
            output,
        } => {
            let game_config = load_config(config.as_deref())?;
            let seed = parse_seed(&seed)?;
            let metrics = run_episode(&controller, &game_config, seed, ticks)?;
            let rendered = serde_json::to_string_pretty(&metrics)?;
            if let Some(path) = output {
                fs::write(&path, &rendered)
                    .with_context(|| format!("failed writing {}", path.display()))?;
            }
            println!("{rendered}");
        }

        Command::Bench {
            seed_count,
            base_seed,
            ticks,
            controller,
            config,
            out_dir,
            jobs,
        } => {
            let game_config = load_config(config.as_deref())?;
            let base = parse_seed(&base_seed)?;
            let seeds: Vec<u64> = (0..seed_count as u64).map(|i| base.wrapping_add(i)).collect();
            let report = run_benchmark(
                BenchmarkConfig {
                    controller_id: controller,
                    seeds,
                    max_ticks: ticks,
                    out_dir: out_dir.clone(),
                    jobs,
                },
                &game_config,
            )?;
            println!(
                "{} runs | avg ticks {:.1} | avg destroyed {:.2} | ship deaths {} | faults {}",
                report.seed_count,
                report.avg_ticks,
                report.avg_asteroids_destroyed,
                report.total_ship_deaths,
                report.total_faults
            );
            println!("summary: {}", out_dir.join("summary.json").display());
        }

        Command::Controllers => {
            for (id, description) in describe_controllers() {
                println!("{id:<16} {description}");
            }
        }
    }

    Ok(())
}

fn parse_seed(text: &str) -> Result<u64> {
    let trimmed = text.trim();
    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        u64::from_str_radix(hex, 16).map_err(|err| anyhow!("bad hex seed '{trimmed}': {err}"))
    } else {
        trimmed
            .parse()
            .map_err(|err| anyhow!("bad seed '{trimmed}': {err}"))
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed reading {}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&text)
        .with_context(|| format!("failed parsing {}", path.display()))?;
    Ok(config)
}
