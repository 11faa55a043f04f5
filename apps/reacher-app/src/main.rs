//! Reacher headless runner.
//!
//! Provides two modes of operation:
//! - `headless`: run N episodes of a random or idle policy and print statistics
//! - `info`: print the robot descriptor and effective configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use reacher_core::prelude::*;
use reacher_env::prelude::*;
use reacher_robot::ReacherSequentialConstrained;
use reacher_sim::KinematicWorld;

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// Quadrant-constrained reacher.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// TOML configuration file. Defaults are used when absent.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run episodes locally and print statistics.
    Headless {
        /// Number of episodes to run.
        #[arg(short = 'n', long, default_value_t = 1)]
        episodes: u32,

        /// Override the configured maximum steps per episode.
        #[arg(short, long)]
        max_steps: Option<u32>,

        /// Override the configured run seed.
        #[arg(short, long)]
        seed: Option<u64>,

        /// Policy that produces actions.
        #[arg(short, long, value_enum, default_value_t = PolicyKind::Random)]
        policy: PolicyKind,
    },

    /// Print robot and configuration information.
    Info,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyKind {
    /// Uniform actions over the action space.
    Random,
    /// Zero torque every step.
    Zero,
}

// ---------------------------------------------------------------------------
// Mode implementations
// ---------------------------------------------------------------------------

fn load_config(path: Option<&PathBuf>) -> Result<ReacherConfig, ReacherError> {
    match path {
        Some(path) => {
            let config = ReacherConfig::from_file(path)?;
            info!(path = %path.display(), "loaded config");
            Ok(config)
        }
        None => Ok(ReacherConfig::default()),
    }
}

fn run_headless(
    mut config: ReacherConfig,
    episodes: u32,
    max_steps: Option<u32>,
    seed: Option<u64>,
    policy: PolicyKind,
) -> Result<(), ReacherError> {
    if let Some(max_steps) = max_steps {
        config.sim.max_episode_steps = max_steps;
    }
    if let Some(seed) = seed {
        config.sim.seed = seed;
    }

    let world = KinematicWorld::new(&config.world);
    let seeds = SeedHierarchy::new(config.sim.seed);
    let mut policy_rng = seeds.subsystem_rng("policy");
    let mut env = ReacherEnv::new(world, config)?;
    let mut stats = EpisodeStats::new();

    for ep in 0..episodes {
        env.reset(None)?;
        let goal = env.robot().goal();
        loop {
            let action = match policy {
                PolicyKind::Random => env.action_space().sample(&mut policy_rng),
                PolicyKind::Zero => Action::zeros(env.action_space().dim()),
            };
            let result = env.step(&action)?;
            if result.terminated || result.truncated {
                break;
            }
        }

        let episode = env.episode();
        if !stats.record(episode) {
            warn!(
                episode = ep + 1,
                state = ?episode.state,
                "episode still running; not recorded"
            );
        }
        println!(
            "episode {}: goal={:?}, steps={}, return={:.3}, potential={:.3}",
            ep + 1,
            goal,
            episode.step_count,
            episode.total_reward,
            env.potential()
        );
    }

    println!(
        "\ntotal: episodes={}, steps={}, mean_return={:.3}",
        stats.episodes_completed,
        stats.total_steps,
        stats.mean_return().unwrap_or(0.0)
    );
    Ok(())
}

fn run_info(config: &ReacherConfig) {
    let descriptor = ReacherSequentialConstrained::descriptor();
    println!("reacher v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("model:      {}", descriptor.model_file);
    println!("root part:  {}", descriptor.root_part);
    println!("action dim: {}", descriptor.action_dim);
    println!("obs dim:    {}", descriptor.obs_dim);
    println!();
    println!(
        "control_dt={}, max_episode_steps={}, seed={}",
        config.sim.control_dt, config.sim.max_episode_steps, config.sim.seed
    );
    println!(
        "electricity_cost={}, stall_torque_cost={}, stuck_joint_cost={}",
        config.reward.electricity_cost,
        config.reward.stall_torque_cost,
        config.reward.stuck_joint_cost
    );
    println!("joint_inertia={}", config.world.joint_inertia);
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> Result<(), ReacherError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Some(Commands::Headless {
            episodes,
            max_steps,
            seed,
            policy,
        }) => run_headless(config, episodes, max_steps, seed, policy),
        Some(Commands::Info) => {
            run_info(&config);
            Ok(())
        }
        None => run_headless(config, 1, None, None, PolicyKind::Random),
    }
}
