use anyhow::Result;
use hwy_rl::Rollout;
use hwy_task::{HallwayAction, HallwayEnv, HallwayObservation, TaskConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

const EPISODES: usize = 8;
const SEED: u64 = 0;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    for (name, config) in [
        ("sectioned", TaskConfig::sectioned()),
        ("simple", TaskConfig::simple()),
        ("control", TaskConfig::control()),
        ("signalled", TaskConfig::signalled()),
    ] {
        let max_episode_len = config.max_episode_steps as usize;
        let mut env = HallwayEnv::new(config, SEED)?;
        let mut rollout = Rollout::new(SEED, max_episode_len);

        let summary = rollout.run(&mut env, &walk_forward, EPISODES)?;
        info!(
            "{name}: {} episodes, {} steps, {} terminated, {} truncated, mean reward {:.3}",
            summary.episodes,
            summary.steps,
            summary.terminated,
            summary.truncated,
            summary.mean_reward()
        );
    }

    Ok(())
}

/// Turns back towards the far end of the corridor, then walks.
fn walk_forward(observation: &HallwayObservation) -> HallwayAction {
    const TOLERANCE: f32 = 0.15;

    if observation.heading > TOLERANCE {
        HallwayAction::TurnRight
    } else if observation.heading < -TOLERANCE {
        HallwayAction::TurnLeft
    } else {
        HallwayAction::MoveForward
    }
}
