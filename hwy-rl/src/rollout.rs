use std::{marker::PhantomData, time::Instant};

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::{debug, info};

use crate::{Action, Environment, Model, Observation, Step};

pub struct Rollout<E: Environment> {
    rng: SmallRng,
    max_episode_len: usize,
    observations: Vec<f32>,
    actions: Vec<u32>,
    rewards: Vec<f32>,
    not_dones: Vec<f32>,
    len: usize,
    environment: PhantomData<fn() -> E>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RolloutSummary {
    pub episodes: usize,
    pub steps: usize,
    pub total_reward: f32,
    pub terminated: usize,
    pub truncated: usize,
}

impl<E: Environment> Rollout<E> {
    pub fn new(seed: u64, max_episode_len: usize) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            max_episode_len,
            observations: Vec::new(),
            actions: Vec::new(),
            rewards: Vec::new(),
            not_dones: Vec::new(),
            len: 0,
            environment: PhantomData,
        }
    }

    pub fn run<M>(
        &mut self,
        env: &mut E,
        model: &M,
        episodes: usize,
    ) -> Result<RolloutSummary, E::Error>
    where
        M: Model<E::Observation, E::Action>,
    {
        let start = Instant::now();
        let mut summary = RolloutSummary::default();

        self.clear();

        for episode in 0..episodes {
            let mut observation = env.reset(Some(self.rng.random()))?;
            let mut episode_reward = 0.0;

            for i in 0..self.max_episode_len {
                let action = model.react(&observation);
                let mut result = env.step(action)?;

                result.truncated = result.truncated || i == self.max_episode_len - 1;
                episode_reward += result.reward;
                summary.steps += 1;

                let done = result.done();
                if done {
                    if result.terminated {
                        summary.terminated += 1;
                    } else {
                        summary.truncated += 1;
                    }
                }

                observation = result.observation.clone();
                self.push(result);

                if done {
                    break;
                }
            }

            debug!("Episode {episode} finished with reward {episode_reward}");
            summary.total_reward += episode_reward;
            summary.episodes += 1;
        }

        info!(
            "Completed rollout of {} episodes ({} steps) with average reward {} after {:.3}s",
            summary.episodes,
            summary.steps,
            summary.mean_reward(),
            start.elapsed().as_secs_f64(),
        );

        Ok(summary)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn observations(&self) -> &[f32] {
        &self.observations
    }

    pub fn actions(&self) -> &[u32] {
        &self.actions
    }

    pub fn rewards(&self) -> &[f32] {
        &self.rewards
    }

    pub fn not_dones(&self) -> &[f32] {
        &self.not_dones
    }

    fn clear(&mut self) {
        self.observations.clear();
        self.actions.clear();
        self.rewards.clear();
        self.not_dones.clear();
        self.len = 0;
    }

    fn push(&mut self, step: Step<E::Observation, E::Action, E::Info>) {
        step.observation.write_features(&mut self.observations);
        self.actions.push(step.action.as_u32());
        self.rewards.push(step.reward);
        self.not_dones.push(if step.done() { 0.0 } else { 1.0 });
        self.len += 1;
    }
}

impl RolloutSummary {
    pub fn mean_reward(&self) -> f32 {
        if self.episodes == 0 {
            0.0
        } else {
            self.total_reward / self.episodes as f32
        }
    }
}
