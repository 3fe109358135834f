
use tracing::debug;

use crate::{
    config::{GoalRule, TaskConfig},
    signal::TaskSignal,
};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    AwaitingCrossing,
    Terminated,
    Truncated,
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct EpisodeState {
    phase: Phase,
    reward_paid: bool,
    total_reward: f32,
}

/// Reward that decays linearly from `max_reward` as the episode runs out of steps.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShapedReward {
    pub max_reward: f32,
    pub decay_rate: f32,
    pub max_episode_steps: u32,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Trigger {
    Proximity,
    Crossing { threshold: f32, limit: f32 },
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepEvaluator {
    trigger: Trigger,
    signal: TaskSignal,
    reward: ShapedReward,
}

/// Agent x position either side of one engine step.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Transition {
    pub old_x: f32,
    pub new_x: f32,
    pub near_goal: bool,
    pub step_count: u32,
    pub truncated: bool,
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Evaluation {
    pub reward: f32,
    pub terminated: bool,
    pub crossed_threshold: bool,
    pub out_of_bounds: bool,
}

/// Half-open crossing test: true once for any step that starts at or before `threshold`
/// and ends past it.
pub fn crosses(old_x: f32, new_x: f32, threshold: f32) -> bool {
    old_x <= threshold && threshold < new_x
}

impl EpisodeState {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_terminated(&self) -> bool {
        self.phase == Phase::Terminated
    }

    pub fn is_truncated(&self) -> bool {
        self.phase == Phase::Truncated
    }

    /// Whether the episode has ended, by either termination or truncation.
    pub fn is_finished(&self) -> bool {
        self.phase != Phase::AwaitingCrossing
    }

    pub fn reward_paid(&self) -> bool {
        self.reward_paid
    }

    pub fn total_reward(&self) -> f32 {
        self.total_reward
    }
}

impl ShapedReward {
    pub fn at(&self, step_count: u32) -> f32 {
        let progress = (step_count as f32 / self.max_episode_steps as f32).clamp(0.0, 1.0);
        self.max_reward * (1.0 - self.decay_rate * progress)
    }
}

impl StepEvaluator {
    pub fn new(config: &TaskConfig, total_length: f32, signal: TaskSignal) -> Self {
        let trigger = match config.goal {
            GoalRule::Proximity => Trigger::Proximity,
            GoalRule::Crossing { threshold_fraction } => Trigger::Crossing {
                threshold: threshold_fraction * total_length,
                limit: total_length,
            },
        };

        StepEvaluator {
            trigger,
            signal,
            reward: ShapedReward {
                max_reward: config.max_reward,
                decay_rate: config.decay_rate,
                max_episode_steps: config.max_episode_steps,
            },
        }
    }

    pub fn trigger(&self) -> Trigger {
        self.trigger
    }

    pub fn shaped_reward(&self) -> ShapedReward {
        self.reward
    }

    pub fn evaluate(&self, state: &mut EpisodeState, transition: Transition) -> Evaluation {
        if state.is_finished() {
            return Evaluation {
                terminated: state.is_terminated(),
                ..Evaluation::default()
            };
        }

        let mut evaluation = Evaluation::default();

        match self.trigger {
            Trigger::Proximity => {
                if transition.near_goal {
                    evaluation.reward = self.pay(state, transition.step_count);
                    evaluation.terminated = true;
                }
            }
            Trigger::Crossing { threshold, limit } => {
                if crosses(transition.old_x, transition.new_x, threshold) {
                    evaluation.crossed_threshold = true;
                    if self.signal.is_rewarded {
                        debug!("Crossed threshold at step {}: rewarded", transition.step_count);
                        evaluation.reward = self.pay(state, transition.step_count);
                    } else {
                        debug!("Crossed threshold at step {}: unrewarded", transition.step_count);
                    }
                }

                if transition.new_x > limit {
                    evaluation.out_of_bounds = true;
                    evaluation.terminated = true;
                }
            }
        }

        if evaluation.terminated {
            state.phase = Phase::Terminated;
        } else if transition.truncated {
            state.phase = Phase::Truncated;
        }

        evaluation
    }

    fn pay(&self, state: &mut EpisodeState, step_count: u32) -> f32 {
        if state.reward_paid {
            return 0.0;
        }

        let reward = self.reward.at(step_count);
        state.reward_paid = true;
        state.total_reward += reward;
        reward
    }
}
