use bevy_ecs::prelude::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Resource)]
pub struct EpisodeClock {
    step_count: u32,
    max_episode_steps: u32,
}

pub fn advance_clock(mut clock: ResMut<EpisodeClock>) {
    clock.step_count += 1;
}

impl EpisodeClock {
    pub fn new(max_episode_steps: u32) -> Self {
        EpisodeClock {
            step_count: 0,
            max_episode_steps,
        }
    }

    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    pub fn max_episode_steps(&self) -> u32 {
        self.max_episode_steps
    }

    pub fn is_truncated(&self) -> bool {
        self.step_count >= self.max_episode_steps
    }
}
