use std::f32::consts::FRAC_PI_4;

use hwy_engine::{
    movement::MovementParams,
    placement::{Placement, sample_between},
    room::Room,
};
use rand::Rng;

use crate::{
    error::TaskError,
    signal::{SignalConfig, TaskSignal},
};

#[derive(Clone, Debug, PartialEq)]
pub struct TaskConfig {
    pub layout: Layout,
    pub goal: GoalRule,
    pub signal: SignalConfig,
    pub zone_markers: bool,
    pub spawn: SpawnConfig,
    pub reset_keep_same_length: bool,
    pub wall_texture: String,
    pub floor_texture: String,
    pub max_episode_steps: u32,
    pub max_reward: f32,
    pub decay_rate: f32,
    /// Traversable length added past the far end of the last section.
    pub corridor_extension: f32,
    pub movement: MovementParams,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Layout {
    Randomized {
        num_sections: usize,
        min_section_length: u32,
        max_section_length: u32,
        motor_gains: Vec<f32>,
        change_probability: f64,
    },
    Explicit {
        num_sections: usize,
        sections_length: Vec<u32>,
        motor_gains: Vec<f32>,
        random_gain: bool,
    },
    SingleSection {
        min_length: u32,
        max_length: u32,
    },
    Fixed {
        total_length: u32,
    },
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GoalRule {
    /// Episode ends when the agent reaches a box at the far end.
    Proximity,
    /// Reward is paid once when the agent passes `threshold_fraction` of the corridor.
    Crossing { threshold_fraction: f32 },
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SpawnConfig {
    pub facing: Facing,
    pub start: StartRegion,
    /// Spawn anywhere along the corridor instead of only at the near end.
    pub training: bool,
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Facing {
    Exact,
    Forward,
    #[default]
    Randomized,
    Jitter(f32),
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum StartRegion {
    #[default]
    NearEnd,
    Centerline,
    Origin,
}

impl TaskConfig {
    pub const HALF_WIDTH: f32 = 1.0;
    pub const GOAL_MARGIN: f32 = 2.0;
    pub const GOAL_SIZE: f32 = 0.8;
    pub const GOAL_COLOR: &'static str = "red";

    pub fn sectioned() -> Self {
        TaskConfig {
            layout: Layout::Randomized {
                num_sections: 5,
                min_section_length: 5,
                max_section_length: 10,
                motor_gains: vec![0.3, 0.6, 2.0, 3.0],
                change_probability: 0.5,
            },
            goal: GoalRule::Proximity,
            signal: SignalConfig::default(),
            zone_markers: false,
            spawn: SpawnConfig::default(),
            reset_keep_same_length: false,
            wall_texture: Room::DEFAULT_WALL_TEXTURE.to_owned(),
            floor_texture: Room::DEFAULT_FLOOR_TEXTURE.to_owned(),
            max_episode_steps: 250,
            max_reward: 1.0,
            decay_rate: 0.2,
            corridor_extension: 0.0,
            movement: MovementParams::default(),
        }
    }

    pub fn simple() -> Self {
        TaskConfig {
            layout: Layout::SingleSection {
                min_length: 5,
                max_length: 10,
            },
            spawn: SpawnConfig {
                facing: Facing::Forward,
                ..SpawnConfig::default()
            },
            ..TaskConfig::sectioned()
        }
    }

    pub fn control() -> Self {
        TaskConfig {
            layout: Layout::Explicit {
                num_sections: 3,
                sections_length: vec![5, 5, 10],
                motor_gains: vec![1.0, 0.5, 2.0],
                random_gain: false,
            },
            spawn: SpawnConfig {
                facing: Facing::Exact,
                start: StartRegion::Centerline,
                training: false,
            },
            max_episode_steps: 100,
            ..TaskConfig::sectioned()
        }
    }

    pub fn signalled() -> Self {
        TaskConfig {
            layout: Layout::Fixed { total_length: 400 },
            goal: GoalRule::Crossing {
                threshold_fraction: 0.9,
            },
            zone_markers: true,
            spawn: SpawnConfig {
                facing: Facing::Jitter(0.0001),
                start: StartRegion::Origin,
                training: false,
            },
            wall_texture: "concrete".to_owned(),
            max_episode_steps: 50000,
            corridor_extension: 100.0,
            ..TaskConfig::sectioned()
        }
    }

    pub fn with_signal(mut self, signal: TaskSignal) -> Self {
        self.signal = SignalConfig::Fixed(signal);
        self
    }

    pub fn validate(&self) -> Result<(), TaskError> {
        self.layout.validate()?;

        if let GoalRule::Crossing { threshold_fraction } = self.goal {
            if !(threshold_fraction > 0.0 && threshold_fraction <= 1.0) {
                return Err(TaskError::invalid(format!(
                    "threshold fraction {threshold_fraction} must lie in (0, 1]"
                )));
            }
        }

        if let SignalConfig::Random {
            p_rewarded,
            p_ambiguous,
        } = self.signal
        {
            check_probability("p_rewarded", p_rewarded)?;
            check_probability("p_ambiguous", p_ambiguous)?;
        }

        if self.max_episode_steps == 0 {
            return Err(TaskError::invalid("max_episode_steps must be at least 1"));
        }
        if !(self.max_reward.is_finite() && self.max_reward > 0.0) {
            return Err(TaskError::invalid("max_reward must be positive"));
        }
        if !(0.0..=1.0).contains(&self.decay_rate) {
            return Err(TaskError::invalid("decay_rate must lie in [0, 1]"));
        }
        if !(self.corridor_extension.is_finite() && self.corridor_extension >= 0.0) {
            return Err(TaskError::invalid("corridor_extension must be non-negative"));
        }
        if let Facing::Jitter(jitter) = self.spawn.facing {
            if !(jitter.is_finite() && jitter >= 0.0) {
                return Err(TaskError::invalid("facing jitter must be non-negative"));
            }
        }

        let movement = &self.movement;
        if !(movement.forward_step > 0.0 && movement.agent_radius > 0.0) {
            return Err(TaskError::invalid(
                "forward_step and agent_radius must be positive",
            ));
        }
        if !movement.turn_step.is_finite() {
            return Err(TaskError::invalid(format!(
                "turn_step {} must be finite",
                movement.turn_step
            )));
        }
        if movement.agent_radius >= Self::HALF_WIDTH {
            return Err(TaskError::invalid("agent does not fit in the corridor"));
        }

        Ok(())
    }
}

impl Default for TaskConfig {
    fn default() -> Self {
        TaskConfig::sectioned()
    }
}

impl Layout {
    pub fn validate(&self) -> Result<(), TaskError> {
        match self {
            Layout::Randomized {
                num_sections,
                min_section_length,
                max_section_length,
                motor_gains,
                change_probability,
            } => {
                check_section_count(*num_sections)?;
                check_length_bounds(*min_section_length, *max_section_length)?;
                check_probability("change_probability", *change_probability)?;
                check_gains(motor_gains)?;
                if motor_gains.is_empty() && *change_probability > 0.0 {
                    return Err(TaskError::invalid(
                        "motor_gains must not be empty when gains may change",
                    ));
                }
                Ok(())
            }
            Layout::Explicit {
                num_sections,
                sections_length,
                motor_gains,
                random_gain: _,
            } => {
                check_section_count(*num_sections)?;
                if sections_length.len() != *num_sections {
                    return Err(TaskError::invalid(format!(
                        "expected {num_sections} section lengths, got {}",
                        sections_length.len()
                    )));
                }
                if motor_gains.len() != *num_sections {
                    return Err(TaskError::invalid(format!(
                        "expected {num_sections} motor gains, got {}",
                        motor_gains.len()
                    )));
                }
                if sections_length.contains(&0) {
                    return Err(TaskError::invalid("section lengths must be at least 1"));
                }
                check_gains(motor_gains)
            }
            Layout::SingleSection {
                min_length,
                max_length,
            } => check_length_bounds(*min_length, *max_length),
            Layout::Fixed { total_length } => {
                if *total_length < 2 {
                    return Err(TaskError::invalid(format!(
                        "total_length {total_length} must be at least 2"
                    )));
                }
                Ok(())
            }
        }
    }
}

impl SpawnConfig {
    pub const NEAR_END_LIMIT: f32 = 1.0;
    pub const ORIGIN_MIN_X: f32 = 0.0001;
    pub const ORIGIN_MAX_X: f32 = 0.0002;
    pub const ORIGIN_HALF_WIDTH: f32 = 0.0001;

    /// Spawn constraints for the agent inside `room`, heading included.
    pub fn placement<R: Rng + ?Sized>(&self, room: &Room, rng: &mut R) -> Placement {
        let heading = self.facing.sample(rng);

        let placement = match self.start {
            StartRegion::NearEnd => Placement::default().with_max_x(Self::NEAR_END_LIMIT),
            StartRegion::Centerline => Placement::default()
                .with_max_x(Self::NEAR_END_LIMIT)
                .with_min_z(0.0)
                .with_max_z(0.0),
            StartRegion::Origin => Placement::default()
                .with_min_x(Self::ORIGIN_MIN_X)
                .with_max_x(Self::ORIGIN_MAX_X)
                .with_min_z(-Self::ORIGIN_HALF_WIDTH)
                .with_max_z(Self::ORIGIN_HALF_WIDTH),
        };

        if self.training {
            Placement {
                min_x: None,
                max_x: Some(room.max_x() - TaskConfig::GOAL_MARGIN),
                ..placement
            }
            .with_heading(heading)
        } else {
            placement.with_heading(heading)
        }
    }
}

impl Facing {
    pub fn jitter(&self) -> f32 {
        match *self {
            Facing::Exact => 0.0,
            Facing::Forward => 0.01,
            Facing::Randomized => FRAC_PI_4,
            Facing::Jitter(jitter) => jitter,
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        let jitter = self.jitter();
        if jitter == 0.0 {
            0.0
        } else {
            sample_between(rng, -jitter, jitter)
        }
    }
}

fn check_section_count(num_sections: usize) -> Result<(), TaskError> {
    if num_sections == 0 {
        return Err(TaskError::invalid("num_sections must be at least 1"));
    }
    Ok(())
}

fn check_length_bounds(min: u32, max: u32) -> Result<(), TaskError> {
    if min < 1 {
        return Err(TaskError::invalid(format!(
            "minimum length {min} must be at least 1"
        )));
    }
    if max <= min {
        return Err(TaskError::invalid(format!(
            "maximum length {max} must exceed minimum length {min}"
        )));
    }
    Ok(())
}

fn check_probability(name: &str, p: f64) -> Result<(), TaskError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(TaskError::invalid(format!("{name} {p} must lie in [0, 1]")));
    }
    Ok(())
}

fn check_gains(gains: &[f32]) -> Result<(), TaskError> {
    if let Some(gain) = gains.iter().find(|gain| !(gain.is_finite() && **gain > 0.0)) {
        return Err(TaskError::invalid(format!(
            "motor gain {gain} must be positive"
        )));
    }
    Ok(())
}
