pub mod clock;
pub mod entity;
pub mod error;
pub mod movement;
pub mod placement;
pub mod room;
pub mod simulation;

use bevy_app::prelude::*;
use bevy_ecs::{
    prelude::*,
    schedule::{ExecutorKind, ScheduleLabel},
};

use crate::{
    clock::{EpisodeClock, advance_clock},
    movement::{MotorGain, MovementParams, apply_agent_action},
};

pub use crate::{
    error::EngineError,
    simulation::{EngineTick, Simulation},
};

pub struct EnginePlugin {
    pub params: MovementParams,
}

#[derive(Debug, PartialEq, Eq, Clone, Hash, ScheduleLabel)]
pub struct EngineStep;

#[derive(Debug, PartialEq, Eq, Clone, Hash, SystemSet)]
pub enum EngineSystems {
    AdvanceClock,
    ApplyActions,
}

impl Plugin for EnginePlugin {
    fn build(&self, app: &mut App) {
        app.edit_schedule(EngineStep, |schedule| {
            schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        });

        app.insert_resource(self.params);
        app.init_resource::<MotorGain>();
        app.init_resource::<EpisodeClock>();

        app.configure_sets(
            EngineStep,
            EngineSystems::AdvanceClock.before(EngineSystems::ApplyActions),
        );

        app.add_systems(
            EngineStep,
            (
                advance_clock.in_set(EngineSystems::AdvanceClock),
                apply_agent_action.in_set(EngineSystems::ApplyActions),
            ),
        );
    }
}
