pub mod builder;
pub mod config;
pub mod env;
pub mod error;
pub mod evaluator;
pub mod section;
pub mod signal;
pub mod space;
pub mod zone;

pub use crate::{
    config::{Facing, GoalRule, Layout, SpawnConfig, StartRegion, TaskConfig},
    env::{HallwayEnv, StepInfo},
    error::TaskError,
    section::{Section, SectionPlan},
    signal::{SignalConfig, TaskSignal},
    space::{HallwayAction, HallwayObservation},
};
