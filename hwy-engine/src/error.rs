use bevy_ecs::entity::Entity;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("failed to place entity after {attempts} attempts")]
    PlacementFailed { attempts: usize },
    #[error("no room has been added to the world")]
    NoRoom,
    #[error("no agent has been placed in the world")]
    NoAgent,
    #[error("entity {0} is not registered with a position")]
    UnknownEntity(Entity),
}
