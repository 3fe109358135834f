#[cfg(test)]
mod tests;

use std::fmt;

use bevy_ecs::prelude::*;
use bevy_math::Vec2;

use crate::{
    entity::{Agent, Collider, PendingAction, Position},
    room::Room,
};

#[derive(Copy, Clone, Debug, PartialEq, Resource)]
pub struct MovementParams {
    pub forward_step: f32,
    pub turn_step: f32,
    pub agent_radius: f32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AgentAction {
    TurnLeft,
    TurnRight,
    MoveForward,
}

/// Multiplier applied to the forward step, as a function of the agent's x position.
#[derive(Resource)]
pub struct MotorGain {
    lookup: Box<dyn Fn(f32) -> f32 + Send + Sync>,
}

pub fn apply_agent_action(
    mut agents: Query<(&mut Position, &Collider, &mut PendingAction), With<Agent>>,
    obstacles: Query<(&Position, &Collider), Without<Agent>>,
    room: Option<Res<Room>>,
    gain: Res<MotorGain>,
    params: Res<MovementParams>,
) {
    for (mut position, collider, mut pending) in &mut agents {
        let Some(action) = pending.0.take() else {
            continue;
        };

        match action {
            AgentAction::TurnLeft => position.rotate(params.turn_step),
            AgentAction::TurnRight => position.rotate(-params.turn_step),
            AgentAction::MoveForward => {
                let distance = params.forward_step * gain.at(position.position().x);
                let target = position.position() + position.forward() * distance;

                let others = obstacles
                    .iter()
                    .map(|(other, other_collider)| (other.position(), other_collider.radius()));
                let blocked = match room.as_deref() {
                    Some(room) => intersects(room, target, collider.radius(), others),
                    None => true,
                };

                if !blocked {
                    position.set_position(target);
                }
            }
        }
    }
}

/// Whether a disc at `position` would cross a wall or overlap any of `others`.
///
/// Zero-radius entities never block.
pub fn intersects(
    room: &Room,
    position: Vec2,
    radius: f32,
    others: impl IntoIterator<Item = (Vec2, f32)>,
) -> bool {
    if !room.contains(position, radius) {
        return true;
    }

    others.into_iter().any(|(other, other_radius)| {
        other_radius > 0.0 && position.distance(other) < radius + other_radius
    })
}

impl Default for MovementParams {
    fn default() -> Self {
        Self {
            forward_step: 0.15,
            turn_step: 15f32.to_radians(),
            agent_radius: 0.4,
        }
    }
}

impl MotorGain {
    pub fn new(lookup: impl Fn(f32) -> f32 + Send + Sync + 'static) -> Self {
        MotorGain {
            lookup: Box::new(lookup),
        }
    }

    pub fn unit() -> Self {
        MotorGain::new(|_| 1.0)
    }

    pub fn at(&self, x: f32) -> f32 {
        (self.lookup)(x)
    }
}

impl Default for MotorGain {
    fn default() -> Self {
        MotorGain::unit()
    }
}

impl fmt::Debug for MotorGain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MotorGain").finish_non_exhaustive()
    }
}
