use bevy_math::Vec2;
use hwy_engine::{entity::Position, movement::AgentAction};
use hwy_rl::{Action, Observation};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HallwayAction {
    TurnLeft = 0,
    TurnRight = 1,
    MoveForward = 2,
}

/// Agent pose in the corridor plane. `position.y` is the lateral (z) coordinate.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct HallwayObservation {
    pub position: Vec2,
    pub heading: f32,
}

impl Action for HallwayAction {
    const SIZE: usize = 3;

    fn as_u32(&self) -> u32 {
        *self as u32
    }

    fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(HallwayAction::TurnLeft),
            1 => Some(HallwayAction::TurnRight),
            2 => Some(HallwayAction::MoveForward),
            _ => None,
        }
    }
}

impl From<HallwayAction> for AgentAction {
    fn from(action: HallwayAction) -> Self {
        match action {
            HallwayAction::TurnLeft => AgentAction::TurnLeft,
            HallwayAction::TurnRight => AgentAction::TurnRight,
            HallwayAction::MoveForward => AgentAction::MoveForward,
        }
    }
}

impl Observation for HallwayObservation {
    const SIZE: usize = 4;

    fn write_features<T: Extend<f32>>(&self, out: &mut T) {
        let (sin, cos) = self.heading.sin_cos();
        out.extend([self.position.x, self.position.y, cos, sin]);
    }
}

impl From<Position> for HallwayObservation {
    fn from(position: Position) -> Self {
        HallwayObservation {
            position: position.position(),
            heading: position.heading(),
        }
    }
}
