use bevy_ecs::prelude::*;
use bevy_math::Vec2;

use crate::movement::AgentAction;

#[derive(Copy, Clone, Component, Debug, Default, PartialEq)]
pub struct Position {
    position: Vec2,
    heading: f32,
}

#[derive(Copy, Clone, Component, Debug, Default, PartialEq)]
#[require(Position)]
pub struct Collider {
    radius: f32,
}

#[derive(Copy, Clone, Component, Debug, Default)]
#[require(Collider, PendingAction)]
pub struct Agent;

#[derive(Copy, Clone, Component, Debug, Default)]
pub struct PendingAction(pub Option<AgentAction>);

/// A solid box resting on the floor.
#[derive(Clone, Component, Debug, PartialEq)]
#[require(Collider)]
pub struct Block {
    pub color: String,
    pub size: f32,
}

/// A flat textured panel, usually hung on a wall.
#[derive(Clone, Component, Debug, PartialEq)]
#[require(Position)]
pub struct ImageFrame {
    pub texture: String,
    pub elevation: f32,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Position {
    pub fn new(position: Vec2, heading: f32) -> Self {
        Position { position, heading }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn forward(&self) -> Vec2 {
        Vec2::from_angle(self.heading)
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn rotate(&mut self, angle: f32) {
        self.heading += angle;
    }
}

impl Collider {
    pub fn new(radius: f32) -> Self {
        Collider { radius }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Block {
    pub fn new(color: impl Into<String>, size: f32) -> Self {
        Block {
            color: color.into(),
            size,
        }
    }

    /// Radius of the circle circumscribing the box footprint.
    pub fn radius(&self) -> f32 {
        self.size * std::f32::consts::SQRT_2 / 2.0
    }
}
