use std::f32::consts::TAU;

use bevy_math::Vec2;
use rand::Rng;

use crate::room::Room;

/// Constraints on where an entity may be placed.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Placement {
    pub min_x: Option<f32>,
    pub max_x: Option<f32>,
    pub min_z: Option<f32>,
    pub max_z: Option<f32>,
    pub heading: Option<f32>,
}

impl Placement {
    pub const MAX_ATTEMPTS: usize = 1000;

    pub fn with_min_x(mut self, min_x: f32) -> Self {
        self.min_x = Some(min_x);
        self
    }

    pub fn with_max_x(mut self, max_x: f32) -> Self {
        self.max_x = Some(max_x);
        self
    }

    pub fn with_min_z(mut self, min_z: f32) -> Self {
        self.min_z = Some(min_z);
        self
    }

    pub fn with_max_z(mut self, max_z: f32) -> Self {
        self.max_z = Some(max_z);
        self
    }

    pub fn with_heading(mut self, heading: f32) -> Self {
        self.heading = Some(heading);
        self
    }

    /// Draws a candidate position. Unset bounds are pulled in from the walls by `radius`.
    pub fn sample_position<R: Rng + ?Sized>(
        &self,
        room: &Room,
        radius: f32,
        rng: &mut R,
    ) -> Vec2 {
        let min_x = self.min_x.unwrap_or(room.min_x() + radius);
        let max_x = self.max_x.unwrap_or(room.max_x() - radius);
        let min_z = self.min_z.unwrap_or(room.min_z() + radius);
        let max_z = self.max_z.unwrap_or(room.max_z() - radius);

        Vec2::new(
            sample_between(rng, min_x, max_x),
            sample_between(rng, min_z, max_z),
        )
    }

    pub fn sample_heading<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        match self.heading {
            Some(heading) => heading,
            None => rng.random_range(0.0..TAU),
        }
    }
}

/// Uniform draw between two bounds given in either order.
pub fn sample_between<R: Rng + ?Sized>(rng: &mut R, a: f32, b: f32) -> f32 {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    if low == high {
        low
    } else {
        rng.random_range(low..=high)
    }
}
