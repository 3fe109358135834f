use bevy_ecs::prelude::*;
use bevy_math::Vec2;

/// An axis-aligned rectangular room in the x/z plane.
#[derive(Clone, Debug, PartialEq, Resource)]
pub struct Room {
    min: Vec2,
    max: Vec2,
    wall_texture: String,
    floor_texture: String,
    no_ceiling: bool,
}

impl Room {
    pub const DEFAULT_WALL_TEXTURE: &'static str = "stripes_big";
    pub const DEFAULT_FLOOR_TEXTURE: &'static str = "asphalt";

    pub fn new(min_x: f32, max_x: f32, min_z: f32, max_z: f32) -> Self {
        Room {
            min: Vec2::new(min_x.min(max_x), min_z.min(max_z)),
            max: Vec2::new(min_x.max(max_x), min_z.max(max_z)),
            wall_texture: Self::DEFAULT_WALL_TEXTURE.to_owned(),
            floor_texture: Self::DEFAULT_FLOOR_TEXTURE.to_owned(),
            no_ceiling: false,
        }
    }

    pub fn with_wall_texture(mut self, texture: impl Into<String>) -> Self {
        self.wall_texture = texture.into();
        self
    }

    pub fn with_floor_texture(mut self, texture: impl Into<String>) -> Self {
        self.floor_texture = texture.into();
        self
    }

    pub fn without_ceiling(mut self) -> Self {
        self.no_ceiling = true;
        self
    }

    pub fn min_x(&self) -> f32 {
        self.min.x
    }

    pub fn max_x(&self) -> f32 {
        self.max.x
    }

    pub fn min_z(&self) -> f32 {
        self.min.y
    }

    pub fn max_z(&self) -> f32 {
        self.max.y
    }

    pub fn wall_texture(&self) -> &str {
        &self.wall_texture
    }

    pub fn floor_texture(&self) -> &str {
        &self.floor_texture
    }

    pub fn no_ceiling(&self) -> bool {
        self.no_ceiling
    }

    /// Whether a disc of the given radius lies entirely inside the walls.
    pub fn contains(&self, position: Vec2, radius: f32) -> bool {
        position.x - radius >= self.min.x
            && position.x + radius <= self.max.x
            && position.y - radius >= self.min.y
            && position.y + radius <= self.max.y
    }
}
