
use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_math::Vec2;
use rand::Rng;
use tracing::{debug, warn};

use crate::{
    EnginePlugin, EngineStep,
    clock::EpisodeClock,
    entity::{Agent, Collider, PendingAction, Position},
    error::EngineError,
    movement::{AgentAction, MotorGain, MovementParams, intersects},
    placement::Placement,
    room::Room,
};

/// A headless world holding one room, its entities and a single agent.
pub struct Simulation {
    app: App,
    agent: Option<Entity>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EngineTick {
    pub step_count: u32,
    pub truncated: bool,
}

impl Simulation {
    pub fn new(params: MovementParams) -> Self {
        let mut app = App::new();
        app.add_plugins(EnginePlugin { params });
        Simulation { app, agent: None }
    }

    pub fn params(&self) -> MovementParams {
        *self.app.world().resource::<MovementParams>()
    }

    pub fn world(&self) -> &World {
        self.app.world()
    }

    /// Despawns every positioned entity, removes the room and restarts the episode clock.
    pub fn reset(&mut self, max_episode_steps: u32) {
        let world = self.app.world_mut();
        let entities: Vec<Entity> = world
            .query_filtered::<Entity, With<Position>>()
            .iter(world)
            .collect();
        for entity in entities {
            world.despawn(entity);
        }
        world.remove_resource::<Room>();
        world.insert_resource(MotorGain::unit());
        world.insert_resource(EpisodeClock::new(max_episode_steps));
        self.agent = None;
    }

    pub fn add_rect_room(&mut self, room: Room) -> Room {
        debug!(
            "Adding room x=[{}, {}] z=[{}, {}]",
            room.min_x(),
            room.max_x(),
            room.min_z(),
            room.max_z()
        );
        self.app.world_mut().insert_resource(room.clone());
        room
    }

    pub fn room(&self) -> Option<&Room> {
        self.app.world().get_resource::<Room>()
    }

    pub fn set_motor_gain(&mut self, gain: MotorGain) {
        self.app.world_mut().insert_resource(gain);
    }

    pub fn motor_gain_at(&self, x: f32) -> f32 {
        self.app.world().resource::<MotorGain>().at(x)
    }

    pub fn place_entity<B: Bundle, R: Rng + ?Sized>(
        &mut self,
        bundle: B,
        radius: f32,
        placement: Placement,
        rng: &mut R,
    ) -> Result<Entity, EngineError> {
        let room = self.room().cloned().ok_or(EngineError::NoRoom)?;

        let world = self.app.world_mut();
        let mut colliders = world.query::<(&Position, &Collider)>();

        for _ in 0..Placement::MAX_ATTEMPTS {
            let position = placement.sample_position(&room, radius, rng);
            let others = colliders
                .iter(world)
                .map(|(other, collider)| (other.position(), collider.radius()));

            if intersects(&room, position, radius, others) {
                continue;
            }

            let heading = placement.sample_heading(rng);
            let id = world
                .spawn((bundle, Position::new(position, heading), Collider::new(radius)))
                .id();
            return Ok(id);
        }

        warn!("Giving up placing entity after {} attempts", Placement::MAX_ATTEMPTS);
        Err(EngineError::PlacementFailed {
            attempts: Placement::MAX_ATTEMPTS,
        })
    }

    pub fn place_agent<R: Rng + ?Sized>(
        &mut self,
        placement: Placement,
        rng: &mut R,
    ) -> Result<Entity, EngineError> {
        let radius = self.params().agent_radius;
        let id = self.place_entity(Agent, radius, placement, rng)?;
        self.agent = Some(id);
        Ok(id)
    }

    /// Registers an entity at a fixed pose, without collision or placement checks.
    pub fn spawn_static<B: Bundle>(&mut self, bundle: B, position: Vec2, heading: f32) -> Entity {
        self.app
            .world_mut()
            .spawn((bundle, Position::new(position, heading)))
            .id()
    }

    pub fn agent(&self) -> Option<Entity> {
        self.agent
    }

    pub fn position(&self, id: Entity) -> Result<Position, EngineError> {
        self.app
            .world()
            .get::<Position>(id)
            .copied()
            .ok_or(EngineError::UnknownEntity(id))
    }

    pub fn agent_position(&self) -> Result<Position, EngineError> {
        self.position(self.agent.ok_or(EngineError::NoAgent)?)
    }

    fn radius(&self, id: Entity) -> f32 {
        self.app
            .world()
            .get::<Collider>(id)
            .map_or(0.0, |collider| collider.radius())
    }

    /// Whether two entities are within interaction distance of each other.
    ///
    /// The reach covers one full forward step of `a` at its current motor gain, so a mover that
    /// is blocked by `b` is always near it.
    pub fn near(&self, a: Entity, b: Entity) -> Result<bool, EngineError> {
        let from = self.position(a)?.position();
        let distance = from.distance(self.position(b)?.position());
        let step = self.params().forward_step * self.motor_gain_at(from.x).max(1.0);
        let reach = self.radius(a) + self.radius(b) + 1.1 * step;
        Ok(distance < reach)
    }

    pub fn clock(&self) -> EpisodeClock {
        *self.app.world().resource::<EpisodeClock>()
    }

    pub fn step(&mut self, action: AgentAction) -> Result<EngineTick, EngineError> {
        let agent = self.agent.ok_or(EngineError::NoAgent)?;

        let world = self.app.world_mut();
        world
            .get_mut::<PendingAction>(agent)
            .ok_or(EngineError::UnknownEntity(agent))?
            .0 = Some(action);

        world.run_schedule(EngineStep);

        let clock = self.clock();
        Ok(EngineTick {
            step_count: clock.step_count(),
            truncated: clock.is_truncated(),
        })
    }

    pub fn count<C: Component>(&mut self) -> usize {
        let world = self.app.world_mut();
        world.query_filtered::<(), With<C>>().iter(world).count()
    }
}
