
use bevy_ecs::entity::Entity;
use hwy_engine::{
    Simulation,
    entity::{Block, ImageFrame},
    movement::MotorGain,
    placement::Placement,
    room::Room,
};
use rand::Rng;
use tracing::debug;

use crate::{
    config::{GoalRule, TaskConfig},
    error::TaskError,
    section::SectionPlan,
    signal::TaskSignal,
    zone::markers,
};

/// Handles to the entities placed for one episode.
#[derive(Clone, Debug, PartialEq)]
pub struct BuiltWorld {
    pub room: Room,
    pub agent: Entity,
    pub goal: Option<Entity>,
    pub markers: Vec<Entity>,
}

/// Rebuilds the world from scratch: room, motor gains, goal box, zone markers, then the agent.
pub fn build_world<R: Rng + ?Sized>(
    sim: &mut Simulation,
    config: &TaskConfig,
    plan: &SectionPlan,
    signal: TaskSignal,
    rng: &mut R,
) -> Result<BuiltWorld, TaskError> {
    sim.reset(config.max_episode_steps);

    let room = sim.add_rect_room(
        Room::new(
            plan.origin(),
            plan.end() + config.corridor_extension,
            -TaskConfig::HALF_WIDTH,
            TaskConfig::HALF_WIDTH,
        )
        .with_wall_texture(config.wall_texture.as_str())
        .with_floor_texture(config.floor_texture.as_str())
        .without_ceiling(),
    );

    let lookup = plan.clone();
    sim.set_motor_gain(MotorGain::new(move |x| lookup.motor_gain_at(x)));

    let goal = match config.goal {
        GoalRule::Proximity => {
            let block = Block::new(TaskConfig::GOAL_COLOR, TaskConfig::GOAL_SIZE);
            let radius = block.radius();
            let placement = Placement::default().with_min_x(room.max_x() - TaskConfig::GOAL_MARGIN);
            Some(sim.place_entity(block, radius, placement, rng)?)
        }
        GoalRule::Crossing { .. } => None,
    };

    let markers = if config.zone_markers {
        markers(plan.total_length(), TaskConfig::HALF_WIDTH, signal)
            .into_iter()
            .map(|marker| {
                sim.spawn_static(
                    ImageFrame {
                        texture: marker.tag.texture().to_owned(),
                        elevation: marker.elevation,
                        width: marker.width,
                        height: marker.height,
                        depth: marker.depth,
                    },
                    marker.center,
                    marker.heading,
                )
            })
            .collect()
    } else {
        Vec::new()
    };

    let placement = config.spawn.placement(&room, rng);
    let agent = sim.place_agent(placement, rng)?;

    debug!(
        "Built corridor [{}, {}] with {} sections, {} markers",
        room.min_x(),
        room.max_x(),
        plan.len(),
        markers.len()
    );

    Ok(BuiltWorld {
        room,
        agent,
        goal,
        markers,
    })
}
