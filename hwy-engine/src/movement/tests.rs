use std::f32::consts::FRAC_PI_2;

use approx::assert_relative_eq;
use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_math::prelude::*;

use crate::{
    EnginePlugin, EngineStep,
    clock::EpisodeClock,
    entity::{Agent, Block, Collider, PendingAction, Position},
    movement::{AgentAction, MotorGain, MovementParams, intersects},
    room::Room,
};

#[test]
fn move_forward() {
    let mut app = make_app();
    let agent = spawn_agent(&mut app, Vec2::new(0.0, 0.0), 0.0);

    act(&mut app, agent, AgentAction::MoveForward);

    let position = app.world().get::<Position>(agent).unwrap();
    assert_relative_eq!(position.position(), Vec2::new(0.15, 0.0));
}

#[test]
fn move_forward_follows_heading() {
    let mut app = make_app();
    let agent = spawn_agent(&mut app, Vec2::new(0.0, 0.0), FRAC_PI_2);

    act(&mut app, agent, AgentAction::MoveForward);

    let position = app.world().get::<Position>(agent).unwrap();
    assert_relative_eq!(position.position(), Vec2::new(0.0, 0.15), epsilon = 1e-6);
}

#[test]
fn move_forward_scaled_by_motor_gain() {
    let mut app = make_app();
    app.insert_resource(MotorGain::new(|x| if x < 5.0 { 1.0 } else { 2.0 }));
    let agent = spawn_agent(&mut app, Vec2::new(5.0, 0.0), 0.0);

    act(&mut app, agent, AgentAction::MoveForward);

    let position = app.world().get::<Position>(agent).unwrap();
    assert_relative_eq!(position.position(), Vec2::new(5.3, 0.0));
}

#[test]
fn move_forward_blocked_by_wall() {
    let mut app = make_app();
    let agent = spawn_agent(&mut app, Vec2::new(9.5, 0.0), 0.0);

    act(&mut app, agent, AgentAction::MoveForward);

    let position = app.world().get::<Position>(agent).unwrap();
    assert_relative_eq!(position.position(), Vec2::new(9.5, 0.0));
}

#[test]
fn move_forward_blocked_by_block() {
    let mut app = make_app();
    app.world_mut().spawn((
        Block::new("red", 0.8),
        Position::new(Vec2::new(1.0, 0.0), 0.0),
        Collider::new(0.5),
    ));
    let agent = spawn_agent(&mut app, Vec2::new(0.0, 0.0), 0.0);

    act(&mut app, agent, AgentAction::MoveForward);

    let position = app.world().get::<Position>(agent).unwrap();
    assert_relative_eq!(position.position(), Vec2::new(0.0, 0.0));
}

#[test]
fn turn_left_and_right() {
    let mut app = make_app();
    let agent = spawn_agent(&mut app, Vec2::new(0.0, 0.0), 0.0);
    let turn_step = MovementParams::default().turn_step;

    act(&mut app, agent, AgentAction::TurnLeft);
    let position = app.world().get::<Position>(agent).unwrap();
    assert_relative_eq!(position.heading(), turn_step);
    assert_relative_eq!(position.position(), Vec2::ZERO);

    act(&mut app, agent, AgentAction::TurnRight);
    act(&mut app, agent, AgentAction::TurnRight);
    let position = app.world().get::<Position>(agent).unwrap();
    assert_relative_eq!(position.heading(), -turn_step, epsilon = 1e-6);
}

#[test]
fn no_pending_action() {
    let mut app = make_app();
    let agent = spawn_agent(&mut app, Vec2::new(2.0, 0.5), 0.3);

    app.world_mut().run_schedule(EngineStep);

    let position = app.world().get::<Position>(agent).unwrap();
    assert_eq!(*position, Position::new(Vec2::new(2.0, 0.5), 0.3));
    assert_eq!(app.world().resource::<EpisodeClock>().step_count(), 1);
}

const NONE: [(Vec2, f32); 0] = [];

#[test]
fn intersects_walls_and_colliders() {
    let room = Room::new(-1.0, 10.0, -1.0, 1.0);

    assert!(!intersects(&room, Vec2::new(0.0, 0.0), 0.4, NONE));
    assert!(intersects(&room, Vec2::new(0.0, 0.7), 0.4, NONE));
    assert!(intersects(&room, Vec2::new(9.7, 0.0), 0.4, NONE));
    assert!(intersects(
        &room,
        Vec2::new(0.0, 0.0),
        0.4,
        [(Vec2::new(0.5, 0.0), 0.2)]
    ));
    assert!(!intersects(
        &room,
        Vec2::new(0.0, 0.0),
        0.4,
        [(Vec2::new(0.1, 0.0), 0.0)]
    ));
}

fn make_app() -> App {
    let mut app = App::new();
    app.add_plugins(EnginePlugin {
        params: MovementParams::default(),
    });
    app.insert_resource(Room::new(-1.0, 10.0, -1.0, 1.0));
    app.insert_resource(EpisodeClock::new(100));
    app
}

fn spawn_agent(app: &mut App, position: Vec2, heading: f32) -> Entity {
    app.world_mut()
        .spawn((
            Agent,
            Position::new(position, heading),
            Collider::new(MovementParams::default().agent_radius),
        ))
        .id()
}

fn act(app: &mut App, agent: Entity, action: AgentAction) {
    app.world_mut().get_mut::<PendingAction>(agent).unwrap().0 = Some(action);
    app.world_mut().run_schedule(EngineStep);
}
