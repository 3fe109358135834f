use approx::assert_relative_eq;
use hwy_engine::EngineError;
use hwy_rl::Environment;

use crate::{
    config::{Layout, TaskConfig},
    env::HallwayEnv,
    error::TaskError,
    signal::TaskSignal,
    space::HallwayAction,
};

#[test]
fn walk_to_goal() {
    let config = TaskConfig {
        layout: Layout::Explicit {
            num_sections: 3,
            sections_length: vec![5, 5, 10],
            motor_gains: vec![1.0, 1.0, 1.0],
            random_gain: false,
        },
        max_episode_steps: 1000,
        ..TaskConfig::control()
    };
    let mut env = HallwayEnv::new(config, 3).unwrap();
    env.reset(None).unwrap();

    let mut total = 0.0;
    for _ in 0..1000 {
        let step = env.step(HallwayAction::MoveForward).unwrap();
        total += step.reward;
        if step.terminated {
            assert!(step.reward > 0.8 && step.reward < 1.0, "{}", step.reward);
            assert!(step.observation.position.x > 15.0);
            assert_eq!(step.info.section, 2);
            assert!(env.state().is_terminated());
            assert_relative_eq!(env.state().total_reward(), total);
            return;
        }
        assert_eq!(step.reward, 0.0);
    }

    panic!("agent never reached the goal");
}

#[test]
fn walk_to_goal_at_high_gain() {
    for seed in 0..40 {
        let config = TaskConfig {
            layout: Layout::Explicit {
                num_sections: 3,
                sections_length: vec![5, 5, 10],
                motor_gains: vec![1.0, 1.0, 3.0],
                random_gain: false,
            },
            max_episode_steps: 1000,
            ..TaskConfig::control()
        };
        let mut env = HallwayEnv::new(config, seed).unwrap();
        env.reset(None).unwrap();

        let (rewards, last) = walk(&mut env);

        assert!(last.terminated, "seed {seed} stalled before the goal");
        assert!(!last.truncated, "seed {seed}");
        assert!(rewards.last().is_some_and(|&reward| reward > 0.0));
    }
}

#[test]
fn rewarded_crossing_pays_once() {
    let mut env = HallwayEnv::new(short_signalled(TaskSignal::REWARDED), 0).unwrap();
    env.reset(None).unwrap();

    let (rewards, last) = walk(&mut env);

    assert_eq!(rewards.iter().filter(|&&reward| reward > 0.0).count(), 1);
    let crossing = rewards.iter().position(|&reward| reward > 0.0).unwrap();
    let expected = 1.0 - 0.2 * ((crossing + 1) as f32 / 50000.0);
    assert_relative_eq!(rewards[crossing], expected);

    assert!(last.terminated);
    assert!(last.info.out_of_bounds);
    assert!(last.observation.position.x > 20.0);
}

#[test]
fn unrewarded_crossing_pays_nothing() {
    let mut env = HallwayEnv::new(short_signalled(TaskSignal::new(false, false)), 0).unwrap();
    env.reset(None).unwrap();

    let (rewards, last) = walk(&mut env);

    assert!(rewards.iter().all(|&reward| reward == 0.0));
    assert!(last.terminated);
    assert_eq!(env.state().total_reward(), 0.0);
}

#[test]
fn keep_same_length() {
    let config = TaskConfig {
        reset_keep_same_length: true,
        ..TaskConfig::sectioned()
    };
    let mut env = HallwayEnv::new(config, 11).unwrap();
    let plan = env.plan().clone();

    for _ in 0..5 {
        env.reset(None).unwrap();
        assert_eq!(env.plan(), &plan);
    }
}

#[test]
fn regenerate_on_reset() {
    let mut env = HallwayEnv::new(TaskConfig::sectioned(), 11).unwrap();

    env.reset(None).unwrap();
    let first = env.plan().clone();
    let mut changed = false;
    for _ in 0..10 {
        env.reset(None).unwrap();
        changed |= env.plan() != &first;
    }

    assert!(changed);
}

#[test]
fn reproducible() {
    let run = |seed| {
        let mut env = HallwayEnv::new(TaskConfig::sectioned(), seed).unwrap();
        let mut observations = vec![env.reset(None).unwrap()];
        for action in [
            HallwayAction::MoveForward,
            HallwayAction::TurnLeft,
            HallwayAction::MoveForward,
            HallwayAction::TurnRight,
        ] {
            observations.push(env.step(action).unwrap().observation);
        }
        (env.plan().clone(), observations)
    };

    assert_eq!(run(5), run(5));
}

#[test]
fn reset_with_seed() {
    let mut env = HallwayEnv::new(TaskConfig::sectioned(), 1).unwrap();

    env.reset(None).unwrap();
    let first = env.reset(Some(99)).unwrap();
    let plan = env.plan().clone();
    env.reset(None).unwrap();
    let second = env.reset(Some(99)).unwrap();

    assert_eq!(first, second);
    assert_eq!(env.plan(), &plan);
}

#[test]
fn seeded_first_reset_determines_plan() {
    let mut first = HallwayEnv::new(TaskConfig::sectioned(), 1).unwrap();
    let mut second = HallwayEnv::new(TaskConfig::sectioned(), 2).unwrap();

    let a = first.reset(Some(99)).unwrap();
    let b = second.reset(Some(99)).unwrap();

    assert_eq!(first.plan(), second.plan());
    assert_eq!(a, b);
}

#[test]
fn seeded_reset_keeps_same_length() {
    let config = TaskConfig {
        reset_keep_same_length: true,
        ..TaskConfig::sectioned()
    };
    let mut env = HallwayEnv::new(config, 1).unwrap();
    let plan = env.plan().clone();

    env.reset(Some(99)).unwrap();

    assert_eq!(env.plan(), &plan);
}

#[test]
fn invalid_config() {
    let config = TaskConfig {
        layout: Layout::Explicit {
            num_sections: 0,
            sections_length: vec![],
            motor_gains: vec![],
            random_gain: false,
        },
        ..TaskConfig::control()
    };

    assert!(matches!(
        HallwayEnv::new(config, 0),
        Err(TaskError::InvalidConfiguration(_))
    ));
}

#[test]
fn step_before_reset() {
    let mut env = HallwayEnv::new(TaskConfig::control(), 0).unwrap();

    assert!(matches!(
        env.step(HallwayAction::MoveForward),
        Err(TaskError::Engine(EngineError::NoAgent))
    ));
}

#[test]
fn truncation() {
    let config = TaskConfig {
        max_episode_steps: 3,
        ..TaskConfig::control()
    };
    let mut env = HallwayEnv::new(config, 0).unwrap();
    env.reset(None).unwrap();

    assert!(!env.step(HallwayAction::TurnLeft).unwrap().truncated);
    assert!(!env.step(HallwayAction::TurnLeft).unwrap().truncated);
    let last = env.step(HallwayAction::TurnLeft).unwrap();
    assert!(last.truncated);
    assert!(!last.terminated);
    assert_eq!(last.info.step_count, 3);

    let after = env.step(HallwayAction::MoveForward).unwrap();
    assert!(after.truncated);
    assert!(!after.terminated);
    assert_eq!(after.reward, 0.0);
    assert_eq!(after.observation, last.observation);
    assert_eq!(after.info.step_count, 3);
}

#[test]
fn step_after_termination() {
    let mut env = HallwayEnv::new(short_signalled(TaskSignal::REWARDED), 0).unwrap();
    env.reset(None).unwrap();
    let (_, last) = walk(&mut env);

    let after = env.step(HallwayAction::MoveForward).unwrap();

    assert_eq!(after.reward, 0.0);
    assert!(after.terminated);
    assert_eq!(after.observation, last.observation);
    assert_eq!(after.info.step_count, last.info.step_count);

    let observation = env.reset(None).unwrap();
    assert!(observation.position.x < 1.0);
    assert!(!env.state().is_terminated());
}

fn short_signalled(signal: TaskSignal) -> TaskConfig {
    TaskConfig {
        layout: Layout::Fixed { total_length: 20 },
        ..TaskConfig::signalled().with_signal(signal)
    }
}

type HallwayStep = hwy_rl::Step<
    crate::space::HallwayObservation,
    HallwayAction,
    crate::env::StepInfo,
>;

fn walk(env: &mut HallwayEnv) -> (Vec<f32>, HallwayStep) {
    let mut rewards = Vec::new();
    loop {
        let step = env.step(HallwayAction::MoveForward).unwrap();
        rewards.push(step.reward);
        if step.done() {
            return (rewards, step);
        }
        assert!(rewards.len() < 1000, "episode never ended");
    }
}
