#[cfg(test)]
mod tests;

use hwy_engine::{EngineError, Simulation};
use hwy_rl::{Environment, Step};
use rand::{SeedableRng, rngs::SmallRng};
use tracing::{debug, info, warn};

use crate::{
    builder::{BuiltWorld, build_world},
    config::TaskConfig,
    error::TaskError,
    evaluator::{EpisodeState, StepEvaluator, Transition},
    section::SectionPlan,
    signal::TaskSignal,
    space::{HallwayAction, HallwayObservation},
};

pub struct HallwayEnv {
    config: TaskConfig,
    rng: SmallRng,
    signal: TaskSignal,
    sim: Simulation,
    plan: SectionPlan,
    evaluator: StepEvaluator,
    state: EpisodeState,
    world: Option<BuiltWorld>,
    episodes: u64,
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct StepInfo {
    pub step_count: u32,
    pub section: usize,
    pub motor_gain: f32,
    pub total_length: f32,
    pub crossed_threshold: bool,
    pub out_of_bounds: bool,
}

impl HallwayEnv {
    pub fn new(config: TaskConfig, seed: u64) -> Result<Self, TaskError> {
        config.validate()?;

        let mut rng = SmallRng::seed_from_u64(seed);
        let signal = config.signal.resolve(&mut rng);
        let plan = SectionPlan::generate(&config.layout, &mut rng)?;
        let evaluator = StepEvaluator::new(&config, plan.total_length(), signal);

        info!(
            "Created hallway task: is_rewarded={} is_ambiguous={} total_length={}",
            signal.is_rewarded,
            signal.is_ambiguous,
            plan.total_length()
        );
        log_plan(&plan);

        Ok(HallwayEnv {
            sim: Simulation::new(config.movement),
            config,
            rng,
            signal,
            plan,
            evaluator,
            state: EpisodeState::default(),
            world: None,
            episodes: 0,
        })
    }

    pub fn config(&self) -> &TaskConfig {
        &self.config
    }

    pub fn signal(&self) -> TaskSignal {
        self.signal
    }

    pub fn plan(&self) -> &SectionPlan {
        &self.plan
    }

    pub fn state(&self) -> &EpisodeState {
        &self.state
    }

    pub fn world(&self) -> Option<&BuiltWorld> {
        self.world.as_ref()
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    fn observe(&self) -> Result<HallwayObservation, TaskError> {
        Ok(self.sim.agent_position()?.into())
    }

    fn info(&self, step_count: u32, x: f32) -> StepInfo {
        StepInfo {
            step_count,
            section: self.plan.section_at(x),
            motor_gain: self.plan.motor_gain_at(x),
            total_length: self.plan.total_length(),
            ..StepInfo::default()
        }
    }
}

impl Environment for HallwayEnv {
    type Action = HallwayAction;
    type Observation = HallwayObservation;
    type Info = StepInfo;
    type Error = TaskError;

    fn reset(&mut self, seed: Option<u64>) -> Result<HallwayObservation, TaskError> {
        if let Some(seed) = seed {
            self.rng = SmallRng::seed_from_u64(seed);
        }

        let regenerate = seed.is_some() || self.episodes > 0;
        if regenerate && !self.config.reset_keep_same_length {
            self.plan = SectionPlan::generate(&self.config.layout, &mut self.rng)?;
            self.evaluator =
                StepEvaluator::new(&self.config, self.plan.total_length(), self.signal);
            log_plan(&self.plan);
        }

        self.world = Some(build_world(
            &mut self.sim,
            &self.config,
            &self.plan,
            self.signal,
            &mut self.rng,
        )?);
        self.state = EpisodeState::default();
        self.episodes += 1;

        self.observe()
    }

    fn step(
        &mut self,
        action: HallwayAction,
    ) -> Result<Step<HallwayObservation, HallwayAction, StepInfo>, TaskError> {
        let world = self.world.as_ref().ok_or(EngineError::NoAgent)?;
        let agent = world.agent;
        let goal = world.goal;

        if self.state.is_finished() {
            warn!("Stepping an episode that has already ended; call reset first");
            let observation = self.observe()?;
            let clock = self.sim.clock();
            return Ok(Step {
                info: self.info(clock.step_count(), observation.position.x),
                observation,
                action,
                reward: 0.0,
                terminated: self.state.is_terminated(),
                truncated: self.state.is_truncated(),
            });
        }

        let old_x = self.sim.agent_position()?.position().x;
        let tick = self.sim.step(action.into())?;
        let observation = self.observe()?;
        let new_x = observation.position.x;

        let near_goal = match goal {
            Some(goal) => self.sim.near(agent, goal)?,
            None => false,
        };

        let evaluation = self.evaluator.evaluate(
            &mut self.state,
            Transition {
                old_x,
                new_x,
                near_goal,
                step_count: tick.step_count,
                truncated: tick.truncated,
            },
        );

        if evaluation.terminated {
            debug!(
                "Episode terminated at step {} with reward {}",
                tick.step_count,
                self.state.total_reward()
            );
        }

        Ok(Step {
            observation,
            action,
            reward: evaluation.reward,
            terminated: evaluation.terminated,
            truncated: tick.truncated,
            info: StepInfo {
                crossed_threshold: evaluation.crossed_threshold,
                out_of_bounds: evaluation.out_of_bounds,
                ..self.info(tick.step_count, new_x)
            },
        })
    }
}

fn log_plan(plan: &SectionPlan) {
    debug!("Section boundaries {:?}", plan.boundaries());
    debug!(
        "Section lengths {:?}",
        plan.sections()
            .iter()
            .map(|section| section.length)
            .collect::<Vec<_>>()
    );
    debug!(
        "Section motor gains {:?}",
        plan.sections()
            .iter()
            .map(|section| section.motor_gain)
            .collect::<Vec<_>>()
    );
}
