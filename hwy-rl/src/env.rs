use crate::{Action, Observation};

pub trait Environment {
    type Action: Action;
    type Observation: Observation;
    type Info;
    type Error;

    fn reset(&mut self, seed: Option<u64>) -> Result<Self::Observation, Self::Error>;
    fn step(
        &mut self,
        action: Self::Action,
    ) -> Result<Step<Self::Observation, Self::Action, Self::Info>, Self::Error>;
}

#[derive(Clone, Debug)]
pub struct Step<O, A, I> {
    pub observation: O,
    pub action: A,
    pub reward: f32,
    pub terminated: bool,
    pub truncated: bool,
    pub info: I,
}

impl<O, A, I> Step<O, A, I> {
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}
