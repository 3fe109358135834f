mod env;
mod rollout;
mod space;

pub use env::{Environment, Step};
pub use rollout::{Rollout, RolloutSummary};
pub use space::{Action, Model, Observation};
