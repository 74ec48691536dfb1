//! Control interface for an external decision-maker.
//!
//! [`InventoryEnv`] exposes the reset/step surface: each step advances the
//! engine by one simulated day, applies the ordering [`Decision`] and
//! returns the observation, the reward and a short trace of the event log.

pub mod decision;
pub mod environment;

pub use decision::{Decision, MaterialOrder};
pub use environment::{EnvState, InventoryEnv, Observation, StepOutcome};
