pub mod core;
pub mod env;
pub mod execution;

// Re-export commonly used types
pub use crate::core::config::{BacklogPolicy, BomLine, Item, ItemKind, MaterialParams, Process, ProductParams, SimConfig};
pub use crate::core::cost::{CostCategory, DailyCost};
pub use crate::core::distribution::Distribution;
pub use crate::core::errors::{ConfigError, DecisionError, EnvError};
pub use crate::core::event_log::{EventKind, SimEvent};
pub use crate::core::simulation_engine::Simulation;
pub use crate::core::types::{ItemId, SimTime};
pub use crate::env::{Decision, EnvState, InventoryEnv, MaterialOrder, Observation, StepOutcome};
