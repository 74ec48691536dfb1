pub mod config;
pub mod policy;
pub mod rollout;

// Re-export commonly used types
pub use config::{ConcurrencyMode, RolloutConfig};
pub use policy::{ConstantOrderPolicy, NoOrderPolicy, Policy, RandomPolicy, ReorderPointPolicy};
pub use rollout::{mean_reward, run_episode, EpisodeSummary, RolloutError, RolloutRunner};
