//! Configuration for batch episode rollouts
//!
//! Episodes are independent simulations, so a batch can be evaluated
//! either in order on the calling thread or spread over a rayon pool.

use serde::{Deserialize, Serialize};

/// Enumeration of supported concurrency modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConcurrencyMode {
    /// Episodes run one after another on the calling thread
    #[default]
    Sequential,
    /// Episodes run concurrently on a rayon thread pool
    Rayon,
}

/// Configuration for rollout execution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloutConfig {
    /// The concurrency mode to use for execution
    pub concurrency_mode: ConcurrencyMode,
    /// Size of a dedicated thread pool; `None` uses rayon's global pool.
    /// Only relevant when concurrency_mode is Rayon
    pub thread_pool_size: Option<usize>,
}

impl RolloutConfig {
    /// Sequential mode with no thread pool
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_concurrency(mut self, mode: ConcurrencyMode) -> Self {
        self.concurrency_mode = mode;
        self
    }

    /// Only affects execution when concurrency_mode is Rayon
    pub fn with_thread_pool_size(mut self, size: usize) -> Self {
        self.thread_pool_size = Some(size);
        self
    }
}
