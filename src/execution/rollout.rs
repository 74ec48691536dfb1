use super::config::{ConcurrencyMode, RolloutConfig};
use super::policy::Policy;
use crate::core::config::SimConfig;
use crate::core::errors::EnvError;
use crate::env::{InventoryEnv, Observation};
use log::info;
use rayon::prelude::*;
use rayon::{ThreadPoolBuildError, ThreadPoolBuilder};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RolloutError {
    #[error(transparent)]
    Env(#[from] EnvError),
    #[error("failed to build rollout thread pool: {0}")]
    ThreadPool(#[from] ThreadPoolBuildError),
}

/// Outcome of one complete episode
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeSummary {
    pub seed: u64,
    pub steps: usize,
    pub total_reward: f64,
    pub daily_costs: Vec<f64>,
    pub final_observation: Observation,
    pub events_logged: usize,
}

/// Play one episode from reset to termination
pub fn run_episode<P: Policy>(config: &SimConfig, seed: u64, policy: &mut P) -> Result<EpisodeSummary, EnvError> {
    let mut env = InventoryEnv::new(config.clone())?;
    let mut observation = env.reset_with_seed(seed)?;
    let mut daily_costs = Vec::new();
    let mut total_reward = 0.0;

    loop {
        let decision = policy.act(&observation);
        let outcome = env.step(&decision)?;
        total_reward += outcome.reward;
        daily_costs.push(outcome.daily_cost.total);
        observation = outcome.observation;
        if outcome.terminated {
            break;
        }
    }

    let events_logged = env.simulation().map_or(0, |s| s.log().len());
    Ok(EpisodeSummary {
        seed,
        steps: daily_costs.len(),
        total_reward,
        daily_costs,
        final_observation: observation,
        events_logged,
    })
}

/// Evaluates a policy over many seeds
pub struct RolloutRunner {
    config: RolloutConfig,
}

impl RolloutRunner {
    pub fn new(config: RolloutConfig) -> Self {
        Self { config }
    }

    /// Run one episode per seed with a fresh policy from `make_policy`.
    ///
    /// Summaries come back in seed order whatever the concurrency mode.
    pub fn run<P, F>(
        &self,
        sim_config: &SimConfig,
        seeds: &[u64],
        make_policy: F,
    ) -> Result<Vec<EpisodeSummary>, RolloutError>
    where
        P: Policy,
        F: Fn(u64) -> P + Sync,
    {
        info!(
            "Running {} episodes ({:?}, pool size {:?})",
            seeds.len(),
            self.config.concurrency_mode,
            self.config.thread_pool_size
        );
        let play = |seed: u64| run_episode(sim_config, seed, &mut make_policy(seed));

        let summaries = match self.config.concurrency_mode {
            ConcurrencyMode::Sequential => seeds.iter().map(|&seed| play(seed)).collect::<Result<Vec<_>, _>>(),
            ConcurrencyMode::Rayon => {
                let parallel = || seeds.par_iter().map(|&seed| play(seed)).collect::<Result<Vec<_>, _>>();
                match self.config.thread_pool_size {
                    Some(size) => ThreadPoolBuilder::new().num_threads(size).build()?.install(parallel),
                    None => parallel(),
                }
            }
        };
        Ok(summaries?)
    }
}

/// Mean total reward over a batch; zero for an empty batch
pub fn mean_reward(summaries: &[EpisodeSummary]) -> f64 {
    if summaries.is_empty() {
        return 0.0;
    }
    summaries.iter().map(|s| s.total_reward).sum::<f64>() / summaries.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::distribution::Distribution;
    use crate::execution::policy::{ConstantOrderPolicy, RandomPolicy};

    fn stochastic_config() -> SimConfig {
        let mut config = SimConfig::reference();
        if let crate::core::config::ItemKind::Product(params) = &mut config.items[0].kind {
            params.demand = Distribution::Poisson { mean: 4.0 };
            params.order_cycle_days = 1;
        }
        config
    }

    #[test]
    fn test_episode_runs_to_horizon() {
        let mut policy = ConstantOrderPolicy { material: 0, quantity: 1 };
        let summary = run_episode(&SimConfig::reference(), 0, &mut policy).unwrap();
        assert_eq!(summary.steps, 14);
        assert!(summary.total_reward <= 0.0);
        assert_eq!(summary.daily_costs.len(), 14);
    }

    #[test]
    fn test_sequential_and_rayon_agree() {
        let config = stochastic_config();
        let seeds: Vec<u64> = (0..6).collect();
        let make_policy = |seed: u64| RandomPolicy::new(seed, 1, 1);

        let sequential = RolloutRunner::new(RolloutConfig::new())
            .run(&config, &seeds, make_policy)
            .unwrap();
        let parallel = RolloutRunner::new(
            RolloutConfig::new()
                .with_concurrency(ConcurrencyMode::Rayon)
                .with_thread_pool_size(2),
        )
        .run(&config, &seeds, make_policy)
        .unwrap();

        assert_eq!(sequential, parallel);
        let returned: Vec<u64> = parallel.iter().map(|s| s.seed).collect();
        assert_eq!(returned, seeds);
    }

    #[test]
    fn test_mean_reward() {
        assert_eq!(mean_reward(&[]), 0.0);
        let mut policy = ConstantOrderPolicy { material: 0, quantity: 1 };
        let summary = run_episode(&SimConfig::reference(), 0, &mut policy).unwrap();
        let batch = vec![summary.clone(), summary.clone()];
        assert_eq!(mean_reward(&batch), summary.total_reward);
    }
}
