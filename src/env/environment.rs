use super::decision::Decision;
use crate::core::config::SimConfig;
use crate::core::cost::DailyCost;
use crate::core::errors::{ConfigError, EnvError};
use crate::core::event_log::SimEvent;
use crate::core::simulation_engine::Simulation;
use log::{debug, info};

/// On-hand level of every item in id order, capped at the configured ceiling
pub type Observation = Vec<u64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvState {
    /// Constructed but never reset
    Uninitialized,
    /// Awaiting a decision
    Ready,
    /// Horizon reached
    Terminated,
}

/// Result of one simulated day
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub observation: Observation,
    /// Negated total cost of the day
    pub reward: f64,
    pub terminated: bool,
    /// Most recent event log entries, oldest first
    pub trace: Vec<SimEvent>,
    pub daily_cost: DailyCost,
}

/// Fixed-horizon environment driven one day at a time
pub struct InventoryEnv {
    config: SimConfig,
    simulation: Option<Simulation>,
    state: EnvState,
    episodes: u64,
}

impl InventoryEnv {
    /// Validate `config`; the first `reset` builds the simulation
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        // Building once surfaces distribution errors here rather than on reset
        Simulation::new(&config, config.seed)?;
        Ok(Self {
            config,
            simulation: None,
            state: EnvState::Uninitialized,
            episodes: 0,
        })
    }

    /// Start a new episode. Episode `k` is seeded with `seed + k`.
    pub fn reset(&mut self) -> Result<Observation, EnvError> {
        let seed = self.config.seed.wrapping_add(self.episodes);
        self.reset_with_seed(seed)
    }

    pub fn reset_with_seed(&mut self, seed: u64) -> Result<Observation, EnvError> {
        let simulation = Simulation::new(&self.config, seed)?;
        self.simulation = Some(simulation);
        self.state = EnvState::Ready;
        self.episodes += 1;
        info!("Episode {} reset with seed {}", self.episodes, seed);
        Ok(self.observation())
    }

    /// Advance one day, then apply `decision` and close the day's costs
    pub fn step(&mut self, decision: &Decision) -> Result<StepOutcome, EnvError> {
        match self.state {
            EnvState::Uninitialized => return Err(EnvError::NotReset),
            EnvState::Terminated => return Err(EnvError::Terminated),
            EnvState::Ready => {}
        }
        let simulation = self.simulation.as_mut().ok_or(EnvError::NotReset)?;

        // Rejected decisions leave the episode untouched
        let orders = decision.validate(simulation.material_count(), self.config.max_order_quantity)?;

        let target = simulation.now() + self.config.day_length;
        simulation.advance(target);
        for (material, quantity) in orders {
            simulation.order_material(material, quantity)?;
        }
        let daily_cost = simulation.close_day();

        let terminated = simulation.now() >= self.config.horizon;
        let observation = simulation.observe(self.config.observation_cap);
        let trace = simulation.log().tail(self.config.trace_len).to_vec();
        let reward = -daily_cost.total;
        debug!(
            "Time: {}h, Decision: {:?}, Observation: {:?}, Reward: {:.2}, Done: {}",
            simulation.now(),
            decision.orders,
            observation,
            reward,
            terminated
        );

        if terminated {
            self.state = EnvState::Terminated;
            info!(
                "Episode {} terminated at {}h, total cost {:.2}",
                self.episodes,
                simulation.now(),
                simulation.accountant().cumulative_total()
            );
        }

        Ok(StepOutcome {
            observation,
            reward,
            terminated,
            trace,
            daily_cost,
        })
    }

    /// Current observation; empty before the first reset
    pub fn observation(&self) -> Observation {
        self.simulation
            .as_ref()
            .map(|s| s.observe(self.config.observation_cap))
            .unwrap_or_default()
    }

    pub fn state(&self) -> EnvState {
        self.state
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn simulation(&self) -> Option<&Simulation> {
        self.simulation.as_ref()
    }

    /// Number of entries in every observation
    pub fn observation_len(&self) -> usize {
        self.config.items.len()
    }

    /// Number of materials a decision can address
    pub fn material_count(&self) -> usize {
        self.config.items.iter().filter(|item| item.is_material()).count()
    }

    /// Steps in one episode
    pub fn steps_per_episode(&self) -> u64 {
        self.config.horizon / self.config.day_length
    }
}
