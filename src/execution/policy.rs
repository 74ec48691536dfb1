//! Simple decision-makers for driving an [`InventoryEnv`](crate::env::InventoryEnv)
//! without a learning agent: baselines, smoke tests and the demo binary.

use crate::env::{Decision, Observation};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait Policy {
    fn act(&mut self, observation: &Observation) -> Decision;
}

impl<F> Policy for F
where
    F: FnMut(&Observation) -> Decision,
{
    fn act(&mut self, observation: &Observation) -> Decision {
        self(observation)
    }
}

/// Never orders
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOrderPolicy;

impl Policy for NoOrderPolicy {
    fn act(&mut self, _observation: &Observation) -> Decision {
        Decision::none()
    }
}

/// Orders the same quantity of one material every step
#[derive(Debug, Clone, Copy)]
pub struct ConstantOrderPolicy {
    pub material: usize,
    pub quantity: i64,
}

impl Policy for ConstantOrderPolicy {
    fn act(&mut self, _observation: &Observation) -> Decision {
        Decision::order(self.material, self.quantity)
    }
}

/// Orders when the observed level of `item` is at or below `reorder_point`
#[derive(Debug, Clone, Copy)]
pub struct ReorderPointPolicy {
    pub material: usize,
    /// Observation slot (item id) watched by the policy
    pub item: usize,
    pub reorder_point: u64,
    pub quantity: i64,
}

impl Policy for ReorderPointPolicy {
    fn act(&mut self, observation: &Observation) -> Decision {
        match observation.get(self.item) {
            Some(level) if *level <= self.reorder_point => Decision::order(self.material, self.quantity),
            _ => Decision::none(),
        }
    }
}

/// Uniformly random material and quantity in `0..=max_quantity`
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: StdRng,
    material_count: usize,
    max_quantity: u64,
}

impl RandomPolicy {
    pub fn new(seed: u64, material_count: usize, max_quantity: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            material_count,
            max_quantity,
        }
    }
}

impl Policy for RandomPolicy {
    fn act(&mut self, _observation: &Observation) -> Decision {
        if self.material_count == 0 {
            return Decision::none();
        }
        let material = self.rng.gen_range(0..self.material_count);
        let quantity = self.rng.gen_range(0..=self.max_quantity);
        Decision::order(material, quantity as i64)
    }
}
