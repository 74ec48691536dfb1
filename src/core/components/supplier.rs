use crate::core::config::MaterialParams;
use crate::core::distribution::Sampler;
use crate::core::errors::ConfigError;
use crate::core::types::{ItemId, SimTime};
use rand::rngs::StdRng;

/// Upstream source of one material; owns the lead-time distribution
#[derive(Debug, Clone)]
pub struct Supplier {
    material: ItemId,
    lead_time: Sampler,
}

impl Supplier {
    pub fn new(material: ItemId, params: &MaterialParams) -> Result<Self, ConfigError> {
        Ok(Self {
            material,
            lead_time: params.lead_time.sampler()?,
        })
    }

    pub fn material(&self) -> ItemId {
        self.material
    }

    /// Hours until an order placed now arrives
    pub fn draw_lead_time(&self, rng: &mut StdRng) -> SimTime {
        self.lead_time.sample(rng)
    }
}
