use crate::core::component::ReactContext;
use crate::core::components::Supplier;
use crate::core::config::SimConfig;
use crate::core::cost::CostLedger;
use crate::core::event_log::EventLog;
use crate::core::inventory::InventoryRecord;
use crate::core::item_registry::ItemRegistry;
use crate::core::types::SimTime;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Standalone shared state for driving one component by hand
pub(crate) struct World {
    pub inventory: Vec<InventoryRecord>,
    pub suppliers: Vec<Supplier>,
    pub ledger: CostLedger,
    pub log: EventLog,
    pub rng: StdRng,
}

impl World {
    pub fn reference() -> Self {
        Self::from_config(&SimConfig::reference())
    }

    pub fn from_config(config: &SimConfig) -> Self {
        let registry = ItemRegistry::new(config.items.clone());
        let inventory = registry
            .iter()
            .map(|item| InventoryRecord::new(item.id, item.initial_level))
            .collect();
        let suppliers = registry
            .iter()
            .filter_map(|item| item.as_material().map(|params| Supplier::new(item.id, params).unwrap()))
            .collect();
        Self {
            inventory,
            suppliers,
            ledger: CostLedger::new(),
            log: EventLog::new(),
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    pub fn ctx(&mut self, now: SimTime) -> ReactContext<'_> {
        ReactContext {
            now,
            inventory: &mut self.inventory,
            suppliers: &self.suppliers,
            ledger: &mut self.ledger,
            log: &mut self.log,
            rng: &mut self.rng,
        }
    }
}
