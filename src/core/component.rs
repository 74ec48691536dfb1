use super::components::supplier::Supplier;
use super::cost::CostLedger;
use super::event_log::EventLog;
use super::inventory::InventoryRecord;
use super::types::{Activity, ComponentId, FollowUp, SimTime};
use rand::rngs::StdRng;

/// Shared simulation state lent to the component currently reacting.
///
/// Only one component holds a context at a time, so every mutation of
/// inventory, ledger and log happens inside exactly one activity.
pub struct ReactContext<'a> {
    pub now: SimTime,
    pub inventory: &'a mut [InventoryRecord],
    pub suppliers: &'a [Supplier],
    pub ledger: &'a mut CostLedger,
    pub log: &'a mut EventLog,
    pub rng: &'a mut StdRng,
}

pub trait SimComponent {
    fn component_id(&self) -> ComponentId;

    /// Activities (with absolute trigger times) to seed the scheduler with
    fn initial_activities(&self) -> Vec<(Activity, SimTime)> {
        Vec::new()
    }

    /// Handle one activity, returning follow-ups with their delays
    fn react(&mut self, activity: Activity, ctx: &mut ReactContext<'_>) -> Vec<FollowUp>;
}
