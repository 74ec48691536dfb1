use crate::core::component::{ReactContext, SimComponent};
use crate::core::config::Process;
use crate::core::cost::CostCategory;
use crate::core::event_log::EventKind;
use crate::core::types::{Activity, ComponentId, Dispatch, FollowUp, ItemId, SimTime};
use log::{trace, warn};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductionState {
    /// No tick has run yet
    Idle,
    Running,
    /// Inside a stoppage interval
    Stopped,
}

/// Converts materials into one product, all or nothing per tick
#[derive(Debug, Clone)]
pub struct Production {
    index: usize,
    process: Process,
    /// Units of each input one tick consumes, one entry per item
    requirements: Vec<(ItemId, u64)>,
    sales: ComponentId,
    setup_cost: f64,
    state: ProductionState,
    batches: u64,
    stoppages: u64,
}

impl Production {
    pub fn new(index: usize, process: Process, sales: ComponentId, setup_cost: f64) -> Self {
        let mut per_item: BTreeMap<ItemId, u64> = BTreeMap::new();
        for line in &process.inputs {
            let needed = per_item.entry(line.item).or_default();
            *needed = needed.saturating_add(line.quantity.saturating_mul(process.rate));
        }
        Self {
            index,
            requirements: per_item.into_iter().collect(),
            process,
            sales,
            setup_cost,
            state: ProductionState::Idle,
            batches: 0,
            stoppages: 0,
        }
    }

    pub fn state(&self) -> ProductionState {
        self.state
    }

    /// Successful ticks so far
    pub fn batches(&self) -> u64 {
        self.batches
    }

    /// Stoppage intervals begun so far
    pub fn stoppages(&self) -> u64 {
        self.stoppages
    }

    fn inputs_available(&self, ctx: &ReactContext<'_>) -> bool {
        self.requirements
            .iter()
            .all(|&(item, quantity)| ctx.inventory[item].on_hand >= quantity)
    }

    fn tick(&mut self, ctx: &mut ReactContext<'_>) -> Vec<FollowUp> {
        let mut follow_ups = Vec::new();
        let output = self.process.output;
        let rate = self.process.rate;

        if self.inputs_available(ctx) {
            for &(item, quantity) in &self.requirements {
                let consumed = ctx.inventory[item].consume(quantity);
                debug_assert!(consumed, "input {} short after availability check", item);
            }
            ctx.inventory[output].add_produced(rate);

            if self.state != ProductionState::Running {
                ctx.ledger.accrue(CostCategory::Setup, self.setup_cost);
            }
            ctx.ledger.accrue(CostCategory::Process, self.process.process_cost * rate as f64);
            ctx.log.record(
                ctx.now,
                EventKind::Produced {
                    process: self.index,
                    product: output,
                    quantity: rate,
                },
            );
            trace!("Process {} produced {} units of item {} at {}h", self.index, rate, output, ctx.now);
            self.state = ProductionState::Running;
            self.batches += 1;

            if ctx.inventory[output].backordered > 0 {
                follow_ups.push((Dispatch::new(self.sales, Activity::Reconcile), 0));
            }
        } else if self.state != ProductionState::Stopped {
            ctx.ledger.accrue(CostCategory::Stoppage, self.process.stoppage_cost);
            ctx.log.record(
                ctx.now,
                EventKind::ProductionStopped {
                    process: self.index,
                    product: output,
                },
            );
            trace!("Process {} stopped at {}h", self.index, ctx.now);
            self.state = ProductionState::Stopped;
            self.stoppages += 1;
        }

        follow_ups.push((
            Dispatch::new(self.component_id(), Activity::ProductionTick),
            self.process.tick_hours,
        ));
        follow_ups
    }
}

impl SimComponent for Production {
    fn component_id(&self) -> ComponentId {
        ComponentId::Production(self.index)
    }

    fn initial_activities(&self) -> Vec<(Activity, SimTime)> {
        vec![(Activity::ProductionTick, 0)]
    }

    fn react(&mut self, activity: Activity, ctx: &mut ReactContext<'_>) -> Vec<FollowUp> {
        match activity {
            Activity::ProductionTick => self.tick(ctx),
            other => {
                warn!("{} ignored unexpected activity {:?}", self.component_id(), other);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{BomLine, SimConfig};
    use crate::core::tests::support::World;

    fn reference_production() -> Production {
        let process = SimConfig::reference().processes[0].clone();
        Production::new(0, process, ComponentId::Sales(0), 1.0)
    }

    #[test]
    fn test_starved_tick_changes_no_inventory() {
        let mut world = World::reference();
        let mut production = reference_production();

        let follow_ups = production.react(Activity::ProductionTick, &mut world.ctx(0));
        assert_eq!(follow_ups, vec![(Dispatch::new(ComponentId::Production(0), Activity::ProductionTick), 1)]);
        assert_eq!(world.inventory[1].on_hand, 1);
        assert_eq!(world.inventory[0].on_hand, 0);
        assert_eq!(world.ledger.get(CostCategory::Stoppage), 2.0);
        assert_eq!(production.state(), ProductionState::Stopped);
    }

    #[test]
    fn test_stoppage_charged_once_per_interval() {
        let mut world = World::reference();
        let mut production = reference_production();

        for hour in 0..5 {
            production.react(Activity::ProductionTick, &mut world.ctx(hour));
        }
        assert_eq!(world.ledger.get(CostCategory::Stoppage), 2.0);
        assert_eq!(world.log.len(), 1);
        assert_eq!(production.stoppages(), 1);
    }

    #[test]
    fn test_full_batch_consumes_and_produces() {
        let mut world = World::reference();
        world.inventory[1].on_hand = 5;
        let mut production = reference_production();

        production.react(Activity::ProductionTick, &mut world.ctx(0));
        assert_eq!(world.inventory[1].on_hand, 3);
        assert_eq!(world.inventory[0].on_hand, 2);
        assert_eq!(world.ledger.get(CostCategory::Process), 2.0);
        assert_eq!(world.ledger.get(CostCategory::Setup), 1.0);

        production.react(Activity::ProductionTick, &mut world.ctx(1));
        // still running, so no second setup
        assert_eq!(world.ledger.get(CostCategory::Setup), 1.0);
        assert_eq!(production.batches(), 2);
    }

    #[test]
    fn test_partial_batches_never_run() {
        let mut world = World::reference();
        world.inventory[1].on_hand = 3;
        let mut production = reference_production();

        production.react(Activity::ProductionTick, &mut world.ctx(0));
        production.react(Activity::ProductionTick, &mut world.ctx(1));
        // 3 units cover one batch of 2; the leftover unit stays put
        assert_eq!(world.inventory[1].on_hand, 1);
        assert_eq!(world.inventory[0].on_hand, 2);
        assert_eq!(production.state(), ProductionState::Stopped);
    }

    #[test]
    fn test_repeated_input_lines_add_up() {
        let mut process = SimConfig::reference().processes[0].clone();
        process.inputs = vec![BomLine { item: 1, quantity: 1 }, BomLine { item: 1, quantity: 1 }];
        let mut production = Production::new(0, process, ComponentId::Sales(0), 1.0);
        let mut world = World::reference();
        world.inventory[1].on_hand = 2;

        // two lines of 1 at rate 2 need 4 units; 2 is not enough
        production.react(Activity::ProductionTick, &mut world.ctx(0));
        assert_eq!(world.inventory[1].on_hand, 2);
        assert_eq!(world.inventory[0].produced, 0);

        world.inventory[1].on_hand = 4;
        production.react(Activity::ProductionTick, &mut world.ctx(1));
        assert_eq!(world.inventory[1].on_hand, 0);
        assert_eq!(world.inventory[1].consumed, 4);
        assert_eq!(world.inventory[0].produced, 2);
    }

    #[test]
    fn test_setup_charged_again_after_stoppage() {
        let mut world = World::reference();
        let mut production = reference_production();

        production.react(Activity::ProductionTick, &mut world.ctx(0));
        world.inventory[1].on_hand = 2;
        production.react(Activity::ProductionTick, &mut world.ctx(1));
        production.react(Activity::ProductionTick, &mut world.ctx(2));
        world.inventory[1].on_hand = 2;
        production.react(Activity::ProductionTick, &mut world.ctx(3));

        assert_eq!(world.ledger.get(CostCategory::Setup), 2.0);
        assert_eq!(world.ledger.get(CostCategory::Stoppage), 4.0);
    }

    #[test]
    fn test_backlog_triggers_reconcile() {
        let mut world = World::reference();
        world.inventory[1].on_hand = 2;
        world.inventory[0].backordered = 1;
        let mut production = reference_production();

        let follow_ups = production.react(Activity::ProductionTick, &mut world.ctx(0));
        assert_eq!(follow_ups[0], (Dispatch::new(ComponentId::Sales(0), Activity::Reconcile), 0));
        assert_eq!(follow_ups.len(), 2);
    }
}
