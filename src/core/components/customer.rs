use crate::core::component::{ReactContext, SimComponent};
use crate::core::config::ProductParams;
use crate::core::distribution::Sampler;
use crate::core::errors::ConfigError;
use crate::core::types::{Activity, ComponentId, DemandEvent, DemandId, Dispatch, FollowUp, ItemId, SimTime};
use log::{debug, trace, warn};

/// Generates demand for one product on its order cycle
#[derive(Debug, Clone)]
pub struct Customer {
    index: usize,
    product: ItemId,
    order_cycle: SimTime,
    due_offset: SimTime,
    demand: Sampler,
    next_demand_id: DemandId,
}

impl Customer {
    pub fn new(
        index: usize,
        product: ItemId,
        params: &ProductParams,
        day_length: SimTime,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            index,
            product,
            order_cycle: params.order_cycle_days.saturating_mul(day_length),
            due_offset: params.due_date_days.saturating_mul(day_length),
            demand: params.demand.sampler()?,
            next_demand_id: 0,
        })
    }

    pub fn product(&self) -> ItemId {
        self.product
    }

    fn place_order(&mut self, ctx: &mut ReactContext<'_>) -> Vec<FollowUp> {
        let mut follow_ups = Vec::new();
        let quantity = self.demand.sample(ctx.rng);

        if quantity > 0 {
            let demand = DemandEvent {
                id: self.next_demand_id,
                product: self.product,
                quantity,
                due_date: ctx.now.saturating_add(self.due_offset),
            };
            self.next_demand_id += 1;
            debug!(
                "Customer {} orders {} units of item {} at {}h, due {}h",
                self.index, quantity, self.product, ctx.now, demand.due_date
            );
            follow_ups.push((Dispatch::new(ComponentId::Sales(self.index), Activity::Demand(demand)), 0));
        } else {
            trace!("Customer {} placed no order at {}h", self.index, ctx.now);
        }

        follow_ups.push((
            Dispatch::new(self.component_id(), Activity::CustomerCycle),
            self.order_cycle,
        ));
        follow_ups
    }
}

impl SimComponent for Customer {
    fn component_id(&self) -> ComponentId {
        ComponentId::Customer(self.index)
    }

    fn initial_activities(&self) -> Vec<(Activity, SimTime)> {
        vec![(Activity::CustomerCycle, 0)]
    }

    fn react(&mut self, activity: Activity, ctx: &mut ReactContext<'_>) -> Vec<FollowUp> {
        match activity {
            Activity::CustomerCycle => self.place_order(ctx),
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
    use crate::core::config::SimConfig;
    use crate::core::distribution::Distribution;
    use crate::core::tests::support::World;

    fn params_with_demand(demand: Distribution) -> ProductParams {
        let mut params = SimConfig::reference().items[0].as_product().unwrap().clone();
        params.demand = demand;
        params
    }

    #[test]
    fn test_demand_due_after_offset() {
        let mut world = World::reference();
        let mut customer = Customer::new(0, 0, &params_with_demand(Distribution::fixed(3)), 24).unwrap();

        let follow_ups = customer.react(Activity::CustomerCycle, &mut world.ctx(48));
        assert_eq!(follow_ups.len(), 2);
        let expected = DemandEvent {
            id: 0,
            product: 0,
            quantity: 3,
            due_date: 48 + 7 * 24,
        };
        assert_eq!(
            follow_ups[0],
            (Dispatch::new(ComponentId::Sales(0), Activity::Demand(expected)), 0)
        );
        assert_eq!(
            follow_ups[1],
            (Dispatch::new(ComponentId::Customer(0), Activity::CustomerCycle), 7 * 24)
        );
    }

    #[test]
    fn test_zero_draw_only_reschedules() {
        let mut world = World::reference();
        let mut customer = Customer::new(0, 0, &params_with_demand(Distribution::fixed(0)), 24).unwrap();

        let follow_ups = customer.react(Activity::CustomerCycle, &mut world.ctx(0));
        assert_eq!(follow_ups.len(), 1);
        assert_eq!(follow_ups[0].0.activity, Activity::CustomerCycle);
    }

    #[test]
    fn test_demand_ids_increase() {
        let mut world = World::reference();
        let mut customer = Customer::new(0, 0, &params_with_demand(Distribution::fixed(1)), 24).unwrap();

        let ids: Vec<DemandId> = (0..3)
            .filter_map(|cycle| {
                let follow_ups = customer.react(Activity::CustomerCycle, &mut world.ctx(cycle * 168));
                match &follow_ups[0].0.activity {
                    Activity::Demand(demand) => Some(demand.id),
                    _ => None,
                }
            })
            .collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }
}
