use super::supplier::Supplier;
use crate::core::component::{ReactContext, SimComponent};
use crate::core::config::MaterialParams;
use crate::core::cost::CostCategory;
use crate::core::event_log::EventKind;
use crate::core::types::{Activity, ComponentId, Dispatch, FollowUp, ItemId, Order, OrderId, SimTime};
use log::{debug, warn};
use std::collections::BTreeMap;

/// Places supplier orders for one material and books their arrival
#[derive(Debug, Clone)]
pub struct Procurement {
    index: usize,
    material: ItemId,
    supplier: usize,
    order_cost: f64,
    purchase_cost: f64,
    lot_size: Option<u64>,
    order_cycle: SimTime,
    pending: BTreeMap<OrderId, Order>,
    next_order_id: OrderId,
}

impl Procurement {
    pub fn new(
        index: usize,
        material: ItemId,
        supplier: usize,
        params: &MaterialParams,
        day_length: SimTime,
    ) -> Self {
        Self {
            index,
            material,
            supplier,
            order_cost: params.order_cost,
            purchase_cost: params.purchase_cost,
            lot_size: params.lot_size.filter(|lot| *lot > 0),
            order_cycle: params.order_cycle_days.saturating_mul(day_length),
            pending: BTreeMap::new(),
            next_order_id: 0,
        }
    }

    pub fn material(&self) -> ItemId {
        self.material
    }

    pub fn supplier_index(&self) -> usize {
        self.supplier
    }

    /// Orders placed but not yet arrived, oldest first
    pub fn pending_orders(&self) -> impl Iterator<Item = &Order> {
        self.pending.values()
    }

    /// Order `quantity` units from `supplier`.
    ///
    /// A zero quantity is a no-op. Otherwise the order is booked as
    /// in transit, the order cost accrues, and the returned follow-up
    /// completes the order once the drawn lead time has elapsed.
    pub fn order_material(
        &mut self,
        supplier: &Supplier,
        ctx: &mut ReactContext<'_>,
        quantity: u64,
    ) -> Option<FollowUp> {
        if quantity == 0 {
            return None;
        }

        let lead_time = supplier.draw_lead_time(ctx.rng);
        let order = Order {
            id: self.next_order_id,
            material: self.material,
            quantity,
            placed_at: ctx.now,
            arrives_at: ctx.now.saturating_add(lead_time),
        };
        self.next_order_id += 1;

        ctx.inventory[self.material].place_on_order(quantity);
        ctx.ledger.accrue(
            CostCategory::Order,
            self.order_cost + self.purchase_cost * quantity as f64,
        );
        ctx.log.record(
            ctx.now,
            EventKind::OrderPlaced {
                order_id: order.id,
                material: self.material,
                quantity,
                arrives_at: order.arrives_at,
            },
        );
        debug!(
            "Order #{} for {} units of item {} placed at {}h, arrives at {}h",
            order.id, quantity, self.material, order.placed_at, order.arrives_at
        );

        let arrival = Dispatch::new(self.component_id(), Activity::OrderArrival { order_id: order.id });
        self.pending.insert(order.id, order);
        Some((arrival, lead_time))
    }

    fn complete_order(&mut self, order_id: OrderId, ctx: &mut ReactContext<'_>) {
        let Some(order) = self.pending.remove(&order_id) else {
            warn!("Arrival for unknown order #{} of item {}", order_id, self.material);
            return;
        };

        ctx.inventory[self.material].receive(order.quantity);
        ctx.log.record(
            ctx.now,
            EventKind::MaterialArrived {
                order_id,
                material: self.material,
                quantity: order.quantity,
            },
        );
        debug!(
            "Order #{} arrived at {}h: {} units of item {}",
            order_id, ctx.now, order.quantity, self.material
        );
    }
}

impl SimComponent for Procurement {
    fn component_id(&self) -> ComponentId {
        ComponentId::Procurement(self.index)
    }

    fn initial_activities(&self) -> Vec<(Activity, SimTime)> {
        match self.lot_size {
            Some(_) => vec![(Activity::Replenishment, 0)],
            None => Vec::new(),
        }
    }

    fn react(&mut self, activity: Activity, ctx: &mut ReactContext<'_>) -> Vec<FollowUp> {
        match activity {
            Activity::OrderArrival { order_id } => {
                self.complete_order(order_id, ctx);
                Vec::new()
            }
            Activity::Replenishment => {
                let Some(lot_size) = self.lot_size else {
                    return Vec::new();
                };
                let mut follow_ups = Vec::new();
                let suppliers = ctx.suppliers;
                match suppliers.get(self.supplier) {
                    Some(supplier) => follow_ups.extend(self.order_material(supplier, ctx, lot_size)),
                    None => warn!("No supplier {} for item {}", self.supplier, self.material),
                }
                follow_ups.push((
                    Dispatch::new(self.component_id(), Activity::Replenishment),
                    self.order_cycle,
                ));
                follow_ups
            }
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

    fn reference_params() -> MaterialParams {
        SimConfig::reference().items[1].as_material().unwrap().clone()
    }

    #[test]
    fn test_zero_quantity_is_noop() {
        let mut world = World::reference();
        let mut procurement = Procurement::new(0, 1, 0, &reference_params(), 24);
        let supplier = world.suppliers[0].clone();

        let follow_up = procurement.order_material(&supplier, &mut world.ctx(0), 0);
        assert!(follow_up.is_none());
        assert_eq!(world.inventory[1].in_transit, 0);
        assert!(world.ledger.is_zero());
        assert!(world.log.is_empty());
    }

    #[test]
    fn test_order_books_transit_and_cost() {
        let mut world = World::reference();
        let mut procurement = Procurement::new(0, 1, 0, &reference_params(), 24);
        let supplier = world.suppliers[0].clone();

        let (dispatch, delay) = procurement.order_material(&supplier, &mut world.ctx(24), 3).unwrap();
        assert_eq!(delay, 2);
        assert_eq!(dispatch.target, ComponentId::Procurement(0));
        assert_eq!(dispatch.activity, Activity::OrderArrival { order_id: 0 });
        assert_eq!(world.inventory[1].in_transit, 3);
        assert_eq!(world.inventory[1].on_hand, 1);
        // 1 per order plus 2 per unit
        assert_eq!(world.ledger.get(CostCategory::Order), 7.0);
        assert_eq!(procurement.pending_orders().count(), 1);
    }

    #[test]
    fn test_out_of_range_lead_time_saturates() {
        let mut params = reference_params();
        params.lead_time = Distribution::Normal {
            mean: 1e20,
            std_dev: 1.0,
        };
        let supplier = Supplier::new(1, &params).unwrap();
        let mut world = World::reference();
        let mut procurement = Procurement::new(0, 1, 0, &params, 24);

        let (_, delay) = procurement.order_material(&supplier, &mut world.ctx(24), 1).unwrap();
        assert_eq!(delay, SimTime::MAX);
        assert_eq!(procurement.pending_orders().next().map(|o| o.arrives_at), Some(SimTime::MAX));
        assert_eq!(world.inventory[1].in_transit, 1);
    }

    #[test]
    fn test_arrival_moves_transit_to_stock() {
        let mut world = World::reference();
        let mut procurement = Procurement::new(0, 1, 0, &reference_params(), 24);
        let supplier = world.suppliers[0].clone();

        let (dispatch, _) = procurement.order_material(&supplier, &mut world.ctx(24), 2).unwrap();
        let follow_ups = procurement.react(dispatch.activity, &mut world.ctx(26));
        assert!(follow_ups.is_empty());
        assert_eq!(world.inventory[1].in_transit, 0);
        assert_eq!(world.inventory[1].on_hand, 3);
        assert!(world.inventory[1].is_balanced());
        assert!(matches!(
            world.log.entries().last().map(|e| &e.kind),
            Some(EventKind::MaterialArrived { quantity: 2, .. })
        ));
    }

    #[test]
    fn test_replenishment_orders_lot_and_reschedules() {
        let mut params = reference_params();
        params.lot_size = Some(4);
        let mut world = World::reference();
        let mut procurement = Procurement::new(0, 1, 0, &params, 24);
        assert_eq!(procurement.initial_activities(), vec![(Activity::Replenishment, 0)]);

        let follow_ups = procurement.react(Activity::Replenishment, &mut world.ctx(0));
        assert_eq!(follow_ups.len(), 2);
        assert_eq!(follow_ups[0].1, 2);
        assert_eq!(follow_ups[1], (Dispatch::new(ComponentId::Procurement(0), Activity::Replenishment), 24));
        assert_eq!(world.inventory[1].in_transit, 4);
    }

    #[test]
    fn test_no_standing_order_without_lot_size() {
        let procurement = Procurement::new(0, 1, 0, &reference_params(), 24);
        assert!(procurement.initial_activities().is_empty());
    }
}
