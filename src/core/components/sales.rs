use crate::core::component::{ReactContext, SimComponent};
use crate::core::config::{BacklogPolicy, ProductParams};
use crate::core::cost::CostCategory;
use crate::core::event_log::EventKind;
use crate::core::types::{Activity, ComponentId, DemandEvent, DemandId, Dispatch, FollowUp, ItemId, SimTime};
use log::{debug, warn};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
struct OpenDemand {
    id: DemandId,
    remaining: u64,
    due_date: SimTime,
}

/// Fulfils demand for one product from stock, oldest demand first.
///
/// The queue holds every demand with units still owed; its total is
/// mirrored into the product's `backordered` level after each change.
#[derive(Debug, Clone)]
pub struct Sales {
    index: usize,
    product: ItemId,
    delivery_cost: f64,
    shortage_cost: f64,
    policy: BacklogPolicy,
    backlog: VecDeque<OpenDemand>,
}

impl Sales {
    pub fn new(index: usize, product: ItemId, params: &ProductParams, policy: BacklogPolicy) -> Self {
        Self {
            index,
            product,
            delivery_cost: params.delivery_cost,
            shortage_cost: params.shortage_cost,
            policy,
            backlog: VecDeque::new(),
        }
    }

    pub fn product(&self) -> ItemId {
        self.product
    }

    /// Units still owed across all open demand
    pub fn outstanding(&self) -> u64 {
        self.backlog.iter().map(|d| d.remaining).sum()
    }

    /// Ids of open demands, oldest first
    pub fn open_demand_ids(&self) -> Vec<DemandId> {
        self.backlog.iter().map(|d| d.id).collect()
    }

    fn remaining_for(&self, id: DemandId) -> u64 {
        self.backlog.iter().find(|d| d.id == id).map_or(0, |d| d.remaining)
    }

    fn accept(&mut self, demand: DemandEvent, ctx: &mut ReactContext<'_>) -> Vec<FollowUp> {
        ctx.log.record(
            ctx.now,
            EventKind::DemandReceived {
                demand_id: demand.id,
                product: self.product,
                quantity: demand.quantity,
                due_date: demand.due_date,
            },
        );
        self.backlog.push_back(OpenDemand {
            id: demand.id,
            remaining: demand.quantity,
            due_date: demand.due_date,
        });

        self.ship_from_stock(ctx);

        let unmet = self.remaining_for(demand.id);
        if unmet > 0 {
            ctx.log.record(
                ctx.now,
                EventKind::Backordered {
                    demand_id: demand.id,
                    product: self.product,
                    quantity: unmet,
                },
            );
            debug!(
                "{} units of item {} backordered at {}h for demand #{}",
                unmet, self.product, ctx.now, demand.id
            );
        }

        self.enforce_cap(ctx);
        self.sync_backorders(ctx);

        if self.remaining_for(demand.id) == 0 {
            return Vec::new();
        }
        vec![(
            Dispatch::new(self.component_id(), Activity::DueDate { demand_id: demand.id }),
            demand.due_date.saturating_sub(ctx.now),
        )]
    }

    /// Ship on-hand stock to the oldest open demand until either runs out
    fn ship_from_stock(&mut self, ctx: &mut ReactContext<'_>) {
        while let Some(front) = self.backlog.front_mut() {
            let shipped = ctx.inventory[self.product].ship(front.remaining);
            if shipped == 0 {
                break;
            }
            front.remaining -= shipped;
            ctx.ledger.accrue(CostCategory::Delivery, self.delivery_cost * shipped as f64);
            ctx.log.record(
                ctx.now,
                EventKind::Shipped {
                    demand_id: front.id,
                    product: self.product,
                    quantity: shipped,
                    late: ctx.now > front.due_date,
                },
            );

            if front.remaining > 0 {
                break;
            }
            self.backlog.pop_front();
        }
    }

    fn enforce_cap(&mut self, ctx: &mut ReactContext<'_>) {
        let BacklogPolicy::Capped { max_units } = self.policy else {
            return;
        };
        let mut excess = self.outstanding().saturating_sub(max_units);
        while excess > 0 {
            let Some(newest) = self.backlog.back_mut() else {
                break;
            };
            let dropped = excess.min(newest.remaining);
            newest.remaining -= dropped;
            excess -= dropped;
            let id = newest.id;
            if newest.remaining == 0 {
                self.backlog.pop_back();
            }
            self.record_lost(id, dropped, ctx);
        }
    }

    fn record_lost(&mut self, demand_id: DemandId, quantity: u64, ctx: &mut ReactContext<'_>) {
        if quantity == 0 {
            return;
        }
        ctx.inventory[self.product].record_lost(quantity);
        ctx.ledger.accrue(CostCategory::Shortage, self.shortage_cost * quantity as f64);
        ctx.log.record(
            ctx.now,
            EventKind::DemandLost {
                demand_id,
                product: self.product,
                quantity,
            },
        );
        debug!("{} units of item {} lost from demand #{}", quantity, self.product, demand_id);
    }

    fn check_due(&mut self, demand_id: DemandId, ctx: &mut ReactContext<'_>) {
        let Some(position) = self.backlog.iter().position(|d| d.id == demand_id) else {
            return;
        };

        match self.policy {
            BacklogPolicy::ExpireAtDueDate => {
                if let Some(expired) = self.backlog.remove(position) {
                    self.record_lost(expired.id, expired.remaining, ctx);
                }
            }
            BacklogPolicy::Unbounded | BacklogPolicy::Capped { .. } => {
                ctx.log.record(
                    ctx.now,
                    EventKind::DemandOverdue {
                        demand_id,
                        product: self.product,
                        outstanding: self.backlog[position].remaining,
                    },
                );
            }
        }
        self.sync_backorders(ctx);
    }

    fn sync_backorders(&self, ctx: &mut ReactContext<'_>) {
        ctx.inventory[self.product].backordered = self.outstanding();
    }
}

impl SimComponent for Sales {
    fn component_id(&self) -> ComponentId {
        ComponentId::Sales(self.index)
    }

    fn react(&mut self, activity: Activity, ctx: &mut ReactContext<'_>) -> Vec<FollowUp> {
        match activity {
            Activity::Demand(demand) => self.accept(demand, ctx),
            Activity::Reconcile => {
                self.ship_from_stock(ctx);
                self.sync_backorders(ctx);
                Vec::new()
            }
            Activity::DueDate { demand_id } => {
                self.check_due(demand_id, ctx);
                Vec::new()
            }
            other => {
                warn!("{} ignored unexpected activity {:?}", self.component_id(), other);
                Vec::new()
            }
        }
    }
}
