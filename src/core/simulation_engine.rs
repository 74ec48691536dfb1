use super::component::{ReactContext, SimComponent};
use super::components::{Customer, Procurement, Production, Sales, Supplier};
use super::config::{ItemKind, SimConfig};
use super::cost::{CostAccountant, CostCategory, CostLedger, DailyCost};
use super::errors::{ConfigError, DecisionError};
use super::event_log::EventLog;
use super::event_scheduler::EventScheduler;
use super::inventory::InventoryRecord;
use super::item_registry::ItemRegistry;
use super::types::{ComponentId, Dispatch, ItemId, SimTime};
use log::{info, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// The discrete-event engine beneath the control interface.
///
/// Owns every entity in an arena addressed by [`ComponentId`], the event
/// heap, the cost ledger and the event log. Components never hold each
/// other; they exchange activities through the scheduler.
pub struct Simulation {
    registry: ItemRegistry,
    scheduler: EventScheduler,
    inventory: Vec<InventoryRecord>,
    suppliers: Vec<Supplier>,
    procurements: Vec<Procurement>,
    productions: Vec<Production>,
    customers: Vec<Customer>,
    sales: Vec<Sales>,
    ledger: CostLedger,
    accountant: CostAccountant,
    log: EventLog,
    rng: StdRng,
    day_length: SimTime,
    days_closed: u64,
}

impl Simulation {
    /// Build every entity from `config` and seed the scheduler
    pub fn new(config: &SimConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let registry = ItemRegistry::new(config.items.clone());
        let day_length = config.day_length;
        let mut inventory = Vec::with_capacity(registry.len());
        let mut suppliers = Vec::new();
        let mut procurements = Vec::new();
        let mut customers = Vec::new();
        let mut sales = Vec::new();

        for item in registry.iter() {
            inventory.push(InventoryRecord::new(item.id, item.initial_level));
            match &item.kind {
                ItemKind::Material(params) => {
                    let index = procurements.len();
                    suppliers.push(Supplier::new(item.id, params)?);
                    procurements.push(Procurement::new(index, item.id, index, params, day_length));
                }
                ItemKind::Product(params) => {
                    let index = customers.len();
                    customers.push(Customer::new(index, item.id, params, day_length)?);
                    sales.push(Sales::new(index, item.id, params, config.backlog_policy));
                }
            }
        }

        let mut productions = Vec::with_capacity(config.processes.len());
        for (index, process) in config.processes.iter().enumerate() {
            let not_product = ConfigError::OutputNotProduct {
                process: index,
                item: process.output,
            };
            let sales_index = registry.product_index(process.output).ok_or(not_product)?;
            let setup_cost = registry
                .product_params(process.output)
                .map(|params| params.setup_cost)
                .unwrap_or_default();
            productions.push(Production::new(
                index,
                process.clone(),
                ComponentId::Sales(sales_index),
                setup_cost,
            ));
        }

        let mut simulation = Self {
            registry,
            scheduler: EventScheduler::new(),
            inventory,
            suppliers,
            procurements,
            productions,
            customers,
            sales,
            ledger: CostLedger::new(),
            accountant: CostAccountant::new(),
            log: EventLog::new(),
            rng: StdRng::seed_from_u64(seed),
            day_length,
            days_closed: 0,
        };
        simulation.schedule_initial_activities();
        Ok(simulation)
    }

    fn schedule_initial_activities(&mut self) {
        let mut initial = Vec::new();
        collect_initial(&self.procurements, &mut initial);
        collect_initial(&self.productions, &mut initial);
        collect_initial(&self.customers, &mut initial);
        collect_initial(&self.sales, &mut initial);
        for (dispatch, time) in initial {
            self.scheduler.schedule_at(dispatch, time);
        }
    }

    /// Run every activity due at or before `until`, then move the clock there
    pub fn advance(&mut self, until: SimTime) {
        while let Some(scheduled) = self.scheduler.pop_due(until) {
            self.dispatch(scheduled.dispatch);
        }
        self.scheduler.settle(until);
    }

    fn dispatch(&mut self, dispatch: Dispatch) {
        let now = self.scheduler.now();
        trace!("[{}h] {} <- {:?}", now, dispatch.target, dispatch.activity);

        let mut ctx = ReactContext {
            now,
            inventory: &mut self.inventory,
            suppliers: &self.suppliers,
            ledger: &mut self.ledger,
            log: &mut self.log,
            rng: &mut self.rng,
        };
        let activity = dispatch.activity;
        let follow_ups = match dispatch.target {
            ComponentId::Procurement(i) => self.procurements.get_mut(i).map(|c| c.react(activity, &mut ctx)),
            ComponentId::Production(i) => self.productions.get_mut(i).map(|c| c.react(activity, &mut ctx)),
            ComponentId::Customer(i) => self.customers.get_mut(i).map(|c| c.react(activity, &mut ctx)),
            ComponentId::Sales(i) => self.sales.get_mut(i).map(|c| c.react(activity, &mut ctx)),
        };

        match follow_ups {
            Some(follow_ups) => {
                for (next, delay) in follow_ups {
                    self.scheduler.schedule_after(next, delay);
                }
            }
            None => warn!("No component registered as {}", dispatch.target),
        }
    }

    /// Order `quantity` units of the material at `material_index` now
    pub fn order_material(&mut self, material_index: usize, quantity: u64) -> Result<(), DecisionError> {
        let count = self.procurements.len();
        let procurement = self
            .procurements
            .get_mut(material_index)
            .ok_or(DecisionError::UnknownMaterial {
                index: material_index,
                count,
            })?;
        let supplier = self
            .suppliers
            .get(procurement.supplier_index())
            .ok_or(DecisionError::UnknownMaterial {
                index: material_index,
                count,
            })?;

        let mut ctx = ReactContext {
            now: self.scheduler.now(),
            inventory: &mut self.inventory,
            suppliers: &self.suppliers,
            ledger: &mut self.ledger,
            log: &mut self.log,
            rng: &mut self.rng,
        };
        if let Some((dispatch, delay)) = procurement.order_material(supplier, &mut ctx, quantity) {
            self.scheduler.schedule_after(dispatch, delay);
        }
        Ok(())
    }

    /// Accrue end-of-day holding and shortage cost, then close the ledger
    /// into the next day of the cost history
    pub fn close_day(&mut self) -> DailyCost {
        for record in &self.inventory {
            let Some(item) = self.registry.get(record.item) else {
                continue;
            };
            self.ledger
                .accrue(CostCategory::Holding, record.on_hand as f64 * item.holding_cost());
            if let Some(product) = item.as_product() {
                self.ledger
                    .accrue(CostCategory::Shortage, record.backordered as f64 * product.shortage_cost);
            }
        }

        let day = self.days_closed;
        self.days_closed += 1;
        let daily = self.accountant.close_day(day, &mut self.ledger);
        info!("Day {} closed at {}h: total cost {:.2}", day, self.now(), daily.total);
        daily
    }

    pub fn now(&self) -> SimTime {
        self.scheduler.now()
    }

    pub fn day_length(&self) -> SimTime {
        self.day_length
    }

    pub fn days_closed(&self) -> u64 {
        self.days_closed
    }

    pub fn registry(&self) -> &ItemRegistry {
        &self.registry
    }

    pub fn inventory(&self) -> &[InventoryRecord] {
        &self.inventory
    }

    pub fn record(&self, item: ItemId) -> Option<&InventoryRecord> {
        self.inventory.get(item)
    }

    pub fn material_count(&self) -> usize {
        self.procurements.len()
    }

    pub fn procurement(&self, material_index: usize) -> Option<&Procurement> {
        self.procurements.get(material_index)
    }

    pub fn production(&self, process: usize) -> Option<&Production> {
        self.productions.get(process)
    }

    pub fn sales(&self, product_index: usize) -> Option<&Sales> {
        self.sales.get(product_index)
    }

    pub fn ledger(&self) -> &CostLedger {
        &self.ledger
    }

    pub fn accountant(&self) -> &CostAccountant {
        &self.accountant
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn pending_activities(&self) -> usize {
        self.scheduler.pending()
    }

    /// On-hand level of every item in id order, each capped at `cap`
    pub fn observe(&self, cap: u64) -> Vec<u64> {
        self.inventory.iter().map(|record| record.on_hand.min(cap)).collect()
    }
}

fn collect_initial<C: SimComponent>(components: &[C], out: &mut Vec<(Dispatch, SimTime)>) {
    for component in components {
        for (activity, time) in component.initial_activities() {
            out.push((Dispatch::new(component.component_id(), activity), time));
        }
    }
}
