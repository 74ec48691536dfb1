use serde::{Deserialize, Serialize};

/// Simulated time in hours since the start of the episode
pub type SimTime = u64;

/// Dense item identifier, `0..item_count`
pub type ItemId = usize;

/// Procurement order identifier, unique per material
pub type OrderId = u64;

/// Demand identifier, unique per product
pub type DemandId = u64;

/// Arena address of a simulated component.
///
/// The index is the position of the component in its engine vector:
/// material index for procurements, process index for productions and
/// product index for customers and sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentId {
    Procurement(usize),
    Production(usize),
    Customer(usize),
    Sales(usize),
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComponentId::Procurement(i) => write!(f, "procurement{}", i),
            ComponentId::Production(i) => write!(f, "production{}", i),
            ComponentId::Customer(i) => write!(f, "customer{}", i),
            ComponentId::Sales(i) => write!(f, "sales{}", i),
        }
    }
}

/// Procurement order in flight between a supplier and the warehouse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub material: ItemId,
    pub quantity: u64,
    pub placed_at: SimTime,
    pub arrives_at: SimTime,
}

/// Customer order for a product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandEvent {
    pub id: DemandId,
    pub product: ItemId,
    pub quantity: u64,
    pub due_date: SimTime,
}

/// Resumable work a component performs when its trigger time is reached
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activity {
    /// Supplier lead time elapsed for a pending order
    OrderArrival { order_id: OrderId },
    /// Automatic lot-size reorder at the start of a manufacturing-order cycle
    Replenishment,
    /// One production interval
    ProductionTick,
    /// Customer order-cycle boundary
    CustomerCycle,
    /// New customer demand handed to sales
    Demand(DemandEvent),
    /// Output stock increased while backlog is outstanding
    Reconcile,
    /// Due date of a demand that was not served in full on arrival
    DueDate { demand_id: DemandId },
}

/// An activity addressed to one component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub target: ComponentId,
    pub activity: Activity,
}

impl Dispatch {
    pub fn new(target: ComponentId, activity: Activity) -> Self {
        Self { target, activity }
    }
}

/// A dispatch paired with the delay after which it runs
pub type FollowUp = (Dispatch, SimTime);
