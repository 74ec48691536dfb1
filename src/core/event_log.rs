use super::types::{DemandId, ItemId, OrderId, SimTime};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    Procurement,
    Production,
    Sales,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    OrderPlaced {
        order_id: OrderId,
        material: ItemId,
        quantity: u64,
        arrives_at: SimTime,
    },
    MaterialArrived {
        order_id: OrderId,
        material: ItemId,
        quantity: u64,
    },
    Produced {
        process: usize,
        product: ItemId,
        quantity: u64,
    },
    ProductionStopped {
        process: usize,
        product: ItemId,
    },
    DemandReceived {
        demand_id: DemandId,
        product: ItemId,
        quantity: u64,
        due_date: SimTime,
    },
    Shipped {
        demand_id: DemandId,
        product: ItemId,
        quantity: u64,
        late: bool,
    },
    Backordered {
        demand_id: DemandId,
        product: ItemId,
        quantity: u64,
    },
    DemandOverdue {
        demand_id: DemandId,
        product: ItemId,
        outstanding: u64,
    },
    DemandLost {
        demand_id: DemandId,
        product: ItemId,
        quantity: u64,
    },
}

impl EventKind {
    pub fn category(&self) -> EventCategory {
        match self {
            EventKind::OrderPlaced { .. } | EventKind::MaterialArrived { .. } => EventCategory::Procurement,
            EventKind::Produced { .. } | EventKind::ProductionStopped { .. } => EventCategory::Production,
            EventKind::DemandReceived { .. }
            | EventKind::Shipped { .. }
            | EventKind::Backordered { .. }
            | EventKind::DemandOverdue { .. }
            | EventKind::DemandLost { .. } => EventCategory::Sales,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::OrderPlaced {
                order_id,
                material,
                quantity,
                arrives_at,
            } => write!(
                f,
                "order #{} placed for {} units of item {} (arrives at {})",
                order_id, quantity, material, arrives_at
            ),
            EventKind::MaterialArrived {
                order_id,
                material,
                quantity,
            } => write!(f, "order #{} arrived: {} units of item {}", order_id, quantity, material),
            EventKind::Produced {
                process,
                product,
                quantity,
            } => write!(f, "process {} produced {} units of item {}", process, quantity, product),
            EventKind::ProductionStopped { process, product } => {
                write!(f, "process {} stopped for item {}: insufficient input", process, product)
            }
            EventKind::DemandReceived {
                demand_id,
                product,
                quantity,
                due_date,
            } => write!(
                f,
                "demand #{} for {} units of item {} (due {})",
                demand_id, quantity, product, due_date
            ),
            EventKind::Shipped {
                demand_id,
                product,
                quantity,
                late,
            } => {
                write!(f, "shipped {} units of item {} for demand #{}", quantity, product, demand_id)?;
                if *late {
                    write!(f, " (late)")?;
                }
                Ok(())
            }
            EventKind::Backordered {
                demand_id,
                product,
                quantity,
            } => write!(f, "{} units of item {} backordered for demand #{}", quantity, product, demand_id),
            EventKind::DemandOverdue {
                demand_id,
                product,
                outstanding,
            } => write!(
                f,
                "demand #{} for item {} overdue with {} units outstanding",
                demand_id, product, outstanding
            ),
            EventKind::DemandLost {
                demand_id,
                product,
                quantity,
            } => write!(f, "{} units of item {} lost from demand #{}", quantity, product, demand_id),
        }
    }
}

/// One immutable log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimEvent {
    pub time: SimTime,
    pub kind: EventKind,
}

impl SimEvent {
    pub fn category(&self) -> EventCategory {
        self.kind.category()
    }
}

impl fmt::Display for SimEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:>4}h] {}", self.time, self.kind)
    }
}

/// Append-only chronological record of state changes
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: Vec<SimEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn record(&mut self, time: SimTime, kind: EventKind) {
        self.entries.push(SimEvent { time, kind });
    }

    pub fn entries(&self) -> &[SimEvent] {
        &self.entries
    }

    /// The most recent `n` entries, oldest first
    pub fn tail(&self, n: usize) -> &[SimEvent] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_returns_latest_entries() {
        let mut log = EventLog::new();
        for hour in 0..8 {
            log.record(
                hour * 24,
                EventKind::ProductionStopped {
                    process: 0,
                    product: 0,
                },
            );
        }
        let tail = log.tail(5);
        assert_eq!(tail.len(), 5);
        assert_eq!(tail[0].time, 72);
        assert_eq!(tail[4].time, 168);
        assert_eq!(log.tail(50).len(), 8);
    }

    #[test]
    fn test_display_includes_time_and_payload() {
        let event = SimEvent {
            time: 26,
            kind: EventKind::MaterialArrived {
                order_id: 0,
                material: 1,
                quantity: 1,
            },
        };
        assert_eq!(event.to_string(), "[  26h] order #0 arrived: 1 units of item 1");
        assert_eq!(event.category(), EventCategory::Procurement);
    }
}
