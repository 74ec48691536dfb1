use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The fixed cost taxonomy; no other category exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CostCategory {
    Holding,
    Order,
    Setup,
    Delivery,
    Shortage,
    Process,
    Stoppage,
}

impl CostCategory {
    pub const ALL: [CostCategory; 7] = [
        CostCategory::Holding,
        CostCategory::Order,
        CostCategory::Setup,
        CostCategory::Delivery,
        CostCategory::Shortage,
        CostCategory::Process,
        CostCategory::Stoppage,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Per-category accumulators for the current simulated day
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostLedger {
    amounts: [f64; 7],
}

impl CostLedger {
    pub fn new() -> Self {
        Self { amounts: [0.0; 7] }
    }

    pub fn accrue(&mut self, category: CostCategory, amount: f64) {
        debug_assert!(amount >= 0.0, "cost amounts are non-negative");
        self.amounts[category.index()] += amount;
    }

    pub fn get(&self, category: CostCategory) -> f64 {
        self.amounts[category.index()]
    }

    pub fn total(&self) -> f64 {
        self.amounts.iter().sum()
    }

    pub fn is_zero(&self) -> bool {
        self.amounts.iter().all(|a| *a == 0.0)
    }

    pub fn reset(&mut self) {
        self.amounts = [0.0; 7];
    }
}

/// Closed-out cost of one simulated day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCost {
    pub day: u64,
    pub by_category: BTreeMap<CostCategory, f64>,
    pub total: f64,
}

impl DailyCost {
    pub fn get(&self, category: CostCategory) -> f64 {
        self.by_category.get(&category).copied().unwrap_or(0.0)
    }
}

/// Turns the ledger into a daily history, one entry per day boundary
#[derive(Debug, Clone, Default)]
pub struct CostAccountant {
    history: Vec<DailyCost>,
}

impl CostAccountant {
    pub fn new() -> Self {
        Self { history: Vec::new() }
    }

    /// Snapshot the ledger as `day`'s cost and zero every category
    pub fn close_day(&mut self, day: u64, ledger: &mut CostLedger) -> DailyCost {
        let by_category = CostCategory::ALL.iter().map(|c| (*c, ledger.get(*c))).collect();
        let daily = DailyCost {
            day,
            by_category,
            total: ledger.total(),
        };
        ledger.reset();
        self.history.push(daily.clone());
        daily
    }

    pub fn history(&self) -> &[DailyCost] {
        &self.history
    }

    pub fn cumulative_total(&self) -> f64 {
        self.history.iter().map(|d| d.total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_accumulates_per_category() {
        let mut ledger = CostLedger::new();
        ledger.accrue(CostCategory::Order, 1.0);
        ledger.accrue(CostCategory::Order, 2.0);
        ledger.accrue(CostCategory::Holding, 0.5);
        assert_eq!(ledger.get(CostCategory::Order), 3.0);
        assert_eq!(ledger.total(), 3.5);
    }

    #[test]
    fn test_close_day_resets_ledger() {
        let mut ledger = CostLedger::new();
        let mut accountant = CostAccountant::new();
        ledger.accrue(CostCategory::Shortage, 50.0);
        ledger.accrue(CostCategory::Stoppage, 2.0);

        let daily = accountant.close_day(0, &mut ledger);
        assert_eq!(daily.total, 52.0);
        assert_eq!(daily.get(CostCategory::Shortage), 50.0);
        assert_eq!(daily.by_category.len(), CostCategory::ALL.len());
        assert!(ledger.is_zero());

        ledger.accrue(CostCategory::Holding, 1.0);
        let next = accountant.close_day(1, &mut ledger);
        assert_eq!(next.total, 1.0);
        assert_eq!(accountant.history().len(), 2);
        assert_eq!(accountant.cumulative_total(), 53.0);
    }
}
