//! Static item and process tables plus episode parameters.
//!
//! A [`SimConfig`] is supplied once when an environment is built and is
//! read-only afterwards. [`SimConfig::validate`] rejects inconsistent
//! tables up front so the engine never has to default silently.

use super::distribution::Distribution;
use super::errors::ConfigError;
use super::types::{ItemId, SimTime};
use serde::{Deserialize, Serialize};

/// Parameters specific to finished products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductParams {
    /// Customer order cycle, in days
    pub order_cycle_days: u64,
    /// Offset from order placement to due date, in days
    pub due_date_days: u64,
    /// Units per customer order
    #[serde(default = "default_demand")]
    pub demand: Distribution,
    pub holding_cost: f64,
    pub setup_cost: f64,
    pub delivery_cost: f64,
    pub shortage_cost: f64,
}

/// Parameters specific to purchased materials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialParams {
    /// Manufacturing-order cycle, in days
    pub order_cycle_days: u64,
    /// Supplier lead time, in simulated hours
    pub lead_time: Distribution,
    pub holding_cost: f64,
    pub purchase_cost: f64,
    pub order_cost: f64,
    /// Fixed lot size for standing replenishment orders
    #[serde(default)]
    pub lot_size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Product(ProductParams),
    Material(MaterialParams),
}

/// Catalog entry for a product or material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub initial_level: u64,
    pub kind: ItemKind,
}

impl Item {
    pub fn product(id: ItemId, name: &str, initial_level: u64, params: ProductParams) -> Self {
        Self {
            id,
            name: name.to_string(),
            initial_level,
            kind: ItemKind::Product(params),
        }
    }

    pub fn material(id: ItemId, name: &str, initial_level: u64, params: MaterialParams) -> Self {
        Self {
            id,
            name: name.to_string(),
            initial_level,
            kind: ItemKind::Material(params),
        }
    }

    pub fn is_material(&self) -> bool {
        matches!(self.kind, ItemKind::Material(_))
    }

    pub fn is_product(&self) -> bool {
        matches!(self.kind, ItemKind::Product(_))
    }

    pub fn as_product(&self) -> Option<&ProductParams> {
        match &self.kind {
            ItemKind::Product(params) => Some(params),
            ItemKind::Material(_) => None,
        }
    }

    pub fn as_material(&self) -> Option<&MaterialParams> {
        match &self.kind {
            ItemKind::Material(params) => Some(params),
            ItemKind::Product(_) => None,
        }
    }

    pub fn holding_cost(&self) -> f64 {
        match &self.kind {
            ItemKind::Product(params) => params.holding_cost,
            ItemKind::Material(params) => params.holding_cost,
        }
    }
}

/// One bill-of-materials line: units of `item` consumed per output unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomLine {
    pub item: ItemId,
    pub quantity: u64,
}

/// Production recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    pub inputs: Vec<BomLine>,
    pub output: ItemId,
    /// Output units completed per tick
    pub rate: u64,
    /// Hours between ticks
    #[serde(default = "default_tick_hours")]
    pub tick_hours: SimTime,
    /// Cost per unit produced
    pub process_cost: f64,
    /// Cost charged when a stoppage interval begins
    pub stoppage_cost: f64,
}

/// What happens to unmet demand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum BacklogPolicy {
    #[default]
    Unbounded,
    /// Backlog beyond `max_units` is lost, newest demand first
    Capped { max_units: u64 },
    /// Unmet remainder is lost once the due date passes
    ExpireAtDueDate,
}

/// Complete static configuration of one environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub items: Vec<Item>,
    pub processes: Vec<Process>,
    /// Episode length in simulated hours
    #[serde(default = "default_horizon")]
    pub horizon: SimTime,
    #[serde(default = "default_day_length")]
    pub day_length: SimTime,
    /// Ceiling applied to every observed on-hand level
    #[serde(default = "default_observation_cap")]
    pub observation_cap: u64,
    /// Event log entries returned with each step
    #[serde(default = "default_trace_len")]
    pub trace_len: usize,
    #[serde(default = "default_max_order_quantity")]
    pub max_order_quantity: u64,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub backlog_policy: BacklogPolicy,
}

fn default_demand() -> Distribution {
    Distribution::fixed(0)
}

fn default_tick_hours() -> SimTime {
    1
}

fn default_horizon() -> SimTime {
    336
}

fn default_day_length() -> SimTime {
    24
}

fn default_observation_cap() -> u64 {
    50
}

fn default_trace_len() -> usize {
    5
}

fn default_max_order_quantity() -> u64 {
    1
}

impl SimConfig {
    /// Create a configuration with default episode parameters
    pub fn new(items: Vec<Item>, processes: Vec<Process>) -> Self {
        Self {
            items,
            processes,
            horizon: default_horizon(),
            day_length: default_day_length(),
            observation_cap: default_observation_cap(),
            trace_len: default_trace_len(),
            max_order_quantity: default_max_order_quantity(),
            seed: 0,
            backlog_policy: BacklogPolicy::default(),
        }
    }

    /// One product made from one material, 14-day horizon
    pub fn reference() -> Self {
        let items = vec![
            Item::product(
                0,
                "PRODUCT",
                0,
                ProductParams {
                    order_cycle_days: 7,
                    due_date_days: 7,
                    demand: Distribution::fixed(0),
                    holding_cost: 1.0,
                    setup_cost: 1.0,
                    delivery_cost: 1.0,
                    shortage_cost: 50.0,
                },
            ),
            Item::material(
                1,
                "MATERIAL 1",
                1,
                MaterialParams {
                    order_cycle_days: 1,
                    lead_time: Distribution::fixed(2),
                    holding_cost: 1.0,
                    purchase_cost: 2.0,
                    order_cost: 1.0,
                    lot_size: None,
                },
            ),
        ];
        let processes = vec![Process {
            inputs: vec![BomLine { item: 1, quantity: 1 }],
            output: 0,
            rate: 2,
            tick_hours: 1,
            process_cost: 1.0,
            stoppage_cost: 2.0,
        }];
        Self::new(items, processes)
    }

    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_horizon(mut self, horizon: SimTime) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn with_backlog_policy(mut self, policy: BacklogPolicy) -> Self {
        self.backlog_policy = policy;
        self
    }

    pub fn with_max_order_quantity(mut self, max: u64) -> Self {
        self.max_order_quantity = max;
        self
    }

    pub fn with_observation_cap(mut self, cap: u64) -> Self {
        self.observation_cap = cap;
        self
    }

    pub fn with_trace_len(mut self, len: usize) -> Self {
        self.trace_len = len;
        self
    }

    /// Check every table for consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.items.is_empty() {
            return Err(ConfigError::NoItems);
        }
        if self.day_length == 0 || self.horizon == 0 || self.horizon % self.day_length != 0 {
            return Err(ConfigError::InvalidHorizon {
                horizon: self.horizon,
                day_length: self.day_length,
            });
        }
        if self.observation_cap == 0 {
            return Err(ConfigError::ZeroObservationCap);
        }

        for (expected, item) in self.items.iter().enumerate() {
            if item.id != expected {
                return Err(ConfigError::NonContiguousIds {
                    expected,
                    found: item.id,
                });
            }
            validate_item(item)?;
        }

        for (index, process) in self.processes.iter().enumerate() {
            self.validate_process(index, process)?;
        }

        Ok(())
    }

    fn validate_process(&self, index: usize, process: &Process) -> Result<(), ConfigError> {
        let output = self.items.get(process.output).ok_or(ConfigError::UnknownItem {
            process: index,
            item: process.output,
        })?;
        if !output.is_product() {
            return Err(ConfigError::OutputNotProduct {
                process: index,
                item: process.output,
            });
        }
        if process.inputs.is_empty() {
            return Err(ConfigError::InvalidProcess {
                process: index,
                reason: "recipe has no inputs".to_string(),
            });
        }
        for (position, line) in process.inputs.iter().enumerate() {
            if process.inputs[..position].iter().any(|earlier| earlier.item == line.item) {
                return Err(ConfigError::DuplicateInput {
                    process: index,
                    item: line.item,
                });
            }
            let input = self.items.get(line.item).ok_or(ConfigError::UnknownItem {
                process: index,
                item: line.item,
            })?;
            if !input.is_material() {
                return Err(ConfigError::InputNotMaterial {
                    process: index,
                    item: line.item,
                });
            }
            if line.quantity == 0 {
                return Err(ConfigError::InvalidProcess {
                    process: index,
                    reason: format!("required quantity of item {} is zero", line.item),
                });
            }
        }
        if process.rate == 0 {
            return Err(ConfigError::InvalidProcess {
                process: index,
                reason: "production rate is zero".to_string(),
            });
        }
        if process.tick_hours == 0 {
            return Err(ConfigError::InvalidProcess {
                process: index,
                reason: "tick interval is zero".to_string(),
            });
        }
        for (field, value) in [
            ("process_cost", process.process_cost),
            ("stoppage_cost", process.stoppage_cost),
        ] {
            if !is_valid_rate(value) {
                return Err(ConfigError::InvalidProcessCost {
                    process: index,
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

fn is_valid_rate(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn check_costs(item: ItemId, costs: &[(&'static str, f64)]) -> Result<(), ConfigError> {
    for &(field, value) in costs {
        if !is_valid_rate(value) {
            return Err(ConfigError::InvalidCost { item, field, value });
        }
    }
    Ok(())
}

fn validate_item(item: &Item) -> Result<(), ConfigError> {
    match &item.kind {
        ItemKind::Product(params) => {
            if params.order_cycle_days == 0 {
                return Err(ConfigError::ZeroCycle {
                    item: item.id,
                    field: "order_cycle_days",
                });
            }
            check_costs(
                item.id,
                &[
                    ("holding_cost", params.holding_cost),
                    ("setup_cost", params.setup_cost),
                    ("delivery_cost", params.delivery_cost),
                    ("shortage_cost", params.shortage_cost),
                ],
            )?;
            params.demand.sampler()?;
        }
        ItemKind::Material(params) => {
            if params.order_cycle_days == 0 {
                return Err(ConfigError::ZeroCycle {
                    item: item.id,
                    field: "order_cycle_days",
                });
            }
            check_costs(
                item.id,
                &[
                    ("holding_cost", params.holding_cost),
                    ("purchase_cost", params.purchase_cost),
                    ("order_cost", params.order_cost),
                ],
            )?;
            params.lead_time.sampler()?;
        }
    }
    Ok(())
}
