use super::types::ItemId;
use thiserror::Error;

/// Malformed or inconsistent item/process tables
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration contains no items")]
    NoItems,
    #[error("item ids must be dense and ordered: expected id {expected}, found {found}")]
    NonContiguousIds { expected: ItemId, found: ItemId },
    #[error("item {item}: cost rate '{field}' must be a finite non-negative number, got {value}")]
    InvalidCost {
        item: ItemId,
        field: &'static str,
        value: f64,
    },
    #[error("process {process}: {field} must be a finite non-negative number, got {value}")]
    InvalidProcessCost {
        process: usize,
        field: &'static str,
        value: f64,
    },
    #[error("item {item}: {field} must be greater than zero")]
    ZeroCycle { item: ItemId, field: &'static str },
    #[error("process {process} references unknown item {item}")]
    UnknownItem { process: usize, item: ItemId },
    #[error("process {process}: input item {item} is not a material")]
    InputNotMaterial { process: usize, item: ItemId },
    #[error("process {process}: output item {item} is not a product")]
    OutputNotProduct { process: usize, item: ItemId },
    #[error("process {process}: input item {item} is listed more than once")]
    DuplicateInput { process: usize, item: ItemId },
    #[error("process {process}: {reason}")]
    InvalidProcess { process: usize, reason: String },
    #[error("invalid distribution: {0}")]
    InvalidDistribution(String),
    #[error("horizon {horizon} must be a positive multiple of the day length {day_length}")]
    InvalidHorizon { horizon: u64, day_length: u64 },
    #[error("observation cap must be greater than zero")]
    ZeroObservationCap,
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Decision rejected at the control boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecisionError {
    #[error("material index {index} out of range ({count} materials)")]
    UnknownMaterial { index: usize, count: usize },
    #[error("order quantity {quantity} for material {material} is negative")]
    NegativeQuantity { material: usize, quantity: i64 },
    #[error("order quantity {quantity} for material {material} exceeds the maximum of {max}")]
    QuantityAboveMax {
        material: usize,
        quantity: i64,
        max: u64,
    },
}

/// Control interface failures
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("step called before reset")]
    NotReset,
    #[error("step called after the episode terminated")]
    Terminated,
    #[error("invalid decision: {0}")]
    InvalidDecision(#[from] DecisionError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
