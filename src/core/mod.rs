pub mod component;
pub mod components;
pub mod config;
pub mod cost;
pub mod distribution;
pub mod errors;
pub mod event_log;
pub mod event_scheduler;
pub mod inventory;
pub mod item_registry;
pub mod simulation_engine;
pub mod types;

#[cfg(test)]
mod tests;
