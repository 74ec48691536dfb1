//! Simulated entities. Each one reacts to activities addressed to its
//! [`ComponentId`](crate::core::types::ComponentId) and answers with
//! follow-up activities for the scheduler.

pub mod customer;
pub mod procurement;
pub mod production;
pub mod sales;
pub mod supplier;

pub use customer::Customer;
pub use procurement::Procurement;
pub use production::{Production, ProductionState};
pub use sales::Sales;
pub use supplier::Supplier;
