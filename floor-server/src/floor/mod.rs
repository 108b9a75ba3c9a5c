//! Floor operations domain: tables, orders, and the rules that keep them
//! consistent.
//!
//! # Structure
//!
//! - [`catalog`] - read-only menu catalog (pricing source for order creation)
//! - [`tables`] - table registry and status machine
//! - [`ledger`] - order ledger: line items, totals, status machine
//! - [`sync`] - cross-entity coordination (order lifecycle -> table occupancy)
//! - [`money`] - decimal money arithmetic
//! - [`seed`] - bootstrap data
//!
//! Mutations return the domain events they produced; callers publish them
//! through the gateway only after every store lock has been released, so a
//! slow subscriber can never hold up a state transition.

pub mod catalog;
pub mod ledger;
pub mod money;
pub mod seed;
pub mod sync;
pub mod tables;

pub use catalog::MenuCatalog;
pub use ledger::OrderLedger;
pub use sync::{CreateOrderInput, FloorCoordinator, OrderLineInput};
pub use tables::TableRegistry;
