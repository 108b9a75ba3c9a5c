//! Domain models shared between server and clients.

pub mod menu;
pub mod order;
pub mod staff;
pub mod table;

pub use menu::{MenuCategory, MenuItem};
pub use order::{Order, OrderLine, OrderStatus};
pub use staff::StaffAccount;
pub use table::{Table, TableStatus};

/// Parse error for a status value outside the permitted enum, carrying the
/// rejected value.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid status value: {0}")]
pub struct InvalidStatus(pub String);
