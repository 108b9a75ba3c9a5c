//! Order Model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::InvalidStatus;

/// Order status
///
/// The kitchen workflow is advisory: any status may move to any other,
/// including no-ops. Cross-entity effects react to the *resulting* status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Delivered and cancelled orders are terminal; everything else still
    /// occupies kitchen or floor attention.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Preparing => write!(f, "preparing"),
            Self::Ready => write!(f, "ready"),
            Self::Delivered => write!(f, "delivered"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for OrderStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "preparing" => Ok(Self::Preparing),
            "ready" => Ok(Self::Ready),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(InvalidStatus(other.to_string())),
        }
    }
}

/// A single menu line within an order.
///
/// Name and unit price are captured by value at creation time so later
/// catalog price changes never retroactively alter historical orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub menu_item_id: u32,
    pub name: String,
    /// Unit price in currency unit, captured at creation
    pub unit_price: f64,
    pub quantity: u32,
    #[serde(default)]
    pub special_instructions: String,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub table_id: u64,
    /// Denormalized snapshot of the table number at creation
    pub table_number: u32,
    pub status: OrderStatus,
    /// Creation instant, Unix millis UTC
    pub created_at: i64,
    /// Total in currency unit, computed once at creation and immutable
    pub total_amount: f64,
    pub items: Vec<OrderLine>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_statuses() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(OrderStatus::Pending.is_active());
        assert!(OrderStatus::Preparing.is_active());
        assert!(OrderStatus::Ready.is_active());
    }

    #[test]
    fn status_parses_all_five_values() {
        for s in ["pending", "preparing", "ready", "delivered", "cancelled"] {
            assert_eq!(s.parse::<OrderStatus>().unwrap().to_string(), s);
        }
        assert!("done".parse::<OrderStatus>().is_err());
    }
}
