//! Dining Table Model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::InvalidStatus;

/// Table status.
///
/// All three states are mutually reachable: floor operations jump
/// arbitrarily (a cancelled reservation goes back to available, a seated
/// table can be re-marked reserved).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    Available,
    Occupied,
    Reserved,
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::Occupied => write!(f, "occupied"),
            Self::Reserved => write!(f, "reserved"),
        }
    }
}

impl FromStr for TableStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "occupied" => Ok(Self::Occupied),
            "reserved" => Ok(Self::Reserved),
            other => Err(InvalidStatus(other.to_string())),
        }
    }
}

/// Dining table entity
///
/// `current_order_id` is set while the table carries a tracked active
/// order; a manual occupancy (walk-in without an order) leaves it empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub id: u64,
    pub number: u32,
    pub capacity: u32,
    pub status: TableStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_order_id: Option<u64>,
}
