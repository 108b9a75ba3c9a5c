//! Order ledger: owns every order record, line items, totals, and the
//! status machine.
//!
//! Order ids come from a process-wide strictly increasing counter that is
//! only advanced inside [`LedgerInner::append`], i.e. after validation has
//! fully succeeded, so a rejected create never consumes an id and ids never
//! show gaps under contention.

use chrono::Utc;
use parking_lot::{RwLock, RwLockWriteGuard};
use shared::models::{Order, OrderLine, OrderStatus, Table};

use crate::utils::{AppError, AppResult};

pub(crate) struct LedgerInner {
    orders: Vec<Order>,
    next_id: u64,
}

impl LedgerInner {
    /// Append a fully validated order, drawing the next id.
    pub(crate) fn append(&mut self, table: &Table, items: Vec<OrderLine>, total_amount: f64) -> Order {
        let id = self.next_id;
        self.next_id += 1;

        let order = Order {
            id,
            table_id: table.id,
            table_number: table.number,
            status: OrderStatus::Pending,
            created_at: Utc::now().timestamp_millis(),
            total_amount,
            items,
        };
        self.orders.push(order.clone());
        order
    }

    /// Apply a status transition, returning the updated order and the prior
    /// status. Any status may move to any other, including no-ops.
    pub(crate) fn apply_status(
        &mut self,
        order_id: u64,
        status: OrderStatus,
    ) -> AppResult<(Order, OrderStatus)> {
        let order = self
            .orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| AppError::not_found(format!("Order {} not found", order_id)))?;

        let previous = order.status;
        order.status = status;
        Ok((order.clone(), previous))
    }

    /// Whether another non-terminal order exists for the table.
    pub(crate) fn has_other_active_order(&self, table_id: u64, excluding: u64) -> bool {
        self.orders
            .iter()
            .any(|o| o.table_id == table_id && o.id != excluding && o.status.is_active())
    }
}

pub struct OrderLedger {
    inner: RwLock<LedgerInner>,
}

impl OrderLedger {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(LedgerInner {
                orders: Vec::new(),
                next_id: 1,
            }),
        }
    }

    pub fn get(&self, order_id: u64) -> AppResult<Order> {
        self.inner
            .read()
            .orders
            .iter()
            .find(|o| o.id == order_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Order {} not found", order_id)))
    }

    /// Orders filtered by table and status, newest first.
    ///
    /// Ties (and clock regressions) are broken by descending id, which is
    /// strictly increasing and therefore gives a deterministic order even
    /// when two orders share a timestamp.
    pub fn list(&self, table_id: Option<u64>, status: Option<OrderStatus>) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .inner
            .read()
            .orders
            .iter()
            .filter(|o| table_id.is_none_or(|t| o.table_id == t))
            .filter(|o| status.is_none_or(|s| o.status == s))
            .cloned()
            .collect();
        orders.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        orders
    }

    /// Write access for the coordinator's scan-then-release sequence.
    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, LedgerInner> {
        self.inner.write()
    }
}

impl Default for OrderLedger {
    fn default() -> Self {
        Self::new()
    }
}
