//! Cross-entity coordination between the order ledger and the table
//! registry.
//!
//! Two rules live here:
//!
//! 1. A successful order creation occupies its table, whatever the table's
//!    prior status, and records the order as the table's current order.
//! 2. When an order transitions into `delivered` (and only then), the
//!    table is released back to `available` if that order is the table's
//!    current order and no other active order remains for the table.
//!
//! Cancelled transitions do NOT release the table, even though cancelled is
//! terminal for the activity scan. Staff clear such tables manually via the
//! table status endpoint.
//!
//! Lock discipline: the delivered scan and the registry write both happen
//! while the ledger write lock is held (ledger before registry, always), so
//! two orders delivered at the same instant serialize and at most one of
//! them releases the table.

use std::sync::Arc;

use chrono::Utc;
use shared::message::FloorEvent;
use shared::models::{Order, OrderLine, OrderStatus, Table, TableStatus};

use super::catalog::MenuCatalog;
use super::ledger::{LedgerInner, OrderLedger};
use super::money;
use super::tables::TableRegistry;
use crate::utils::{AppError, AppResult};

/// One requested line of a new order
#[derive(Debug, Clone)]
pub struct OrderLineInput {
    pub menu_item_id: u32,
    pub quantity: u32,
    pub special_instructions: Option<String>,
}

/// A validated create-order command
#[derive(Debug, Clone)]
pub struct CreateOrderInput {
    pub table_id: u64,
    pub items: Vec<OrderLineInput>,
}

#[derive(Clone)]
pub struct FloorCoordinator {
    catalog: Arc<MenuCatalog>,
    tables: Arc<TableRegistry>,
    orders: Arc<OrderLedger>,
}

impl FloorCoordinator {
    pub fn new(
        catalog: Arc<MenuCatalog>,
        tables: Arc<TableRegistry>,
        orders: Arc<OrderLedger>,
    ) -> Self {
        Self {
            catalog,
            tables,
            orders,
        }
    }

    /// Create an order: resolve the table, price every line against the
    /// catalog, append to the ledger, then occupy the table.
    ///
    /// The whole command is validated before the ledger lock is taken, so a
    /// failed create never draws an order id. Nothing is persisted when any
    /// line fails to resolve.
    pub fn create_order(&self, input: CreateOrderInput) -> AppResult<(Order, Vec<FloorEvent>)> {
        if input.items.is_empty() {
            return Err(AppError::validation("Order must contain at least one item"));
        }

        let table = self.tables.get(input.table_id)?;
        let lines = self.resolve_lines(&input.items)?;
        let total_amount = money::order_total(&lines);

        let order = self.orders.write().append(&table, lines, total_amount);

        // Occupying a reserved or available table is always legal here.
        let (_, table_event) =
            self.tables
                .set_status(table.id, TableStatus::Occupied, Some(order.id))?;

        tracing::info!(
            order_id = order.id,
            table = order.table_number,
            total = order.total_amount,
            "order created"
        );

        let events = vec![
            FloorEvent::NewOrder {
                order: order.clone(),
            },
            table_event,
        ];
        Ok((order, events))
    }

    /// Apply an order status transition and its table side effect.
    pub fn set_order_status(
        &self,
        order_id: u64,
        status: OrderStatus,
    ) -> AppResult<(Order, Vec<FloorEvent>)> {
        let mut events = Vec::with_capacity(2);

        let order = {
            let mut ledger = self.orders.write();
            let (order, previous) = ledger.apply_status(order_id, status)?;

            events.push(FloorEvent::OrderStatusChanged {
                order_id: order.id,
                status: order.status,
                timestamp: Utc::now().timestamp_millis(),
            });

            // Repeated delivered -> delivered must not re-trigger the
            // table release.
            if status == OrderStatus::Delivered && previous != OrderStatus::Delivered {
                if let Some(event) = self.release_table_if_clear(&ledger, &order)? {
                    events.push(event);
                }
            }

            order
        };

        tracing::info!(order_id, status = %status, "order status changed");
        Ok((order, events))
    }

    /// Set a table status directly (floor staff action).
    pub fn set_table_status(
        &self,
        table_id: u64,
        status: TableStatus,
        order_id: Option<u64>,
    ) -> AppResult<(Table, FloorEvent)> {
        self.tables.set_status(table_id, status, order_id)
    }

    fn resolve_lines(&self, inputs: &[OrderLineInput]) -> AppResult<Vec<OrderLine>> {
        let mut lines = Vec::with_capacity(inputs.len());
        for input in inputs {
            if input.quantity == 0 {
                return Err(AppError::validation("Line quantity must be at least 1"));
            }
            let item = self.catalog.item(input.menu_item_id).ok_or_else(|| {
                AppError::not_found(format!("Menu item {} not found", input.menu_item_id))
            })?;
            lines.push(OrderLine {
                menu_item_id: item.id,
                name: item.name,
                unit_price: item.price,
                quantity: input.quantity,
                special_instructions: input.special_instructions.clone().unwrap_or_default(),
            });
        }
        Ok(lines)
    }

    /// Release the order's table if this order is the table's current order
    /// and no other active order remains for it. Runs with the ledger write
    /// lock held by the caller.
    fn release_table_if_clear(
        &self,
        ledger: &LedgerInner,
        order: &Order,
    ) -> AppResult<Option<FloorEvent>> {
        let table = self.tables.get(order.table_id)?;
        if table.current_order_id != Some(order.id) {
            return Ok(None);
        }
        if ledger.has_other_active_order(order.table_id, order.id) {
            return Ok(None);
        }

        let (_, event) = self
            .tables
            .set_status(order.table_id, TableStatus::Available, None)?;
        tracing::info!(table = order.table_number, "table released");
        Ok(Some(event))
    }
}
