//! Table registry: holds every table record and applies status transitions.
//!
//! All three statuses are mutually reachable. The registry owns the only
//! mutable reference to the table collection; every read-modify-write runs
//! under the write lock so concurrent callers serialize.

use parking_lot::RwLock;
use shared::message::FloorEvent;
use shared::models::{Table, TableStatus};

use crate::utils::{AppError, AppResult};

pub struct TableRegistry {
    inner: RwLock<Vec<Table>>,
}

impl TableRegistry {
    pub fn new(tables: Vec<Table>) -> Self {
        Self {
            inner: RwLock::new(tables),
        }
    }

    /// All tables in insertion order
    pub fn list(&self) -> Vec<Table> {
        self.inner.read().clone()
    }

    pub fn get(&self, table_id: u64) -> AppResult<Table> {
        self.inner
            .read()
            .iter()
            .find(|t| t.id == table_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Table {} not found", table_id)))
    }

    /// Apply a status transition.
    ///
    /// - `occupied` records `order_id` as the table's current order; a
    ///   missing id represents manual occupancy without a tracked order.
    /// - `available` clears `current_order_id` unconditionally.
    /// - `reserved` leaves `current_order_id` untouched.
    ///
    /// Returns the updated table together with the `TableStatusChanged`
    /// event; the caller publishes it after the lock is gone.
    pub fn set_status(
        &self,
        table_id: u64,
        status: TableStatus,
        order_id: Option<u64>,
    ) -> AppResult<(Table, FloorEvent)> {
        let mut tables = self.inner.write();
        let table = tables
            .iter_mut()
            .find(|t| t.id == table_id)
            .ok_or_else(|| AppError::not_found(format!("Table {} not found", table_id)))?;

        table.status = status;
        match status {
            TableStatus::Occupied => {
                if order_id.is_some() {
                    table.current_order_id = order_id;
                }
            }
            TableStatus::Available => table.current_order_id = None,
            TableStatus::Reserved => {}
        }

        let updated = table.clone();
        let event = FloorEvent::TableStatusChanged {
            table_id: updated.id,
            status: updated.status,
        };
        Ok((updated, event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floor::seed;

    fn registry() -> TableRegistry {
        TableRegistry::new(seed::tables())
    }

    #[test]
    fn list_keeps_insertion_order() {
        let tables = registry().list();
        let numbers: Vec<_> = tables.iter().map(|t| t.number).collect();
        assert_eq!(numbers, (1..=numbers.len() as u32).collect::<Vec<_>>());
    }

    #[test]
    fn unknown_table_is_not_found() {
        assert!(matches!(
            registry().get(99),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn occupied_records_order_id() {
        let reg = registry();
        let (table, event) = reg
            .set_status(1, TableStatus::Occupied, Some(7))
            .unwrap();
        assert_eq!(table.status, TableStatus::Occupied);
        assert_eq!(table.current_order_id, Some(7));
        assert!(matches!(
            event,
            FloorEvent::TableStatusChanged {
                table_id: 1,
                status: TableStatus::Occupied,
            }
        ));
    }

    #[test]
    fn manual_occupancy_keeps_existing_order_ref() {
        let reg = registry();
        reg.set_status(1, TableStatus::Occupied, Some(7)).unwrap();
        // Re-marking occupied without an order id must not lose the ref
        let (table, _) = reg.set_status(1, TableStatus::Occupied, None).unwrap();
        assert_eq!(table.current_order_id, Some(7));
    }

    #[test]
    fn available_clears_order_ref() {
        let reg = registry();
        reg.set_status(1, TableStatus::Occupied, Some(7)).unwrap();
        let (table, _) = reg.set_status(1, TableStatus::Available, None).unwrap();
        assert_eq!(table.status, TableStatus::Available);
        assert_eq!(table.current_order_id, None);
    }

    #[test]
    fn reserved_leaves_order_ref_untouched() {
        let reg = registry();
        reg.set_status(1, TableStatus::Occupied, Some(7)).unwrap();
        let (table, _) = reg.set_status(1, TableStatus::Reserved, None).unwrap();
        assert_eq!(table.status, TableStatus::Reserved);
        assert_eq!(table.current_order_id, Some(7));
    }

    #[test]
    fn all_transitions_are_legal() {
        let reg = registry();
        for from in [
            TableStatus::Available,
            TableStatus::Occupied,
            TableStatus::Reserved,
        ] {
            for to in [
                TableStatus::Available,
                TableStatus::Occupied,
                TableStatus::Reserved,
            ] {
                reg.set_status(4, from, None).unwrap();
                let (table, _) = reg.set_status(4, to, None).unwrap();
                assert_eq!(table.status, to);
            }
        }
    }
}
