//! Shared types for the floor-operations backend.
//!
//! Everything in this crate crosses a process or module boundary: domain
//! models, wire messages for the realtime gateway, and client-facing DTOs.
//! No I/O lives here.

pub mod client;
pub mod message;
pub mod models;

pub use client::{LoginRequest, LoginResponse, UserInfo};
pub use message::{BusMessage, EventType, FloorEvent, PROTOCOL_VERSION};
pub use models::{
    MenuCategory, MenuItem, Order, OrderLine, OrderStatus, StaffAccount, Table, TableStatus,
};
