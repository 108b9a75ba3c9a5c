//! Menu Catalog Models
//!
//! Read-only on the server side: the catalog is seeded at bootstrap and
//! consulted for pricing during order creation.

use serde::{Deserialize, Serialize};

/// Menu category entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCategory {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub menu_type: String,
}

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: u32,
    pub category_id: u32,
    pub name: String,
    pub description: String,
    /// Price in currency unit
    pub price: f64,
    /// Preparation time estimate in minutes
    pub preparation_time: u32,
    pub menu_type: String,
}
