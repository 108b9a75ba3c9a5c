//! Read-only menu catalog.
//!
//! Seeded once at bootstrap; order creation resolves item ids against it to
//! capture name and unit price by value. Immutable after construction, so no
//! lock is needed.

use shared::models::{MenuCategory, MenuItem};

pub struct MenuCatalog {
    categories: Vec<MenuCategory>,
    items: Vec<MenuItem>,
}

impl MenuCatalog {
    pub fn new(categories: Vec<MenuCategory>, items: Vec<MenuItem>) -> Self {
        Self { categories, items }
    }

    /// All categories, optionally filtered by menu type
    pub fn categories(&self, menu_type: Option<&str>) -> Vec<MenuCategory> {
        self.categories
            .iter()
            .filter(|c| menu_type.is_none_or(|t| c.menu_type == t))
            .cloned()
            .collect()
    }

    /// Items filtered by category, free-text search, and menu type.
    ///
    /// Search matches name or description, case-insensitively.
    pub fn items(
        &self,
        category_id: Option<u32>,
        search: Option<&str>,
        menu_type: Option<&str>,
    ) -> Vec<MenuItem> {
        let needle = search.map(str::to_lowercase);
        self.items
            .iter()
            .filter(|i| category_id.is_none_or(|c| i.category_id == c))
            .filter(|i| menu_type.is_none_or(|t| i.menu_type == t))
            .filter(|i| {
                needle.as_deref().is_none_or(|n| {
                    i.name.to_lowercase().contains(n) || i.description.to_lowercase().contains(n)
                })
            })
            .cloned()
            .collect()
    }

    /// Look up a single item by id
    pub fn item(&self, id: u32) -> Option<MenuItem> {
        self.items.iter().find(|i| i.id == id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floor::seed;

    fn catalog() -> MenuCatalog {
        MenuCatalog::new(seed::menu_categories(), seed::menu_items())
    }

    #[test]
    fn resolves_seeded_item() {
        let item = catalog().item(101).expect("item 101 seeded");
        assert_eq!(item.name, "Phở Bò");
        assert_eq!(item.price, 9.50);
    }

    #[test]
    fn unknown_item_is_none() {
        assert!(catalog().item(999).is_none());
    }

    #[test]
    fn search_is_case_insensitive() {
        let hits = catalog().items(None, Some("phở"), None);
        assert!(hits.iter().any(|i| i.id == 101));
    }

    #[test]
    fn category_filter_narrows_items() {
        let drinks = catalog().items(Some(4), None, None);
        assert!(!drinks.is_empty());
        assert!(drinks.iter().all(|i| i.category_id == 4));
    }
}
