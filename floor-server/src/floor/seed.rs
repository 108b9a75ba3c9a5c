//! Bootstrap data: tables, menu catalog, and staff accounts.
//!
//! There is no persistence layer; every process start seeds the same floor
//! plan and menu. Passwords are argon2-hashed at seed time.

use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHasher};
use shared::models::{MenuCategory, MenuItem, StaffAccount, Table, TableStatus};

const MENU_TYPE_A_LA_CARTE: &str = "a-la-carte";

/// Default password for seeded accounts, overridable per deployment.
fn seed_password() -> String {
    std::env::var("SEED_PASSWORD").unwrap_or_else(|_| "password123".to_string())
}

pub fn tables() -> Vec<Table> {
    let plan: [(u32, u32, TableStatus); 8] = [
        (1, 2, TableStatus::Available),
        (2, 2, TableStatus::Occupied),
        (3, 4, TableStatus::Occupied),
        (4, 4, TableStatus::Available),
        (5, 6, TableStatus::Reserved),
        (6, 6, TableStatus::Available),
        (7, 8, TableStatus::Available),
        (8, 8, TableStatus::Available),
    ];

    plan.into_iter()
        .map(|(number, capacity, status)| Table {
            id: number as u64,
            number,
            capacity,
            status,
            current_order_id: None,
        })
        .collect()
}

pub fn menu_categories() -> Vec<MenuCategory> {
    let categories = [
        (1, "Soups", "Hearty Vietnamese soups"),
        (2, "Rice & Noodles", "Traditional rice and noodle dishes"),
        (3, "Desserts", "Sweet treats to finish your meal"),
        (4, "Drinks", "Refreshing beverages"),
    ];

    categories
        .into_iter()
        .map(|(id, name, description)| MenuCategory {
            id,
            name: name.to_string(),
            description: description.to_string(),
            menu_type: MENU_TYPE_A_LA_CARTE.to_string(),
        })
        .collect()
}

pub fn menu_items() -> Vec<MenuItem> {
    let items: [(u32, u32, &str, f64, &str, u32); 15] = [
        (101, 1, "Phở Bò", 9.50, "Traditional beef noodle soup with herbs and bean sprouts", 18),
        (102, 1, "Bún Bò Huế", 10.50, "Spicy beef noodle soup from central Vietnam", 20),
        (103, 1, "Canh Chua Cá", 5.50, "Sweet and sour fish soup with vegetables", 15),
        (201, 2, "Cơm Chiên Hải Sản", 11.00, "Seafood fried rice", 15),
        (202, 2, "Bánh Mì Thịt", 8.50, "Vietnamese sandwich with various meats and vegetables", 10),
        (203, 2, "Bún Chả", 9.50, "Grilled pork with rice noodles and herbs", 20),
        (204, 2, "Cơm Tấm", 10.50, "Broken rice with grilled pork, egg, and vegetables", 15),
        (205, 2, "Bánh Xèo", 8.50, "Vietnamese crispy pancake with shrimp and bean sprouts", 18),
        (301, 3, "Chè Ba Màu", 4.50, "Three-color dessert with beans, jelly, and coconut milk", 8),
        (302, 3, "Bánh Flan", 3.50, "Vietnamese caramel custard", 5),
        (303, 3, "Chè Đậu Xanh", 4.00, "Mung bean pudding with coconut cream", 6),
        (401, 4, "Cà Phê Sữa Đá", 2.50, "Vietnamese iced coffee with condensed milk", 5),
        (402, 4, "Nước Chanh Muối", 3.50, "Salted preserved lime juice", 3),
        (403, 4, "Trà Đá", 1.50, "Vietnamese iced tea", 3),
        (404, 4, "Sinh Tố Bơ", 4.50, "Avocado smoothie with condensed milk", 5),
    ];

    items
        .into_iter()
        .map(
            |(id, category_id, name, price, description, preparation_time)| MenuItem {
                id,
                category_id,
                name: name.to_string(),
                description: description.to_string(),
                price,
                preparation_time,
                menu_type: MENU_TYPE_A_LA_CARTE.to_string(),
            },
        )
        .collect()
}

pub fn staff_accounts() -> Vec<StaffAccount> {
    let password = seed_password();
    let accounts = [
        ("staff1", "Staff User", "staff"),
        ("kitchen1", "Kitchen User", "kitchen"),
        ("admin1", "Admin User", "admin"),
    ];

    accounts
        .into_iter()
        .enumerate()
        .map(|(idx, (username, name, role))| StaffAccount {
            id: format!("staff:{}", idx + 1),
            username: username.to_string(),
            name: name.to_string(),
            role: role.to_string(),
            password_hash: hash_password(&password),
        })
        .collect()
}

fn hash_password(password: &str) -> String {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .unwrap_or_default()
}
