//! Money calculation utilities using rust_decimal for precision
//!
//! All arithmetic is done with `Decimal` internally, then converted back to
//! `f64` rounded to 2 decimal places for storage and wire transfer.

use rust_decimal::prelude::*;

use shared::models::OrderLine;

/// Convert f64 to Decimal for calculation
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64, rounded to 2 decimal places
pub fn to_f64(value: Decimal) -> f64 {
    value.round_dp(2).to_f64().unwrap_or(0.0)
}

/// unit_price × quantity for one line
pub fn line_total(unit_price: f64, quantity: u32) -> Decimal {
    to_decimal(unit_price) * Decimal::from(quantity)
}

/// Exact sum of unit_price × quantity over all lines
pub fn order_total(lines: &[OrderLine]) -> f64 {
    let total: Decimal = lines
        .iter()
        .map(|line| line_total(line.unit_price, line.quantity))
        .sum();
    to_f64(total)
}
