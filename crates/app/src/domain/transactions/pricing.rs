//! Transaction pricing.

use rust_decimal::Decimal;

/// Exact `unit_price × quantity`, or `None` when the product overflows.
#[must_use]
pub fn total_price(unit_price: Decimal, quantity: i32) -> Option<Decimal> {
    unit_price.checked_mul(Decimal::from(quantity))
}
