//! Products Data

use rust_decimal::Decimal;

use crate::domain::products::records::Category;

/// Digits allowed before the decimal point by the `NUMERIC(19, 2)` price column.
const PRICE_INTEGER_DIGITS: u32 = 17;

/// Digits allowed after the decimal point by the `NUMERIC(19, 2)` price column.
const PRICE_SCALE: u32 = 2;

/// Whether `price` fits the price column exactly, without rounding or overflow.
///
/// Trailing zeros do not count against the scale, so `19.990` is accepted.
#[must_use]
pub fn is_storable_price(price: Decimal) -> bool {
    let price = price.normalize();

    price.scale() <= PRICE_SCALE
        && price.abs().trunc() < Decimal::from(10_u64.pow(PRICE_INTEGER_DIGITS))
}

/// New Product Data
///
/// The seller is supplied separately, by username.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub category: Category,
    pub image_url: Option<String>,
}

/// Product Update Data
///
/// Every field overwrites the stored value.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub category: Category,
    pub image_url: Option<String>,
}
