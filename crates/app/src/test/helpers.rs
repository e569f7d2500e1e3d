//! Test Helpers

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::domain::{
    products::{data::NewProduct, records::Category},
    users::data::NewUser,
};

pub(crate) fn new_user(username: &str, email: &str, password: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        role: None,
    }
}

pub(crate) fn new_product(name: &str, price: &str, category: Category) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        description: None,
        price: Decimal::from_str(price).expect("valid decimal literal"),
        stock: 10,
        category,
        image_url: None,
    }
}
