//! Products By Price Range Handler

use std::{str::FromStr, sync::Arc};

use rust_decimal::Decimal;
use salvo::prelude::*;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

fn price_param(req: &Request, name: &str) -> Result<Decimal, StatusError> {
    let raw = req
        .query::<String>(name)
        .ok_or_else(|| StatusError::bad_request().brief(format!("Missing {name} query parameter")))?;

    Decimal::from_str(raw.trim()).or_400(&format!("could not parse {name} query parameter"))
}

/// Products By Price Range Handler
///
/// Returns products priced within `[minPrice, maxPrice]`, cheapest first.
/// Inverted bounds match nothing.
#[endpoint(
    tags("products"),
    summary = "List Products In Price Range",
    responses(
        (status_code = StatusCode::OK, description = "Products in the range"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing or malformed bound"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let min_price = price_param(req, "minPrice")?;
    let max_price = price_param(req, "maxPrice")?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .list_products_by_price_range(min_price, max_price)
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}
