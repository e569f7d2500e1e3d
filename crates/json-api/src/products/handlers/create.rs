//! Create Product Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{
        ToSchema,
        extract::{HeaderParam, JsonBody},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::{
    products::{
        data::{NewProduct, ProductUpdate},
        records::Category,
    },
    users::records::Role,
};

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Product Request
///
/// Shared by create and update; every field is written as given.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductRequest {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Unit price; a decimal string or number with at most 17 integer digits
    /// and 2 decimal places. Anything else is rejected with 400.
    #[salvo(schema(value_type = String))]
    pub price: Decimal,

    pub stock: i32,

    /// ELECTRONICS, FASHION, HOME, BOOKS, SPORTS, TOYS, FOOD or OTHER
    #[salvo(schema(value_type = String))]
    pub category: Category,

    #[serde(default)]
    pub image_url: Option<String>,
}

impl From<ProductRequest> for NewProduct {
    fn from(request: ProductRequest) -> Self {
        NewProduct {
            name: request.name,
            description: request.description,
            price: request.price,
            stock: request.stock,
            category: request.category,
            image_url: request.image_url,
        }
    }
}

impl From<ProductRequest> for ProductUpdate {
    fn from(request: ProductRequest) -> Self {
        ProductUpdate {
            name: request.name,
            description: request.description,
            price: request.price,
            stock: request.stock,
            category: request.category,
            image_url: request.image_url,
        }
    }
}

/// Create Product Handler
///
/// The seller is named by the `username` header rather than taken from the
/// token.
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing username header or invalid payload"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::FORBIDDEN, description = "Requires SELLER or ADMIN"),
        (status_code = StatusCode::NOT_FOUND, description = "Seller not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    username: HeaderParam<String, false>,
    json: JsonBody<ProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    depot.require_any_role(&[Role::Seller, Role::Admin])?;

    let seller = username
        .into_inner()
        .filter(|username| !username.trim().is_empty())
        .ok_or_else(|| StatusError::bad_request().brief("Missing username header"))?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .create_product(json.into_inner().into(), &seller)
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
