//! Products By Category Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use storefront_app::domain::products::records::Category;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Products By Category Handler
#[endpoint(
    tags("products"),
    summary = "List Products In Category",
    responses(
        (status_code = StatusCode::OK, description = "Products in the category"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown category"),
    ),
)]
pub(crate) async fn handler(
    category: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let category = category
        .into_inner()
        .parse::<Category>()
        .or_400("Unknown category")?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .list_products_by_category(category)
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use storefront_app::domain::products::MockProductsService;
    use testresult::TestResult;

    use crate::test_helpers::{make_product, products_service};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        products_service(
            products,
            None,
            Router::with_path("products/category/{category}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_by_category_forwards_parsed_category() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products_by_category()
            .once()
            .withf(|category| *category == Category::Home)
            .return_once(|_| Ok(vec![make_product(1, "Lamp", "19.99")]));

        let mut res = TestClient::get("http://example.com/products/category/HOME")
            .send(&make_service(products))
            .await;

        let body: Vec<ProductResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.len(), 1, "expected one product");

        Ok(())
    }

    #[tokio::test]
    async fn test_by_category_unknown_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_list_products_by_category().never();

        let res = TestClient::get("http://example.com/products/category/GARDEN")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
