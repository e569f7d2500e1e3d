//! App Router

use salvo::Router;

use crate::{auth, products, transactions, users};

/// Every `/api` route, behind optional bearer authentication.
///
/// Literal segments are registered ahead of `{id:num}` so that
/// `category`, `price-range` and `username` never reach an id route.
pub fn app_router() -> Router {
    Router::with_path("api")
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("users")
                .get(users::index::handler)
                .push(Router::with_path("register").post(users::register::handler))
                .push(Router::with_path("login").post(users::login::handler))
                .push(Router::with_path("username/{username}").get(users::by_username::handler))
                .push(
                    Router::with_path("{id:num}")
                        .get(users::get::handler)
                        .put(users::update::handler)
                        .delete(users::delete::handler),
                ),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(Router::with_path("category/{category}").get(products::by_category::handler))
                .push(Router::with_path("price-range").get(products::by_price_range::handler))
                .push(
                    Router::with_path("{id:num}")
                        .get(products::get::handler)
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(
            Router::with_path("transactions")
                .get(transactions::index::handler)
                .post(transactions::create::handler)
                .push(
                    Router::with_path("{id:num}")
                        .get(transactions::get::handler)
                        .put(transactions::update::handler)
                        .delete(transactions::delete::handler),
                ),
        )
}
