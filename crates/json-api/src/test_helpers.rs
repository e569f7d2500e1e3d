//! Test helpers.

use std::{str::FromStr, sync::Arc};

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use storefront_app::{
    auth::{MockAuthService, Principal},
    context::AppContext,
    domain::{
        products::{
            MockProductsService,
            records::{Category, ProductId, ProductRecord},
        },
        transactions::{
            MockTransactionsService,
            records::{TransactionId, TransactionRecord},
        },
        users::{
            MockUsersService,
            records::{Role, UserId, UserRecord},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).expect("valid decimal literal")
}

pub(crate) fn make_user(id: i64, username: &str, role: Role) -> UserRecord {
    UserRecord {
        id: UserId::from_i64(id),
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: "$2b$04$not-a-real-hash".to_string(),
        role,
        enabled: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(id: i64, name: &str, price: &str) -> ProductRecord {
    ProductRecord {
        id: ProductId::from_i64(id),
        name: name.to_string(),
        description: None,
        price: dec(price),
        stock: 10,
        category: Category::Home,
        image_url: None,
        seller_id: UserId::from_i64(1),
        active: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_transaction(id: i64, quantity: i32, total_price: &str) -> TransactionRecord {
    TransactionRecord {
        id: TransactionId::from_i64(id),
        user_id: UserId::from_i64(1),
        product_id: ProductId::from_i64(1),
        quantity,
        total_price: dec(total_price),
        created_at: Timestamp::UNIX_EPOCH,
    }
}

/// Places a fixed principal in the depot, standing in for the auth middleware.
#[derive(Debug)]
pub(crate) struct InjectPrincipal(pub Principal);

impl InjectPrincipal {
    pub(crate) fn new(username: &str, role: Role) -> Self {
        Self(Principal {
            username: username.to_string(),
            role,
        })
    }
}

#[salvo::handler]
impl InjectPrincipal {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_principal(self.0.clone());
        ctrl.call_next(req, depot, res).await;
    }
}

pub(crate) fn strict_users_mock() -> MockUsersService {
    let mut users = MockUsersService::new();

    users.expect_register_user().never();
    users.expect_get_user().never();
    users.expect_find_user_by_username().never();
    users.expect_list_users().never();
    users.expect_update_user().never();
    users.expect_delete_user().never();

    users
}

pub(crate) fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_list_products_by_category().never();
    products.expect_list_products_by_price_range().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

pub(crate) fn strict_transactions_mock() -> MockTransactionsService {
    let mut transactions = MockTransactionsService::new();

    transactions.expect_list_transactions().never();
    transactions.expect_get_transaction().never();
    transactions.expect_create_transaction().never();
    transactions.expect_update_transaction().never();
    transactions.expect_delete_transaction().never();

    transactions
}

pub(crate) fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate().never();
    auth.expect_verify_token().never();

    auth
}

pub(crate) fn state_with(
    users: MockUsersService,
    products: MockProductsService,
    transactions: MockTransactionsService,
    auth: MockAuthService,
) -> Arc<State> {
    State::from_app_context(AppContext {
        users: Arc::new(users),
        products: Arc::new(products),
        transactions: Arc::new(transactions),
        auth: Arc::new(auth),
    })
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state_with(
        strict_users_mock(),
        strict_products_mock(),
        strict_transactions_mock(),
        auth,
    )
}

pub(crate) fn state_with_users(users: MockUsersService, auth: MockAuthService) -> Arc<State> {
    state_with(
        users,
        strict_products_mock(),
        strict_transactions_mock(),
        auth,
    )
}

pub(crate) fn state_with_products(products: MockProductsService) -> Arc<State> {
    state_with(
        strict_users_mock(),
        products,
        strict_transactions_mock(),
        strict_auth_mock(),
    )
}

pub(crate) fn state_with_transactions(transactions: MockTransactionsService) -> Arc<State> {
    state_with(
        strict_users_mock(),
        strict_products_mock(),
        transactions,
        strict_auth_mock(),
    )
}

/// Users routes, optionally behind a fixed principal.
pub(crate) fn users_service(
    users: MockUsersService,
    auth: MockAuthService,
    principal: Option<InjectPrincipal>,
    route: Router,
) -> Service {
    let mut router = Router::new().hoop(inject(state_with_users(users, auth)));

    if let Some(principal) = principal {
        router = router.hoop(principal);
    }

    Service::new(router.push(route))
}

/// Products routes, optionally behind a fixed principal.
pub(crate) fn products_service(
    products: MockProductsService,
    principal: Option<InjectPrincipal>,
    route: Router,
) -> Service {
    let mut router = Router::new().hoop(inject(state_with_products(products)));

    if let Some(principal) = principal {
        router = router.hoop(principal);
    }

    Service::new(router.push(route))
}

pub(crate) fn transactions_service(transactions: MockTransactionsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_transactions(transactions)))
            .push(route),
    )
}
