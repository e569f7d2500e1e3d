//! Products service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        products::{
            data::{NewProduct, ProductUpdate, is_storable_price},
            errors::ProductsServiceError,
            records::{Category, ProductId, ProductRecord},
            repository::{PgProductsRepository, ProductRow},
        },
        users::repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
    users: PgUsersRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
            users: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn list_products_by_category(
        &self,
        category: Category,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self
            .repository
            .list_products_by_category(&mut tx, category)
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn list_products_by_price_range(
        &self,
        min_price: Decimal,
        max_price: Decimal,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        if min_price > max_price {
            return Ok(Vec::new());
        }

        let mut tx = self.db.begin().await?;

        let products = self
            .repository
            .list_products_by_price_range(&mut tx, min_price, max_price)
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductId) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
        seller_username: &str,
    ) -> Result<ProductRecord, ProductsServiceError> {
        if !is_storable_price(product.price) {
            debug!(price = %product.price, "product price does not fit the price column");
            return Err(ProductsServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let Some(seller) = self
            .users
            .find_user_by_username(&mut tx, seller_username)
            .await?
        else {
            debug!(seller_username, "product seller does not exist");
            return Err(ProductsServiceError::SellerNotFound);
        };

        let created = self
            .repository
            .create_product(
                &mut tx,
                seller.id,
                ProductRow {
                    name: &product.name,
                    description: product.description.as_deref(),
                    price: product.price,
                    stock: product.stock,
                    category: product.category,
                    image_url: product.image_url.as_deref(),
                },
                Timestamp::now(),
            )
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        if !is_storable_price(update.price) {
            debug!(price = %update.price, "product price does not fit the price column");
            return Err(ProductsServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(
                &mut tx,
                product,
                ProductRow {
                    name: &update.name,
                    description: update.description.as_deref(),
                    price: update.price,
                    stock: update.stock,
                    category: update.category,
                    image_url: update.image_url.as_deref(),
                },
                Timestamp::now(),
            )
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductId) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieves all products in a category.
    async fn list_products_by_category(
        &self,
        category: Category,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieves products priced within `[min_price, max_price]`.
    async fn list_products_by_price_range(
        &self,
        min_price: Decimal,
        max_price: Decimal,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductId) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a product owned by the user named `seller_username`.
    async fn create_product(
        &self,
        product: NewProduct,
        seller_username: &str,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Overwrites every editable field of a product.
    async fn update_product(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Deletes a product.
    async fn delete_product(&self, product: ProductId) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use testresult::TestResult;

    use crate::test::{TestContext, helpers::new_product};

    use super::*;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).expect("valid decimal literal")
    }

    #[tokio::test]
    async fn create_product_links_seller_and_is_active() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_seller("sam").await;

        let product = ctx
            .products
            .create_product(
                NewProduct {
                    description: Some("Warm light".to_string()),
                    image_url: Some("https://img.example.com/lamp.png".to_string()),
                    ..new_product("Lamp", "19.99", Category::Home)
                },
                "sam",
            )
            .await?;

        assert_eq!(product.name, "Lamp");
        assert_eq!(product.description.as_deref(), Some("Warm light"));
        assert_eq!(product.price, dec("19.99"));
        assert_eq!(product.category, Category::Home);
        assert_eq!(product.seller_id, seller.id);
        assert!(product.active);

        Ok(())
    }

    #[tokio::test]
    async fn create_product_unknown_seller_returns_seller_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .create_product(new_product("Lamp", "19.99", Category::Home), "ghost")
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::SellerNotFound)),
            "expected SellerNotFound, got {result:?}"
        );
        assert!(ctx.products.list_products().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn create_product_oversized_price_returns_invalid_data() -> TestResult {
        let ctx = TestContext::new().await;
        ctx.create_seller("sam").await;

        let result = ctx
            .products
            .create_product(
                new_product("Yacht", "1000000000000000000", Category::Other),
                "sam",
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
        assert!(ctx.products.list_products().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn create_product_sub_cent_price_returns_invalid_data() -> TestResult {
        let ctx = TestContext::new().await;
        ctx.create_seller("sam").await;

        let result = ctx
            .products
            .create_product(new_product("Sticker", "0.005", Category::Other), "sam")
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
        assert!(ctx.products.list_products().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn get_product_returns_created_product() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_seller("sam").await;
        let created = ctx.create_product(&seller, "Lamp", "19.99").await;

        let product = ctx.products.get_product(created.id).await?;

        assert_eq!(product, created);

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_id_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.get_product(ProductId::from_i64(999)).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_products_empty_when_none_created() -> TestResult {
        let ctx = TestContext::new().await;

        let products = ctx.products.list_products().await?;

        assert!(products.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn list_products_by_category_filters() -> TestResult {
        let ctx = TestContext::new().await;
        ctx.create_seller("sam").await;

        ctx.products
            .create_product(new_product("Phone", "499.00", Category::Electronics), "sam")
            .await?;
        ctx.products
            .create_product(new_product("Novel", "12.50", Category::Books), "sam")
            .await?;

        let electronics = ctx
            .products
            .list_products_by_category(Category::Electronics)
            .await?;

        let names: Vec<&str> = electronics.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, vec!["Phone"]);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_by_price_range_is_inclusive() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_seller("sam").await;

        ctx.create_product(&seller, "Cheap", "9.99").await;
        ctx.create_product(&seller, "Low", "10.00").await;
        ctx.create_product(&seller, "Mid", "15.00").await;
        ctx.create_product(&seller, "High", "20.00").await;
        ctx.create_product(&seller, "Pricey", "20.01").await;

        let products = ctx
            .products
            .list_products_by_price_range(dec("10.00"), dec("20.00"))
            .await?;

        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, vec!["Low", "Mid", "High"]);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_by_price_range_inverted_bounds_is_empty() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_seller("sam").await;

        ctx.create_product(&seller, "Mid", "15.00").await;

        let products = ctx
            .products
            .list_products_by_price_range(dec("20.00"), dec("10.00"))
            .await?;

        assert!(products.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn update_product_overwrites_every_field() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_seller("sam").await;
        let created = ctx.create_product(&seller, "Lamp", "19.99").await;

        let updated = ctx
            .products
            .update_product(
                created.id,
                ProductUpdate {
                    name: "Desk Lamp".to_string(),
                    description: None,
                    price: dec("24.50"),
                    stock: 3,
                    category: Category::Other,
                    image_url: None,
                },
            )
            .await?;

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Desk Lamp");
        assert_eq!(updated.price, dec("24.50"));
        assert_eq!(updated.stock, 3);
        assert_eq!(updated.category, Category::Other);
        assert_eq!(updated.seller_id, seller.id);
        assert!(updated.updated_at >= created.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn update_product_unknown_id_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .update_product(
                ProductId::from_i64(999),
                ProductUpdate {
                    name: "Nothing".to_string(),
                    description: None,
                    price: dec("1.00"),
                    stock: 0,
                    category: Category::Other,
                    image_url: None,
                },
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_product_oversized_price_keeps_stored_price() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_seller("sam").await;
        let created = ctx.create_product(&seller, "Lamp", "19.99").await;

        let result = ctx
            .products
            .update_product(
                created.id,
                ProductUpdate {
                    name: "Lamp".to_string(),
                    description: None,
                    price: dec("100000000000000000.00"),
                    stock: 10,
                    category: Category::Home,
                    image_url: None,
                },
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
        assert_eq!(ctx.products.get_product(created.id).await?.price, dec("19.99"));

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_seller("sam").await;
        let created = ctx.create_product(&seller, "Lamp", "19.99").await;

        ctx.products.delete_product(created.id).await?;

        let result = ctx.products.get_product(created.id).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_unknown_id_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_seller("sam").await;
        ctx.create_product(&seller, "Lamp", "19.99").await;

        let result = ctx.products.delete_product(ProductId::from_i64(999)).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
        assert_eq!(ctx.products.list_products().await?.len(), 1);

        Ok(())
    }
}
