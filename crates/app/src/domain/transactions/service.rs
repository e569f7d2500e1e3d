//! Transactions service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        products::{records::ProductId, repository::PgProductsRepository},
        transactions::{
            data::{NewTransaction, TransactionUpdate},
            errors::TransactionsServiceError,
            pricing,
            records::{TransactionId, TransactionRecord},
            repository::{PgTransactionsRepository, TransactionRow},
        },
        users::records::UserId,
    },
};

#[derive(Debug, Clone)]
pub struct PgTransactionsService {
    db: Db,
    repository: PgTransactionsRepository,
    products: PgProductsRepository,
}

impl PgTransactionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgTransactionsRepository::new(),
            products: PgProductsRepository::new(),
        }
    }

    /// Price `quantity` units of `product` at its current price, stamped now.
    async fn priced_row(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_id: UserId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<TransactionRow, TransactionsServiceError> {
        if quantity <= 0 {
            return Err(TransactionsServiceError::InvalidQuantity);
        }

        let product = self
            .products
            .get_product(tx, product_id)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => TransactionsServiceError::ProductNotFound,
                other => other.into(),
            })?;

        let Some(total_price) = pricing::total_price(product.price, quantity) else {
            debug!(%product_id, quantity, "transaction total overflows");
            return Err(TransactionsServiceError::InvalidData);
        };

        Ok(TransactionRow {
            user_id,
            product_id,
            quantity,
            total_price,
            created_at: Timestamp::now(),
        })
    }
}

#[async_trait]
impl TransactionsService for PgTransactionsService {
    async fn list_transactions(&self) -> Result<Vec<TransactionRecord>, TransactionsServiceError> {
        let mut tx = self.db.begin().await?;

        let transactions = self.repository.list_transactions(&mut tx).await?;

        tx.commit().await?;

        Ok(transactions)
    }

    async fn get_transaction(
        &self,
        transaction: TransactionId,
    ) -> Result<TransactionRecord, TransactionsServiceError> {
        let mut tx = self.db.begin().await?;

        let transaction = self.repository.get_transaction(&mut tx, transaction).await?;

        tx.commit().await?;

        Ok(transaction)
    }

    async fn create_transaction(
        &self,
        transaction: NewTransaction,
    ) -> Result<TransactionRecord, TransactionsServiceError> {
        let mut tx = self.db.begin().await?;

        let row = self
            .priced_row(
                &mut tx,
                transaction.user_id,
                transaction.product_id,
                transaction.quantity,
            )
            .await?;

        let created = self.repository.create_transaction(&mut tx, row).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_transaction(
        &self,
        transaction: TransactionId,
        update: TransactionUpdate,
    ) -> Result<TransactionRecord, TransactionsServiceError> {
        let mut tx = self.db.begin().await?;

        // Existence first, so a missing transaction wins over a missing product.
        self.repository.get_transaction(&mut tx, transaction).await?;

        let row = self
            .priced_row(&mut tx, update.user_id, update.product_id, update.quantity)
            .await?;

        let updated = self
            .repository
            .update_transaction(&mut tx, transaction, row)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_transaction(
        &self,
        transaction: TransactionId,
    ) -> Result<(), TransactionsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_transaction(&mut tx, transaction)
            .await?;

        if rows_affected == 0 {
            return Err(TransactionsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait TransactionsService: Send + Sync {
    /// Retrieves all transactions.
    async fn list_transactions(&self) -> Result<Vec<TransactionRecord>, TransactionsServiceError>;

    /// Retrieve a single transaction.
    async fn get_transaction(
        &self,
        transaction: TransactionId,
    ) -> Result<TransactionRecord, TransactionsServiceError>;

    /// Records a purchase priced at the product's current price.
    async fn create_transaction(
        &self,
        transaction: NewTransaction,
    ) -> Result<TransactionRecord, TransactionsServiceError>;

    /// Replaces a transaction, re-pricing it and stamping it with the current time.
    async fn update_transaction(
        &self,
        transaction: TransactionId,
        update: TransactionUpdate,
    ) -> Result<TransactionRecord, TransactionsServiceError>;

    /// Deletes a transaction.
    async fn delete_transaction(
        &self,
        transaction: TransactionId,
    ) -> Result<(), TransactionsServiceError>;
}
