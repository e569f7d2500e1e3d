//! Transactions Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    products::records::ProductId,
    transactions::records::{TransactionId, TransactionRecord},
    users::records::UserId,
};

const LIST_TRANSACTIONS_SQL: &str = include_str!("sql/list_transactions.sql");
const GET_TRANSACTION_SQL: &str = include_str!("sql/get_transaction.sql");
const CREATE_TRANSACTION_SQL: &str = include_str!("sql/create_transaction.sql");
const UPDATE_TRANSACTION_SQL: &str = include_str!("sql/update_transaction.sql");
const DELETE_TRANSACTION_SQL: &str = include_str!("sql/delete_transaction.sql");

/// Column values written on insert and update.
pub(crate) struct TransactionRow {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub total_price: Decimal,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgTransactionsRepository;

impl PgTransactionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_transactions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<TransactionRecord>, sqlx::Error> {
        query_as::<Postgres, TransactionRecord>(LIST_TRANSACTIONS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_transaction(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        transaction: TransactionId,
    ) -> Result<TransactionRecord, sqlx::Error> {
        query_as::<Postgres, TransactionRecord>(GET_TRANSACTION_SQL)
            .bind(transaction.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_transaction(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        row: TransactionRow,
    ) -> Result<TransactionRecord, sqlx::Error> {
        query_as::<Postgres, TransactionRecord>(CREATE_TRANSACTION_SQL)
            .bind(row.user_id.into_i64())
            .bind(row.product_id.into_i64())
            .bind(row.quantity)
            .bind(row.total_price)
            .bind(SqlxTimestamp::from(row.created_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_transaction(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        transaction: TransactionId,
        row: TransactionRow,
    ) -> Result<TransactionRecord, sqlx::Error> {
        query_as::<Postgres, TransactionRecord>(UPDATE_TRANSACTION_SQL)
            .bind(transaction.into_i64())
            .bind(row.user_id.into_i64())
            .bind(row.product_id.into_i64())
            .bind(row.quantity)
            .bind(row.total_price)
            .bind(SqlxTimestamp::from(row.created_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_transaction(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        transaction: TransactionId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_TRANSACTION_SQL)
            .bind(transaction.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for TransactionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: TransactionId::from_i64(row.try_get("id")?),
            user_id: UserId::from_i64(row.try_get("user_id")?),
            product_id: ProductId::from_i64(row.try_get("product_id")?),
            quantity: row.try_get("quantity")?,
            total_price: row.try_get("total_price")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
