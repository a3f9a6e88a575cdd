use thiserror::Error;

use crate::db_types::{NewWalletPayment, PaymentTotals, WalletPayment};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentQueryFilter {
    pub storecode: String,
    /// Restrict results to payments sent from this wallet (case-insensitive).
    pub wallet_address: Option<String>,
    pub limit: u32,
}

#[allow(async_fn_in_trait)]
pub trait WalletPaymentManagement {
    /// Stores a new payment in the `prepared` state and returns it with its assigned id.
    async fn insert_prepared_payment(&self, payment: NewWalletPayment) -> Result<WalletPayment, PaymentStoreError>;

    async fn fetch_payment(&self, id: i64) -> Result<Option<WalletPayment>, PaymentStoreError>;

    /// Moves a payment to `confirmed`, recording the transaction hash and confirmation time.
    ///
    /// Confirming again with the same hash is a no-op. A different hash fails with
    /// [`PaymentStoreError::AlreadyConfirmed`] and leaves the stored one in place.
    async fn confirm_payment(&self, id: i64, transaction_hash: &str) -> Result<WalletPayment, PaymentStoreError>;

    /// Payments matching the filter, newest first.
    async fn search_payments(&self, filter: PaymentQueryFilter) -> Result<Vec<WalletPayment>, PaymentStoreError>;

    async fn payment_totals(&self, storecode: &str) -> Result<PaymentTotals, PaymentStoreError>;
}

#[derive(Debug, Clone, Error)]
pub enum PaymentStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Payment {0} does not exist")]
    PaymentNotFound(i64),
    #[error("Payment {0} is already confirmed with a different transaction")]
    AlreadyConfirmed(i64),
}

impl From<sqlx::Error> for PaymentStoreError {
    fn from(e: sqlx::Error) -> Self {
        PaymentStoreError::DatabaseError(e.to_string())
    }
}
