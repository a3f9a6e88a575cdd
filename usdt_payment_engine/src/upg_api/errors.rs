use thiserror::Error;

use crate::traits::{DirectoryError, ExecutionServiceError, LedgerError, PaymentStoreError};

#[derive(Debug, Clone, Error)]
pub enum CollectionError {
    #[error("Store {0} does not exist")]
    StoreNotFound(String),
    #[error("Wallet {0} is not allowed to collect from this store")]
    NotAuthorized(String),
    #[error("The destination wallet is not the wallet authorized to receive this collection")]
    DestinationMismatch,
    #[error("Transaction {0} does not belong to this store")]
    TransactionNotOwned(String),
    #[error("'{0}' is not a valid transaction id")]
    InvalidTransactionId(String),
    #[error("The store does not have a valid payment wallet configured")]
    PaymentWalletNotConfigured,
    #[error("payment wallet balance is zero")]
    ZeroBalance,
    #[error("a collection is already in progress")]
    CollectionInProgress,
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Execution service error: {0}")]
    ExecutionServiceError(String),
}

impl From<DirectoryError> for CollectionError {
    fn from(e: DirectoryError) -> Self {
        match e {
            DirectoryError::DatabaseError(s) => CollectionError::DatabaseError(s),
        }
    }
}

impl From<LedgerError> for CollectionError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::DatabaseError(s) => CollectionError::DatabaseError(s),
        }
    }
}

impl From<ExecutionServiceError> for CollectionError {
    fn from(e: ExecutionServiceError) -> Self {
        CollectionError::ExecutionServiceError(e.to_string())
    }
}

#[derive(Debug, Clone, Error)]
pub enum WalletPaymentError {
    #[error("Store {0} does not exist")]
    StoreNotFound(String),
    #[error("The store does not have a valid payment wallet configured")]
    PaymentWalletNotConfigured,
    #[error("'{0}' is not a valid wallet address")]
    InvalidWalletAddress(String),
    #[error("Wallet {wallet} is not a member of store {storecode}")]
    MemberNotFound { storecode: String, wallet: String },
    #[error("The payment amount must be greater than zero")]
    InvalidAmount,
    #[error("Payment {0} does not exist")]
    PaymentNotFound(i64),
    #[error("Payment {0} was not made from this wallet")]
    NotPaymentOwner(i64),
    #[error("'{0}' is not a valid transaction hash")]
    InvalidTransactionHash(String),
    #[error("Payment {0} has already been confirmed with a different transaction")]
    AlreadyConfirmed(i64),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<DirectoryError> for WalletPaymentError {
    fn from(e: DirectoryError) -> Self {
        match e {
            DirectoryError::DatabaseError(s) => WalletPaymentError::DatabaseError(s),
        }
    }
}

impl From<PaymentStoreError> for WalletPaymentError {
    fn from(e: PaymentStoreError) -> Self {
        match e {
            PaymentStoreError::DatabaseError(s) => WalletPaymentError::DatabaseError(s),
            PaymentStoreError::PaymentNotFound(id) => WalletPaymentError::PaymentNotFound(id),
            PaymentStoreError::AlreadyConfirmed(id) => WalletPaymentError::AlreadyConfirmed(id),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum DashboardError {
    #[error("Store {0} does not exist")]
    StoreNotFound(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Execution service error: {0}")]
    ExecutionServiceError(String),
}

impl From<DirectoryError> for DashboardError {
    fn from(e: DirectoryError) -> Self {
        match e {
            DirectoryError::DatabaseError(s) => DashboardError::DatabaseError(s),
        }
    }
}

impl From<LedgerError> for DashboardError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::DatabaseError(s) => DashboardError::DatabaseError(s),
        }
    }
}

impl From<PaymentStoreError> for DashboardError {
    fn from(e: PaymentStoreError) -> Self {
        DashboardError::DatabaseError(e.to_string())
    }
}

impl From<ExecutionServiceError> for DashboardError {
    fn from(e: ExecutionServiceError) -> Self {
        DashboardError::ExecutionServiceError(e.to_string())
    }
}
