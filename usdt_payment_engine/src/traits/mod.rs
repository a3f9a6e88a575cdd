//! # Backend contracts
//!
//! The traits in this module define what the gateway needs from its collaborators. The public APIs in
//! [`crate::upg_api`] are generic over them, so that the SQLite backend and the execution-service client can be swapped
//! for fakes in tests.
//!
//! * [`StoreDirectory`] reads stores, agents and members. [`DirectoryManagement`] writes them; the gateway itself never
//!   does, but tooling and tests need to.
//! * [`CollectionLedger`] stores collection attempts: the permanent history and the in-flight queue.
//! * [`WalletPaymentManagement`] stores member payments to store wallets.
//! * [`ExecutionService`] is the custodial service that reads balances and executes transfers.
mod collection_ledger;
mod directory;
mod execution_service;
mod wallet_payments;

pub use collection_ledger::{CollectionLedger, LedgerError};
pub use directory::{DirectoryError, DirectoryManagement, StoreDirectory};
pub use execution_service::{ExecutionService, ExecutionServiceError, ExecutionStatusReport};
pub use wallet_payments::{PaymentQueryFilter, PaymentStoreError, WalletPaymentManagement};

/// Everything the HTTP gateway needs from a database backend.
pub trait UsdtGatewayDatabase: StoreDirectory + CollectionLedger + WalletPaymentManagement {}

impl<T> UsdtGatewayDatabase for T where T: StoreDirectory + CollectionLedger + WalletPaymentManagement {}
