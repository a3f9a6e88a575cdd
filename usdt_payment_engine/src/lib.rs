//! USDT Payment Engine
//!
//! The USDT payment engine holds the core logic of the P2P exchange gateway: sweeping store payment wallets into
//! admin-controlled wallets, tracking those transfers, and recording member payments into store wallets.
//!
//! The library is divided into three main sections:
//! 1. Backend contracts ([`mod@traits`]). The APIs never talk to a database or the custodial execution service
//!    directly; they are generic over these traits.
//! 2. The SQLite backend ([`SqliteDatabase`]), which implements the storage traits. The data types it stores are
//!    defined in [`mod@db_types`] and are public.
//! 3. The public API ([`mod@upg_api`]). This is what the HTTP server calls into.
//!
//! Blockchain work (signing, nonces, gas, retries) is done by the external execution service. The engine only asks it
//! for balances, queues transfers and polls their status.
pub mod db_types;
pub mod helpers;
pub mod traits;
pub mod upg_api;

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
pub use traits::{
    CollectionLedger,
    DirectoryManagement,
    ExecutionService,
    StoreDirectory,
    UsdtGatewayDatabase,
    WalletPaymentManagement,
};
pub use upg_api::{
    authorization::{resolve_collection_authorization, CollectionAuthorization},
    collection_api::CollectionApi,
    dashboard_api::StoreDashboardApi,
    errors::{CollectionError, DashboardError, WalletPaymentError},
    wallet_payment_api::WalletPaymentApi,
};
