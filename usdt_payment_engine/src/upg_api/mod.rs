//! # USDT gateway public API
//!
//! The `upg_api` module exposes the programmatic API of the gateway. Each API wraps a backend that implements the
//! traits it needs, so the pieces can be used (and tested) independently.
//!
//! * [`collection_api`] sweeps store payment wallets into admin wallets and tracks the transfers.
//! * [`wallet_payment_api`] records member payments into store payment wallets.
//! * [`dashboard_api`] summarises a store.
//! * [`authorization`] decides who may collect from a store, and where the funds go.
//!
//! # API usage
//!
//! ```rust,ignore
//! use usdt_payment_engine::{CollectionApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url(...).await?;
//! let api = CollectionApi::new(db, execution_service);
//! let history = api.history(LedgerQuery { storecode: "SHOP1".into(), limit: None }).await?;
//! ```
pub mod authorization;
pub mod collection_api;
pub mod collection_objects;
pub mod dashboard_api;
pub mod errors;
pub mod payment_objects;
pub mod wallet_payment_api;
