//! Client for the custodial transaction execution service ("engine") that holds the server wallets, signs and
//! broadcasts ERC-20 transfers, and reports their progress.
mod api;
mod config;
mod error;

mod data_objects;
mod helpers;

pub use api::EngineApi;
pub use config::EngineConfig;
pub use data_objects::{Erc20Balance, QueuedTransaction, TransactionStatus};
pub use error::EngineApiError;
pub use helpers::{erc20_path, transaction_status_path};
