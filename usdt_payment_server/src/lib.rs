//! # USDT payment gateway server
//! This crate hosts the HTTP server for the P2P exchange's USDT gateway. It is responsible for:
//! * Parsing and validating action requests against the `/api/wallet/usdt` endpoint.
//! * Handing each action to the matching API in `usdt_payment_engine`.
//! * Wiring the engine to the SQLite database and the custodial execution service.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/api/wallet/usdt`: Action-dispatched JSON endpoint for collections, member payments and the store dashboard.
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod helpers;
pub mod integrations;
pub mod routes;
pub mod server;
pub mod wallet_usdt;

#[cfg(test)]
mod endpoint_tests;
