//! SQLite backend for the USDT payment gateway.
mod sqlite_impl;

pub mod db;
pub use sqlite_impl::SqliteDatabase;
