use thiserror::Error;

use crate::db_types::{CollectionAttempt, CollectionOutcome};

/// Storage for collection attempts.
///
/// Two record sets are kept: a history entry per transaction id, which is never deleted, and a queue entry that exists
/// exactly as long as the history entry is in a non-terminal state.
#[allow(async_fn_in_trait)]
pub trait CollectionLedger {
    /// Writes the outcome to the history ledger and brings the queue in line with it, atomically.
    ///
    /// * The history entry is upserted on `transaction_id`. An existing entry keeps its creation time, origin fields and
    ///   any known `requested_amount`.
    /// * `confirmed_at` is only ever written once.
    /// * A terminal status is never replaced by a non-terminal one.
    /// * If the resulting status is terminal, the queue entry is deleted; otherwise it is upserted with the same data.
    ///
    /// Returns the history entry as stored.
    async fn record_collection_outcome(&self, outcome: CollectionOutcome) -> Result<CollectionAttempt, LedgerError>;

    async fn fetch_collection(&self, transaction_id: &str) -> Result<Option<CollectionAttempt>, LedgerError>;

    async fn fetch_queue_entry(&self, transaction_id: &str) -> Result<Option<CollectionAttempt>, LedgerError>;

    /// History entries for the store, newest first.
    async fn collection_history(&self, storecode: &str, limit: u32) -> Result<Vec<CollectionAttempt>, LedgerError>;

    /// Queue entries for the store, newest first.
    async fn collection_queue(&self, storecode: &str, limit: u32) -> Result<Vec<CollectionAttempt>, LedgerError>;
}

#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for LedgerError {
    fn from(e: sqlx::Error) -> Self {
        LedgerError::DatabaseError(e.to_string())
    }
}
