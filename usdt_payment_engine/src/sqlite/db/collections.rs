//! Collection history (`wallet_usdt_collects`) and the in-flight queue (`wallet_usdt_server_wallet_queues`).
//!
//! The queue is derived from the history: after every write the queue row is either deleted (terminal status) or
//! replaced by a copy of the history row. Callers should run [`record_outcome`] inside a transaction.
use chrono::Utc;
use log::*;
use sqlx::SqliteConnection;

use crate::{
    db_types::{CollectionAttempt, CollectionOutcome, CollectionStatus},
    traits::LedgerError,
};

const ATTEMPT_COLUMNS: &str = "transaction_id, storecode, agentcode, chain, from_wallet_address, to_wallet_address, \
                               requested_by_wallet_address, requested_by_role, requested_amount, status, \
                               onchain_status, transaction_hash, error, created_at, updated_at, confirmed_at";

/// Upserts the history row for the outcome's transaction id and then brings the queue row in line with it.
///
/// Rules for an existing row:
/// * origin fields (`storecode`, wallets, requester, `created_at`) never change,
/// * a known `requested_amount` is kept,
/// * a terminal status is kept,
/// * `confirmed_at` is written at most once,
/// * the on-chain status and transaction hash are only replaced by newer, non-empty values.
pub async fn record_outcome(
    outcome: CollectionOutcome,
    conn: &mut SqliteConnection,
) -> Result<CollectionAttempt, LedgerError> {
    let now = Utc::now();
    let confirmed_at = (outcome.status == CollectionStatus::Confirmed).then(|| outcome.confirmed_at.unwrap_or(now));
    let attempt: CollectionAttempt = sqlx::query_as(
        r#"
            INSERT INTO wallet_usdt_collects (
                transaction_id,
                storecode,
                agentcode,
                chain,
                from_wallet_address,
                to_wallet_address,
                requested_by_wallet_address,
                requested_by_role,
                requested_amount,
                status,
                onchain_status,
                transaction_hash,
                error,
                created_at,
                updated_at,
                confirmed_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $14, $15)
            ON CONFLICT (transaction_id) DO UPDATE SET
                requested_amount = COALESCE(wallet_usdt_collects.requested_amount, excluded.requested_amount),
                status = CASE
                    WHEN wallet_usdt_collects.status IN ('CONFIRMED', 'FAILED') THEN wallet_usdt_collects.status
                    ELSE excluded.status
                END,
                onchain_status = COALESCE(excluded.onchain_status, wallet_usdt_collects.onchain_status),
                transaction_hash = COALESCE(excluded.transaction_hash, wallet_usdt_collects.transaction_hash),
                error = CASE
                    WHEN wallet_usdt_collects.status IN ('CONFIRMED', 'FAILED') THEN wallet_usdt_collects.error
                    ELSE excluded.error
                END,
                updated_at = excluded.updated_at,
                confirmed_at = CASE
                    WHEN wallet_usdt_collects.status IN ('CONFIRMED', 'FAILED') THEN wallet_usdt_collects.confirmed_at
                    ELSE COALESCE(wallet_usdt_collects.confirmed_at, excluded.confirmed_at)
                END
            RETURNING *;
        "#,
    )
    .bind(outcome.transaction_id.as_str())
    .bind(outcome.storecode)
    .bind(outcome.agentcode)
    .bind(outcome.chain)
    .bind(outcome.from_wallet_address)
    .bind(outcome.to_wallet_address)
    .bind(outcome.requested_by_wallet_address)
    .bind(outcome.requested_by_role)
    .bind(outcome.requested_amount)
    .bind(outcome.status)
    .bind(outcome.onchain_status)
    .bind(outcome.transaction_hash)
    .bind(outcome.error)
    .bind(now)
    .bind(confirmed_at)
    .fetch_one(&mut *conn)
    .await?;
    if attempt.status != outcome.status {
        debug!(
            "🧾️ Collection {} is already {}. Ignoring the reported status of {}",
            attempt.transaction_id, attempt.status, outcome.status
        );
    }
    sync_queue_entry(&attempt, conn).await?;
    trace!("🧾️ Collection {} recorded as {}", attempt.transaction_id, attempt.status);
    Ok(attempt)
}

async fn sync_queue_entry(attempt: &CollectionAttempt, conn: &mut SqliteConnection) -> Result<(), LedgerError> {
    if attempt.status.is_terminal() {
        let result = sqlx::query("DELETE FROM wallet_usdt_server_wallet_queues WHERE transaction_id = $1")
            .bind(attempt.transaction_id.as_str())
            .execute(conn)
            .await?;
        if result.rows_affected() > 0 {
            debug!("🧾️ Collection {} removed from the queue", attempt.transaction_id);
        }
    } else {
        let q = format!(
            "INSERT OR REPLACE INTO wallet_usdt_server_wallet_queues ({ATTEMPT_COLUMNS}) SELECT {ATTEMPT_COLUMNS} FROM \
             wallet_usdt_collects WHERE transaction_id = $1"
        );
        sqlx::query(&q).bind(attempt.transaction_id.as_str()).execute(conn).await?;
    }
    Ok(())
}

pub async fn fetch_collection(
    transaction_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<CollectionAttempt>, LedgerError> {
    let attempt = sqlx::query_as("SELECT * FROM wallet_usdt_collects WHERE transaction_id = $1")
        .bind(transaction_id)
        .fetch_optional(conn)
        .await?;
    Ok(attempt)
}

pub async fn fetch_queue_entry(
    transaction_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<CollectionAttempt>, LedgerError> {
    let attempt = sqlx::query_as("SELECT * FROM wallet_usdt_server_wallet_queues WHERE transaction_id = $1")
        .bind(transaction_id)
        .fetch_optional(conn)
        .await?;
    Ok(attempt)
}

/// History entries for the store, newest first. `storecode` matches case-insensitively.
pub async fn history_for_store(
    storecode: &str,
    limit: u32,
    conn: &mut SqliteConnection,
) -> Result<Vec<CollectionAttempt>, LedgerError> {
    let attempts = sqlx::query_as(
        "SELECT * FROM wallet_usdt_collects WHERE storecode = $1 COLLATE NOCASE ORDER BY created_at DESC, id DESC \
         LIMIT $2",
    )
    .bind(storecode.trim())
    .bind(limit)
    .fetch_all(conn)
    .await?;
    Ok(attempts)
}

/// Queue entries for the store, newest first.
pub async fn queue_for_store(
    storecode: &str,
    limit: u32,
    conn: &mut SqliteConnection,
) -> Result<Vec<CollectionAttempt>, LedgerError> {
    let attempts = sqlx::query_as(
        "SELECT * FROM wallet_usdt_server_wallet_queues WHERE storecode = $1 COLLATE NOCASE ORDER BY created_at DESC, \
         rowid DESC LIMIT $2",
    )
    .bind(storecode.trim())
    .bind(limit)
    .fetch_all(conn)
    .await?;
    Ok(attempts)
}
