use chrono::{DateTime, Utc};
use log::*;
use sqlx::{FromRow, QueryBuilder, SqliteConnection};
use upg_common::{Chain, EvmAddress, MicroUsdt};

use crate::{
    db_types::{BankInfo, MemberSnapshot, NewWalletPayment, PaymentTotals, WalletPayment, WalletPaymentStatus},
    traits::{PaymentQueryFilter, PaymentStoreError},
};

/// The member snapshot is stored in flat `member_*` columns.
#[derive(Debug, FromRow)]
struct PaymentRow {
    id: i64,
    storecode: String,
    chain: Chain,
    from_wallet_address: EvmAddress,
    to_wallet_address: EvmAddress,
    amount: MicroUsdt,
    status: WalletPaymentStatus,
    transaction_hash: Option<String>,
    member_nickname: String,
    member_wallet_address: EvmAddress,
    member_bank_name: Option<String>,
    member_account_number: Option<String>,
    member_account_holder: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    confirmed_at: Option<DateTime<Utc>>,
}

impl From<PaymentRow> for WalletPayment {
    fn from(row: PaymentRow) -> Self {
        let member = MemberSnapshot {
            nickname: row.member_nickname,
            wallet_address: row.member_wallet_address,
            bank_info: BankInfo {
                bank_name: row.member_bank_name,
                account_number: row.member_account_number,
                account_holder: row.member_account_holder,
            },
        };
        Self {
            id: row.id,
            storecode: row.storecode,
            chain: row.chain,
            from_wallet_address: row.from_wallet_address,
            to_wallet_address: row.to_wallet_address,
            amount: row.amount,
            status: row.status,
            transaction_hash: row.transaction_hash,
            member,
            created_at: row.created_at,
            updated_at: row.updated_at,
            confirmed_at: row.confirmed_at,
        }
    }
}

pub async fn insert_prepared(
    payment: NewWalletPayment,
    conn: &mut SqliteConnection,
) -> Result<WalletPayment, PaymentStoreError> {
    let now = Utc::now();
    let row: PaymentRow = sqlx::query_as(
        r#"
            INSERT INTO wallet_usdt_payments (
                storecode,
                chain,
                from_wallet_address,
                to_wallet_address,
                amount,
                status,
                member_nickname,
                member_wallet_address,
                member_bank_name,
                member_account_number,
                member_account_holder,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, 'prepared', $6, $7, $8, $9, $10, $11, $11)
            RETURNING *;
        "#,
    )
    .bind(payment.storecode)
    .bind(payment.chain)
    .bind(payment.from_wallet_address)
    .bind(payment.to_wallet_address)
    .bind(payment.amount)
    .bind(payment.member.nickname)
    .bind(payment.member.wallet_address)
    .bind(payment.member.bank_info.bank_name)
    .bind(payment.member.bank_info.account_number)
    .bind(payment.member.bank_info.account_holder)
    .bind(now)
    .fetch_one(conn)
    .await?;
    debug!("💸️ Payment #{} of {} prepared for store {}", row.id, row.amount, row.storecode);
    Ok(row.into())
}

pub async fn fetch_payment(id: i64, conn: &mut SqliteConnection) -> Result<Option<WalletPayment>, PaymentStoreError> {
    let row: Option<PaymentRow> =
        sqlx::query_as("SELECT * FROM wallet_usdt_payments WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(row.map(WalletPayment::from))
}

/// Marks the payment as confirmed. The confirmation time of a payment that is already confirmed is not changed.
///
/// The status check is part of the update, so of two racing confirmations with different hashes only the first wins.
pub async fn confirm_payment(
    id: i64,
    transaction_hash: &str,
    conn: &mut SqliteConnection,
) -> Result<WalletPayment, PaymentStoreError> {
    let now = Utc::now();
    let row: Option<PaymentRow> = sqlx::query_as(
        r#"
            UPDATE wallet_usdt_payments SET
                status = 'confirmed',
                transaction_hash = COALESCE(transaction_hash, $2),
                confirmed_at = COALESCE(confirmed_at, $3),
                updated_at = $3
            WHERE id = $1 AND (status = 'prepared' OR lower(transaction_hash) = lower($2))
            RETURNING *;
        "#,
    )
    .bind(id)
    .bind(transaction_hash)
    .bind(now)
    .fetch_optional(&mut *conn)
    .await?;
    match row {
        Some(row) => Ok(WalletPayment::from(row)),
        None => match fetch_payment(id, conn).await? {
            Some(_) => {
                warn!("💸️ Payment #{id} is already confirmed. Refusing to replace its hash with {transaction_hash}");
                Err(PaymentStoreError::AlreadyConfirmed(id))
            },
            None => Err(PaymentStoreError::PaymentNotFound(id)),
        },
    }
}

pub async fn search_payments(
    filter: PaymentQueryFilter,
    conn: &mut SqliteConnection,
) -> Result<Vec<WalletPayment>, PaymentStoreError> {
    let mut builder = QueryBuilder::new("SELECT * FROM wallet_usdt_payments WHERE storecode = ");
    builder.push_bind(filter.storecode.trim().to_string());
    builder.push(" COLLATE NOCASE");
    if let Some(wallet) = filter.wallet_address {
        builder.push(" AND from_wallet_address = ");
        builder.push_bind(wallet.trim().to_string());
        builder.push(" COLLATE NOCASE");
    }
    builder.push(" ORDER BY created_at DESC, id DESC LIMIT ");
    builder.push_bind(filter.limit);
    trace!("💸️ Executing query: {}", builder.sql());
    let rows: Vec<PaymentRow> = builder.build_query_as().fetch_all(conn).await?;
    Ok(rows.into_iter().map(WalletPayment::from).collect())
}

pub async fn totals_for_store(storecode: &str, conn: &mut SqliteConnection) -> Result<PaymentTotals, PaymentStoreError> {
    let totals = sqlx::query_as(
        r#"
            SELECT
                COALESCE(SUM(CASE WHEN status = 'prepared' THEN 1 ELSE 0 END), 0) AS prepared_count,
                COALESCE(SUM(CASE WHEN status = 'confirmed' THEN 1 ELSE 0 END), 0) AS confirmed_count,
                COALESCE(SUM(CASE WHEN status = 'confirmed' THEN amount ELSE 0 END), 0) AS confirmed_amount
            FROM wallet_usdt_payments
            WHERE storecode = $1 COLLATE NOCASE
        "#,
    )
    .bind(storecode.trim())
    .fetch_one(conn)
    .await?;
    Ok(totals)
}
