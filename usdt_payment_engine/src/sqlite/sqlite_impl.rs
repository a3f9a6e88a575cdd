//! `SqliteDatabase` is the SQLite backend of the USDT gateway.
//!
//! It implements the directory, ledger and payment traits defined in the [`crate::traits`] module.
use std::fmt::Debug;

use log::*;
use sqlx::{migrate::MigrateError, SqlitePool};
use upg_common::EvmAddress;

use super::db::{collections, db_url, directory, new_pool, payments};
use crate::{
    db_types::{
        Agent,
        CollectionAttempt,
        CollectionOutcome,
        Member,
        NewWalletPayment,
        PaymentTotals,
        Store,
        WalletPayment,
    },
    traits::{
        CollectionLedger,
        DirectoryError,
        DirectoryManagement,
        LedgerError,
        PaymentQueryFilter,
        PaymentStoreError,
        StoreDirectory,
        WalletPaymentManagement,
    },
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl StoreDirectory for SqliteDatabase {
    async fn fetch_store(&self, storecode: &str) -> Result<Option<Store>, DirectoryError> {
        let mut conn = self.pool.acquire().await?;
        directory::fetch_store(storecode, &mut conn).await
    }

    async fn fetch_agent(&self, agentcode: &str) -> Result<Option<Agent>, DirectoryError> {
        let mut conn = self.pool.acquire().await?;
        directory::fetch_agent(agentcode, &mut conn).await
    }

    async fn fetch_member(&self, storecode: &str, wallet: &EvmAddress) -> Result<Option<Member>, DirectoryError> {
        let mut conn = self.pool.acquire().await?;
        directory::fetch_member(storecode, wallet, &mut conn).await
    }
}

impl DirectoryManagement for SqliteDatabase {
    async fn upsert_store(&self, store: Store) -> Result<Store, DirectoryError> {
        let mut conn = self.pool.acquire().await?;
        let store = directory::upsert_store(store, &mut conn).await?;
        debug!("🗃️ Store {} saved", store.storecode);
        Ok(store)
    }

    async fn upsert_agent(&self, agent: Agent) -> Result<Agent, DirectoryError> {
        let mut conn = self.pool.acquire().await?;
        let agent = directory::upsert_agent(agent, &mut conn).await?;
        debug!("🗃️ Agent {} saved", agent.agentcode);
        Ok(agent)
    }

    async fn upsert_member(&self, member: Member) -> Result<Member, DirectoryError> {
        let mut conn = self.pool.acquire().await?;
        directory::upsert_member(member, &mut conn).await
    }
}

impl CollectionLedger for SqliteDatabase {
    /// The history upsert and the queue update share a single transaction, so the queue can never disagree with the
    /// history.
    async fn record_collection_outcome(&self, outcome: CollectionOutcome) -> Result<CollectionAttempt, LedgerError> {
        let mut tx = self.pool.begin().await?;
        let attempt = collections::record_outcome(outcome, &mut tx).await?;
        tx.commit().await?;
        Ok(attempt)
    }

    async fn fetch_collection(&self, transaction_id: &str) -> Result<Option<CollectionAttempt>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        collections::fetch_collection(transaction_id, &mut conn).await
    }

    async fn fetch_queue_entry(&self, transaction_id: &str) -> Result<Option<CollectionAttempt>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        collections::fetch_queue_entry(transaction_id, &mut conn).await
    }

    async fn collection_history(&self, storecode: &str, limit: u32) -> Result<Vec<CollectionAttempt>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        collections::history_for_store(storecode, limit, &mut conn).await
    }

    async fn collection_queue(&self, storecode: &str, limit: u32) -> Result<Vec<CollectionAttempt>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        collections::queue_for_store(storecode, limit, &mut conn).await
    }
}

impl WalletPaymentManagement for SqliteDatabase {
    async fn insert_prepared_payment(&self, payment: NewWalletPayment) -> Result<WalletPayment, PaymentStoreError> {
        let mut conn = self.pool.acquire().await?;
        payments::insert_prepared(payment, &mut conn).await
    }

    async fn fetch_payment(&self, id: i64) -> Result<Option<WalletPayment>, PaymentStoreError> {
        let mut conn = self.pool.acquire().await?;
        payments::fetch_payment(id, &mut conn).await
    }

    async fn confirm_payment(&self, id: i64, transaction_hash: &str) -> Result<WalletPayment, PaymentStoreError> {
        let mut conn = self.pool.acquire().await?;
        let payment = payments::confirm_payment(id, transaction_hash, &mut conn).await?;
        debug!("🗃️ Payment #{id} confirmed with transaction {transaction_hash}");
        Ok(payment)
    }

    async fn search_payments(&self, filter: PaymentQueryFilter) -> Result<Vec<WalletPayment>, PaymentStoreError> {
        let mut conn = self.pool.acquire().await?;
        payments::search_payments(filter, &mut conn).await
    }

    async fn payment_totals(&self, storecode: &str) -> Result<PaymentTotals, PaymentStoreError> {
        let mut conn = self.pool.acquire().await?;
        payments::totals_for_store(storecode, &mut conn).await
    }
}

impl SqliteDatabase {
    /// Creates a new database API object, using the URL from the environment.
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Brings the schema up to date. Already-applied migrations are skipped.
    pub async fn run_migrations(&self) -> Result<(), MigrateError> {
        sqlx::migrate!("./src/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Database migrations are up to date");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
