use std::fmt::Debug;

use chrono::{Duration, Utc};
use log::*;
use upg_common::Chain;

use super::{
    authorization::{resolve_collection_authorization, CollectionAuthorization},
    collection_objects::{CollectBalancePreview, CollectBalanceRequest, CollectRequest, CollectStatusRequest, LedgerQuery},
    errors::CollectionError,
};
use crate::{
    db_types::{CollectionAttempt, CollectionOutcome, Store},
    helpers::{clamp_limit, is_valid_transaction_id, normalize_status, MAX_LIST_LIMIT},
    traits::{CollectionLedger, ExecutionService, ExecutionServiceError, ExecutionStatusReport, StoreDirectory},
};

/// The default time during which a fresh queue entry blocks another collection from the same store.
pub const DEFAULT_COLLECTION_GUARD_SECS: i64 = 600;
/// Longer guard windows are cut down to one day.
pub const MAX_COLLECTION_GUARD_SECS: i64 = 86_400;

/// `CollectionApi` sweeps store payment wallets and tracks the resulting transfers.
///
/// Every write to the ledger goes through [`CollectionLedger::record_collection_outcome`], so the history and the
/// in-flight queue always agree.
pub struct CollectionApi<B, E> {
    db: B,
    executor: E,
    default_chain: Chain,
    guard_window: Duration,
}

impl<B, E> Debug for CollectionApi<B, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CollectionApi ({}, guard {}s)", self.default_chain, self.guard_window.num_seconds())
    }
}

impl<B, E> CollectionApi<B, E> {
    pub fn new(db: B, executor: E) -> Self {
        Self {
            db,
            executor,
            default_chain: Chain::default(),
            guard_window: Duration::seconds(DEFAULT_COLLECTION_GUARD_SECS),
        }
    }

    /// The chain to use when a request does not name one.
    pub fn with_default_chain(mut self, chain: Chain) -> Self {
        self.default_chain = chain;
        self
    }

    /// A zero window disables the in-flight guard. Windows longer than [`MAX_COLLECTION_GUARD_SECS`] are clamped.
    pub fn with_guard_window(mut self, window: Duration) -> Self {
        let max = Duration::seconds(MAX_COLLECTION_GUARD_SECS);
        if window > max {
            warn!(
                "🔄️ A collection guard window of {}s is too long. Using {MAX_COLLECTION_GUARD_SECS}s instead",
                window.num_seconds()
            );
        }
        self.guard_window = window.min(max);
        self
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}

impl<B, E> CollectionApi<B, E>
where
    B: StoreDirectory + CollectionLedger,
    E: ExecutionService,
{
    /// Authorizes the caller and reports the current payment wallet balance, without moving any funds.
    pub async fn collect_balance_preview(
        &self,
        req: CollectBalanceRequest,
    ) -> Result<CollectBalancePreview, CollectionError> {
        let chain = req.chain.unwrap_or(self.default_chain);
        let (store, auth) =
            self.authorize(&req.storecode, req.agentcode.as_deref(), &req.requested_by_wallet_address).await?;
        let payment_wallet = store.payment_wallet().ok_or(CollectionError::PaymentWalletNotConfigured)?;
        let balance = self.executor.usdt_balance(chain, &payment_wallet).await?;
        let balance = balance.to_micro_usdt().map_err(|e| CollectionError::InvalidAmount(e.to_string()))?;
        Ok(CollectBalancePreview {
            storecode: store.storecode,
            chain,
            role: auth.role,
            authorized_wallet_address: auth.authorized_wallet_address,
            payment_wallet_address: payment_wallet,
            balance,
        })
    }

    /// Transfers the entire payment wallet balance to the caller's authorized wallet.
    ///
    /// The transfer is only queued with the execution service. The status is queried once, and the attempt is
    /// recorded with whatever status that query returned. Use [`Self::collect_status`] to follow it up.
    pub async fn collect(&self, req: CollectRequest) -> Result<CollectionAttempt, CollectionError> {
        let chain = req.chain.unwrap_or(self.default_chain);
        let (store, auth) =
            self.authorize(&req.storecode, req.agentcode.as_deref(), &req.requested_by_wallet_address).await?;
        if !auth.authorized_wallet_address.matches(&req.to_wallet_address) {
            warn!(
                "🔄️ {} asked for store {} to be collected to {}, but may only collect to {}",
                auth.requested_by_wallet_address, store.storecode, req.to_wallet_address, auth.authorized_wallet_address
            );
            return Err(CollectionError::DestinationMismatch);
        }
        let payment_wallet = store.payment_wallet().ok_or(CollectionError::PaymentWalletNotConfigured)?;
        self.check_no_collection_in_flight(&store.storecode).await?;
        let balance = self.executor.usdt_balance(chain, &payment_wallet).await?;
        if balance.is_zero() {
            info!("🔄️ Nothing to collect from store {} on {chain}", store.storecode);
            return Err(CollectionError::ZeroBalance);
        }
        let requested_amount = balance.to_micro_usdt().map_err(|e| CollectionError::InvalidAmount(e.to_string()))?;
        let transaction_id = self
            .executor
            .enqueue_usdt_transfer(chain, &payment_wallet, &auth.authorized_wallet_address, &balance)
            .await?;
        info!(
            "🔄️ Collection of {requested_amount} from store {} to {} queued as {transaction_id}",
            store.storecode, auth.authorized_wallet_address
        );
        let report = match self.executor.transaction_status(&transaction_id).await {
            Ok(report) => report,
            Err(e) => {
                warn!("🔄️ Could not fetch the initial status of {transaction_id}. Recording it as queued. {e}");
                ExecutionStatusReport::default()
            },
        };
        let outcome = CollectionOutcome {
            transaction_id,
            storecode: store.storecode,
            agentcode: auth.agentcode,
            chain,
            from_wallet_address: payment_wallet,
            to_wallet_address: auth.authorized_wallet_address,
            requested_by_wallet_address: auth.requested_by_wallet_address,
            requested_by_role: auth.role,
            requested_amount: Some(requested_amount),
            status: normalize_status(report.status.as_deref(), report.onchain_status.as_deref()),
            onchain_status: report.onchain_status,
            transaction_hash: report.transaction_hash,
            error: report.error,
            confirmed_at: report.confirmed_at,
        };
        let attempt = self.db.record_collection_outcome(outcome).await?;
        Ok(attempt)
    }

    /// Polls the execution service for a collection's current status and records it.
    ///
    /// If the execution service does not know the transaction, it is recorded as `QUEUED` rather than failing. A
    /// transaction that has no ledger entry yet gets one, sent from the store's payment wallet to the caller's
    /// authorized wallet.
    pub async fn collect_status(&self, req: CollectStatusRequest) -> Result<CollectionAttempt, CollectionError> {
        let transaction_id = req.transaction_id.trim();
        if !is_valid_transaction_id(transaction_id) {
            return Err(CollectionError::InvalidTransactionId(req.transaction_id.clone()));
        }
        let (store, auth) =
            self.authorize(&req.storecode, req.agentcode.as_deref(), &req.requested_by_wallet_address).await?;
        let payment_wallet = store.payment_wallet().ok_or(CollectionError::PaymentWalletNotConfigured)?;
        let existing = self.db.fetch_collection(transaction_id).await?;
        if let Some(entry) = existing.as_ref().filter(|e| !e.storecode.eq_ignore_ascii_case(&store.storecode)) {
            warn!(
                "🔄️ {} asked about {transaction_id} for store {}, but it belongs to store {}",
                auth.requested_by_wallet_address, store.storecode, entry.storecode
            );
            return Err(CollectionError::TransactionNotOwned(transaction_id.to_string()));
        }
        let report = match self.executor.transaction_status(transaction_id).await {
            Ok(report) => report,
            Err(ExecutionServiceError::NotFound(_)) => {
                info!("🔄️ The execution service has no record of {transaction_id}. Recording it as queued.");
                ExecutionStatusReport::default()
            },
            Err(e) => return Err(e.into()),
        };
        if let Some(from) = report.from.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            if !payment_wallet.matches(from) {
                warn!("🔄️ {transaction_id} is sent from {from}, not from the payment wallet of store {}", store.storecode);
                return Err(CollectionError::TransactionNotOwned(transaction_id.to_string()));
            }
        }
        let status = normalize_status(report.status.as_deref(), report.onchain_status.as_deref());
        let outcome = match existing {
            Some(entry) => CollectionOutcome {
                transaction_id: entry.transaction_id,
                storecode: entry.storecode,
                agentcode: entry.agentcode,
                chain: entry.chain,
                from_wallet_address: entry.from_wallet_address,
                to_wallet_address: entry.to_wallet_address,
                requested_by_wallet_address: entry.requested_by_wallet_address,
                requested_by_role: entry.requested_by_role,
                requested_amount: entry.requested_amount,
                status,
                onchain_status: report.onchain_status,
                transaction_hash: report.transaction_hash,
                error: report.error,
                confirmed_at: report.confirmed_at,
            },
            None => CollectionOutcome {
                transaction_id: transaction_id.to_string(),
                storecode: store.storecode,
                agentcode: auth.agentcode,
                chain: req.chain.unwrap_or(self.default_chain),
                from_wallet_address: payment_wallet,
                to_wallet_address: auth.authorized_wallet_address,
                requested_by_wallet_address: auth.requested_by_wallet_address,
                requested_by_role: auth.role,
                requested_amount: None,
                status,
                onchain_status: report.onchain_status,
                transaction_hash: report.transaction_hash,
                error: report.error,
                confirmed_at: report.confirmed_at,
            },
        };
        let attempt = self.db.record_collection_outcome(outcome).await?;
        debug!("🔄️ Collection {} is {}", attempt.transaction_id, attempt.status);
        Ok(attempt)
    }

    /// The store's collection history, newest first.
    pub async fn history(&self, query: LedgerQuery) -> Result<Vec<CollectionAttempt>, CollectionError> {
        let attempts = self.db.collection_history(&query.storecode, clamp_limit(query.limit)).await?;
        Ok(attempts)
    }

    /// The store's collections that have not completed yet, newest first.
    pub async fn queue(&self, query: LedgerQuery) -> Result<Vec<CollectionAttempt>, CollectionError> {
        let attempts = self.db.collection_queue(&query.storecode, clamp_limit(query.limit)).await?;
        Ok(attempts)
    }

    async fn authorize(
        &self,
        storecode: &str,
        agentcode: Option<&str>,
        requested_by: &str,
    ) -> Result<(Store, CollectionAuthorization), CollectionError> {
        let store = self
            .db
            .fetch_store(storecode)
            .await?
            .ok_or_else(|| CollectionError::StoreNotFound(storecode.trim().to_string()))?;
        let auth = resolve_collection_authorization(&self.db, &store, agentcode, requested_by)
            .await?
            .ok_or_else(|| CollectionError::NotAuthorized(requested_by.trim().to_string()))?;
        Ok((store, auth))
    }

    /// Refuses to start a collection while a recent one from the same store is unresolved.
    ///
    /// The window runs from when the entry was created. Status polls do not extend it, so a transfer the execution
    /// service silently dropped cannot lock the store forever.
    async fn check_no_collection_in_flight(&self, storecode: &str) -> Result<(), CollectionError> {
        if self.guard_window <= Duration::zero() {
            return Ok(());
        }
        let cutoff = Utc::now() - self.guard_window;
        let queue = self.db.collection_queue(storecode, MAX_LIST_LIMIT).await?;
        if let Some(entry) = queue.iter().find(|e| e.created_at > cutoff) {
            info!(
                "🔄️ Store {storecode} already has collection {} in progress ({})",
                entry.transaction_id, entry.status
            );
            return Err(CollectionError::CollectionInProgress);
        }
        Ok(())
    }
}

