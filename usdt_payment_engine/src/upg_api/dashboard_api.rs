use log::*;
use serde::{Deserialize, Serialize};
use upg_common::{Chain, MicroUsdt};

use super::errors::DashboardError;
use crate::{
    db_types::{Agent, CollectionAttempt, PaymentTotals, Store},
    helpers::MAX_LIST_LIMIT,
    traits::{CollectionLedger, ExecutionService, StoreDirectory, WalletPaymentManagement},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDashboardRequest {
    pub storecode: String,
    #[serde(default)]
    pub chain: Option<Chain>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDashboard {
    pub store: Store,
    pub agent: Option<Agent>,
    /// `None` if the store has no usable payment wallet.
    pub payment_wallet_balance: Option<MicroUsdt>,
    pub payments: PaymentTotals,
    pub collections_in_flight: Vec<CollectionAttempt>,
}

/// A one-call summary of a store for the store admin UI.
pub struct StoreDashboardApi<B, E> {
    db: B,
    executor: E,
    default_chain: Chain,
}

impl<B, E> StoreDashboardApi<B, E> {
    pub fn new(db: B, executor: E) -> Self {
        Self { db, executor, default_chain: Chain::default() }
    }

    pub fn with_default_chain(mut self, chain: Chain) -> Self {
        self.default_chain = chain;
        self
    }
}

impl<B, E> StoreDashboardApi<B, E>
where
    B: StoreDirectory + CollectionLedger + WalletPaymentManagement,
    E: ExecutionService,
{
    pub async fn dashboard(&self, req: StoreDashboardRequest) -> Result<StoreDashboard, DashboardError> {
        let store = self
            .db
            .fetch_store(&req.storecode)
            .await?
            .ok_or_else(|| DashboardError::StoreNotFound(req.storecode.trim().to_string()))?;
        let agent = match store.agentcode.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(code) => self.db.fetch_agent(code).await?,
            None => None,
        };
        let chain = req.chain.unwrap_or(self.default_chain);
        let payment_wallet_balance = match store.payment_wallet() {
            Some(wallet) => {
                let balance = self.executor.usdt_balance(chain, &wallet).await?;
                let balance =
                    balance.to_micro_usdt().map_err(|e| DashboardError::ExecutionServiceError(e.to_string()))?;
                Some(balance)
            },
            None => {
                debug!("📊️ Store {} has no payment wallet. Skipping the balance", store.storecode);
                None
            },
        };
        let payments = self.db.payment_totals(&store.storecode).await?;
        let collections_in_flight = self.db.collection_queue(&store.storecode, MAX_LIST_LIMIT).await?;
        Ok(StoreDashboard { store, agent, payment_wallet_balance, payments, collections_in_flight })
    }
}
