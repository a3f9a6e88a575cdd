use mockall::mock;
use upg_common::{Chain, EvmAddress, TokenAmount};
use usdt_payment_engine::{
    db_types::{Agent, CollectionAttempt, CollectionOutcome, Member, NewWalletPayment, PaymentTotals, Store, WalletPayment},
    traits::{
        CollectionLedger,
        DirectoryError,
        ExecutionService,
        ExecutionServiceError,
        ExecutionStatusReport,
        LedgerError,
        PaymentQueryFilter,
        PaymentStoreError,
        StoreDirectory,
        WalletPaymentManagement,
    },
};

mock! {
    pub GatewayDb {}
    impl StoreDirectory for GatewayDb {
        async fn fetch_store(&self, storecode: &str) -> Result<Option<Store>, DirectoryError>;
        async fn fetch_agent(&self, agentcode: &str) -> Result<Option<Agent>, DirectoryError>;
        async fn fetch_member(&self, storecode: &str, wallet: &EvmAddress) -> Result<Option<Member>, DirectoryError>;
    }
    impl CollectionLedger for GatewayDb {
        async fn record_collection_outcome(&self, outcome: CollectionOutcome) -> Result<CollectionAttempt, LedgerError>;
        async fn fetch_collection(&self, transaction_id: &str) -> Result<Option<CollectionAttempt>, LedgerError>;
        async fn fetch_queue_entry(&self, transaction_id: &str) -> Result<Option<CollectionAttempt>, LedgerError>;
        async fn collection_history(&self, storecode: &str, limit: u32) -> Result<Vec<CollectionAttempt>, LedgerError>;
        async fn collection_queue(&self, storecode: &str, limit: u32) -> Result<Vec<CollectionAttempt>, LedgerError>;
    }
    impl WalletPaymentManagement for GatewayDb {
        async fn insert_prepared_payment(&self, payment: NewWalletPayment) -> Result<WalletPayment, PaymentStoreError>;
        async fn fetch_payment(&self, id: i64) -> Result<Option<WalletPayment>, PaymentStoreError>;
        async fn confirm_payment(&self, id: i64, transaction_hash: &str) -> Result<WalletPayment, PaymentStoreError>;
        async fn search_payments(&self, filter: PaymentQueryFilter) -> Result<Vec<WalletPayment>, PaymentStoreError>;
        async fn payment_totals(&self, storecode: &str) -> Result<PaymentTotals, PaymentStoreError>;
    }
}

mock! {
    pub Executor {}
    impl ExecutionService for Executor {
        async fn usdt_balance(&self, chain: Chain, wallet: &EvmAddress) -> Result<TokenAmount, ExecutionServiceError>;
        async fn enqueue_usdt_transfer(
            &self,
            chain: Chain,
            from: &EvmAddress,
            to: &EvmAddress,
            amount: &TokenAmount,
        ) -> Result<String, ExecutionServiceError>;
        async fn transaction_status(&self, transaction_id: &str) -> Result<ExecutionStatusReport, ExecutionServiceError>;
    }
}
