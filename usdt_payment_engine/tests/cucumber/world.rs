use cucumber::World;
use log::*;
use usdt_payment_engine::{
    db_types::CollectionAttempt,
    upg_api::collection_objects::CollectBalancePreview,
    CollectionApi,
    CollectionError,
    SqliteDatabase,
};

use crate::support::{fake_engine::FakeExecutionService, prepare_env::prepare_test_env};

#[derive(Default, Debug, World)]
pub struct CollectionWorld {
    pub system: Option<GatewaySystem>,
    pub preview: Option<CollectBalancePreview>,
    pub last_result: Option<Result<CollectionAttempt, CollectionError>>,
    /// Confirmation times seen so far, by transaction id.
    pub confirmations: Vec<(String, chrono::DateTime<chrono::Utc>)>,
}

#[derive(Debug)]
pub struct GatewaySystem {
    pub db_path: String,
    pub api: CollectionApi<SqliteDatabase, FakeExecutionService>,
    pub engine: FakeExecutionService,
}

impl CollectionWorld {
    pub fn system(&self) -> &GatewaySystem {
        self.system.as_ref().expect("Gateway not initialised")
    }

    pub fn api(&self) -> &CollectionApi<SqliteDatabase, FakeExecutionService> {
        &self.system().api
    }

    pub fn engine(&self) -> &FakeExecutionService {
        &self.system().engine
    }
}

impl GatewaySystem {
    pub async fn new() -> Self {
        let (db_path, db) = prepare_test_env().await;
        debug!("Created database: {db_path}");
        let engine = FakeExecutionService::new();
        let api = CollectionApi::new(db, engine.clone());
        Self { db_path, api, engine }
    }
}
