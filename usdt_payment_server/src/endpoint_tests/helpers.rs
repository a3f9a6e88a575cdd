use actix_web::{body::MessageBody, http::StatusCode, test, test::TestRequest, web, App};
use chrono::{TimeZone, Utc};
use log::debug;
use upg_common::{Chain, EvmAddress, MicroUsdt};
use usdt_payment_engine::{
    db_types::{CollectionAttempt, CollectionOutcome, CollectionRole, CollectionStatus, Store},
    CollectionApi,
    StoreDashboardApi,
    WalletPaymentApi,
};

use super::mocks::{MockExecutor, MockGatewayDb};
use crate::{config::ProxyConfig, routes::WalletUsdtRoute, server::json_config};

pub const PAYMENT_WALLET: &str = "0xAAAaaaAAAaaaAAAaaaAAAaaaAAAaaaAAAaaaAAAa";
pub const STORE_ADMIN: &str = "0xBBBbbbBBBbbbBBBbbbBBBbbbBBBbbbBBBbbbBBBb";
pub const STRANGER: &str = "0xEEEeeeEEEeeeEEEeeeEEEeeeEEEeeeEEEeeeEEEe";

/// One mock backend per API, since each API owns its backend.
pub struct MockApis {
    pub collection_db: MockGatewayDb,
    pub collection_executor: MockExecutor,
    pub payment_db: MockGatewayDb,
    pub dashboard_db: MockGatewayDb,
    pub dashboard_executor: MockExecutor,
}

impl Default for MockApis {
    fn default() -> Self {
        Self {
            collection_db: MockGatewayDb::new(),
            collection_executor: MockExecutor::new(),
            payment_db: MockGatewayDb::new(),
            dashboard_db: MockGatewayDb::new(),
            dashboard_executor: MockExecutor::new(),
        }
    }
}

/// Posts `body` to `/wallet/usdt` on an app wired up with the given mocks.
pub async fn post_wallet_usdt(body: &str, apis: MockApis) -> (StatusCode, String) {
    let collections = CollectionApi::new(apis.collection_db, apis.collection_executor);
    let payments = WalletPaymentApi::new(apis.payment_db);
    let dashboards = StoreDashboardApi::new(apis.dashboard_db, apis.dashboard_executor);
    let app = App::new()
        .app_data(json_config())
        .app_data(web::Data::new(ProxyConfig::default()))
        .app_data(web::Data::new(collections))
        .app_data(web::Data::new(payments))
        .app_data(web::Data::new(dashboards))
        .service(WalletUsdtRoute::<MockGatewayDb, MockExecutor>::new());
    let service = test::init_service(app).await;
    let req = TestRequest::post()
        .uri("/wallet/usdt")
        .insert_header(("Content-Type", "application/json"))
        .set_payload(body.to_string())
        .to_request();
    debug!("Making request");
    let res = test::call_service(&service, req).await;
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    (status, body)
}

pub fn shop1() -> Store {
    Store::new("SHOP1", "Shop One").with_payment_wallet(PAYMENT_WALLET).with_admin_wallet(STORE_ADMIN)
}

pub fn address(s: &str) -> EvmAddress {
    EvmAddress::parse(s).unwrap()
}

/// What the ledger would store for a brand new outcome.
pub fn attempt_from(outcome: CollectionOutcome) -> CollectionAttempt {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    CollectionAttempt {
        transaction_id: outcome.transaction_id,
        storecode: outcome.storecode,
        agentcode: outcome.agentcode,
        chain: outcome.chain,
        from_wallet_address: outcome.from_wallet_address,
        to_wallet_address: outcome.to_wallet_address,
        requested_by_wallet_address: outcome.requested_by_wallet_address,
        requested_by_role: outcome.requested_by_role,
        requested_amount: outcome.requested_amount,
        status: outcome.status,
        onchain_status: outcome.onchain_status,
        transaction_hash: outcome.transaction_hash,
        error: outcome.error,
        created_at: now,
        updated_at: now,
        confirmed_at: outcome.confirmed_at,
    }
}

/// A finished collection of `amount` from SHOP1 by its store admin.
pub fn confirmed_outcome(transaction_id: &str, amount: MicroUsdt) -> CollectionOutcome {
    CollectionOutcome {
        transaction_id: transaction_id.to_string(),
        storecode: "SHOP1".to_string(),
        agentcode: None,
        chain: Chain::Polygon,
        from_wallet_address: address(PAYMENT_WALLET),
        to_wallet_address: address(STORE_ADMIN),
        requested_by_wallet_address: address(STORE_ADMIN),
        requested_by_role: CollectionRole::StoreAdmin,
        requested_amount: Some(amount),
        status: CollectionStatus::Confirmed,
        onchain_status: Some("success".to_string()),
        transaction_hash: Some("0xfeed".to_string()),
        error: None,
        confirmed_at: Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 5, 0).unwrap()),
    }
}
