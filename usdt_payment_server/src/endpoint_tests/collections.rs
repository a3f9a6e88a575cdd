use actix_web::http::StatusCode;
use upg_common::{Chain, MicroUsdt, TokenAmount};
use usdt_payment_engine::traits::{ExecutionServiceError, ExecutionStatusReport, LedgerError};

use super::helpers::{
    address,
    attempt_from,
    confirmed_outcome,
    post_wallet_usdt,
    shop1,
    MockApis,
    PAYMENT_WALLET,
    STORE_ADMIN,
    STRANGER,
};

#[actix_web::test]
async fn unknown_action() {
    let _ = env_logger::try_init().ok();
    let (status, body) = post_wallet_usdt(r#"{"action":"withdraw","storecode":"SHOP1"}"#, MockApis::default()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with(r#"{"error":"#), "{body}");
    assert!(body.contains("unknown variant"), "{body}");
}

#[actix_web::test]
async fn missing_fields() {
    let _ = env_logger::try_init().ok();
    let body = r#"{"action":"collect","storecode":"SHOP1","requestedByWalletAddress":"0xbbb"}"#;
    let (status, body) = post_wallet_usdt(body, MockApis::default()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("toWalletAddress"), "{body}");
    let (status, _) = post_wallet_usdt("not json", MockApis::default()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn collect_whole_balance() {
    let _ = env_logger::try_init().ok();
    let mut apis = MockApis::default();
    apis.collection_db.expect_fetch_store().withf(|code| code == "SHOP1").returning(|_| Ok(Some(shop1())));
    apis.collection_db.expect_collection_queue().returning(|_, _| Ok(vec![]));
    apis.collection_db.expect_record_collection_outcome().times(1).returning(|o| Ok(attempt_from(o)));
    apis.collection_executor
        .expect_usdt_balance()
        .withf(|chain, wallet| *chain == Chain::Bsc && wallet.matches(PAYMENT_WALLET))
        .returning(|_, _| Ok(TokenAmount::from_raw_str("150500000000000000000", 18).unwrap()));
    apis.collection_executor
        .expect_enqueue_usdt_transfer()
        .withf(|_, from, to, amount| {
            from.matches(PAYMENT_WALLET) && to.matches(STORE_ADMIN) && amount.to_decimal_string() == "150.5"
        })
        .times(1)
        .returning(|_, _, _, _| Ok("tx-1".to_string()));
    apis.collection_executor.expect_transaction_status().withf(|id| id == "tx-1").returning(|_| {
        Ok(ExecutionStatusReport { status: Some("queued".into()), ..Default::default() })
    });
    let body = format!(
        r#"{{"action":"collect","storecode":"SHOP1","chain":"bsc","requestedByWalletAddress":"{}","toWalletAddress":"{}"}}"#,
        STORE_ADMIN.to_lowercase(),
        STORE_ADMIN
    );
    let (status, body) = post_wallet_usdt(&body, apis).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body.starts_with(r#"{"result":{"transactionId":"tx-1""#), "{body}");
    assert!(body.contains(r#""status":"QUEUED""#));
    assert!(body.contains(r#""requestedAmount":150.5"#));
    assert!(body.contains(r#""requestedByRole":"store-admin""#));
    assert!(body.contains(r#""chain":"bsc""#));
}

#[actix_web::test]
async fn collect_by_a_stranger() {
    let _ = env_logger::try_init().ok();
    let mut apis = MockApis::default();
    apis.collection_db.expect_fetch_store().returning(|_| Ok(Some(shop1())));
    let body = format!(
        r#"{{"action":"collect","storecode":"SHOP1","requestedByWalletAddress":"{STRANGER}","toWalletAddress":"{STRANGER}"}}"#
    );
    let (status, body) = post_wallet_usdt(&body, apis).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, format!(r#"{{"error":"Wallet {STRANGER} is not allowed to collect from this store"}}"#));
}

#[actix_web::test]
async fn collect_to_the_wrong_wallet() {
    let _ = env_logger::try_init().ok();
    let mut apis = MockApis::default();
    apis.collection_db.expect_fetch_store().returning(|_| Ok(Some(shop1())));
    let body = format!(
        r#"{{"action":"collect","storecode":"SHOP1","requestedByWalletAddress":"{STORE_ADMIN}","toWalletAddress":"{STRANGER}"}}"#
    );
    let (status, _) = post_wallet_usdt(&body, apis).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn collect_empty_wallet() {
    let _ = env_logger::try_init().ok();
    let mut apis = MockApis::default();
    apis.collection_db.expect_fetch_store().returning(|_| Ok(Some(shop1())));
    apis.collection_db.expect_collection_queue().returning(|_, _| Ok(vec![]));
    apis.collection_db.expect_record_collection_outcome().never();
    apis.collection_executor.expect_usdt_balance().returning(|_, _| Ok(TokenAmount::new(0, 6).unwrap()));
    apis.collection_executor.expect_enqueue_usdt_transfer().never();
    let body = format!(
        r#"{{"action":"collect","storecode":"SHOP1","requestedByWalletAddress":"{STORE_ADMIN}","toWalletAddress":"{STORE_ADMIN}"}}"#
    );
    let (status, body) = post_wallet_usdt(&body, apis).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"payment wallet balance is zero"}"#);
}

#[actix_web::test]
async fn unknown_store() {
    let _ = env_logger::try_init().ok();
    let mut apis = MockApis::default();
    apis.collection_db.expect_fetch_store().returning(|_| Ok(None));
    let body = format!(
        r#"{{"action":"collect-balance","storecode":"NOPE","requestedByWalletAddress":"{STORE_ADMIN}"}}"#
    );
    let (status, body) = post_wallet_usdt(&body, apis).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, r#"{"error":"Store NOPE does not exist"}"#);
}

#[actix_web::test]
async fn collect_balance_preview() {
    let _ = env_logger::try_init().ok();
    let mut apis = MockApis::default();
    apis.collection_db.expect_fetch_store().returning(|_| Ok(Some(shop1())));
    apis.collection_executor
        .expect_usdt_balance()
        .withf(|chain, _| *chain == Chain::Polygon)
        .returning(|_, _| Ok(TokenAmount::from_raw_str("25000000", 6).unwrap()));
    let body = format!(
        r#"{{"action":"collect-balance","storecode":"SHOP1","requestedByWalletAddress":"{STORE_ADMIN}"}}"#
    );
    let (status, body) = post_wallet_usdt(&body, apis).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body.contains(r#""role":"store-admin""#), "{body}");
    assert!(body.contains(r#""balance":25.0"#), "{body}");
    assert!(body.contains(&format!(r#""paymentWalletAddress":"{PAYMENT_WALLET}""#)), "{body}");
}

#[actix_web::test]
async fn collect_status_not_found_upstream() {
    let _ = env_logger::try_init().ok();
    let mut apis = MockApis::default();
    apis.collection_db.expect_fetch_store().returning(|_| Ok(Some(shop1())));
    apis.collection_db.expect_fetch_collection().withf(|id| id == "tx-9").returning(|_| Ok(None));
    apis.collection_db.expect_record_collection_outcome().times(1).returning(|o| Ok(attempt_from(o)));
    apis.collection_executor
        .expect_transaction_status()
        .returning(|id| Err(ExecutionServiceError::NotFound(id.to_string())));
    let body = format!(
        r#"{{"action":"collect-status","storecode":"SHOP1","requestedByWalletAddress":"{STORE_ADMIN}","transactionId":"tx-9"}}"#
    );
    let (status, body) = post_wallet_usdt(&body, apis).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body.contains(r#""status":"QUEUED""#), "{body}");
    assert!(body.contains(r#""requestedAmount":null"#), "{body}");
}

#[actix_web::test]
async fn collect_status_when_engine_is_down() {
    let _ = env_logger::try_init().ok();
    let mut apis = MockApis::default();
    apis.collection_db.expect_fetch_store().returning(|_| Ok(Some(shop1())));
    apis.collection_db.expect_fetch_collection().returning(|_| Ok(None));
    apis.collection_db.expect_record_collection_outcome().never();
    apis.collection_executor
        .expect_transaction_status()
        .returning(|_| Err(ExecutionServiceError::Unavailable("connection refused".into())));
    let body = format!(
        r#"{{"action":"collect-status","storecode":"SHOP1","requestedByWalletAddress":"{STORE_ADMIN}","transactionId":"tx-9"}}"#
    );
    let (status, body) = post_wallet_usdt(&body, apis).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.contains("connection refused"), "{body}");
}

#[actix_web::test]
async fn collect_status_with_a_malformed_transaction_id() {
    let _ = env_logger::try_init().ok();
    for id in ["", "  ", "../../contract/137/erc20/transfer"] {
        let mut apis = MockApis::default();
        apis.collection_db.expect_fetch_store().never();
        apis.collection_db.expect_fetch_collection().never();
        apis.collection_db.expect_record_collection_outcome().never();
        apis.collection_executor.expect_transaction_status().never();
        let body = format!(
            r#"{{"action":"collect-status","storecode":"SHOP1","requestedByWalletAddress":"{STORE_ADMIN}","transactionId":"{id}"}}"#
        );
        let (status, body) = post_wallet_usdt(&body, apis).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{id:?}: {body}");
        assert!(body.contains("is not a valid transaction id"), "{body}");
    }
}

#[actix_web::test]
async fn collect_history() {
    let _ = env_logger::try_init().ok();
    let mut apis = MockApis::default();
    apis.collection_db
        .expect_collection_history()
        .withf(|code, limit| code == "SHOP1" && *limit == 20)
        .returning(|_, _| Ok(vec![attempt_from(confirmed_outcome("tx-1", MicroUsdt::from(40_000_000)))]));
    let (status, body) = post_wallet_usdt(r#"{"action":"collect-history","storecode":"SHOP1"}"#, apis).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body.starts_with(r#"{"result":[{"transactionId":"tx-1""#), "{body}");
    assert!(body.contains(r#""status":"CONFIRMED""#));
    assert!(body.contains(r#""confirmedAt":"2024-05-01T12:05:00Z""#), "{body}");
    assert!(body.contains(&format!(r#""toWalletAddress":"{}""#, address(STORE_ADMIN))));
}

#[actix_web::test]
async fn collect_queue_limits_are_clamped() {
    let _ = env_logger::try_init().ok();
    let mut apis = MockApis::default();
    apis.collection_db.expect_collection_queue().withf(|code, limit| code == "SHOP1" && *limit == 100).returning(|_, _| Ok(vec![]));
    let (status, body) =
        post_wallet_usdt(r#"{"action":"collect-queue","storecode":"SHOP1","limit":5000}"#, apis).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"result":[]}"#);
}

#[actix_web::test]
async fn database_errors_are_hidden() {
    let _ = env_logger::try_init().ok();
    let mut apis = MockApis::default();
    apis.collection_db
        .expect_collection_history()
        .returning(|_, _| Err(LedgerError::DatabaseError("no such table: wallet_usdt_collects".into())));
    let (status, body) = post_wallet_usdt(r#"{"action":"collect-history","storecode":"SHOP1"}"#, apis).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.contains("wallet_usdt_collects"), "{body}");
    assert!(body.starts_with(r#"{"error":"#));
}
