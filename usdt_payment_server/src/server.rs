use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::*;
use usdt_payment_engine::{CollectionApi, SqliteDatabase, StoreDashboardApi, WalletPaymentApi};
use wallet_sdk::EngineApi;

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::wallet_engine::EngineExecutionService,
    routes::{health, WalletUsdtRoute},
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    db.run_migrations().await.map_err(|e| ServerError::InitializeError(format!("Migrations failed. {e}")))?;
    info!("🗃️ Database at {} is ready", db.url());
    let engine = EngineApi::new(config.engine.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let executor = EngineExecutionService::new(engine);
    let srv = create_server_instance(config, db, executor)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    executor: EngineExecutionService,
) -> Result<Server, ServerError> {
    let host = config.host.clone();
    let port = config.port;
    let srv = HttpServer::new(move || {
        let collections_api = CollectionApi::new(db.clone(), executor.clone())
            .with_default_chain(config.default_chain)
            .with_guard_window(config.collection_guard);
        let payments_api = WalletPaymentApi::new(db.clone()).with_default_chain(config.default_chain);
        let dashboard_api =
            StoreDashboardApi::new(db.clone(), executor.clone()).with_default_chain(config.default_chain);
        let api_scope =
            web::scope("/api").service(WalletUsdtRoute::<SqliteDatabase, EngineExecutionService>::new());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("upg::access_log"))
            .app_data(json_config())
            .app_data(web::Data::new(config.proxy_config()))
            .app_data(web::Data::new(collections_api))
            .app_data(web::Data::new(payments_api))
            .app_data(web::Data::new(dashboard_api))
            .service(health)
            .service(api_scope)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((host.as_str(), port))?
    .run();
    Ok(srv)
}

/// Malformed bodies, unknown actions and missing fields all become 400 responses in the usual error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        debug!("💻️ Rejecting request body. {message}");
        ServerError::InvalidRequestBody(message).into()
    })
}
