//! Request handler definitions
//!
//! Each route and its handler is declared here. Anything more than a line or two of handling belongs in its own
//! module (see [`crate::wallet_usdt`]), so that this file stays a table of contents for the HTTP surface.
//!
//! Handlers run on actix worker threads, which process their requests one at a time. Database and execution-service
//! calls are therefore always awaited, never blocked on.
use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use log::*;
use usdt_payment_engine::{CollectionApi, ExecutionService, StoreDashboardApi, UsdtGatewayDatabase, WalletPaymentApi};

use crate::{
    config::ProxyConfig,
    data_objects::WalletUsdtRequest,
    errors::ServerError,
    helpers::get_remote_ip,
    wallet_usdt::{handle_wallet_usdt, WalletUsdtApis},
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Wallet USDT  ----------------------------------------------------
route!(wallet_usdt => Post "/wallet/usdt" impl UsdtGatewayDatabase, ExecutionService);
/// The single entry point for store wallet operations. The `action` field of the JSON body picks the operation:
///
/// * `collect-balance` - check who may collect from a store, and how much is waiting in its payment wallet.
/// * `collect` - sweep the whole payment wallet balance to the caller's authorized wallet.
/// * `collect-status` - poll the execution service for a collection and record what it says.
/// * `collect-history` / `collect-queue` - list a store's collections, or only the unresolved ones.
/// * `prepare` / `confirm` / `list` - record member payments into a store's payment wallet.
/// * `store-dashboard` - a summary of the store.
///
/// Results come back as `{"result": ...}`, and failures as `{"error": "..."}`.
pub async fn wallet_usdt<B, E>(
    req: HttpRequest,
    body: web::Json<WalletUsdtRequest>,
    proxy: web::Data<ProxyConfig>,
    collections: web::Data<CollectionApi<B, E>>,
    payments: web::Data<WalletPaymentApi<B>>,
    dashboards: web::Data<StoreDashboardApi<B, E>>,
) -> Result<HttpResponse, ServerError>
where
    B: UsdtGatewayDatabase,
    E: ExecutionService,
{
    let request = body.into_inner();
    let remote_ip = get_remote_ip(&req, proxy.use_x_forwarded_for, proxy.use_forwarded)
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "unknown".into());
    debug!("💻️ {} request from {remote_ip}", request.action());
    let apis = WalletUsdtApis {
        collections: collections.get_ref(),
        payments: payments.get_ref(),
        dashboards: dashboards.get_ref(),
    };
    handle_wallet_usdt(apis, request).await
}
