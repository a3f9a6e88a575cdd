pub mod wallet_engine;
