use upg_common::EvmAddress;
use usdt_payment_engine::{
    db_types::{Agent, BankInfo, Member, Store},
    DirectoryManagement,
    SqliteDatabase,
};

pub const PAYMENT_WALLET: &str = "0xAAAaaaAAAaaaAAAaaaAAAaaaAAAaaaAAAaaaAAAa";
pub const STORE_ADMIN: &str = "0xBBBbbbBBBbbbBBBbbbBBBbbbBBBbbbBBBbbbBBBb";
pub const AGENT_ADMIN: &str = "0xCCCcccCCCcccCCCcccCCCcccCCCcccCCCcccCCCc";
pub const OTHER_AGENT_ADMIN: &str = "0xDDDdddDDDdddDDDdddDDDdddDDDdddDDDdddDDDd";
pub const MEMBER_WALLET: &str = "0x1111111111111111111111111111111111111111";
pub const OTHER_PAYMENT_WALLET: &str = "0x2222222222222222222222222222222222222222";
pub const TX_HASH: &str = "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060";

/// SHOP1 belongs to agent AG01. SHOP2 belongs to AG02 and has no payment wallet. AG02's admin has nothing to do with
/// SHOP1.
pub async fn seed_directory(db: &SqliteDatabase) {
    db.upsert_agent(Agent::new("AG01", "Agent One").with_admin_wallet(AGENT_ADMIN)).await.unwrap();
    db.upsert_agent(Agent::new("AG02", "Agent Two").with_admin_wallet(OTHER_AGENT_ADMIN)).await.unwrap();
    let shop1 = Store::new("SHOP1", "Shop One")
        .with_payment_wallet(PAYMENT_WALLET)
        .with_admin_wallet(STORE_ADMIN)
        .with_agentcode("AG01");
    db.upsert_store(shop1).await.unwrap();
    let shop2 = Store::new("SHOP2", "Shop Two").with_admin_wallet(STORE_ADMIN).with_agentcode("AG02");
    db.upsert_store(shop2).await.unwrap();
    let shop3 = Store::new("SHOP3", "Shop Three")
        .with_payment_wallet(OTHER_PAYMENT_WALLET)
        .with_admin_wallet(STORE_ADMIN)
        .with_agentcode("AG01");
    db.upsert_store(shop3).await.unwrap();
    let member = Member {
        storecode: "SHOP1".into(),
        wallet_address: EvmAddress::parse(MEMBER_WALLET).unwrap(),
        nickname: "alice".into(),
        bank_info: BankInfo {
            bank_name: Some("Kookmin".into()),
            account_number: Some("123-456".into()),
            account_holder: Some("Alice Kim".into()),
        },
    };
    db.upsert_member(member).await.unwrap();
}
