use sqlx::SqliteConnection;
use upg_common::EvmAddress;

use crate::{
    db_types::{Agent, Member, Store},
    traits::DirectoryError,
};

pub async fn fetch_store(storecode: &str, conn: &mut SqliteConnection) -> Result<Option<Store>, DirectoryError> {
    let store = sqlx::query_as(
        r#"SELECT storecode, store_name, store_logo, payment_wallet_address, admin_wallet_address, agentcode
           FROM stores WHERE storecode = ?"#,
    )
    .bind(storecode.trim())
    .fetch_optional(conn)
    .await?;
    Ok(store)
}

pub async fn fetch_agent(agentcode: &str, conn: &mut SqliteConnection) -> Result<Option<Agent>, DirectoryError> {
    let agent = sqlx::query_as(r#"SELECT agentcode, agent_name, admin_wallet_address FROM agents WHERE agentcode = ?"#)
        .bind(agentcode.trim())
        .fetch_optional(conn)
        .await?;
    Ok(agent)
}

pub async fn fetch_member(
    storecode: &str,
    wallet: &EvmAddress,
    conn: &mut SqliteConnection,
) -> Result<Option<Member>, DirectoryError> {
    let member = sqlx::query_as(
        r#"SELECT storecode, wallet_address, nickname, bank_name, account_number, account_holder
           FROM members WHERE storecode = ? AND wallet_address = ?"#,
    )
    .bind(storecode.trim())
    .bind(wallet.as_str())
    .fetch_optional(conn)
    .await?;
    Ok(member)
}

pub async fn upsert_store(store: Store, conn: &mut SqliteConnection) -> Result<Store, DirectoryError> {
    let store = sqlx::query_as(
        r#"
            INSERT INTO stores (storecode, store_name, store_logo, payment_wallet_address, admin_wallet_address, agentcode)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (storecode) DO UPDATE SET
                store_name = excluded.store_name,
                store_logo = excluded.store_logo,
                payment_wallet_address = excluded.payment_wallet_address,
                admin_wallet_address = excluded.admin_wallet_address,
                agentcode = excluded.agentcode,
                updated_at = CURRENT_TIMESTAMP
            RETURNING storecode, store_name, store_logo, payment_wallet_address, admin_wallet_address, agentcode;
        "#,
    )
    .bind(store.storecode)
    .bind(store.store_name)
    .bind(store.store_logo)
    .bind(store.payment_wallet_address)
    .bind(store.admin_wallet_address)
    .bind(store.agentcode)
    .fetch_one(conn)
    .await?;
    Ok(store)
}

pub async fn upsert_agent(agent: Agent, conn: &mut SqliteConnection) -> Result<Agent, DirectoryError> {
    let agent = sqlx::query_as(
        r#"
            INSERT INTO agents (agentcode, agent_name, admin_wallet_address) VALUES ($1, $2, $3)
            ON CONFLICT (agentcode) DO UPDATE SET
                agent_name = excluded.agent_name,
                admin_wallet_address = excluded.admin_wallet_address,
                updated_at = CURRENT_TIMESTAMP
            RETURNING agentcode, agent_name, admin_wallet_address;
        "#,
    )
    .bind(agent.agentcode)
    .bind(agent.agent_name)
    .bind(agent.admin_wallet_address)
    .fetch_one(conn)
    .await?;
    Ok(agent)
}

pub async fn upsert_member(member: Member, conn: &mut SqliteConnection) -> Result<Member, DirectoryError> {
    let member = sqlx::query_as(
        r#"
            INSERT INTO members (storecode, wallet_address, nickname, bank_name, account_number, account_holder)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (storecode, wallet_address) DO UPDATE SET
                nickname = excluded.nickname,
                bank_name = excluded.bank_name,
                account_number = excluded.account_number,
                account_holder = excluded.account_holder,
                updated_at = CURRENT_TIMESTAMP
            RETURNING storecode, wallet_address, nickname, bank_name, account_number, account_holder;
        "#,
    )
    .bind(member.storecode)
    .bind(String::from(member.wallet_address))
    .bind(member.nickname)
    .bind(member.bank_info.bank_name)
    .bind(member.bank_info.account_number)
    .bind(member.bank_info.account_holder)
    .fetch_one(conn)
    .await?;
    Ok(member)
}
