use thiserror::Error;
use upg_common::EvmAddress;

use crate::db_types::{Agent, Member, Store};

#[allow(async_fn_in_trait)]
pub trait StoreDirectory {
    /// Fetches the store with the given storecode. Storecodes are matched case-insensitively.
    async fn fetch_store(&self, storecode: &str) -> Result<Option<Store>, DirectoryError>;

    async fn fetch_agent(&self, agentcode: &str) -> Result<Option<Agent>, DirectoryError>;

    /// Fetches the member of `storecode` that uses the given wallet.
    async fn fetch_member(&self, storecode: &str, wallet: &EvmAddress) -> Result<Option<Member>, DirectoryError>;
}

#[allow(async_fn_in_trait)]
pub trait DirectoryManagement {
    async fn upsert_store(&self, store: Store) -> Result<Store, DirectoryError>;

    async fn upsert_agent(&self, agent: Agent) -> Result<Agent, DirectoryError>;

    async fn upsert_member(&self, member: Member) -> Result<Member, DirectoryError>;
}

#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for DirectoryError {
    fn from(e: sqlx::Error) -> Self {
        DirectoryError::DatabaseError(e.to_string())
    }
}
