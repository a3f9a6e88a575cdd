use log::*;

use crate::db_types::CollectionStatus;

/// Maps the execution service's status vocabulary onto [`CollectionStatus`].
///
/// A mined transaction that reverted on-chain is a failure. Anything unrecognised, including a missing status, is
/// treated as `Queued`, since the transfer was accepted and may still complete.
pub fn normalize_status(status: Option<&str>, onchain_status: Option<&str>) -> CollectionStatus {
    let reverted = onchain_status.map(|s| s.trim().eq_ignore_ascii_case("reverted")).unwrap_or(false);
    let status = match status {
        Some(s) => s.trim().to_lowercase(),
        None => return CollectionStatus::Queued,
    };
    match status.as_str() {
        "requesting" | "pending" => CollectionStatus::Requesting,
        "queued" => CollectionStatus::Queued,
        "sent" | "submitted" => CollectionStatus::Submitted,
        "mined" | "confirmed" | "success" if reverted => CollectionStatus::Failed,
        "mined" | "confirmed" | "success" => CollectionStatus::Confirmed,
        "errored" | "failed" | "cancelled" => CollectionStatus::Failed,
        other => {
            debug!("🔄️ Unrecognised execution status '{other}'. Treating it as QUEUED");
            CollectionStatus::Queued
        },
    }
}
