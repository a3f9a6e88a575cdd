pub const DEFAULT_LIST_LIMIT: u32 = 20;
pub const MAX_LIST_LIMIT: u32 = 100;
const MAX_TRANSACTION_ID_LEN: usize = 128;

/// Listings are limit-only. Missing limits get the default, and everything is clamped to `1..=MAX_LIST_LIMIT`.
pub fn clamp_limit(limit: Option<u32>) -> u32 {
    limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT)
}

/// `0x` followed by 64 hex digits.
pub fn is_valid_transaction_hash(hash: &str) -> bool {
    match hash.trim().strip_prefix("0x") {
        Some(hex) => hex.len() == 64 && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

/// Execution-service transaction ids are non-empty and made of ASCII letters, digits, `-` and `_`.
pub fn is_valid_transaction_id(id: &str) -> bool {
    !id.is_empty() &&
        id.len() <= MAX_TRANSACTION_ID_LEN &&
        id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
