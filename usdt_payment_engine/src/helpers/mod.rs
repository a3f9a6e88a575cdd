mod status;
mod validation;

pub use status::normalize_status;
pub use validation::{
    clamp_limit,
    is_valid_transaction_hash,
    is_valid_transaction_id,
    DEFAULT_LIST_LIMIT,
    MAX_LIST_LIMIT,
};
