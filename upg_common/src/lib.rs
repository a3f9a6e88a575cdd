mod chain;
mod evm_address;
mod micro_usdt;
mod token_amount;

pub mod helpers;
mod secret;

pub use chain::{Chain, ChainParseError};
pub use evm_address::{is_valid_address, AddressError, EvmAddress};
pub use micro_usdt::{MicroUsdt, MicroUsdtConversionError, USDT_CURRENCY_CODE, USDT_DECIMALS};
pub use secret::Secret;
pub use token_amount::{TokenAmount, TokenAmountError};
