//! CEP-4626: Tokenized Vault Standard for Casper
//! 
//! A Casper adaptation of ERC-4626: a vault issuing shares of a single
//! underlying CEP-18 token, with an entry fee charged on deposits.

pub mod vault;
pub mod events;
pub mod fees;


pub use vault::EntryFeeVault;
pub use fees::FeeConfig;
pub use events::*;
