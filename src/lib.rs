#![cfg_attr(not(test), no_std)]
#![cfg_attr(not(test), no_main)]
extern crate alloc;

pub mod errors;
pub mod events;
pub mod math;

// Base asset and share ledgers
pub mod token;
pub mod shares;

// CEP-4626: Tokenized Vault Standard
pub mod cep4626;
