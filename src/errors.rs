//! Error definitions for the vault and its token ledgers
use odra::prelude::*;

/// Errors raised by the vault, its fee configuration and the conversion math
#[odra::odra_error]
pub enum VaultError {
    /// Deposit or mint would produce no shares
    ZeroShares = 1,

    /// Withdrawal needs more shares than the owner holds
    ExceedsMaxWithdraw = 2,

    /// Redemption exceeds the owner's share balance
    ExceedsMaxRedeem = 3,

    /// Caller is neither the owner nor an approved spender, or not the admin
    Unauthorized = 4,

    /// Fee basis points above 10000
    InvalidFee = 5,

    /// Fee recipient is the null account
    InvalidRecipient = 6,

    /// Result does not fit in U256
    MathOverflow = 7,

    /// Re-entrant call into the vault
    Locked = 8,

    /// Vault was not initialized with an asset
    InvalidConfiguration = 9,

    /// Division by zero
    DivisionByZero = 10,
}

/// Errors raised by the asset and share ledgers
#[odra::odra_error]
pub enum TokenError {
    /// Insufficient allowance for transfer
    InsufficientAllowance = 100,

    /// Insufficient balance for operation
    InsufficientBalance = 101,

    /// Caller is not allowed to mint
    Unauthorized = 102,
}
