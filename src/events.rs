//! Event definitions shared by the token ledgers and the fee configuration
use odra::prelude::*;
use odra::casper_types::U256;

/// Event emitted when tokens are transferred, minted or burned
#[odra::event]
pub struct Transfer {
    /// From address
    pub from: Address,
    /// To address
    pub to: Address,
    /// Amount transferred
    pub value: U256,
}

/// Event emitted when approval is granted
#[odra::event]
pub struct Approval {
    /// Owner address
    pub owner: Address,
    /// Spender address
    pub spender: Address,
    /// Amount approved
    pub value: U256,
}

/// Event emitted when an entry fee is forwarded to the fee recipient
#[odra::event]
pub struct EntryFeeCollected {
    /// Account that paid the deposit
    pub payer: Address,
    /// Fee recipient at the time of the deposit
    pub recipient: Address,
    /// Fee amount in assets
    pub amount: U256,
}

/// Event emitted when the entry fee rate changes
#[odra::event]
pub struct EntryFeeBasisPointsUpdated {
    /// Previous rate
    pub old_basis_points: u32,
    /// New rate
    pub new_basis_points: u32,
}

/// Event emitted when the entry fee recipient changes
#[odra::event]
pub struct EntryFeeRecipientUpdated {
    /// Previous recipient
    pub old_recipient: Address,
    /// New recipient
    pub new_recipient: Address,
}
