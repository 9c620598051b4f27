//! Entry fee configuration
//!
//! Holds the fee rate, its recipient and the administrator allowed to change
//! them. Every setter takes the caller explicitly and compares it against the
//! stored administrator.
use odra::prelude::*;
use odra::casper_types::account::AccountHash;
use crate::errors::VaultError;
use crate::events::{EntryFeeBasisPointsUpdated, EntryFeeRecipientUpdated};
use crate::math::MAX_BASIS_POINTS;

/// The unset account; never a valid fee recipient.
pub fn null_address() -> Address {
    Address::Account(AccountHash::new([0u8; 32]))
}

#[odra::module(events = [EntryFeeBasisPointsUpdated, EntryFeeRecipientUpdated], errors = VaultError)]
pub struct FeeConfig {
    /// Entry fee rate, 10000 = 100%
    basis_points: Var<u32>,
    /// Receives the fee portion of every deposit
    recipient: Var<Address>,
    /// May change rate and recipient
    admin: Var<Address>,
}

#[odra::module]
impl FeeConfig {
    pub fn init(&mut self, admin: Address, basis_points: u32, recipient: Address) {
        if basis_points > MAX_BASIS_POINTS {
            self.env().revert(VaultError::InvalidFee);
        }
        if recipient == null_address() {
            self.env().revert(VaultError::InvalidRecipient);
        }
        self.admin.set(admin);
        self.basis_points.set(basis_points);
        self.recipient.set(recipient);
    }

    pub fn basis_points(&self) -> u32 {
        self.basis_points.get_or_default()
    }

    pub fn recipient(&self) -> Address {
        self.recipient.get_or_revert_with(VaultError::InvalidConfiguration)
    }

    pub fn admin(&self) -> Address {
        self.admin.get_or_revert_with(VaultError::InvalidConfiguration)
    }
}

impl FeeConfig {
    pub fn set_basis_points(&mut self, caller: Address, basis_points: u32) {
        self.only_admin(caller);
        if basis_points > MAX_BASIS_POINTS {
            self.env().revert(VaultError::InvalidFee);
        }

        let old_basis_points = self.basis_points();
        self.basis_points.set(basis_points);

        self.env().emit_event(EntryFeeBasisPointsUpdated {
            old_basis_points,
            new_basis_points: basis_points,
        });
    }

    pub fn set_recipient(&mut self, caller: Address, recipient: Address) {
        self.only_admin(caller);
        if recipient == null_address() {
            self.env().revert(VaultError::InvalidRecipient);
        }

        let old_recipient = self.recipient();
        self.recipient.set(recipient);

        self.env().emit_event(EntryFeeRecipientUpdated {
            old_recipient,
            new_recipient: recipient,
        });
    }

    fn only_admin(&self, caller: Address) {
        if caller != self.admin() {
            self.env().revert(VaultError::Unauthorized);
        }
    }
}
