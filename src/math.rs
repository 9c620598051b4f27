//! Share/asset conversion math for the vault
//!
//! Every conversion is a pure function of a [`VaultSnapshot`]: the vault's
//! asset balance, the outstanding share supply and the entry fee rate.
//!
//! | Operation | Direction        | Rounding |
//! |-----------|------------------|----------|
//! | deposit   | assets -> shares | down     |
//! | mint      | shares -> assets | up       |
//! | withdraw  | assets -> shares | up       |
//! | redeem    | shares -> assets | down     |
//!
//! Intermediate products are computed in `U512`, so `a * b / c` never
//! truncates before the division.
use odra::casper_types::{U256, U512};
use crate::errors::VaultError;

/// 100% expressed in basis points
pub const MAX_BASIS_POINTS: u32 = 10_000;

/// Rounding direction of an integer division
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Rounding {
    /// Towards zero
    Floor,
    /// Away from zero
    Ceil,
}

/// Overflow-free arithmetic on U256
pub struct SafeMath;

impl SafeMath {
    /// Computes `value * numerator / denominator` with the given rounding
    pub fn mul_div(
        value: U256,
        numerator: U256,
        denominator: U256,
        rounding: Rounding,
    ) -> Result<U256, VaultError> {
        if denominator.is_zero() {
            return Err(VaultError::DivisionByZero);
        }

        let product = Self::widen(value) * Self::widen(numerator);
        let (quotient, remainder) = product.div_mod(Self::widen(denominator));
        let result = match rounding {
            Rounding::Floor => quotient,
            Rounding::Ceil if remainder.is_zero() => quotient,
            Rounding::Ceil => quotient + U512::one(),
        };

        Self::narrow(result)
    }

    fn widen(value: U256) -> U512 {
        let mut bytes = [0u8; 32];
        value.to_little_endian(&mut bytes);
        U512::from_little_endian(&bytes)
    }

    fn narrow(value: U512) -> Result<U256, VaultError> {
        let mut bytes = [0u8; 64];
        value.to_little_endian(&mut bytes);
        if bytes[32..].iter().any(|byte| *byte != 0) {
            return Err(VaultError::MathOverflow);
        }
        Ok(U256::from_little_endian(&bytes[..32]))
    }
}

/// Inputs of the exchange rate at one point in time
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct VaultSnapshot {
    /// Asset ledger balance of the vault account
    pub total_assets: U256,
    /// Outstanding shares
    pub total_supply: U256,
    /// Entry fee rate in basis points
    pub fee_basis_points: u32,
}

impl VaultSnapshot {
    pub fn new(total_assets: U256, total_supply: U256, fee_basis_points: u32) -> Self {
        Self {
            total_assets,
            total_supply,
            fee_basis_points,
        }
    }

    /// Fee charged on a gross deposit: `floor(assets * bps / 10000)`
    pub fn entry_fee(&self, assets: U256) -> Result<U256, VaultError> {
        SafeMath::mul_div(
            assets,
            U256::from(self.fee_basis_points),
            U256::from(MAX_BASIS_POINTS),
            Rounding::Floor,
        )
    }

    /// Assets to shares at the current rate
    ///
    /// One virtual share and one virtual asset sit on both sides of the rate;
    /// an empty vault converts 1:1.
    pub fn convert_to_shares(&self, assets: U256, rounding: Rounding) -> Result<U256, VaultError> {
        SafeMath::mul_div(assets, self.virtual_supply()?, self.virtual_assets()?, rounding)
    }

    /// Shares to assets at the current rate, 0 while no shares exist
    pub fn convert_to_assets(&self, shares: U256, rounding: Rounding) -> Result<U256, VaultError> {
        if self.total_supply.is_zero() {
            return Ok(U256::zero());
        }
        self.assets_for_shares(shares, rounding)
    }

    /// Shares minted for a gross deposit of `assets`
    pub fn preview_deposit(&self, assets: U256) -> Result<U256, VaultError> {
        let fee = self.entry_fee(assets)?;
        self.convert_to_shares(assets - fee, Rounding::Floor)
    }

    /// Gross assets needed so that the post-fee amount buys `shares`
    pub fn preview_mint(&self, shares: U256) -> Result<U256, VaultError> {
        if self.fee_basis_points >= MAX_BASIS_POINTS {
            return Err(VaultError::ZeroShares);
        }
        let net_assets = self.assets_for_shares(shares, Rounding::Ceil)?;
        SafeMath::mul_div(
            net_assets,
            U256::from(MAX_BASIS_POINTS),
            U256::from(MAX_BASIS_POINTS - self.fee_basis_points),
            Rounding::Ceil,
        )
    }

    /// Shares burned to pay out exactly `assets`
    pub fn preview_withdraw(&self, assets: U256) -> Result<U256, VaultError> {
        self.convert_to_shares(assets, Rounding::Ceil)
    }

    /// Assets paid out for burning `shares`
    pub fn preview_redeem(&self, shares: U256) -> Result<U256, VaultError> {
        self.convert_to_assets(shares, Rounding::Floor)
    }

    fn assets_for_shares(&self, shares: U256, rounding: Rounding) -> Result<U256, VaultError> {
        SafeMath::mul_div(shares, self.virtual_assets()?, self.virtual_supply()?, rounding)
    }

    fn virtual_assets(&self) -> Result<U256, VaultError> {
        self.total_assets
            .checked_add(U256::one())
            .ok_or(VaultError::MathOverflow)
    }

    fn virtual_supply(&self) -> Result<U256, VaultError> {
        self.total_supply
            .checked_add(U256::one())
            .ok_or(VaultError::MathOverflow)
    }
}
