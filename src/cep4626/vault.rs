//! CEP-4626 vault with an entry fee
//!
//! Users deposit a CEP-18 asset and receive vault shares. A fee, in basis
//! points of the gross deposit, is forwarded to the fee recipient at deposit
//! time. Exits are fee-free.
//!
//! The vault keeps no asset bookkeeping of its own: `total_assets` is always
//! the asset ledger balance of the vault account, so direct transfers into the
//! vault move the exchange rate for every holder.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use crate::cep4626::events::{Deposit, Withdraw};
use crate::cep4626::fees::FeeConfig;
use crate::errors::VaultError;
use crate::events::EntryFeeCollected;
use crate::math::{Rounding, VaultSnapshot};
use crate::shares::ShareLedger;
use crate::token::Cep18TokenContractRef;

/// Tokenized vault charging an entry fee on deposits
#[odra::module(events = [Deposit, Withdraw, EntryFeeCollected], errors = VaultError)]
pub struct EntryFeeVault {
    /// Share token
    shares: SubModule<ShareLedger>,
    /// Entry fee rate, recipient and admin
    fees: SubModule<FeeConfig>,
    /// Underlying CEP-18 asset
    asset: Var<Address>,
    /// Reentrancy lock
    locked: Var<bool>,
}

#[odra::module]
impl EntryFeeVault {
    /// Initialize the vault over `asset`. The deployer becomes the admin and
    /// the first fee recipient.
    pub fn init(&mut self, asset: Address, entry_fee_basis_points: u32) {
        let caller = self.env().caller();
        let decimals = Cep18TokenContractRef::new(self.env(), asset).decimals();

        self.asset.set(asset);
        self.locked.set(false);
        self.shares.init(String::from("Vault Coin"), String::from("vCOIN"), decimals);
        self.fees.init(caller, entry_fee_basis_points, caller);
    }

    // ========================================
    // Share Token
    // ========================================

    pub fn name(&self) -> String {
        self.shares.name()
    }

    pub fn symbol(&self) -> String {
        self.shares.symbol()
    }

    pub fn decimals(&self) -> u8 {
        self.shares.decimals()
    }

    pub fn total_supply(&self) -> U256 {
        self.shares.total_supply()
    }

    pub fn balance_of(&self, owner: Address) -> U256 {
        self.shares.balance_of(owner)
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.shares.allowance(owner, spender)
    }

    pub fn transfer(&mut self, to: Address, amount: U256) -> bool {
        self.shares.transfer(to, amount)
    }

    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        self.shares.approve(spender, amount)
    }

    pub fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool {
        self.shares.transfer_from(from, to, amount)
    }

    // ========================================
    // Vault Metadata
    // ========================================

    /// Returns the address of the underlying token used for the vault
    pub fn asset(&self) -> Address {
        self.asset.get_or_revert_with(VaultError::InvalidConfiguration)
    }

    /// Returns the asset ledger balance of the vault account
    pub fn total_assets(&self) -> U256 {
        let vault = self.env().self_address();
        self.asset_token().balance_of(vault)
    }

    // ========================================
    // Conversion Functions
    // ========================================

    /// Converts assets to shares at the current rate, rounding down, fee excluded
    pub fn convert_to_shares(&self, assets: U256) -> U256 {
        self.snapshot()
            .convert_to_shares(assets, Rounding::Floor)
            .unwrap_or_revert(&self.env())
    }

    /// Converts shares to assets at the current rate, rounding down
    pub fn convert_to_assets(&self, shares: U256) -> U256 {
        self.snapshot()
            .convert_to_assets(shares, Rounding::Floor)
            .unwrap_or_revert(&self.env())
    }

    /// Fee charged on a gross deposit of `assets`
    pub fn calculate_entry_fee(&self, assets: U256) -> U256 {
        self.snapshot().entry_fee(assets).unwrap_or_revert(&self.env())
    }

    // ========================================
    // Preview Functions
    // ========================================

    /// Shares a `deposit` of `assets` would mint right now, fee included
    pub fn preview_deposit(&self, assets: U256) -> U256 {
        self.snapshot().preview_deposit(assets).unwrap_or_revert(&self.env())
    }

    /// Gross assets a `mint` of `shares` would pull right now, fee included
    ///
    /// - Reverts with `ZeroShares` while the fee is 100%
    pub fn preview_mint(&self, shares: U256) -> U256 {
        self.snapshot().preview_mint(shares).unwrap_or_revert(&self.env())
    }

    /// Shares a `withdraw` of `assets` would burn right now
    pub fn preview_withdraw(&self, assets: U256) -> U256 {
        self.snapshot().preview_withdraw(assets).unwrap_or_revert(&self.env())
    }

    /// Assets a `redeem` of `shares` would pay out right now
    pub fn preview_redeem(&self, shares: U256) -> U256 {
        self.snapshot().preview_redeem(shares).unwrap_or_revert(&self.env())
    }

    // ========================================
    // Limits
    // ========================================

    /// No deposit limit
    pub fn max_deposit(&self, _receiver: Address) -> U256 {
        U256::MAX
    }

    /// No mint limit
    pub fn max_mint(&self, _receiver: Address) -> U256 {
        U256::MAX
    }

    /// Asset value of the owner's whole position
    pub fn max_withdraw(&self, owner: Address) -> U256 {
        let shares = self.shares.balance_of(owner);
        self.preview_redeem(shares)
    }

    /// The owner's whole share balance
    pub fn max_redeem(&self, owner: Address) -> U256 {
        self.shares.balance_of(owner)
    }

    // ========================================
    // Deposit/Mint
    // ========================================

    /// Deposits `assets` from the caller and mints shares to `receiver`
    ///
    /// - The caller must have approved the vault for `assets` on the asset token
    /// - The fee part of `assets` goes to the fee recipient
    /// - Reverts with `ZeroShares` if the net deposit buys no shares
    ///
    /// Returns the amount of shares minted
    pub fn deposit(&mut self, assets: U256, receiver: Address) -> U256 {
        self.lock();

        let caller = self.env().caller();
        let snapshot = self.snapshot();
        let shares = snapshot.preview_deposit(assets).unwrap_or_revert(&self.env());
        if shares.is_zero() {
            self.env().revert(VaultError::ZeroShares);
        }
        let fee = snapshot.entry_fee(assets).unwrap_or_revert(&self.env());

        self.deposit_internal(caller, receiver, assets, shares, fee);

        self.unlock();
        shares
    }

    /// Mints exactly `shares` to `receiver`, pulling the gross assets they cost
    ///
    /// Returns the amount of assets pulled from the caller, fee included
    pub fn mint(&mut self, shares: U256, receiver: Address) -> U256 {
        self.lock();

        if shares.is_zero() {
            self.env().revert(VaultError::ZeroShares);
        }

        let caller = self.env().caller();
        let snapshot = self.snapshot();
        let assets = snapshot.preview_mint(shares).unwrap_or_revert(&self.env());
        let fee = snapshot.entry_fee(assets).unwrap_or_revert(&self.env());

        self.deposit_internal(caller, receiver, assets, shares, fee);

        self.unlock();
        assets
    }

    // ========================================
    // Withdraw/Redeem
    // ========================================

    /// Burns `owner`'s shares and sends exactly `assets` to `receiver`
    ///
    /// - The caller must be `owner` or hold a share allowance from `owner`
    ///
    /// Returns the amount of shares burned
    pub fn withdraw(&mut self, assets: U256, receiver: Address, owner: Address) -> U256 {
        self.lock();

        let caller = self.env().caller();
        let shares = self.snapshot().preview_withdraw(assets).unwrap_or_revert(&self.env());
        self.check_spender(caller, owner, shares);
        if shares > self.shares.balance_of(owner) {
            self.env().revert(VaultError::ExceedsMaxWithdraw);
        }

        self.withdraw_internal(caller, receiver, owner, assets, shares);

        self.unlock();
        shares
    }

    /// Burns exactly `shares` from `owner` and sends their value to `receiver`
    ///
    /// Returns the amount of assets sent to receiver
    pub fn redeem(&mut self, shares: U256, receiver: Address, owner: Address) -> U256 {
        self.lock();

        let caller = self.env().caller();
        self.check_spender(caller, owner, shares);
        if shares > self.max_redeem(owner) {
            self.env().revert(VaultError::ExceedsMaxRedeem);
        }
        let assets = self.snapshot().preview_redeem(shares).unwrap_or_revert(&self.env());

        self.withdraw_internal(caller, receiver, owner, assets, shares);

        self.unlock();
        assets
    }

    // ========================================
    // Fee Configuration
    // ========================================

    pub fn get_entry_fee_basis_points(&self) -> u32 {
        self.fees.basis_points()
    }

    pub fn get_entry_fee_recipient(&self) -> Address {
        self.fees.recipient()
    }

    pub fn admin(&self) -> Address {
        self.fees.admin()
    }

    /// Admin only. Reverts with `InvalidFee` above 10000.
    pub fn set_entry_fee_basis_points(&mut self, basis_points: u32) {
        let caller = self.env().caller();
        self.fees.set_basis_points(caller, basis_points);
    }

    /// Admin only. Reverts with `InvalidRecipient` for the null account.
    pub fn set_entry_fee_recipient(&mut self, recipient: Address) {
        let caller = self.env().caller();
        self.fees.set_recipient(caller, recipient);
    }
}

impl EntryFeeVault {
    fn deposit_internal(
        &mut self,
        caller: Address,
        receiver: Address,
        assets: U256,
        shares: U256,
        fee: U256,
    ) {
        let vault = self.env().self_address();
        let mut asset_token = self.asset_token();
        asset_token.transfer_from(caller, vault, assets);

        // The fee leaves from the balance just received, before any share exists.
        if !fee.is_zero() {
            let recipient = self.fees.recipient();
            if recipient != vault {
                asset_token.transfer(recipient, fee);
                self.env().emit_event(EntryFeeCollected {
                    payer: caller,
                    recipient,
                    amount: fee,
                });
            }
        }

        self.shares.mint(receiver, shares);

        self.env().emit_event(Deposit {
            sender: caller,
            owner: receiver,
            assets,
            shares,
        });
    }

    fn withdraw_internal(
        &mut self,
        caller: Address,
        receiver: Address,
        owner: Address,
        assets: U256,
        shares: U256,
    ) {
        if caller != owner && !self.shares.spend_allowance(owner, caller, shares) {
            self.env().revert(VaultError::Unauthorized);
        }

        self.shares.burn(owner, shares);
        self.asset_token().transfer(receiver, assets);

        self.env().emit_event(Withdraw {
            sender: caller,
            receiver,
            owner,
            assets,
            shares,
        });
    }

    // Only the owner or a spender approved for `shares` may exit a position.
    fn check_spender(&self, caller: Address, owner: Address, shares: U256) {
        if caller != owner && self.shares.allowance(owner, caller) < shares {
            self.env().revert(VaultError::Unauthorized);
        }
    }

    fn snapshot(&self) -> VaultSnapshot {
        VaultSnapshot::new(
            self.total_assets(),
            self.shares.total_supply(),
            self.fees.basis_points(),
        )
    }

    fn asset_token(&self) -> Cep18TokenContractRef {
        Cep18TokenContractRef::new(self.env(), self.asset())
    }

    fn lock(&mut self) {
        if self.locked.get_or_default() {
            self.env().revert(VaultError::Locked);
        }
        self.locked.set(true);
    }

    fn unlock(&mut self) {
        self.locked.set(false);
    }
}
