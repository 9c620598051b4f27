//! CEP-18 share ledger owned by the vault
//!
//! Shares are minted and burned only through the vault; the transfer and
//! approval surface is the standard one so shares stay freely tradable.
use odra::prelude::*;
use odra::casper_types::U256;
use crate::events::{Transfer, Approval};
use crate::errors::TokenError;

/// Share balances and supply
#[odra::module(events = [Transfer, Approval], errors = TokenError)]
pub struct ShareLedger {
    /// Token name
    name: Var<String>,
    /// Token symbol
    symbol: Var<String>,
    /// Token decimals
    decimals: Var<u8>,
    /// Total supply of shares
    total_supply: Var<U256>,
    /// Balance mapping: owner -> shares
    balances: Mapping<Address, U256>,
    /// Allowance mapping: owner -> spender -> shares
    allowances: Mapping<(Address, Address), U256>,
}

#[odra::module]
impl ShareLedger {
    pub fn init(&mut self, name: String, symbol: String, decimals: u8) {
        self.name.set(name);
        self.symbol.set(symbol);
        self.decimals.set(decimals);
        self.total_supply.set(U256::zero());
    }

    pub fn name(&self) -> String {
        self.name.get_or_default()
    }

    pub fn symbol(&self) -> String {
        self.symbol.get_or_default()
    }

    pub fn decimals(&self) -> u8 {
        self.decimals.get_or_default()
    }

    pub fn total_supply(&self) -> U256 {
        self.total_supply.get_or_default()
    }

    pub fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&owner).unwrap_or_default()
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or_default()
    }

    pub fn transfer(&mut self, to: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        self.transfer_internal(caller, to, amount);
        true
    }

    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        self.approve_internal(caller, spender, amount);
        true
    }

    pub fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        if !self.spend_allowance(from, caller, amount) {
            self.env().revert(TokenError::InsufficientAllowance);
        }
        self.transfer_internal(from, to, amount);
        true
    }
}

impl ShareLedger {
    /// Credit `amount` new shares to `to`
    pub fn mint(&mut self, to: Address, amount: U256) {
        let current_supply = self.total_supply();
        self.total_supply.set(current_supply + amount);

        let current_balance = self.balance_of(to);
        self.balances.set(&to, current_balance + amount);

        self.env().emit_event(Transfer {
            from: self.env().self_address(),
            to,
            value: amount,
        });
    }

    /// Destroy `amount` shares held by `from`
    pub fn burn(&mut self, from: Address, amount: U256) {
        let current_balance = self.balance_of(from);
        if current_balance < amount {
            self.env().revert(TokenError::InsufficientBalance);
        }

        self.balances.set(&from, current_balance - amount);

        let current_supply = self.total_supply();
        self.total_supply.set(current_supply - amount);

        self.env().emit_event(Transfer {
            from,
            to: self.env().self_address(),
            value: amount,
        });
    }

    /// Lower the spender's allowance by `amount`; false if it does not cover it
    pub fn spend_allowance(&mut self, owner: Address, spender: Address, amount: U256) -> bool {
        let current_allowance = self.allowance(owner, spender);
        if current_allowance < amount {
            return false;
        }
        self.approve_internal(owner, spender, current_allowance - amount);
        true
    }

    fn transfer_internal(&mut self, from: Address, to: Address, amount: U256) {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            self.env().revert(TokenError::InsufficientBalance);
        }

        self.balances.set(&from, from_balance - amount);
        let to_balance = self.balance_of(to);
        self.balances.set(&to, to_balance + amount);

        self.env().emit_event(Transfer {
            from,
            to,
            value: amount,
        });
    }

    fn approve_internal(&mut self, owner: Address, spender: Address, amount: U256) {
        self.allowances.set(&(owner, spender), amount);

        self.env().emit_event(Approval {
            owner,
            spender,
            value: amount,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odra::host::{Deployer, HostEnv, HostRef};
    use crate::cep4626::vault::{EntryFeeVault, EntryFeeVaultHostRef, EntryFeeVaultInitArgs};
    use crate::token::{AssetToken, AssetTokenInitArgs};

    fn setup() -> (HostEnv, ShareLedgerHostRef) {
        let env = odra_test::env();
        let init_args = ShareLedgerInitArgs {
            name: String::from("Vault Coin"),
            symbol: String::from("vCOIN"),
            decimals: 9,
        };
        let ledger = ShareLedger::deploy(&env, init_args);
        (env, ledger)
    }

    // Vault with `shares` minted 1:1 to account 0 at a zero fee.
    fn vault_with_shares(shares: u64) -> (HostEnv, EntryFeeVaultHostRef) {
        let env = odra_test::env();
        let mut token = AssetToken::deploy(
            &env,
            AssetTokenInitArgs {
                name: String::from("Vault Token"),
                symbol: String::from("VTK"),
                decimals: 9,
                initial_supply: U256::from(1_000_000),
            },
        );
        let mut vault = EntryFeeVault::deploy(
            &env,
            EntryFeeVaultInitArgs {
                asset: token.address(),
                entry_fee_basis_points: 0,
            },
        );
        token.approve(vault.address(), U256::from(shares));
        vault.deposit(U256::from(shares), env.get_account(0));
        (env, vault)
    }

    #[test]
    fn test_init() {
        let (env, ledger) = setup();
        assert_eq!(ledger.name(), "Vault Coin");
        assert_eq!(ledger.symbol(), "vCOIN");
        assert_eq!(ledger.decimals(), 9);
        assert_eq!(ledger.total_supply(), U256::zero());
        assert_eq!(ledger.balance_of(env.get_account(0)), U256::zero());
    }

    #[test]
    fn test_transfer_without_shares_fails() {
        let (env, mut ledger) = setup();
        let other = env.get_account(1);

        assert_eq!(
            ledger.try_transfer(other, U256::one()),
            Err(TokenError::InsufficientBalance.into())
        );
        assert!(ledger.transfer(other, U256::zero()));
    }

    #[test]
    fn test_transfer_from_needs_allowance() {
        let (env, mut ledger) = setup();
        let owner = env.get_account(0);
        let spender = env.get_account(1);

        ledger.approve(spender, U256::from(5));
        assert_eq!(ledger.allowance(owner, spender), U256::from(5));

        env.set_caller(spender);
        assert_eq!(
            ledger.try_transfer_from(owner, spender, U256::from(6)),
            Err(TokenError::InsufficientAllowance.into())
        );
        // allowance covers it but the owner holds nothing
        assert_eq!(
            ledger.try_transfer_from(owner, spender, U256::from(5)),
            Err(TokenError::InsufficientBalance.into())
        );
        assert_eq!(ledger.allowance(owner, spender), U256::from(5));
    }

    #[test]
    fn test_burn_takes_only_what_the_owner_holds() {
        let (env, mut vault) = vault_with_shares(1_000);
        let owner = env.get_account(0);
        let other = env.get_account(1);

        vault.transfer(other, U256::from(400));
        assert_eq!(
            vault.try_redeem(U256::from(1_000), owner, owner),
            Err(crate::errors::VaultError::ExceedsMaxRedeem.into())
        );
        assert_eq!(vault.balance_of(owner), U256::from(600));

        vault.redeem(U256::from(600), owner, owner);
        assert!(env.emitted_event(
            &vault,
            Transfer {
                from: owner,
                to: vault.address(),
                value: U256::from(600),
            }
        ));
        assert_eq!(vault.balance_of(owner), U256::zero());
        assert_eq!(vault.total_supply(), U256::from(400));
        assert_eq!(vault.total_supply(), vault.balance_of(other));
    }
}
