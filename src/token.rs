//! The base asset the vault accepts
//!
//! The vault only ever talks to the asset through [`Cep18Token`]. [`AssetToken`]
//! is a plain CEP-18 implementation used for local deployments and tests.
use odra::prelude::*;
use odra::casper_types::U256;
use crate::events::{Transfer, Approval};
use crate::errors::TokenError;

/// Standard CEP-18 token with a single minter
#[odra::module(events = [Transfer, Approval], errors = TokenError)]
pub struct AssetToken {
    /// Token name
    name: Var<String>,
    /// Token symbol
    symbol: Var<String>,
    /// Token decimals
    decimals: Var<u8>,
    /// Total supply of tokens
    total_supply: Var<U256>,
    /// Balance mapping: owner -> balance
    balances: Mapping<Address, U256>,
    /// Allowance mapping: owner -> spender -> amount
    allowances: Mapping<(Address, Address), U256>,
    /// Account allowed to mint
    minter: Var<Address>,
}

#[odra::module]
impl AssetToken {
    /// Initialize the token and credit `initial_supply` to the deployer
    pub fn init(&mut self, name: String, symbol: String, decimals: u8, initial_supply: U256) {
        let caller = self.env().caller();
        self.name.set(name);
        self.symbol.set(symbol);
        self.decimals.set(decimals);
        self.total_supply.set(U256::zero());
        self.minter.set(caller);

        if !initial_supply.is_zero() {
            self.mint_internal(caller, initial_supply);
        }
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

    /// Transfer tokens to another address
    pub fn transfer(&mut self, to: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        self.transfer_internal(caller, to, amount);
        true
    }

    /// Approve a spender to spend tokens
    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        self.approve_internal(caller, spender, amount);
        true
    }

    /// Transfer tokens from one address to another (requires approval)
    pub fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        let current_allowance = self.allowance(from, caller);

        if current_allowance < amount {
            self.env().revert(TokenError::InsufficientAllowance);
        }

        self.approve_internal(from, caller, current_allowance - amount);
        self.transfer_internal(from, to, amount);
        true
    }

    /// Mint new tokens (minter only)
    pub fn mint(&mut self, to: Address, amount: U256) {
        let caller = self.env().caller();
        let minter = self.minter.get_or_revert_with(TokenError::Unauthorized);
        if caller != minter {
            self.env().revert(TokenError::Unauthorized);
        }
        self.mint_internal(to, amount);
    }

    fn mint_internal(&mut self, to: Address, amount: U256) {
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

/// Asset ledger interface consumed by the vault
#[odra::external_contract]
pub trait Cep18Token {
    /// Get the balance of an address
    fn balance_of(&self, owner: Address) -> U256;

    /// Get allowance
    fn allowance(&self, owner: Address, spender: Address) -> U256;

    /// Transfer tokens
    fn transfer(&mut self, to: Address, amount: U256) -> bool;

    /// Transfer tokens from another address
    fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool;

    /// Get token decimals
    fn decimals(&self) -> u8;
}

#[cfg(test)]
mod tests {
    use super::*;
    use odra::host::{Deployer, HostEnv};

    fn setup() -> (HostEnv, AssetTokenHostRef) {
        let env = odra_test::env();
        let init_args = AssetTokenInitArgs {
            name: String::from("Vault Token"),
            symbol: String::from("VTK"),
            decimals: 18,
            initial_supply: U256::from(1_000_000),
        };
        let token = AssetToken::deploy(&env, init_args);
        (env, token)
    }

    #[test]
    fn test_init() {
        let (env, token) = setup();
        assert_eq!(token.name(), "Vault Token");
        assert_eq!(token.symbol(), "VTK");
        assert_eq!(token.decimals(), 18);
        assert_eq!(token.total_supply(), U256::from(1_000_000));
        assert_eq!(token.balance_of(env.get_account(0)), U256::from(1_000_000));
    }

    #[test]
    fn test_supply_matches_balances_after_mints() {
        let (env, mut token) = setup();
        let owner = env.get_account(0);
        let other = env.get_account(1);

        token.mint(other, U256::from(1_000));
        token.mint(owner, U256::from(500));
        token.mint(other, U256::from(1_500));

        assert_eq!(token.total_supply(), U256::from(1_003_000));
        assert_eq!(
            token.total_supply(),
            token.balance_of(owner) + token.balance_of(other)
        );
    }

    #[test]
    fn test_only_minter_can_mint() {
        let (env, mut token) = setup();
        let other = env.get_account(1);

        env.set_caller(other);
        assert_eq!(
            token.try_mint(other, U256::from(1)),
            Err(TokenError::Unauthorized.into())
        );
    }

    #[test]
    fn test_transfer_from_consumes_allowance() {
        let (env, mut token) = setup();
        let owner = env.get_account(0);
        let spender = env.get_account(1);
        let receiver = env.get_account(2);

        token.approve(spender, U256::from(300));

        env.set_caller(spender);
        token.transfer_from(owner, receiver, U256::from(200));
        assert_eq!(token.balance_of(receiver), U256::from(200));
        assert_eq!(token.allowance(owner, spender), U256::from(100));

        assert_eq!(
            token.try_transfer_from(owner, receiver, U256::from(101)),
            Err(TokenError::InsufficientAllowance.into())
        );
    }

    #[test]
    fn test_transfer_over_balance_fails() {
        let (env, mut token) = setup();
        let other = env.get_account(1);

        env.set_caller(other);
        assert_eq!(
            token.try_transfer(env.get_account(2), U256::one()),
            Err(TokenError::InsufficientBalance.into())
        );
    }
}
