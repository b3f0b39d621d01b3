//! LPEth - liquidity token backed by the staking pool
//!
//! One LPEth is minted for every wad of native currency staked and burned
//! again when the stake is withdrawn. Rewards are paid out as extra LPEth.

use odra::prelude::*;
use odra::casper_types::U256;
use super::errors::TokenError;
use super::events::{Approval, Transfer};

/// LPEth token
/// The staking pool address is fixed at construction and is the only
/// account allowed to mint and burn.
#[odra::module(events = [Transfer, Approval], errors = TokenError)]
pub struct LpEth {
    /// Token name
    name: Var<String>,
    /// Token symbol
    symbol: Var<String>,
    /// Token decimals (18, wad)
    decimals: Var<u8>,
    /// Total supply of LPEth
    total_supply: Var<U256>,
    /// Balance mapping: owner -> balance
    balances: Mapping<Address, U256>,
    /// Allowance mapping: owner -> spender -> amount
    allowances: Mapping<(Address, Address), U256>,
    /// Staking pool allowed to mint and burn
    staking_pool: Var<Address>,
}

#[odra::module]
impl LpEth {
    /// Initialize LPEth bound to a staking pool
    pub fn init(&mut self, staking_pool: Address) {
        self.name.set(String::from("LP Ether"));
        self.symbol.set(String::from("LPETH"));
        self.decimals.set(18);
        self.total_supply.set(U256::zero());
        self.staking_pool.set(staking_pool);
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

    /// Get the balance of an address
    pub fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&owner).unwrap_or_default()
    }

    /// Get the allowance for a spender
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

    /// Mint LPEth (staking pool only)
    pub fn mint(&mut self, to: Address, amount: U256) {
        self.only_staking_pool();

        let new_supply = self.total_supply()
            .checked_add(amount)
            .unwrap_or_revert_with(&self.env(), TokenError::Overflow);
        self.total_supply.set(new_supply);

        let current_balance = self.balance_of(to);
        self.balances.set(&to, current_balance + amount);

        self.env().emit_event(Transfer {
            from: Address::from(self.env().self_address()),
            to,
            value: amount,
        });
    }

    /// Burn LPEth (staking pool only)
    pub fn burn(&mut self, from: Address, amount: U256) {
        self.only_staking_pool();

        let current_balance = self.balance_of(from);
        if current_balance < amount {
            self.env().revert(TokenError::InsufficientBalance);
        }

        self.balances.set(&from, current_balance - amount);
        let current_supply = self.total_supply();
        self.total_supply.set(current_supply - amount);

        self.env().emit_event(Transfer {
            from,
            to: Address::from(self.env().self_address()),
            value: amount,
        });
    }

    /// Get the staking pool address
    pub fn get_staking_pool(&self) -> Address {
        self.staking_pool.get_or_revert_with(TokenError::Unauthorized)
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

    fn only_staking_pool(&self) {
        let caller = self.env().caller();
        let pool = self.staking_pool.get_or_revert_with(TokenError::Unauthorized);
        if caller != pool {
            self.env().revert(TokenError::Unauthorized);
        }
    }
}
