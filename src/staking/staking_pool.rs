//! Staking Pool - stake native CSPR, receive LPEth
//!
//! Deposits are credited to an account in wad units and mirrored 1:1 by
//! LPEth minted to that account. Rewards accrue per staked wad at
//! `numerator / denominator` for every `time_unit` seconds and are paid out
//! as freshly minted LPEth.
//!
//! The pool and LPEth reference each other, so deployment is two-phase:
//! the pool is deployed first, LPEth is deployed with the pool address,
//! and `initialize` links LPEth back into the pool.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use super::errors::StakingError;
use super::events::*;
use super::lp_eth::LpEthContractRef;
use crate::math::{MathError, RewardMath, SafeMath, Units, MILLIS_PER_SECOND};

/// Default reward ratio numerator
pub const DEFAULT_REWARD_RATIO_NUMERATOR: u64 = 1;
/// Default reward ratio denominator (1% per time unit)
pub const DEFAULT_REWARD_RATIO_DENOMINATOR: u64 = 100;
/// Default time unit in seconds
pub const DEFAULT_TIME_UNIT: u64 = 3_600;
/// Upper bound of `numerator / denominator` accepted by `set_reward_ratio`
pub const MAX_REWARD_RATIO: u64 = 1_000;

/// Per-account staking record
#[odra::odra_type]
pub struct Staker {
    /// Amount staked (wad)
    pub amount_staked: U256,
    /// Rewards settled but not yet claimed (wad)
    pub unclaimed_rewards: U256,
    /// Pool reward index at the last settlement
    pub reward_index: U256,
    /// Block time of the last settlement (ms)
    pub time_of_last_update: u64,
}

impl Staker {
    fn empty() -> Self {
        Self {
            amount_staked: U256::zero(),
            unclaimed_rewards: U256::zero(),
            reward_index: U256::zero(),
            time_of_last_update: 0,
        }
    }
}

/// Stake summary returned by `get_stake_info`
#[odra::odra_type]
pub struct StakeInfo {
    /// Amount staked (wad)
    pub amount_staked: U256,
    /// Claimable rewards including those accrued since the last update (wad)
    pub unclaimed_rewards: U256,
    /// Block time of the last settlement (ms)
    pub time_of_last_update: u64,
}

/// Staking Pool contract
#[odra::module(
    events = [
        LpEthLinked,
        Staked,
        Withdrawn,
        RewardsClaimed,
        RewardRatioUpdated,
        TimeUnitUpdated,
        MinStakeAmountUpdated,
        OwnershipTransferred,
        Paused,
        Unpaused
    ],
    errors = StakingError
)]
pub struct StakingPool {
    /// Contract owner (deployer)
    owner: Var<Address>,
    /// Linked LPEth token
    lp_eth: Var<Address>,
    /// Staking records by account
    stakers: Mapping<Address, Staker>,
    /// Sum of all staked balances (wad)
    total_staked: Var<U256>,
    /// Reward ratio numerator
    reward_ratio_numerator: Var<U256>,
    /// Reward ratio denominator
    reward_ratio_denominator: Var<U256>,
    /// Reward time unit in seconds
    time_unit: Var<u64>,
    /// Minimum single stake (wad)
    min_stake_amount: Var<U256>,
    /// Cumulative reward per staked wad, scaled by 1e18
    reward_index: Var<U256>,
    /// Block time the reward index was last advanced to (ms)
    last_index_update: Var<u64>,
    /// Paused state
    paused: Var<bool>,
}

#[odra::module]
impl StakingPool {
    /// Initialize the staking pool; the deployer becomes the owner
    pub fn init(&mut self) {
        let caller = self.env().caller();
        self.owner.set(caller);
        self.total_staked.set(U256::zero());
        self.reward_ratio_numerator.set(U256::from(DEFAULT_REWARD_RATIO_NUMERATOR));
        self.reward_ratio_denominator.set(U256::from(DEFAULT_REWARD_RATIO_DENOMINATOR));
        self.time_unit.set(DEFAULT_TIME_UNIT);
        self.min_stake_amount.set(U256::zero());
        self.reward_index.set(U256::zero());
        self.last_index_update.set(self.env().get_block_time());
        self.paused.set(false);
    }

    /// Link the LPEth token
    ///
    /// Repeating the call with the already linked address is a no-op, any
    /// other address reverts with `AlreadyInitialized`.
    pub fn initialize(&mut self, lp_eth: Address) {
        self.only_owner();

        match self.lp_eth.get() {
            Some(linked) if linked == lp_eth => {}
            Some(_) => self.env().revert(StakingError::AlreadyInitialized),
            None => {
                self.lp_eth.set(lp_eth);
                let owner = self.get_owner();
                self.env().emit_event(LpEthLinked {
                    lp_eth,
                    linked_by: owner,
                });
            }
        }
    }

    // ========================================
    // Staking Functions
    // ========================================

    /// Stake the attached CSPR on behalf of `account`
    #[odra(payable)]
    pub fn stake(&mut self, account: Address) {
        self.ensure_not_paused();

        let attached = self.env().attached_value();
        if attached.is_zero() {
            self.env().revert(StakingError::ZeroAmount);
        }

        let amount = self.checked(Units::motes_to_wad(attached));
        if amount < self.min_stake_amount.get_or_default() {
            self.env().revert(StakingError::BelowMinimumStake);
        }

        let mut lp_eth = self.lp_eth_ref();

        self.update_reward_index();
        let mut staker = self.settle(account);
        staker.amount_staked = self.checked(SafeMath::add(staker.amount_staked, amount));
        let new_balance = staker.amount_staked;
        self.stakers.set(&account, staker);

        let total = self.checked(SafeMath::add(self.total_staked(), amount));
        self.total_staked.set(total);

        lp_eth.mint(account, amount);

        self.env().emit_event(Staked {
            staker: self.env().caller(),
            account,
            amount,
            new_balance,
            timestamp: self.env().get_block_time(),
        });
    }

    /// Withdraw the full staked balance of `account`
    ///
    /// Burns the matching LPEth and returns the CSPR. Accrued rewards stay
    /// claimable.
    pub fn withdraw(&mut self, account: Address) {
        if self.env().caller() != account {
            self.env().revert(StakingError::Unauthorized);
        }

        self.update_reward_index();
        let mut staker = self.settle(account);

        let amount = staker.amount_staked;
        if amount.is_zero() {
            self.env().revert(StakingError::NothingToWithdraw);
        }

        staker.amount_staked = U256::zero();
        self.stakers.set(&account, staker);

        let total = self.checked(SafeMath::sub(self.total_staked(), amount));
        self.total_staked.set(total);

        let mut lp_eth = self.lp_eth_ref();
        lp_eth.burn(account, amount);

        let motes = self.checked(Units::wad_to_motes(amount));
        self.env().transfer_tokens(&account, &motes);

        self.env().emit_event(Withdrawn {
            account,
            amount,
            timestamp: self.env().get_block_time(),
        });
    }

    /// Mint all accrued rewards to the caller as LPEth
    pub fn claim_rewards(&mut self) {
        self.ensure_not_paused();

        let caller = self.env().caller();
        self.update_reward_index();
        let mut staker = self.settle(caller);

        let rewards = staker.unclaimed_rewards;
        if rewards.is_zero() {
            self.env().revert(StakingError::NoRewardsToClaim);
        }

        staker.unclaimed_rewards = U256::zero();
        self.stakers.set(&caller, staker);

        let mut lp_eth = self.lp_eth_ref();
        lp_eth.mint(caller, rewards);

        self.env().emit_event(RewardsClaimed {
            account: caller,
            reward_amount: rewards,
            timestamp: self.env().get_block_time(),
        });
    }

    // ========================================
    // View Functions
    // ========================================

    /// Staked balance of `account` (wad)
    pub fn staked_balance(&self, account: Address) -> U256 {
        self.stakers
            .get(&account)
            .map(|staker| staker.amount_staked)
            .unwrap_or_default()
    }

    /// Stake summary for `account`, zeroed for unknown accounts
    pub fn get_stake_info(&self, account: Address) -> StakeInfo {
        let staker = self.stakers.get(&account).unwrap_or_else(Staker::empty);

        let mut unclaimed_rewards = staker.unclaimed_rewards;
        if !staker.amount_staked.is_zero() {
            let index = self.checked(self.current_reward_index());
            let pending = self.checked(RewardMath::pending(
                staker.amount_staked,
                index,
                staker.reward_index,
            ));
            unclaimed_rewards = unclaimed_rewards.saturating_add(pending);
        }

        StakeInfo {
            amount_staked: staker.amount_staked,
            unclaimed_rewards,
            time_of_last_update: staker.time_of_last_update,
        }
    }

    pub fn total_staked(&self) -> U256 {
        self.total_staked.get_or_default()
    }

    /// Reward ratio as (numerator, denominator)
    pub fn get_reward_ratio(&self) -> (U256, U256) {
        (
            self.reward_ratio_numerator.get_or_default(),
            self.reward_ratio_denominator.get_or_default(),
        )
    }

    pub fn get_time_unit(&self) -> u64 {
        self.time_unit.get_or_default()
    }

    pub fn get_min_stake_amount(&self) -> U256 {
        self.min_stake_amount.get_or_default()
    }

    pub fn get_lp_eth(&self) -> Option<Address> {
        self.lp_eth.get()
    }

    pub fn get_owner(&self) -> Address {
        self.owner.get_or_revert_with(StakingError::Unauthorized)
    }

    pub fn is_paused(&self) -> bool {
        self.paused.get_or_default()
    }

    // ========================================
    // Admin Functions
    // ========================================

    /// Update the reward ratio; accrual up to now uses the old ratio.
    /// The ratio may not exceed [`MAX_REWARD_RATIO`].
    pub fn set_reward_ratio(&mut self, numerator: U256, denominator: U256) {
        self.only_owner();

        let max_numerator = denominator.saturating_mul(U256::from(MAX_REWARD_RATIO));
        if denominator.is_zero() || numerator > max_numerator {
            self.env().revert(StakingError::InvalidRewardRatio);
        }

        self.update_reward_index();

        let (old_numerator, old_denominator) = self.get_reward_ratio();
        self.reward_ratio_numerator.set(numerator);
        self.reward_ratio_denominator.set(denominator);

        self.env().emit_event(RewardRatioUpdated {
            old_numerator,
            old_denominator,
            new_numerator: numerator,
            new_denominator: denominator,
            updated_by: self.get_owner(),
        });
    }

    /// Update the reward time unit (seconds); accrual up to now uses the old unit
    pub fn set_time_unit(&mut self, time_unit: u64) {
        self.only_owner();

        if time_unit == 0 {
            self.env().revert(StakingError::InvalidTimeUnit);
        }

        self.update_reward_index();

        let old_time_unit = self.get_time_unit();
        self.time_unit.set(time_unit);

        self.env().emit_event(TimeUnitUpdated {
            old_time_unit,
            new_time_unit: time_unit,
            updated_by: self.get_owner(),
        });
    }

    /// Update the minimum single stake (wad)
    pub fn set_min_stake_amount(&mut self, amount: U256) {
        self.only_owner();

        let old_minimum = self.get_min_stake_amount();
        self.min_stake_amount.set(amount);

        self.env().emit_event(MinStakeAmountUpdated {
            old_minimum,
            new_minimum: amount,
            updated_by: self.get_owner(),
        });
    }

    pub fn pause(&mut self) {
        self.only_owner();
        self.paused.set(true);

        self.env().emit_event(Paused {
            paused_by: self.get_owner(),
            timestamp: self.env().get_block_time(),
        });
    }

    pub fn unpause(&mut self) {
        self.only_owner();
        self.paused.set(false);

        self.env().emit_event(Unpaused {
            unpaused_by: self.get_owner(),
            timestamp: self.env().get_block_time(),
        });
    }

    /// Hand configuration rights to `new_owner`
    pub fn transfer_ownership(&mut self, new_owner: Address) {
        self.only_owner();

        let previous_owner = self.get_owner();
        self.owner.set(new_owner);

        self.env().emit_event(OwnershipTransferred {
            previous_owner,
            new_owner,
        });
    }

    // ========================================
    // Internal Functions
    // ========================================

    /// Advance the reward index by the whole seconds elapsed since the last update.
    /// Saturates at `U256::MAX`.
    fn update_reward_index(&mut self) {
        let now = self.env().get_block_time();
        let last = self.last_index_update.get_or_default();
        let elapsed = now.saturating_sub(last);
        let whole_ms = elapsed - elapsed % MILLIS_PER_SECOND;
        if whole_ms == 0 {
            return;
        }

        let delta = self.checked(self.index_delta(whole_ms));
        let index = self.reward_index.get_or_default().saturating_add(delta);
        self.reward_index.set(index);
        self.last_index_update.set(last + whole_ms);
    }

    /// Reward index as of the current block time, without writing it.
    fn current_reward_index(&self) -> Result<U256, MathError> {
        let now = self.env().get_block_time();
        let elapsed = now.saturating_sub(self.last_index_update.get_or_default());
        let delta = self.index_delta(elapsed)?;
        Ok(self.reward_index.get_or_default().saturating_add(delta))
    }

    fn index_delta(&self, elapsed_ms: u64) -> Result<U256, MathError> {
        let (numerator, denominator) = self.get_reward_ratio();
        RewardMath::index_delta(elapsed_ms, numerator, denominator, self.get_time_unit())
    }

    /// Move pending rewards of `account` into `unclaimed_rewards` and
    /// snapshot the index. The index must be up to date.
    fn settle(&self, account: Address) -> Staker {
        let mut staker = self.stakers.get(&account).unwrap_or_else(Staker::empty);
        let index = self.reward_index.get_or_default();

        let pending = self.checked(RewardMath::pending(
            staker.amount_staked,
            index,
            staker.reward_index,
        ));
        staker.unclaimed_rewards = staker.unclaimed_rewards.saturating_add(pending);
        staker.reward_index = index;
        staker.time_of_last_update = self.env().get_block_time();
        staker
    }

    fn lp_eth_ref(&self) -> LpEthContractRef {
        let address = self.lp_eth.get_or_revert_with(StakingError::NotInitialized);
        LpEthContractRef::new(self.env(), address)
    }

    fn only_owner(&self) {
        let caller = self.env().caller();
        let owner = self.owner.get_or_revert_with(StakingError::Unauthorized);
        if caller != owner {
            self.env().revert(StakingError::Unauthorized);
        }
    }

    fn ensure_not_paused(&self) {
        if self.paused.get_or_default() {
            self.env().revert(StakingError::ContractPaused);
        }
    }
}

impl StakingPool {
    /// Unwraps a math result, reverting with the matching [`StakingError`].
    fn checked<T>(&self, result: Result<T, MathError>) -> T {
        result.unwrap_or_else(|error| self.env().revert(StakingError::from(error)))
    }
}
